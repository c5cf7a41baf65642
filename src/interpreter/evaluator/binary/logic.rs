use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::Context, value::core::Value},
};

impl Context {
    /// Evaluates `&&` or `||` on two values.
    ///
    /// The result is one of the operands, not necessarily a boolean:
    /// - `a && b` is `b` if `a` is truthy, otherwise `a`.
    /// - `a || b` is `a` if `a` is truthy, otherwise `b`.
    ///
    /// # Example
    /// ```
    /// use plume::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let empty = Value::from("");
    /// let name = Value::from("plume");
    ///
    /// assert_eq!(Context::eval_logic(BinaryOperator::Or, &empty, &name), name);
    /// assert_eq!(Context::eval_logic(BinaryOperator::And, &empty, &name), empty);
    /// ```
    #[must_use]
    pub fn eval_logic(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        let pick_right = match op {
            BinaryOperator::And => left.is_truthy(),
            BinaryOperator::Or => !left.is_truthy(),
            _ => unreachable!("eval_logic used with a non-logical operator"),
        };
        if pick_right { right.clone() } else { left.clone() }
    }
}
