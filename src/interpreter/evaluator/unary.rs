use crate::{
    ast::UnaryOperator,
    interpreter::{evaluator::core::Context, value::core::Value},
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// The only unary operator is `Not`, which yields the boolean negation of
    /// the operand's truthiness. It accepts every value, so it cannot fail.
    ///
    /// # Example
    /// ```
    /// use plume::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// assert_eq!(Context::eval_unary(UnaryOperator::Not, &Value::Integer(0)),
    ///            Value::Bool(true));
    /// assert_eq!(Context::eval_unary(UnaryOperator::Not, &Value::from("text")),
    ///            Value::Bool(false));
    /// ```
    #[must_use]
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> Value {
        match op {
            UnaryOperator::Not => Value::Bool(!value.is_truthy()),
        }
    }
}
