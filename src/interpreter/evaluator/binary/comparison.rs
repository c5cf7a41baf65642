use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `==` and `!=` accept any pair of values: numbers compare numerically
    /// across integer, real and boolean, strings compare by content and values
    /// of different kinds are unequal.
    ///
    /// `<`, `>`, `<=` and `>=` are defined for two numbers or for two strings
    /// (lexicographic byte order). A comparison involving NaN is false.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use plume::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less,
    ///                                       &Value::Integer(3),
    ///                                       &Value::Real(5.0),
    ///                                       1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Equal,
    ///                                       &Value::from("1"),
    ///                                       &Value::Integer(1),
    ///                                       1);
    /// assert_eq!(result.unwrap(), Value::Bool(false));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        let ordering = match op {
            Equal => return Ok(Value::Bool(left.loosely_equals(right))),
            NotEqual => return Ok(Value::Bool(!left.loosely_equals(right))),
            _ => order(left, right).ok_or_else(|| {
                                       RuntimeError::TypeError { details: format!("cannot compare {} with {} using '{op}'",
                                                                                  left.type_name(),
                                                                                  right.type_name()),
                                                                 line }
                                   })?,
        };

        let result = ordering.is_some_and(|ordering| match op {
                                 Less => ordering == Ordering::Less,
                                 Greater => ordering == Ordering::Greater,
                                 LessEqual => ordering != Ordering::Greater,
                                 GreaterEqual => ordering != Ordering::Less,
                                 _ => unreachable!("eval_comparison used with '{op}'"),
                             });
        Ok(Value::Bool(result))
    }
}

/// Orders two comparable values.
///
/// The outer `None` means the kinds cannot be ordered at all; the inner `None`
/// means they can, but the result is unordered (NaN).
fn order(left: &Value, right: &Value) -> Option<Option<Ordering>> {
    if let (Value::Str(a), Value::Str(b)) = (left, right) {
        return Some(Some(a.cmp(b)));
    }
    let (a, b) = (left.as_number()?, right.as_number()?);
    Some(a.compare(b))
}
