use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{Number, Value},
    },
    util::num::exponent_to_u32,
};

impl Context {
    /// Evaluates an exponentiation operation.
    ///
    /// Integer–integer exponentiation with a non-negative exponent uses checked
    /// arithmetic and stays an integer. A negative integer exponent produces a
    /// real, and raising zero to one is a division by zero. In all other
    /// cases, operands are promoted to real numbers and evaluated with `powf`.
    /// Booleans count as `0` and `1`.
    ///
    /// # Parameters
    /// - `base`: The base value.
    /// - `exponent`: The exponent value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the result of `base ** exponent`.
    ///
    /// # Example
    /// ```
    /// use plume::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let result = Context::eval_pow(&Value::Integer(2), &Value::Integer(10), 1).unwrap();
    /// assert_eq!(result, Value::Integer(1024));
    ///
    /// let result = Context::eval_pow(&Value::Integer(2), &Value::Integer(-1), 1).unwrap();
    /// assert_eq!(result, Value::Real(0.5));
    /// ```
    pub fn eval_pow(base: &Value, exponent: &Value, line: usize) -> EvalResult<Value> {
        let (Some(b), Some(e)) = (base.as_number(), exponent.as_number()) else {
            return Err(RuntimeError::TypeError { details: format!("cannot raise {} to {}",
                                                                  base.type_name(),
                                                                  exponent.type_name()),
                                                 line });
        };

        match (b, e) {
            (Number::Integer(b), Number::Integer(e)) if e >= 0 => {
                b.checked_pow(exponent_to_u32(e, line)?)
                 .map(Value::Integer)
                 .ok_or(RuntimeError::Overflow { line })
            },
            (Number::Integer(0), Number::Integer(_)) => Err(RuntimeError::DivisionByZero { line }),
            _ => Ok(Value::Real(b.to_real().powf(e.to_real()))),
        }
    }
}
