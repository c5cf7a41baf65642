use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{Number, Value},
    },
    util::num::repeat_count,
};

impl Context {
    /// Evaluates `+`, `-`, `*`, `/`, `//` or `%`.
    ///
    /// Strings take part in two operations: `+` on two strings concatenates
    /// them and `*` of a string by an integer (on either side) repeats it.
    /// Everything else works on numbers, with booleans counting as `0` and
    /// `1`:
    /// - two integers use checked integer arithmetic, except `/`, which always
    ///   produces a real;
    /// - any real operand promotes the operation to reals;
    /// - `//` rounds toward negative infinity;
    /// - the sign of `%` follows the divisor.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed value.
    ///
    /// # Errors
    /// - `DivisionByZero` for a zero divisor of `/`, `//` or `%`.
    /// - `Overflow` if an integer result leaves the 64-bit range.
    /// - `TypeError` for operands the operator does not accept.
    ///
    /// # Example
    /// ```
    /// use plume::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_arithmetic(BinaryOperator::Mod,
    ///                                       &Value::Integer(-7),
    ///                                       &Value::Integer(3),
    ///                                       1).unwrap();
    /// assert_eq!(result, Value::Integer(2));
    ///
    /// let result = Context::eval_arithmetic(BinaryOperator::Mul,
    ///                                       &Value::from("ab"),
    ///                                       &Value::Integer(3),
    ///                                       1).unwrap();
    /// assert_eq!(result, Value::from("ababab"));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        match (op, left, right) {
            (BinaryOperator::Add, Value::Str(a), Value::Str(b)) => {
                return Ok(Value::from(format!("{a}{b}")));
            },
            (BinaryOperator::Mul, Value::Str(s), count) | (BinaryOperator::Mul, count, Value::Str(s)) => {
                if let Some(Number::Integer(n)) = count.as_number() {
                    return repeat_str(s, n, line).map(Value::from);
                }
            },
            _ => {},
        }

        let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
            return Err(RuntimeError::TypeError { details: format!("cannot apply '{op}' to {} and {}",
                                                                  left.type_name(),
                                                                  right.type_name()),
                                                 line });
        };

        match (a, b) {
            (Number::Integer(a), Number::Integer(b)) if op != BinaryOperator::Div => {
                integer_op(op, a, b, line).map(Value::Integer)
            },
            _ => real_op(op, a.to_real(), b.to_real(), line).map(Value::Real),
        }
    }
}

/// Repeats `s` `count` times. A count of zero or less gives the empty string.
///
/// # Errors
/// Returns `Overflow` if the result cannot be allocated.
fn repeat_str(s: &str, count: i64, line: usize) -> EvalResult<String> {
    let count = repeat_count(count, line)?;
    let total = s.len()
                 .checked_mul(count)
                 .ok_or(RuntimeError::Overflow { line })?;
    if total == 0 {
        return Ok(String::new());
    }

    let mut repeated = String::new();
    repeated.try_reserve_exact(total)
            .map_err(|_| RuntimeError::Overflow { line })?;
    repeated.extend(std::iter::repeat_n(s, count));
    Ok(repeated)
}

/// Applies an arithmetic operator to two integers.
fn integer_op(op: BinaryOperator, a: i64, b: i64, line: usize) -> EvalResult<i64> {
    use BinaryOperator::{Add, FloorDiv, Mod, Mul, Sub};

    if matches!(op, FloorDiv | Mod) && b == 0 {
        return Err(RuntimeError::DivisionByZero { line });
    }
    let result = match op {
        Add => a.checked_add(b),
        Sub => a.checked_sub(b),
        Mul => a.checked_mul(b),
        FloorDiv => a.checked_div(b).map(|q| {
                                        if q * b != a && (a < 0) != (b < 0) { q - 1 } else { q }
                                    }),
        // `i64::MIN % -1` is 0; only the quotient overflows.
        Mod => {
            let r = a.wrapping_rem(b);
            Some(if r != 0 && (r < 0) != (b < 0) { r + b } else { r })
        },
        _ => unreachable!("integer_op used with '{op}'"),
    };
    result.ok_or(RuntimeError::Overflow { line })
}

/// Applies an arithmetic operator to two reals.
fn real_op(op: BinaryOperator, a: f64, b: f64, line: usize) -> EvalResult<f64> {
    use BinaryOperator::{Add, Div, FloorDiv, Mod, Mul, Sub};

    if matches!(op, Div | FloorDiv | Mod) && b == 0.0 {
        return Err(RuntimeError::DivisionByZero { line });
    }
    Ok(match op {
        Add => a + b,
        Sub => a - b,
        Mul => a * b,
        Div => a / b,
        FloorDiv => (a / b).floor(),
        Mod => {
            let r = a % b;
            if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r }
        },
        _ => unreachable!("real_op used with '{op}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(op: BinaryOperator, left: impl Into<Value>, right: impl Into<Value>) -> EvalResult<Value> {
        Context::eval_arithmetic(op, &left.into(), &right.into(), 1)
    }

    #[test]
    fn integer_arithmetic_stays_integral() {
        assert_eq!(apply(BinaryOperator::Add, 2, 3), Ok(Value::Integer(5)));
        assert_eq!(apply(BinaryOperator::Sub, 2, 3), Ok(Value::Integer(-1)));
        assert_eq!(apply(BinaryOperator::Mul, 4, 3), Ok(Value::Integer(12)));
    }

    #[test]
    fn division_is_always_real() {
        assert_eq!(apply(BinaryOperator::Div, 7, 2), Ok(Value::Real(3.5)));
        assert_eq!(apply(BinaryOperator::Div, 6, 3), Ok(Value::Real(2.0)));
    }

    #[test]
    fn floor_division_rounds_down() {
        assert_eq!(apply(BinaryOperator::FloorDiv, 7, 2), Ok(Value::Integer(3)));
        assert_eq!(apply(BinaryOperator::FloorDiv, -7, 2), Ok(Value::Integer(-4)));
        assert_eq!(apply(BinaryOperator::FloorDiv, 7, -2), Ok(Value::Integer(-4)));
        assert_eq!(apply(BinaryOperator::FloorDiv, -8, 2), Ok(Value::Integer(-4)));
        assert_eq!(apply(BinaryOperator::FloorDiv, 7.5, 2), Ok(Value::Real(3.0)));
    }

    #[test]
    fn modulo_follows_the_divisor() {
        assert_eq!(apply(BinaryOperator::Mod, 7, 3), Ok(Value::Integer(1)));
        assert_eq!(apply(BinaryOperator::Mod, -7, 3), Ok(Value::Integer(2)));
        assert_eq!(apply(BinaryOperator::Mod, 7, -3), Ok(Value::Integer(-2)));
        assert_eq!(apply(BinaryOperator::Mod, -7.5, 2), Ok(Value::Real(0.5)));
    }

    #[test]
    fn zero_divisors_fail() {
        for op in [BinaryOperator::Div, BinaryOperator::FloorDiv, BinaryOperator::Mod] {
            assert_eq!(apply(op, 1, 0), Err(RuntimeError::DivisionByZero { line: 1 }));
            assert_eq!(apply(op, 1.0, 0.0), Err(RuntimeError::DivisionByZero { line: 1 }));
        }
    }

    #[test]
    fn integer_overflow_is_reported() {
        assert_eq!(apply(BinaryOperator::Add, i64::MAX, 1), Err(RuntimeError::Overflow { line: 1 }));
        assert_eq!(apply(BinaryOperator::FloorDiv, i64::MIN, -1),
                   Err(RuntimeError::Overflow { line: 1 }));
    }

    #[test]
    fn remainder_of_min_by_minus_one_is_zero() {
        assert_eq!(apply(BinaryOperator::Mod, i64::MIN, -1), Ok(Value::Integer(0)));
    }

    #[test]
    fn large_integers_round_when_promoted() {
        let x = 9_007_199_254_740_993_i64;
        assert_eq!(apply(BinaryOperator::Div, x, 1), Ok(Value::Real(9_007_199_254_740_992.0)));
        assert_eq!(apply(BinaryOperator::Add, 10_000_000_000_000_000_i64, 0.5),
                   Ok(Value::Real(10_000_000_000_000_000.0)));
    }

    #[test]
    fn oversized_repetition_overflows() {
        assert_eq!(apply(BinaryOperator::Mul, "ab", 9_000_000_000_000_000_000_i64),
                   Err(RuntimeError::Overflow { line: 1 }));
        assert_eq!(apply(BinaryOperator::Mul, "", 9_000_000_000_000_000_000_i64), Ok(Value::from("")));
    }

    #[test]
    fn mixed_operands_promote_to_real() {
        assert_eq!(apply(BinaryOperator::Add, 1, 0.5), Ok(Value::Real(1.5)));
        assert_eq!(apply(BinaryOperator::Mul, true, 4), Ok(Value::Integer(4)));
    }

    #[test]
    fn strings_concatenate_and_repeat() {
        assert_eq!(apply(BinaryOperator::Add, "foo", "bar"), Ok(Value::from("foobar")));
        assert_eq!(apply(BinaryOperator::Mul, 2, "ab"), Ok(Value::from("abab")));
        assert_eq!(apply(BinaryOperator::Mul, "ab", -1), Ok(Value::from("")));
    }

    #[test]
    fn mismatched_operands_are_type_errors() {
        assert!(matches!(apply(BinaryOperator::Add, "a", 1), Err(RuntimeError::TypeError { .. })));
        assert!(matches!(apply(BinaryOperator::Mul, "a", 1.5), Err(RuntimeError::TypeError { .. })));
        assert!(matches!(apply(BinaryOperator::Sub, "a", "b"), Err(RuntimeError::TypeError { .. })));
        assert!(matches!(Context::eval_arithmetic(BinaryOperator::Add, &Value::Nil, &Value::Integer(1), 1),
                         Err(RuntimeError::TypeError { .. })));
    }
}
