use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Converts a non-negative `i64` exponent to `u32` for `checked_pow`.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the exponent does not fit, since any
/// base other than `-1`, `0` and `1` would overflow anyway.
pub fn exponent_to_u32(value: i64, line: usize) -> EvalResult<u32> {
    u32::try_from(value).map_err(|_| RuntimeError::Overflow { line })
}

/// Converts a repetition count to `usize`, clamping negative counts to zero.
///
/// ## Example
/// ```
/// use plume::util::num::repeat_count;
///
/// assert_eq!(repeat_count(3, 1).unwrap(), 3);
/// assert_eq!(repeat_count(-2, 1).unwrap(), 0);
/// ```
pub fn repeat_count(value: i64, line: usize) -> EvalResult<usize> {
    if value < 0 {
        return Ok(0);
    }
    usize::try_from(value).map_err(|_| RuntimeError::Overflow { line })
}
