/// Numeric conversion helpers.
///
/// Conversions from `i64` to `u32` and `usize` that report a runtime error
/// instead of truncating.
pub mod num;
