/// Operator dispatch.
pub mod core;

/// Arithmetic on numbers and strings: `+ - * / // %`.
pub mod arithmetic;

/// Exponentiation.
pub mod power;

/// Equality and ordering.
pub mod comparison;

/// Non-short-circuit `&&` and `||`.
pub mod logic;
