/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code: invalid characters, unexpected tokens and premature end of input.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: unknown
/// names, arity mismatches, type errors, division by zero, overflow and the
/// call depth limit.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
use thiserror::Error;

/// Any failure of [`crate::run`]: either the source did not parse or the
/// program failed while running.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Lexing or parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
