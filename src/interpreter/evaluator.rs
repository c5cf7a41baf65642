/// Binary operator evaluation logic.
///
/// Handles arithmetic, string concatenation and repetition, comparisons and
/// the logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements logical NOT.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, the statement and expression dispatch, the
/// control-flow result and the program entry points.
pub mod core;

/// Evaluation of `if` and `while`.
pub mod control;

/// Environment helpers: the current environment, assignment and lookup.
pub mod utils;

/// Function evaluation.
///
/// Handles function definition, argument checking, the per-call environment
/// and return value computation.
pub mod function;
