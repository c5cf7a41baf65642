//! # plume
//!
//! plume is a small dynamically typed scripting language written in Rust.
//! Programs are made of assignments, `print`, `if`/`else if`/`else`, `while`
//! and named functions with `return`. Every call runs in a copy of its
//! caller's variables, so a function can read everything the caller sees but
//! its writes never leak back.
//!
//! ```
//! let execution = plume::run("
//!     function square(n) { return n * n; }
//!     i = 1;
//!     while (i <= 3) { print(square(i)); i = i + 1; }
//! ").unwrap();
//!
//! assert_eq!(execution.output, vec!["1", "4", "9"]);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        evaluator::core::Context,
        lexer::tokenize,
        parser::core::parse_program,
    },
};

pub use crate::interpreter::{
    evaluator::core::{Execution, Options},
    value::core::Value,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of a program as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing or
/// evaluating code. Every message carries the source line it refers to.
///
/// # Responsibilities
/// - Defines error enums for both phases and an umbrella [`error::Error`].
/// - Attaches line numbers and detailed messages for context.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides the persistent [`interpreter::evaluator::core::Context`].
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u32`, `usize` and `f64` without silent
///   data loss.
pub mod util;

/// Tokenizes and parses `source` into a [`Program`].
///
/// # Errors
/// Returns the first lexical or syntax error.
///
/// # Examples
/// ```
/// let program = plume::parse("x = 1; if (x) { print(x); }").unwrap();
/// assert_eq!(program.statements.len(), 2);
///
/// assert!(plume::parse("x = ;").is_err());
/// ```
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    parse_program(&tokens)
}

/// Runs a parsed program in a fresh context with default [`Options`].
///
/// # Errors
/// Returns the first runtime error raised by the program.
///
/// # Examples
/// ```
/// use plume::Value;
///
/// let program = plume::parse("print(\"hi\"); return 7 // 2;").unwrap();
/// let execution = plume::evaluate(&program).unwrap();
///
/// assert_eq!(execution.output, vec!["hi"]);
/// assert_eq!(execution.value, Some(Value::Integer(3)));
/// ```
pub fn evaluate(program: &Program) -> Result<Execution, RuntimeError> {
    Context::new().run_program(program)
}

/// Parses and runs `source` in a fresh context with default [`Options`].
///
/// # Errors
/// Returns [`Error::Parse`] or [`Error::Runtime`] for the phase that failed.
///
/// # Examples
/// ```
/// let execution = plume::run("function add(a, b) { return a + b; } print(add(2, 3));")
///     .unwrap();
/// assert_eq!(execution.output, vec!["5"]);
///
/// // Calling with the wrong number of arguments fails.
/// let error = plume::run("function add(a, b) { return a + b; } add(2);").unwrap_err();
/// assert_eq!(error.to_string(),
///            "Error on line 1: Function 'add' takes 2 argument(s) but 1 were given.");
/// ```
pub fn run(source: &str) -> Result<Execution, Error> {
    Context::new().run_source(source)
}
