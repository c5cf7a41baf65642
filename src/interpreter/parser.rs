/// Parser entry points.
///
/// Contains the program-level entry point, the expression entry point and the
/// shared result alias.
pub mod core;

/// Factor parsing.
///
/// Handles literals, variables, calls, parenthesized expressions and the
/// prefix `!` operator.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the two left-associative precedence tiers: additive
/// (`+ -`, comparisons, `&& ||`) and multiplicative (`* / % // **`).
pub mod binary;

/// Block parsing.
///
/// Parses statement lists and brace-delimited blocks.
pub mod block;

/// Utility functions for the parser.
///
/// Provides token expectations, identifier parsing and comma-separated lists.
pub mod utils;

/// Statement parsing.
///
/// Implements assignments, call statements, function definitions, `print`,
/// `if`, `while` and `return`.
pub mod statement;
