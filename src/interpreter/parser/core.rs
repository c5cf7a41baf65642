use std::iter::Peekable;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{binary::parse_additive, block::parse_statement_list, utils::unexpected},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting the parser accepts.
///
/// Every block, parenthesis, `!`, argument list and binary operator adds a
/// level. Evaluation recurses along the same structure, so the bound also
/// keeps evaluation off the end of the native stack.
pub const MAX_NESTING: usize = 256;

/// Parses a whole token sequence into a [`Program`].
///
/// Grammar: `program := statement*`
///
/// The statement list stops at a `}` or at the end of input. At the top level
/// only the end of input is acceptable, so a stray `}` is reported instead of
/// silently dropping everything after it.
///
/// # Errors
/// Returns the first `ParseError` encountered.
///
/// # Example
/// ```
/// use plume::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let tokens = tokenize("x = 1; print(x);").unwrap();
/// let program = parse_program(&tokens).unwrap();
///
/// assert_eq!(program.statements.len(), 2);
/// ```
pub fn parse_program(tokens: &[Spanned]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let statements = parse_statement_list(&mut iter, 0)?;

    if let Some((tok @ Token::RBrace, position)) = iter.next() {
        return Err(unexpected(tok, "a statement", *position));
    }

    tracing::debug!(statements = statements.len(), "parsed program");
    Ok(Program { statements })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence tier, which holds `+`, `-`, every comparison and both
/// logical operators, and descends through the multiplicative tier to
/// factors.
///
/// Grammar: `expression := additive`
///
/// `depth` is the nesting level the expression starts at; see
/// [`MAX_NESTING`].
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    parse_additive(tokens, depth)
}
