use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Position, Spanned, Token},
        parser::core::{MAX_NESTING, ParseResult},
    },
};

/// Builds the error for a token the grammar does not allow at this point.
pub(in crate::interpreter::parser) fn unexpected(token: &Token,
                                                 expected: &str,
                                                 position: Position)
                                                 -> ParseError {
    ParseError::UnexpectedToken { found: format!("'{token}'"),
                                  expected: expected.to_string(),
                                  position }
}

/// Builds the error for input that ends in the middle of a construct.
pub(in crate::interpreter::parser) fn end_of_input(expected: &str) -> ParseError {
    ParseError::UnexpectedEndOfInput { expected: expected.to_string() }
}

/// Fails once `depth` exceeds [`MAX_NESTING`].
///
/// The error points at the next token, which is where the extra level would
/// have started.
pub(in crate::interpreter::parser) fn check_nesting<'a, I>(tokens: &mut Peekable<I>,
                                                           depth: usize)
                                                           -> ParseResult<()>
    where I: Iterator<Item = &'a Spanned>
{
    if depth <= MAX_NESTING {
        return Ok(());
    }
    let position = tokens.peek().map_or_else(Position::default, |(_, position)| *position);
    Err(ParseError::NestingTooDeep { limit: MAX_NESTING,
                                     position })
}

/// Consumes the next token, which must equal `expected`.
///
/// # Returns
/// The position of the consumed token.
///
/// # Errors
/// Returns a `ParseError` naming `expected` if a different token follows or
/// the input ends.
pub(in crate::interpreter::parser) fn expect_token<'a, I>(tokens: &mut Peekable<I>,
                                                          expected: &Token)
                                                          -> ParseResult<Position>
    where I: Iterator<Item = &'a Spanned>
{
    let description = format!("'{expected}'");
    match tokens.next() {
        Some((tok, position)) if tok == expected => Ok(*position),
        Some((tok, position)) => Err(unexpected(tok, &description, *position)),
        None => Err(end_of_input(&description)),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by parameter lists and argument lists. It
/// repeatedly calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the given closing token, to end it.
///
/// An immediately encountered closing token produces an empty list. The
/// closing token is consumed.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    let expected = format!("',' or '{closing}'");
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            Some((tok, position)) => return Err(unexpected(tok, &expected, *position)),
            None => return Err(end_of_input(&expected)),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// Keywords are separate tokens, so a reserved word never parses as an
/// identifier.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, position)) => Err(unexpected(tok, "an identifier", *position)),
        None => Err(end_of_input("an identifier")),
    }
}
