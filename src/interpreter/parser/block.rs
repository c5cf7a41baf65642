use std::iter::Peekable;

use crate::{
    ast::Statement,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{check_nesting, expect_token},
        },
    },
};

/// Parses statements until a closing `}` or the end of input.
///
/// The closing brace is left in the stream for the caller.
///
/// Grammar: `statement_list := statement*`
///
/// # Errors
/// Fails if a statement does not parse or `depth` is past the nesting limit.
pub fn parse_statement_list<'a, I>(tokens: &mut Peekable<I>,
                                   depth: usize)
                                   -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    check_nesting(tokens, depth)?;
    let mut statements = Vec::new();

    while tokens.peek().is_some_and(|(token, _)| *token != Token::RBrace) {
        statements.push(parse_statement(tokens, depth)?);
    }

    Ok(statements)
}

/// Parses a block delimited by braces.
///
/// Grammar: `block := "{" statement_list "}"`
///
/// # Errors
/// Fails if either brace is missing or a statement inside fails to parse.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    expect_token(tokens, &Token::LBrace)?;
    let statements = parse_statement_list(tokens, depth + 1)?;
    expect_token(tokens, &Token::RBrace)?;

    Ok(statements)
}
