use std::iter::Peekable;

use crate::{
    ast::{Call, Expr, LiteralValue, UnaryOperator},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{check_nesting, end_of_input, expect_token, parse_comma_separated, unexpected},
        },
    },
};

const FACTOR: &str = "an expression";

/// Parses a factor.
///
/// Factors are the atoms of the expression grammar:
/// - numeric, string and boolean literals
/// - identifiers
/// - function calls
/// - parenthesized expressions
/// - `!` applied to another factor
///
/// `!` is right-associative, so `!!x` is parsed as `!(!x)`.
///
/// Grammar:
/// ```text
///     factor := NUMBER | STRING | "true" | "false"
///             | IDENT | IDENT "(" args ")"
///             | "(" expression ")"
///             | "!" factor
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a factor.
/// - `depth`: Nesting level of the factor. Parentheses, `!` and argument
///   lists each open a deeper level.
///
/// # Returns
/// The parsed [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_factor<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    check_nesting(tokens, depth)?;
    let Some((token, position)) = tokens.peek().copied() else {
        return Err(end_of_input(FACTOR));
    };
    let line = position.line;

    let value = match token {
        Token::Integer(n) => LiteralValue::Integer(*n),
        Token::Real(r) => LiteralValue::Real(*r),
        Token::Str(s) => LiteralValue::Str(s.as_str().into()),
        Token::True => LiteralValue::Bool(true),
        Token::False => LiteralValue::Bool(false),
        Token::Identifier(name) => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            if let Some((Token::LParen, _)) = lookahead.peek() {
                return Ok(Expr::Call(parse_call(tokens, depth)?));
            }
            tokens.next();
            return Ok(Expr::Variable { name: name.clone(),
                                       line });
        },
        Token::LParen => return parse_grouping(tokens, depth),
        Token::Bang => {
            tokens.next();
            let expr = parse_factor(tokens, depth + 1)?;
            return Ok(Expr::UnaryOp { op: UnaryOperator::Not,
                                      expr: Box::new(expr),
                                      line });
        },
        other => return Err(unexpected(other, FACTOR, *position)),
    };

    tokens.next();
    Ok(Expr::Literal { value, line })
}

/// Parses a call: `IDENT "(" args ")"`.
///
/// Arguments are full expressions separated by commas; the list may be
/// empty. Used both for call expressions and for call statements.
///
/// # Errors
/// Returns a `ParseError` if the name, either parenthesis or an argument is
/// malformed.
pub(crate) fn parse_call<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Call>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let (name, line) = match tokens.next() {
        Some((Token::Identifier(name), position)) => (name.clone(), position.line),
        Some((tok, position)) => return Err(unexpected(tok, "a function name", *position)),
        None => return Err(end_of_input("a function name")),
    };
    expect_token(tokens, &Token::LParen)?;
    let arguments =
        parse_comma_separated(tokens, |tokens| parse_expression(tokens, depth + 1), &Token::RParen)?;

    Ok(Call { name, arguments, line })
}

/// Parses a parenthesized expression: `"(" expression ")"`.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    expect_token(tokens, &Token::LParen)?;
    let expr = parse_expression(tokens, depth + 1)?;
    expect_token(tokens, &Token::RParen)?;
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        error::ParseError,
        interpreter::{lexer::tokenize, parser::core::MAX_NESTING},
    };

    fn factor(source: &str) -> ParseResult<Expr> {
        let tokens = tokenize(source).unwrap();
        parse_factor(&mut tokens.iter().peekable(), 0)
    }

    #[test]
    fn boolean_keywords_are_literals() {
        assert_eq!(factor("true").unwrap(),
                   Expr::Literal { value: LiteralValue::Bool(true),
                                   line:  1, });
        assert_eq!(factor("false").unwrap(),
                   Expr::Literal { value: LiteralValue::Bool(false),
                                   line:  1, });
    }

    #[test]
    fn string_literal_keeps_contents() {
        assert_eq!(factor("\"a b\"").unwrap(),
                   Expr::Literal { value: LiteralValue::from("a b"),
                                   line:  1, });
    }

    #[test]
    fn not_nests_to_the_right() {
        let Expr::UnaryOp { expr, .. } = factor("!!x").unwrap() else {
            panic!("expected a unary expression");
        };
        assert!(matches!(*expr, Expr::UnaryOp { op: UnaryOperator::Not, .. }));
    }

    #[test]
    fn not_applies_to_a_single_factor() {
        let tokens = tokenize("!a + b").unwrap();
        let expr = parse_expression(&mut tokens.iter().peekable(), 0).unwrap();
        let Expr::BinaryOp { left, .. } = expr else {
            panic!("expected a binary expression");
        };
        assert!(matches!(*left, Expr::UnaryOp { .. }));
    }

    #[test]
    fn call_with_nested_arguments() {
        let Expr::Call(call) = factor("f(1 + 2, g(), \"s\")").unwrap() else {
            panic!("expected a call");
        };
        assert_eq!(call.name, "f");
        assert_eq!(call.arguments.len(), 3);
        assert!(matches!(&call.arguments[1], Expr::Call(inner) if inner.arguments.is_empty()));
    }

    #[test]
    fn unclosed_argument_list_is_an_error() {
        assert!(matches!(factor("f(1, 2"),
                         Err(ParseError::UnexpectedEndOfInput { .. })));
    }

    #[test]
    fn nesting_is_bounded() {
        let nested = |open: &str, close: &str, levels: usize| {
            format!("{}1{}", open.repeat(levels), close.repeat(levels))
        };

        assert!(factor(&nested("(", ")", MAX_NESTING)).is_ok());
        assert!(factor(&nested("!", "", MAX_NESTING)).is_ok());
        assert!(factor(&nested("f(", ")", MAX_NESTING)).is_ok());

        for source in [nested("(", ")", 100_000),
                       nested("!", "", MAX_NESTING + 1),
                       nested("f(", ")", MAX_NESTING + 1)]
        {
            assert!(matches!(factor(&source),
                             Err(ParseError::NestingTooDeep { limit: MAX_NESTING, .. })));
        }
    }

    #[test]
    fn nesting_error_points_at_the_extra_level() {
        let source = format!("{}1", "!".repeat(MAX_NESTING + 1));
        let err = factor(&source).unwrap_err();
        assert_eq!(err.to_string(),
                   format!("Error on line 1: Nesting exceeds {MAX_NESTING} levels at column {}.",
                           MAX_NESTING + 2));
    }

    #[test]
    fn operator_cannot_start_a_factor() {
        let err = factor("* 2").unwrap_err();
        assert_eq!(err.to_string(),
                   "Error on line 1: Unexpected token '*' at column 1, expected an expression.");
    }
}
