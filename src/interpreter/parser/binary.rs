use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{core::ParseResult, unary::parse_factor},
    },
};

/// Parses the additive tier.
///
/// Besides `+` and `-`, this tier also holds every comparison operator and
/// both logical operators. All of them are left-associative and bind equally,
/// so `a < b + c` groups as `(a < b) + c`.
///
/// The rule is:
/// `additive := multiplicative (("+" | "-" | "==" | "!=" | "<" | ">" | "<=" |
/// ">=" | "&&" | "||") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with positions.
/// - `depth`: Nesting level of the expression. Each operator in the chain
///   adds one, since the tree grows one level per operator.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, mut depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_multiplicative(tokens, depth)?;
    while let Some((token, position)) = tokens.peek().copied()
          && let Some(op) = token_to_binary_operator(token)
          && is_additive(op)
    {
        tokens.next();
        depth += 1;
        let right = parse_multiplicative(tokens, depth)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                line: position.line };
    }
    Ok(left)
}

/// Parses the multiplicative tier.
///
/// Handles left-associative operators `*`, `/`, `%`, `//` and `**`.
/// Exponentiation shares this tier, so `2 ** 3 ** 2` is `(2 ** 3) ** 2`.
///
/// The rule is: `multiplicative := factor (("*" | "/" | "%" | "//" | "**")
/// factor)*`
///
/// # Parameters
/// - `tokens`: Token stream with positions.
/// - `depth`: Nesting level, counted as in [`parse_additive`].
///
/// # Returns
/// A binary expression tree combining factor-level nodes.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>,
                                   mut depth: usize)
                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_factor(tokens, depth)?;
    while let Some((token, position)) = tokens.peek().copied()
          && let Some(op) = token_to_binary_operator(token)
          && !is_additive(op)
    {
        tokens.next();
        depth += 1;
        let right = parse_factor(tokens, depth)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                line: position.line };
    }
    Ok(left)
}

/// Returns whether `op` belongs to the additive tier.
const fn is_additive(op: BinaryOperator) -> bool {
    !matches!(op,
              BinaryOperator::Mul
              | BinaryOperator::Div
              | BinaryOperator::FloorDiv
              | BinaryOperator::Mod
              | BinaryOperator::Pow)
}

/// Maps a token to its binary operator, if any.
///
/// # Parameters
/// - `token`: The token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` if the token represents a binary operator,
/// otherwise `None`.
///
/// # Example
/// ```
/// use plume::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::SlashSlash),
///            Some(BinaryOperator::FloorDiv));
/// assert_eq!(token_to_binary_operator(&Token::Bang), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::SlashSlash => Some(BinaryOperator::FloorDiv),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::StarStar => Some(BinaryOperator::Pow),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::AndAnd => Some(BinaryOperator::And),
        Token::PipePipe => Some(BinaryOperator::Or),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ast::LiteralValue,
        error::ParseError,
        interpreter::{
            lexer::tokenize,
            parser::core::{MAX_NESTING, parse_expression},
        },
    };

    fn expr(source: &str) -> Expr {
        let tokens = tokenize(source).unwrap();
        let mut iter = tokens.iter().peekable();
        let expr = parse_expression(&mut iter, 0).unwrap();
        assert!(iter.next().is_none(), "trailing tokens in {source:?}");
        expr
    }

    fn int(value: i64) -> Expr {
        Expr::Literal { value: LiteralValue::Integer(value),
                        line:  1, }
    }

    fn var(name: &str) -> Expr {
        Expr::Variable { name: name.to_string(),
                         line: 1, }
    }

    fn bin(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
        Expr::BinaryOp { left: Box::new(left),
                         op,
                         right: Box::new(right),
                         line: 1 }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(expr("1 + 2 * 3"),
                   bin(int(1), BinaryOperator::Add, bin(int(2), BinaryOperator::Mul, int(3))));
    }

    #[test]
    fn comparison_shares_the_additive_tier() {
        assert_eq!(expr("a < b + c"),
                   bin(bin(var("a"), BinaryOperator::Less, var("b")),
                       BinaryOperator::Add,
                       var("c")));
    }

    #[test]
    fn logical_operators_are_left_associative() {
        assert_eq!(expr("a || b && c"),
                   bin(bin(var("a"), BinaryOperator::Or, var("b")),
                       BinaryOperator::And,
                       var("c")));
    }

    #[test]
    fn power_is_left_associative_in_the_multiplicative_tier() {
        assert_eq!(expr("2 ** 3 ** 2"),
                   bin(bin(int(2), BinaryOperator::Pow, int(3)), BinaryOperator::Pow, int(2)));
    }

    #[test]
    fn parentheses_override_grouping() {
        assert_eq!(expr("a < (b + c)"),
                   bin(var("a"), BinaryOperator::Less, bin(var("b"), BinaryOperator::Add, var("c"))));
    }

    #[test]
    fn minus_without_space_lexes_as_negative_literal() {
        let tokens = tokenize("x -1").unwrap();
        let mut iter = tokens.iter().peekable();
        assert_eq!(parse_expression(&mut iter, 0).unwrap(), var("x"));
        assert_eq!(iter.next().map(|(t, _)| t), Some(&Token::Integer(-1)));
    }

    #[test]
    fn long_operator_chains_are_bounded() {
        let within = format!("1{}", " + 1".repeat(MAX_NESTING));
        let tokens = tokenize(&within).unwrap();
        assert!(parse_expression(&mut tokens.iter().peekable(), 0).is_ok());

        let beyond = format!("1{}", " * 1".repeat(MAX_NESTING + 1));
        let tokens = tokenize(&beyond).unwrap();
        assert!(matches!(parse_expression(&mut tokens.iter().peekable(), 0),
                         Err(ParseError::NestingTooDeep { limit: MAX_NESTING, .. })));
    }

    #[test]
    fn spaced_minus_is_subtraction() {
        assert_eq!(expr("x - y"), bin(var("x"), BinaryOperator::Sub, var("y")));
    }
}
