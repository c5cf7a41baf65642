use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{ElseIf, Expr, FunctionDef, Statement},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            unary::parse_call,
            utils::{
                end_of_input, expect_token, parse_comma_separated, parse_identifier, unexpected,
            },
        },
    },
};

const STATEMENT: &str = "a statement";

/// Parses a single statement, dispatching on the lookahead token.
///
/// An identifier followed by `(` starts a call statement; any other
/// identifier starts an assignment. The keywords `function`, `print`, `if`,
/// `while` and `return` select their construct.
///
/// # Errors
/// Returns a `ParseError` if no statement can start with the next token, or if
/// the selected construct is malformed.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let Some((token, position)) = tokens.peek().copied() else {
        return Err(end_of_input(STATEMENT));
    };

    match token {
        Token::Identifier(_) => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            if let Some((Token::LParen, _)) = lookahead.peek() {
                let call = parse_call(tokens, depth)?;
                expect_token(tokens, &Token::Semicolon)?;
                Ok(Statement::Call(call))
            } else {
                parse_assignment(tokens, depth)
            }
        },
        Token::Function => parse_function(tokens, depth),
        Token::Print => parse_print(tokens, depth),
        Token::If => parse_if(tokens, depth),
        Token::While => parse_while(tokens, depth),
        Token::Return => parse_return(tokens, depth),
        other => Err(unexpected(other, STATEMENT, *position)),
    }
}

/// `IDENT '=' expression ';'`
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let line = tokens.peek().map_or(0, |(_, position)| position.line);
    let name = parse_identifier(tokens)?;
    expect_token(tokens, &Token::Equals)?;
    let value = parse_expression(tokens, depth)?;
    expect_token(tokens, &Token::Semicolon)?;

    Ok(Statement::Assignment { name, value, line })
}

/// Parses a function definition.
///
/// Grammar: `function IDENT '(' params ')' block`
///
/// Parameters are plain identifiers. Duplicate parameter names are allowed;
/// the last argument bound under a name wins.
fn parse_function<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let line = expect_token(tokens, &Token::Function)?.line;
    let name = parse_identifier(tokens)?;
    expect_token(tokens, &Token::LParen)?;
    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen)?;
    let body = parse_block(tokens, depth)?;

    Ok(Statement::Function(Rc::new(FunctionDef { name, params, body, line })))
}

/// `print '(' expression ')' ';'`
fn parse_print<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let line = expect_token(tokens, &Token::Print)?.line;
    let value = parse_parenthesized(tokens, depth)?;
    expect_token(tokens, &Token::Semicolon)?;

    Ok(Statement::Print { value, line })
}

/// Parses an `if` statement with its `else if` chain and optional `else`.
///
/// Grammar:
/// `if '(' expr ')' block ('else' 'if' '(' expr ')' block)* ('else' block)?`
fn parse_if<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let line = expect_token(tokens, &Token::If)?.line;
    let condition = parse_parenthesized(tokens, depth)?;
    let body = parse_block(tokens, depth)?;

    let mut else_ifs = Vec::new();
    let mut else_body = None;

    while let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        if let Some((Token::If, _)) = tokens.peek() {
            tokens.next();
            let condition = parse_parenthesized(tokens, depth)?;
            let body = parse_block(tokens, depth)?;
            else_ifs.push(ElseIf { condition, body });
        } else {
            else_body = Some(parse_block(tokens, depth)?);
            break;
        }
    }

    Ok(Statement::If { condition,
                       body,
                       else_ifs,
                       else_body,
                       line })
}

/// `while '(' expression ')' block`
fn parse_while<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let line = expect_token(tokens, &Token::While)?.line;
    let condition = parse_parenthesized(tokens, depth)?;
    let body = parse_block(tokens, depth)?;

    Ok(Statement::While { condition, body, line })
}

/// `return expression ';'`
fn parse_return<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let line = expect_token(tokens, &Token::Return)?.line;
    let value = parse_expression(tokens, depth)?;
    expect_token(tokens, &Token::Semicolon)?;

    Ok(Statement::Return { value, line })
}

fn parse_parenthesized<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    expect_token(tokens, &Token::LParen)?;
    let expr = parse_expression(tokens, depth)?;
    expect_token(tokens, &Token::RParen)?;

    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{BinaryOperator, LiteralValue},
        error::ParseError,
        interpreter::{lexer::tokenize, parser::core::MAX_NESTING},
    };

    fn statement(source: &str) -> ParseResult<Statement> {
        let tokens = tokenize(source).unwrap();
        parse_statement(&mut tokens.iter().peekable(), 0)
    }

    #[test]
    fn assignment_records_its_line() {
        let stmt = statement("\n\nx = 4;").unwrap();
        assert_eq!(stmt,
                   Statement::Assignment { name:  "x".to_string(),
                                           value: Expr::Literal { value: LiteralValue::Integer(4),
                                                                  line:  3, },
                                           line:  3, });
    }

    #[test]
    fn call_statement_is_detected_by_lookahead() {
        let Statement::Call(call) = statement("greet(1, \"a\");").unwrap() else {
            panic!("expected a call statement");
        };
        assert_eq!(call.name, "greet");
        assert_eq!(call.arguments.len(), 2);
    }

    #[test]
    fn function_with_empty_parameter_list() {
        let Statement::Function(def) = statement("function f() { return 1; }").unwrap() else {
            panic!("expected a function definition");
        };
        assert!(def.params.is_empty());
        assert_eq!(def.body.len(), 1);
    }

    #[test]
    fn function_parameters_are_collected_in_order() {
        let Statement::Function(def) = statement("function add(a, b, c) { }").unwrap() else {
            panic!("expected a function definition");
        };
        assert_eq!(def.params, vec!["a", "b", "c"]);
        assert!(def.body.is_empty());
    }

    #[test]
    fn if_with_else_if_chain_and_else() {
        let source = "if (x == 1) { print(1); } else if (x == 2) { print(2); } \
                      else if (x == 3) { print(3); } else { print(0); }";
        let Statement::If { else_ifs, else_body, .. } = statement(source).unwrap() else {
            panic!("expected an if statement");
        };
        assert_eq!(else_ifs.len(), 2);
        assert!(matches!(else_ifs[1].condition,
                         Expr::BinaryOp { op: BinaryOperator::Equal, .. }));
        assert_eq!(else_body.map(|b| b.len()), Some(1));
    }

    #[test]
    fn if_without_else() {
        let Statement::If { else_ifs, else_body, .. } = statement("if (1) { }").unwrap() else {
            panic!("expected an if statement");
        };
        assert!(else_ifs.is_empty());
        assert!(else_body.is_none());
    }

    #[test]
    fn missing_semicolon_is_reported() {
        let err = statement("x = 1 y = 2;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref expected, .. } if expected == "';'"));
    }

    #[test]
    fn print_requires_parentheses() {
        assert!(statement("print 1;").is_err());
    }

    #[test]
    fn keyword_cannot_start_an_expression_statement() {
        let err = statement("else { }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref expected, .. } if expected == "a statement"));
    }

    #[test]
    fn block_nesting_is_bounded() {
        let nested = |levels: usize| {
            format!("{}{}", "while (1) { ".repeat(levels), "}".repeat(levels))
        };
        assert!(statement(&nested(MAX_NESTING)).is_ok());
        assert!(matches!(statement(&nested(MAX_NESTING + 1)),
                         Err(ParseError::NestingTooDeep { limit: MAX_NESTING, .. })));
    }

    #[test]
    fn truncated_while_reports_end_of_input() {
        let err = statement("while (x < 3) {").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEndOfInput { .. }));
    }
}
