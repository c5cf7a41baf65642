use logos::Logos;

use crate::{error::ParseError, interpreter::value::core::format_real};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
///
/// Numeric literals may carry a leading `-`. Because logos always prefers the
/// longest match, `x-1` lexes as `x` followed by the literal `-1`, while
/// `x - 1` lexes as a subtraction.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\x0B\f]+")]
pub enum Token {
    /// Floating-point literal tokens, such as `3.14` or `-0.5`.
    #[regex(r"-?[0-9]+\.[0-9]+", parse_float)]
    Real(f64),
    /// Integer literal tokens, such as `42` or `-7`.
    #[regex(r"-?[0-9]+", parse_integer)]
    Integer(i64),
    /// Double-quoted string literal. No escape sequences are processed.
    #[regex(r#""[^"]*""#, parse_string)]
    Str(String),
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `print`
    #[token("print")]
    Print,
    /// `function`
    #[token("function")]
    Function,
    /// `return`
    #[token("return")]
    Return,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,

    /// `**`
    #[token("**")]
    StarStar,
    /// `//`
    #[token("//")]
    SlashSlash,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    PipePipe,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `=`
    #[token("=")]
    Equals,
    /// `>`
    #[token(">")]
    Greater,
    /// `<`
    #[token("<")]
    Less,
    /// `!`
    #[token("!")]
    Bang,

    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,

    /// `# Comments.` Skipped, so [`tokenize`] never emits it.
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Line breaks. Skipped like comments, but counted for positions.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
}

/// The classification of a token, independent of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Integer or floating-point literal.
    Number,
    /// Double-quoted string literal.
    String,
    /// Variable or function name.
    Identifier,
    /// One of the reserved words.
    Keyword,
    /// Arithmetic, comparison, logical or assignment operator.
    Operator,
    /// `( ) { } ; ,`
    Punctuation,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Identifier => "IDENTIFIER",
            Self::Keyword => "KEYWORD",
            Self::Operator => "OPERATOR",
            Self::Punctuation => "PUNCTUATION",
        };
        write!(f, "{name}")
    }
}

/// Source location of a token, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line number.
    pub line:   usize,
    /// Column number, counted in bytes from the start of the line.
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A token together with the position it started at.
pub type Spanned = (Token, Position);

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset where that line starts,
/// so that every token can be given a line and column.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

impl Token {
    /// Returns the kind this token belongs to.
    ///
    /// ## Example
    /// ```
    /// use plume::interpreter::lexer::{Token, TokenKind};
    ///
    /// assert_eq!(Token::Integer(3).kind(), TokenKind::Number);
    /// assert_eq!(Token::While.kind(), TokenKind::Keyword);
    /// assert_eq!(Token::SlashSlash.kind(), TokenKind::Operator);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Real(_) | Self::Integer(_) => TokenKind::Number,
            Self::Str(_) => TokenKind::String,
            Self::Identifier(_) => TokenKind::Identifier,
            Self::If
            | Self::Else
            | Self::While
            | Self::Print
            | Self::Function
            | Self::Return
            | Self::True
            | Self::False => TokenKind::Keyword,
            Self::StarStar
            | Self::SlashSlash
            | Self::EqualEqual
            | Self::BangEqual
            | Self::GreaterEqual
            | Self::LessEqual
            | Self::AndAnd
            | Self::PipePipe
            | Self::Plus
            | Self::Minus
            | Self::Star
            | Self::Slash
            | Self::Percent
            | Self::Equals
            | Self::Greater
            | Self::Less
            | Self::Bang => TokenKind::Operator,
            Self::LParen
            | Self::RParen
            | Self::LBrace
            | Self::RBrace
            | Self::Semicolon
            | Self::Comma => TokenKind::Punctuation,
            // Skipped during lexing; only reachable on a hand-built token.
            Self::Comment | Self::NewLine => TokenKind::Punctuation,
        }
    }
}

/// Renders the token back to source text.
///
/// Strings are re-quoted and reals always keep a fractional part, so the
/// output lexes back to an equal token.
impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Real(r) => return write!(f, "{}", format_real(*r)),
            Self::Integer(n) => return write!(f, "{n}"),
            Self::Str(s) => return write!(f, "\"{s}\""),
            Self::Identifier(name) => return write!(f, "{name}"),
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::Print => "print",
            Self::Function => "function",
            Self::Return => "return",
            Self::True => "true",
            Self::False => "false",
            Self::StarStar => "**",
            Self::SlashSlash => "//",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
            Self::AndAnd => "&&",
            Self::PipePipe => "||",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Equals => "=",
            Self::Greater => ">",
            Self::Less => "<",
            Self::Bang => "!",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Comment => "#",
            Self::NewLine => "\n",
        };
        write!(f, "{text}")
    }
}

/// Converts source text into an ordered sequence of positioned tokens.
///
/// Whitespace and `#` comments are skipped. The first character that starts
/// no valid token aborts tokenization.
///
/// # Errors
/// Returns [`ParseError::InvalidCharacter`] with the offending character and
/// its position.
///
/// ## Example
/// ```
/// use plume::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x = 2 ** 3; # cube").unwrap();
/// let tokens: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
///
/// assert_eq!(tokens,
///            vec![Token::Identifier("x".into()),
///                 Token::Equals,
///                 Token::Integer(2),
///                 Token::StarStar,
///                 Token::Integer(3),
///                 Token::Semicolon]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());

    while let Some(token) = lexer.next() {
        let position = Position { line:   lexer.extras.line,
                                  column: lexer.span().start - lexer.extras.line_start + 1, };
        if let Ok(tok) = token {
            tokens.push((tok, position));
        } else {
            let character = lexer.slice().chars().next().unwrap_or_default();
            return Err(ParseError::InvalidCharacter { character, position });
        }
    }

    tracing::debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// Literals that do not fit into an `i64` are rejected, which surfaces as a
/// lexical error at the literal's position.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Strips the surrounding quotes from a string literal.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        tokenize(source).unwrap()
                        .into_iter()
                        .map(|(token, _)| token)
                        .collect()
    }

    #[test]
    fn classifies_keywords_and_identifiers() {
        assert_eq!(lex("while whiles _if print_ true"),
                   vec![Token::While,
                        Token::Identifier("whiles".into()),
                        Token::Identifier("_if".into()),
                        Token::Identifier("print_".into()),
                        Token::True]);
    }

    #[test]
    fn numbers_prefer_real_and_absorb_leading_minus() {
        assert_eq!(lex("3.25 -0.5 -7 12"),
                   vec![Token::Real(3.25),
                        Token::Real(-0.5),
                        Token::Integer(-7),
                        Token::Integer(12)]);
        assert_eq!(lex("x-1"),
                   vec![Token::Identifier("x".into()), Token::Integer(-1)]);
        assert_eq!(lex("x - 1"),
                   vec![Token::Identifier("x".into()), Token::Minus, Token::Integer(1)]);
    }

    #[test]
    fn operators_match_longest_first() {
        assert_eq!(lex("** * // / == = != ! >= > <= < && ||"),
                   vec![Token::StarStar,
                        Token::Star,
                        Token::SlashSlash,
                        Token::Slash,
                        Token::EqualEqual,
                        Token::Equals,
                        Token::BangEqual,
                        Token::Bang,
                        Token::GreaterEqual,
                        Token::Greater,
                        Token::LessEqual,
                        Token::Less,
                        Token::AndAnd,
                        Token::PipePipe]);
    }

    #[test]
    fn strings_keep_contents_verbatim() {
        assert_eq!(lex(r#""hello # not a comment" "a\n""#),
                   vec![Token::Str("hello # not a comment".into()), Token::Str(r"a\n".into())]);
    }

    #[test]
    fn comments_run_to_end_of_line() {
        let tokens = lex("a = 1; # set a\n# whole line\nb = 2;");
        assert_eq!(tokens.len(), 8);
        assert!(!tokens.iter().any(|t| matches!(t, Token::Comment | Token::NewLine)));
    }

    #[test]
    fn all_ascii_whitespace_is_skipped() {
        assert_eq!(lex("a\t=\x0B1\x0C;\r\n"),
                   vec![Token::Identifier("a".into()),
                        Token::Equals,
                        Token::Integer(1),
                        Token::Semicolon]);
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let tokens = tokenize("x = 1;\n  print(x);").unwrap();
        assert_eq!(tokens[0].1, Position { line: 1, column: 1 });
        assert_eq!(tokens[4].1, Position { line: 2, column: 3 });
    }

    #[test]
    fn unknown_character_is_rejected_with_position() {
        let err = tokenize("x = 1;\ny = @;").unwrap_err();
        assert!(matches!(err,
                         ParseError::InvalidCharacter { character: '@',
                                                        position: Position { line: 2,
                                                                             column: 5 } }));
    }

    #[test]
    fn unterminated_string_is_rejected() {
        let err = tokenize("print(\"oops);").unwrap_err();
        assert!(matches!(err, ParseError::InvalidCharacter { character: '"', .. }));
    }

    #[test]
    fn relexing_rendered_tokens_is_stable() {
        let source = r#"function f(a, b) { return a ** 2.0 // -3 + "s" * 2; } print(!f(1.5, x) && y || z != 0);"#;
        let first = lex(source);
        let rendered = first.iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(" ");
        assert_eq!(lex(&rendered), first);
    }

    #[test]
    fn kinds_cover_every_category() {
        let kinds: Vec<TokenKind> = lex(r#"1 "s" x if + ;"#).iter().map(Token::kind).collect();
        assert_eq!(kinds,
                   vec![TokenKind::Number,
                        TokenKind::String,
                        TokenKind::Identifier,
                        TokenKind::Keyword,
                        TokenKind::Operator,
                        TokenKind::Punctuation]);
    }
}
