use thiserror::Error;

use crate::interpreter::lexer::Position;

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// A character that starts no valid token, including the opening quote of
    /// an unterminated string and the first digit of an oversized integer.
    #[error("Error on line {}: Invalid character '{character}' at column {}.", .position.line, .position.column)]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Where it was found.
        position:  Position,
    },
    /// Found a token the grammar does not allow here.
    #[error("Error on line {}: Unexpected token {found} at column {}, expected {expected}.", .position.line, .position.column)]
    UnexpectedToken {
        /// The token encountered, rendered as source text.
        found:    String,
        /// What the parser was looking for.
        expected: String,
        /// Where the token starts.
        position: Position,
    },
    /// Blocks or expressions nested deeper than the parser allows.
    #[error("Error on line {}: Nesting exceeds {limit} levels at column {}.", .position.line, .position.column)]
    NestingTooDeep {
        /// The deepest nesting accepted.
        limit:    usize,
        /// The token that would open the next level.
        position: Position,
    },
    /// Reached the end of input in the middle of a construct.
    #[error("Error: Unexpected end of input, expected {expected}.")]
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
    },
}
