use thiserror::Error;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// Tried to read a variable that is bound nowhere.
    #[error("Error on line {line}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that was never defined.
    #[error("Error on line {line}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error on line {line}: Function '{name}' takes {expected} argument(s) but {found} were given.")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An operand had an unexpected or incompatible type.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Attempted division or modulo by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer arithmetic left the 64-bit range.
    #[error("Error on line {line}: Integer overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Nested calls went deeper than the configured limit.
    #[error("Error on line {line}: Maximum call depth of {limit} exceeded.")]
    RecursionLimit {
        /// The configured maximum depth.
        limit: usize,
        /// The source line of the call that exceeded it.
        line:  usize,
    },
}
