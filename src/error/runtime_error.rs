use thiserror::Error;

use crate::error::ErrorKind;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A variable was read or overridden but is not defined in the
    /// environment.
    #[error("Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// A calculus primitive was given something other than a registered
    /// variable as its variable argument.
    #[error("Function '{function}' expects a registered variable as its variable argument.")]
    ExpectedVariable {
        /// The name of the calling function.
        function: String,
    },
    /// A number was expected, but a variable identifier was found.
    #[error("Expected a number.")]
    ExpectedNumber,
    /// A variable identifier was expected, but a number was found.
    #[error("Expected a variable identifier.")]
    ExpectedIdentifier,
    /// The wrong number of arguments was supplied to a function.
    #[error("Function '{name}' expects {expected} argument(s) but received {found}.")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// The number of arguments the function accepts.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
    },
    /// An expression produced no value at all, such as `()`.
    #[error("Value missing.")]
    MissingValue,
}

impl RuntimeError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownVariable { .. } | Self::ExpectedVariable { .. } => ErrorKind::Reference,
            Self::ExpectedNumber
            | Self::ExpectedIdentifier
            | Self::ArgumentCountMismatch { .. }
            | Self::MissingValue => ErrorKind::Type,
        }
    }
}
