use thiserror::Error;

use crate::error::ErrorKind;

/// Represents all errors that can occur during tokenizing or tree building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No concept or structural rule recognised the input at this position.
    #[error("Unexpected token '{token}' at position {position}.")]
    UnexpectedToken {
        /// The offending character.
        token:    String,
        /// Character offset of the offending character.
        position: usize,
    },
    /// An opening bracket or function call was never closed.
    #[error("Expected a closing bracket ')' but none found.")]
    ExpectedClosingBracket,
    /// A closing bracket appeared without a matching opening bracket.
    #[error("Expected an opening bracket or function call before ')'.")]
    ExpectedOpeningBracket,
    /// An operator was left over because it had nothing to operate on.
    #[error("Operator '{code}' is missing an operand.")]
    MissingOperand {
        /// The surface syntax of the operator.
        code: String,
    },
    /// A function call named a function that is not registered and no
    /// unknown-function handler accepted it.
    #[error("Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
    },
    /// The left-hand side of an assignment is a constant.
    #[error("'{name}' is a constant and cannot be assigned.")]
    ConstantAssignment {
        /// The name of the constant.
        name: String,
    },
    /// A literal rule could not convert the matched code.
    #[error("Invalid literal '{code}'.")]
    InvalidLiteral {
        /// The code of the literal token.
        code: String,
    },
    /// A concept returned a token whose code is not a prefix of the input it
    /// was given, or an operator token with a code its operator lacks.
    #[error("Concept produced the invalid token '{token}'.")]
    ConceptMismatch {
        /// The code of the returned token.
        token: String,
    },
}

impl ParseError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexpectedToken { .. }
            | Self::ExpectedClosingBracket
            | Self::ExpectedOpeningBracket
            | Self::MissingOperand { .. }
            | Self::InvalidLiteral { .. } => ErrorKind::Syntax,
            Self::UnknownFunction { .. } => ErrorKind::Reference,
            Self::ConstantAssignment { .. } => ErrorKind::Type,
            Self::ConceptMismatch { .. } => ErrorKind::Internal,
        }
    }
}
