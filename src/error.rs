/// Parsing errors.
///
/// Defines all error types that can occur while tokenizing text or building the
/// expression tree. Parse errors include unexpected characters, unmatched
/// brackets, unknown functions and assignments to constants.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while an expression tree is
/// evaluated, such as unknown variables, wrong argument counts or arguments of
/// the wrong kind.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
use thiserror::Error;

/// Broad category of a failure, used by callers that only care about the kind
/// of problem rather than its exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: unexpected characters, unmatched brackets, dangling
    /// operators.
    Syntax,
    /// A name could not be resolved: unknown function, unknown or unbound
    /// variable.
    Reference,
    /// A value of the wrong kind was used, including assignment to a
    /// constant.
    Type,
    /// The engine itself broke an invariant (for example a misbehaving
    /// concept).
    Internal,
}

/// Any failure produced while parsing or evaluating a formula.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The formula could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The formula was parsed but could not be evaluated.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the category of the underlying error.
    ///
    /// # Example
    /// ```
    /// use formulaic::{Engine, error::ErrorKind};
    ///
    /// let engine = Engine::with_maths();
    /// let err = engine.evaluate("(1 + 2").unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Syntax);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(e) => e.kind(),
            Self::Runtime(e) => e.kind(),
        }
    }
}
