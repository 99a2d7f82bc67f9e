use std::fmt::{self, Display};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::complex::ComplexNumber},
};

/// A value produced while evaluating an expression tree.
///
/// Almost every value is a number. Identifiers only appear where a variable is
/// referred to by name rather than by value: the left-hand side of an
/// assignment, or a variable passed to a function that will rebind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A complex number.
    Number(ComplexNumber),
    /// The identifier of a variable in the engine's environment.
    Identifier(String),
}

impl Value {
    /// Returns the contained number.
    ///
    /// # Errors
    /// Returns `RuntimeError::ExpectedNumber` for identifiers.
    ///
    /// # Example
    /// ```
    /// use formulaic::interpreter::value::{complex::ComplexNumber, core::Value};
    ///
    /// let v = Value::from(2.0);
    /// assert_eq!(v.as_number().unwrap(), ComplexNumber::real(2.0));
    /// assert!(Value::Identifier("x".into()).as_number().is_err());
    /// ```
    pub fn as_number(&self) -> EvalResult<ComplexNumber> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Identifier(_) => Err(RuntimeError::ExpectedNumber),
        }
    }

    /// Returns the contained identifier.
    ///
    /// # Errors
    /// Returns `RuntimeError::ExpectedIdentifier` for numbers.
    pub fn as_identifier(&self) -> EvalResult<&str> {
        match self {
            Self::Identifier(id) => Ok(id),
            Self::Number(_) => Err(RuntimeError::ExpectedIdentifier),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Identifier(id) => write!(f, "{id}"),
        }
    }
}

impl From<ComplexNumber> for Value {
    fn from(value: ComplexNumber) -> Self {
        Self::Number(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(ComplexNumber::real(value))
    }
}
