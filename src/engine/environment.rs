use std::collections::HashMap;

use crate::{
    Engine,
    ast::VariableSource,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::complex::ComplexNumber},
};

/// The variables and constants formulas can refer to by name.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: HashMap<String, ComplexNumber>,
    constants: HashMap<String, ComplexNumber>,
}

impl Environment {
    /// Returns the value of a variable.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<ComplexNumber> {
        self.variables.get(name).copied()
    }

    /// Returns the value of a constant.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<ComplexNumber> {
        self.constants.get(name).copied()
    }

    /// Defines or overwrites a variable.
    pub fn set_variable(&mut self, name: impl Into<String>, value: ComplexNumber) {
        self.variables.insert(name.into(), value);
    }

    /// Defines or overwrites a constant.
    pub fn set_constant(&mut self, name: impl Into<String>, value: ComplexNumber) {
        self.constants.insert(name.into(), value);
    }

    /// Removes a variable, returning its last value.
    pub fn remove_variable(&mut self, name: &str) -> Option<ComplexNumber> {
        self.variables.remove(name)
    }

    /// Returns the longest variable or constant name that `code` starts with.
    ///
    /// Longer names win over their prefixes (`pi` over `p`); on equal length a
    /// variable wins over a constant.
    ///
    /// # Example
    /// ```
    /// use formulaic::{
    ///     ast::VariableSource, engine::environment::Environment,
    ///     interpreter::value::complex::ComplexNumber,
    /// };
    ///
    /// let mut env = Environment::default();
    /// env.set_variable("p", ComplexNumber::real(1.0));
    /// env.set_constant("pi", ComplexNumber::real(std::f64::consts::PI));
    ///
    /// assert_eq!(env.longest_prefix("pi*2"), Some(("pi", VariableSource::Constant)));
    /// assert_eq!(env.longest_prefix("p*2"), Some(("p", VariableSource::Variable)));
    /// assert_eq!(env.longest_prefix("q"), None);
    /// ```
    #[must_use]
    pub fn longest_prefix(&self, code: &str) -> Option<(&str, VariableSource)> {
        let variables = self.variables
                            .keys()
                            .map(|name| (name.as_str(), VariableSource::Variable));
        let constants = self.constants
                            .keys()
                            .map(|name| (name.as_str(), VariableSource::Constant));

        variables.chain(constants)
                 .filter(|(name, _)| !name.is_empty() && code.starts_with(name))
                 .max_by_key(|(name, source)| (name.len(), *source == VariableSource::Variable))
    }
}

/// Temporarily overrides a variable and restores its previous value when
/// dropped.
///
/// Overrides of the same variable nest: each guard restores exactly the value
/// it replaced, so inner guards must be dropped before outer ones, which
/// scoping guarantees.
///
/// # Example
/// ```
/// use formulaic::{Engine, interpreter::value::complex::ComplexNumber};
///
/// let mut engine = Engine::with_maths();
/// engine.define_variable("x", ComplexNumber::real(1.0));
/// {
///     let guard = engine.override_variable("x").unwrap();
///     guard.set(ComplexNumber::real(5.0));
///     assert_eq!(engine.variable("x"), Some(ComplexNumber::real(5.0)));
/// }
/// assert_eq!(engine.variable("x"), Some(ComplexNumber::real(1.0)));
/// ```
#[derive(Debug)]
#[must_use = "the variable is restored as soon as the guard is dropped"]
pub struct VariableOverride<'a> {
    engine:   &'a Engine,
    name:     String,
    previous: ComplexNumber,
}

impl VariableOverride<'_> {
    /// Sets the overridden variable.
    pub fn set(&self, value: ComplexNumber) {
        self.engine.environment.borrow_mut().set_variable(self.name.clone(), value);
    }

    /// The name of the overridden variable.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for VariableOverride<'_> {
    fn drop(&mut self) {
        log::trace!("restoring variable '{}'", self.name);
        self.engine
            .environment
            .borrow_mut()
            .set_variable(std::mem::take(&mut self.name), self.previous);
    }
}

impl Engine {
    /// Returns the current value of a variable.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<ComplexNumber> {
        self.environment.borrow().variable(name)
    }

    /// Returns the value of a constant.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<ComplexNumber> {
        self.environment.borrow().constant(name)
    }

    /// Defines a settable variable, or overwrites its value.
    pub fn define_variable(&mut self, name: impl Into<String>, value: ComplexNumber) {
        self.environment.get_mut().set_variable(name, value);
    }

    /// Defines a read-only constant, or overwrites its value.
    pub fn define_constant(&mut self, name: impl Into<String>, value: ComplexNumber) {
        self.environment.get_mut().set_constant(name, value);
    }

    /// Removes a variable from the environment.
    pub fn remove_variable(&mut self, name: &str) -> Option<ComplexNumber> {
        self.environment.get_mut().remove_variable(name)
    }

    /// Assigns an existing variable during evaluation.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnknownVariable` if the variable is not defined.
    pub fn assign_variable(&self, name: &str, value: ComplexNumber) -> EvalResult<()> {
        let mut environment = self.environment.borrow_mut();
        if environment.variable(name).is_none() {
            return Err(RuntimeError::UnknownVariable { name: name.to_string() });
        }
        environment.set_variable(name, value);
        Ok(())
    }

    /// Starts a temporary override of a variable.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnknownVariable` if the variable is not defined.
    pub fn override_variable(&self, name: &str) -> EvalResult<VariableOverride<'_>> {
        let previous =
            self.variable(name)
                .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string() })?;

        Ok(VariableOverride { engine: self,
                              name: name.to_string(),
                              previous })
    }
}
