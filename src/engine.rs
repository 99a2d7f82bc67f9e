use std::{
    cell::{Ref, RefCell},
    fmt,
    rc::Rc,
};

use crate::{
    error::Error,
    interpreter::{
        evaluator::function::FunctionBinding,
        lexer::{
            Token,
            concept::{Concept, OperatorConcept},
        },
        parser::{
            core::{Expression, ParseResult},
            operator::{Operator, OperatorId},
        },
        value::complex::ComplexNumber,
    },
    maths,
};

/// Settings consulted while tokenizing and evaluating.
///
/// Defines `EngineConfig`, the angle units and the defaults of the separator,
/// the assignment operator and the integration step count.
pub mod config;
/// Named values.
///
/// Holds the variables and constants of an engine, and the guard that
/// temporarily overrides a variable while a calculus function iterates.
pub mod environment;

use config::EngineConfig;
use environment::Environment;

/// Fallback consulted for function calls naming no registered function.
pub type UnknownFunctionHandler = Rc<dyn Fn(&str) -> Option<FunctionBinding>>;

/// The grammar and environment formulas are parsed and evaluated against.
///
/// An engine is populated once through its `register_*` methods and then
/// shared by reference while parsing and evaluating. During evaluation only
/// the environment changes.
///
/// ## Usage
///
/// ```
/// use formulaic::{Engine, interpreter::value::complex::ComplexNumber};
///
/// let mut engine = Engine::with_maths();
/// engine.define_variable("x", ComplexNumber::real(3.0));
///
/// assert_eq!(engine.evaluate("2x + 1").unwrap(), ComplexNumber::real(7.0));
/// assert_eq!(engine.evaluate("sqrt(-4)").unwrap().to_string(), "2i");
/// ```
pub struct Engine {
    functions:                Vec<FunctionBinding>,
    concepts:                 Vec<Box<dyn Concept>>,
    operators:                Vec<Operator>,
    implicit_operator:        Option<Token>,
    unknown_function_handler: Option<UnknownFunctionHandler>,
    /// Tokenizer and evaluation settings.
    pub config:               EngineConfig,
    environment:              RefCell<Environment>,
}

impl Engine {
    /// Creates an engine with an empty grammar: no operators, functions,
    /// concepts or names.
    #[must_use]
    pub fn new() -> Self {
        Self { functions:                Vec::new(),
               concepts:                 Vec::new(),
               operators:                Vec::new(),
               implicit_operator:        None,
               unknown_function_handler: None,
               config:                   EngineConfig::default(),
               environment:              RefCell::new(Environment::default()), }
    }

    /// Creates an engine with the standard mathematical grammar.
    ///
    /// See [`maths::register`] for what it contains.
    #[must_use]
    pub fn with_maths() -> Self {
        let mut engine = Self::new();
        maths::register(&mut engine);
        engine
    }

    /// Registers a function callable by name. When two functions share a name,
    /// the first one registered is called.
    pub fn register_function(&mut self, binding: FunctionBinding) {
        log::trace!("registering function '{}'", binding.name());
        self.functions.push(binding);
    }

    /// Appends a concept to the tokenizer.
    pub fn register_concept(&mut self, concept: impl Concept + 'static) {
        self.concepts.push(Box::new(concept));
    }

    /// Registers an operator one precedence level above every operator
    /// registered before it.
    ///
    /// Unless the operator was built `without_concept`, a concept recognising
    /// its codes is registered as well.
    ///
    /// # Returns
    /// The handle tokens of the operator carry.
    pub fn register_operator(&mut self, operator: Operator) -> OperatorId {
        let id = OperatorId(self.operators.len());
        if operator.registers_concept() {
            self.register_concept(OperatorConcept::new(id));
        }
        self.operators.push(operator);
        id
    }

    /// Sets the operator inserted between two adjacent operands, as in `2x`.
    ///
    /// # Parameters
    /// - `id`: The operator to insert.
    /// - `code`: Which of its codes to insert; the first code if `None`.
    ///
    /// An unknown operator or code disables implicit insertion.
    pub fn set_implicit_operator(&mut self, id: OperatorId, code: Option<&str>) {
        self.implicit_operator = self.operator(id).and_then(|operator| {
                                                      let code = code.or_else(|| operator.first_code())?;
                                                      operator.binding(code)?;
                                                      Some(Token::operator(code, id))
                                                  });
    }

    /// Sets the fallback for calls to unregistered functions.
    pub fn set_unknown_function_handler<F>(&mut self, handler: F)
        where F: Fn(&str) -> Option<FunctionBinding> + 'static
    {
        self.unknown_function_handler = Some(Rc::new(handler));
    }

    /// Returns the operator registered under `id`.
    #[must_use]
    pub fn operator(&self, id: OperatorId) -> Option<&Operator> {
        self.operators.get(id.0)
    }

    /// Iterates over the operators from lowest to highest precedence.
    pub fn operators(&self) -> impl Iterator<Item = (OperatorId, &Operator)> {
        self.operators
            .iter()
            .enumerate()
            .map(|(index, operator)| (OperatorId(index), operator))
    }

    /// Iterates over the concepts in the order they are tried.
    pub fn concepts(&self) -> impl Iterator<Item = &(dyn Concept + 'static)> {
        self.concepts.iter().map(|concept| &**concept)
    }

    /// The token inserted between adjacent operands, if any.
    #[must_use]
    pub const fn implicit_operator(&self) -> Option<&Token> {
        self.implicit_operator.as_ref()
    }

    /// Returns the registered function called `name`.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionBinding> {
        self.functions.iter().find(|binding| binding.name() == name)
    }

    /// Resolves a function call, consulting the unknown-function handler when
    /// no function called `name` is registered.
    #[must_use]
    pub fn resolve_function(&self, name: &str) -> Option<FunctionBinding> {
        if let Some(binding) = self.function(name) {
            return Some(binding.clone());
        }

        self.unknown_function_handler.as_ref().and_then(|handler| {
                                                  log::debug!("asking the unknown function handler for '{name}'");
                                                  handler(name)
                                              })
    }

    /// Borrows the variables and constants.
    ///
    /// # Panics
    /// Panics if the environment is being modified at the same time, which
    /// only the engine's own setters do and never across a call.
    #[must_use]
    pub fn environment(&self) -> Ref<'_, Environment> {
        self.environment.borrow()
    }

    /// Parses `text` into an expression.
    ///
    /// # Errors
    /// Returns a `ParseError` if the text cannot be tokenized or built into a
    /// tree.
    pub fn parse(&self, text: &str) -> ParseResult<Expression> {
        Expression::parse(self, text)
    }

    /// Parses and evaluates `text`, blocking until the result is ready.
    ///
    /// # Errors
    /// Returns `Error::Parse` or `Error::Runtime`.
    ///
    /// # Example
    /// ```
    /// use formulaic::{Engine, error::ErrorKind};
    ///
    /// let engine = Engine::with_maths();
    /// assert_eq!(engine.evaluate("2^3^2").unwrap().real, 512.0);
    /// assert_eq!(engine.evaluate("nope(1)").unwrap_err().kind(), ErrorKind::Reference);
    /// ```
    pub fn evaluate(&self, text: &str) -> Result<ComplexNumber, Error> {
        let expression = self.parse(text)?;
        Ok(expression.evaluate_blocking(self)?)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
         .field("functions", &self.functions)
         .field("concepts", &self.concepts.len())
         .field("operators", &self.operators)
         .field("implicit_operator", &self.implicit_operator)
         .field("config", &self.config)
         .field("environment", &self.environment)
         .finish_non_exhaustive()
    }
}
