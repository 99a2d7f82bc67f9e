use futures::executor::block_on;

use crate::{
    Engine,
    ast::ExpressionNode,
    error::ParseError,
    interpreter::{
        evaluator::{core::EvalResult, function::FunctionBinding},
        lexer::tokenize,
        parser::tree::build_tree,
        value::complex::ComplexNumber,
    },
};

/// Result type used while tokenizing and building trees.
///
/// Parsing either produces a value of type `T` or stops at the first
/// `ParseError`.
pub type ParseResult<T> = Result<T, ParseError>;

/// A parsed formula, ready to be evaluated any number of times.
///
/// The root node carries the direct binding, so the expression evaluates to
/// its first top-level value.
///
/// # Example
/// ```
/// use formulaic::{Engine, Expression, interpreter::value::complex::ComplexNumber};
///
/// let mut engine = Engine::with_maths();
/// engine.define_variable("x", ComplexNumber::real(2.0));
/// let expression = Expression::parse(&engine, "x^2").unwrap();
///
/// assert_eq!(expression.evaluate_blocking(&engine).unwrap().real, 4.0);
/// engine.define_variable("x", ComplexNumber::real(3.0));
/// assert_eq!(expression.evaluate_blocking(&engine).unwrap().real, 9.0);
/// ```
#[derive(Debug, Clone)]
pub struct Expression {
    root: ExpressionNode,
}

impl Expression {
    /// Tokenizes `text` and builds its expression tree.
    ///
    /// # Errors
    /// Returns any `ParseError` raised by the tokenizer or the tree builder.
    pub fn parse(engine: &Engine, text: &str) -> ParseResult<Self> {
        let tokens = tokenize(engine, text)?;
        let root = build_tree(engine, &tokens, FunctionBinding::direct())?;
        Ok(Self { root })
    }

    /// The root node of the tree.
    #[must_use]
    pub const fn root(&self) -> &ExpressionNode {
        &self.root
    }

    /// Evaluates the expression to a number.
    ///
    /// # Errors
    /// - `RuntimeError::MissingValue` for an empty expression.
    /// - `RuntimeError::ExpectedNumber` if the expression is a bare identifier.
    /// - Any error raised while evaluating the tree.
    pub async fn evaluate(&self, engine: &Engine) -> EvalResult<ComplexNumber> {
        let value = self.root.evaluate(engine).await?;
        log::debug!("evaluated to {value}");
        value.as_number()
    }

    /// Evaluates the expression on the current thread, blocking until done.
    ///
    /// # Errors
    /// Same as [`Expression::evaluate`].
    pub fn evaluate_blocking(&self, engine: &Engine) -> EvalResult<ComplexNumber> {
        block_on(self.evaluate(engine))
    }
}
