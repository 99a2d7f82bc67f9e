use crate::{
    Engine,
    interpreter::{
        lexer::{Token, call_name},
        parser::operator::{OperatorId, OperatorKind},
    },
};

/// A recogniser for one kind of token.
///
/// Concepts are consulted in the order they were registered. The first one to
/// return a token wins, so more specific concepts should be registered first.
/// A returned token's code must be a non-empty prefix of `code`.
///
/// Plain closures are concepts too:
///
/// ```
/// use formulaic::{
///     Engine,
///     interpreter::{
///         lexer::{Token, TokenKind},
///         value::core::Value,
///     },
/// };
///
/// let mut engine = Engine::with_maths();
/// // `%` reads as one hundredth.
/// engine.register_concept(|_: &Engine, code: &str, _: &[Token]| {
///     code.starts_with('%')
///         .then(|| Token::literal("%", |_, _| Ok(Value::from(0.01))))
/// });
///
/// assert_eq!(engine.evaluate("50%").unwrap().real, 0.5);
/// ```
pub trait Concept {
    /// Returns a token for the start of `code`, or `None` to decline.
    ///
    /// # Parameters
    /// - `engine`: The engine tokenizing the input.
    /// - `code`: The remaining, untokenized input.
    /// - `tokens`: The tokens produced so far.
    fn match_token(&self, engine: &Engine, code: &str, tokens: &[Token]) -> Option<Token>;
}

impl<F> Concept for F where F: Fn(&Engine, &str, &[Token]) -> Option<Token>
{
    fn match_token(&self, engine: &Engine, code: &str, tokens: &[Token]) -> Option<Token> {
        self(engine, code, tokens)
    }
}

/// Recognises the codes of one registered operator.
///
/// Codes are tried in the order they were added to the operator. Binary
/// operators only match when the previous token ends an operand, which is how
/// `-` after `(` or `*` is left for the unary minus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorConcept {
    operator: OperatorId,
}

impl OperatorConcept {
    /// Creates the concept for a registered operator.
    #[must_use]
    pub const fn new(operator: OperatorId) -> Self {
        Self { operator }
    }
}

impl Concept for OperatorConcept {
    fn match_token(&self, engine: &Engine, code: &str, tokens: &[Token]) -> Option<Token> {
        let operator = engine.operator(self.operator)?;

        if let OperatorKind::Binary { .. } = operator.kind()
           && !tokens.last().is_some_and(|previous| previous.ends_operand(engine))
        {
            return None;
        }

        operator.codes()
                .find(|candidate| !candidate.is_empty() && code.starts_with(candidate))
                .map(|candidate| Token::operator(candidate, self.operator))
    }
}

/// Recognises the names of variables and constants.
///
/// The longest matching name wins, and a variable wins over a constant of the
/// same name. A name directly followed by `(` is left to the function call
/// rule unless the whole name is itself defined, so that `sin(x)` calls `sin`
/// even when a variable `s` exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvironmentConcept;

impl Concept for EnvironmentConcept {
    fn match_token(&self, engine: &Engine, code: &str, _tokens: &[Token]) -> Option<Token> {
        let environment = engine.environment();

        if let Some(name) = call_name(code)
           && environment.variable(name).is_none()
           && environment.constant(name).is_none()
        {
            return None;
        }

        environment.longest_prefix(code)
                   .map(|(name, source)| Token::variable(name, source))
    }
}
