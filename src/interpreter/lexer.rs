use std::fmt;

use logos::Logos;

use crate::{
    Engine,
    ast::VariableSource,
    error::ParseError,
    interpreter::{
        lexer::concept::Concept,
        parser::{core::ParseResult, operator::OperatorId},
        value::core::Value,
    },
};

/// Concepts: pluggable recognisers for operators, names and literals.
///
/// A concept looks at the remaining input and the tokens produced so far and
/// either claims a prefix of the input as a token or declines.
pub mod concept;

/// Converts the code of a literal token to its value.
pub type LiteralRule = fn(&Engine, &str) -> ParseResult<Value>;

/// A variable or constant recognised in the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableToken {
    /// The name of the variable.
    pub id:     String,
    /// Whether it names a variable or a constant.
    pub source: VariableSource,
}

impl VariableToken {
    /// Returns `false` for constants, which cannot be assigned.
    #[must_use]
    pub fn can_set(&self) -> bool {
        self.source == VariableSource::Variable
    }
}

/// What a token stands for.
#[derive(Clone)]
pub enum TokenKind {
    /// A function name directly followed by `(`, such as `sin (`.
    Call {
        /// The function name, without the bracket and whitespace.
        name: String,
    },
    /// `(`
    Open,
    /// `)`
    Close,
    /// The argument separator configured on the engine.
    Separator,
    /// One of the codes of a registered operator.
    Operator {
        /// The operator the code belongs to.
        owner: OperatorId,
    },
    /// A literal whose code is converted to a value by `rule`.
    Literal {
        /// The conversion from code to value.
        rule: LiteralRule,
    },
    /// A variable or constant.
    Variable(VariableToken),
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call { name } => f.debug_struct("Call").field("name", name).finish(),
            Self::Open => write!(f, "Open"),
            Self::Close => write!(f, "Close"),
            Self::Separator => write!(f, "Separator"),
            Self::Operator { owner } => f.debug_struct("Operator").field("owner", owner).finish(),
            Self::Literal { .. } => write!(f, "Literal"),
            Self::Variable(variable) => f.debug_tuple("Variable").field(variable).finish(),
        }
    }
}

/// A minimal but meaningful unit of a formula.
///
/// `code` is the exact source text the token was produced from; the tokenizer
/// advances by its length.
#[derive(Debug, Clone)]
pub struct Token {
    /// What the token stands for.
    pub kind: TokenKind,
    /// The source text of the token.
    pub code: String,
}

impl Token {
    /// Creates a token.
    pub fn new(kind: TokenKind, code: impl Into<String>) -> Self {
        Self { kind,
               code: code.into() }
    }

    /// Creates an operator token.
    pub fn operator(code: impl Into<String>, owner: OperatorId) -> Self {
        Self::new(TokenKind::Operator { owner }, code)
    }

    /// Creates a literal token converted by `rule`.
    pub fn literal(code: impl Into<String>, rule: LiteralRule) -> Self {
        Self::new(TokenKind::Literal { rule }, code)
    }

    /// Creates a variable token whose code is its name.
    pub fn variable(id: impl Into<String>, source: VariableSource) -> Self {
        let id = id.into();
        Self::new(TokenKind::Variable(VariableToken { id: id.clone(),
                                                      source }),
                  id)
    }

    /// Returns the operator owning this token, if it is an operator token.
    #[must_use]
    pub const fn owner(&self) -> Option<OperatorId> {
        match self.kind {
            TokenKind::Operator { owner } => Some(owner),
            _ => None,
        }
    }

    /// Returns `true` if an operand may end with this token, so that a binary
    /// operator can follow it.
    ///
    /// Literals, variables, closing brackets and postfix operators end an
    /// operand; anything else leaves the operator without a left-hand side.
    #[must_use]
    pub fn ends_operand(&self, engine: &Engine) -> bool {
        match &self.kind {
            TokenKind::Literal { .. } | TokenKind::Variable(_) | TokenKind::Close => true,
            TokenKind::Operator { owner } => {
                engine.operator(*owner).is_some_and(|operator| operator.is_postfix())
            },
            TokenKind::Call { .. } | TokenKind::Open | TokenKind::Separator => false,
        }
    }
}

/// The fixed structure of the formula language, recognised after every
/// concept has declined.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Structure {
    /// `// comment` up to the end of the line.
    #[regex(r"//[^\n]*")]
    LineComment,
    /// `/* comment */`, possibly spanning lines.
    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,
    /// A function name followed by `(`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*[ \t\r\n\f]*\(")]
    Call,
    /// `(`
    #[token("(")]
    Open,
    /// `)`
    #[token(")")]
    Close,
    /// Spaces, tabs and line breaks between tokens.
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
}

/// Matches the structural token at the start of `code`, with its length.
fn structure_at(code: &str) -> Option<(Structure, usize)> {
    let mut lexer = Structure::lexer(code);
    match lexer.next() {
        Some(Ok(structure)) => Some((structure, lexer.span().end)),
        _ => None,
    }
}

/// Returns the function name if `code` starts with a call such as `sin (`.
///
/// # Example
/// ```
/// use formulaic::interpreter::lexer::call_name;
///
/// assert_eq!(call_name("sin (x)"), Some("sin"));
/// assert_eq!(call_name("x + 1"), None);
/// ```
#[must_use]
pub fn call_name(code: &str) -> Option<&str> {
    match structure_at(code) {
        Some((Structure::Call, len)) => Some(code[..len - 1].trim_end()),
        _ => None,
    }
}

/// Splits a formula into tokens.
///
/// At every position comments are skipped first. Then the engine's concepts
/// are asked in registration order and the first token offered wins. When
/// every concept declines, the structural rules apply: function calls, the
/// argument separator, brackets and whitespace.
///
/// # Errors
/// - `ParseError::UnexpectedToken` if nothing matches at some position.
/// - `ParseError::ConceptMismatch` if a concept returns a token whose code is
///   not a non-empty prefix of the remaining input.
///
/// # Example
/// ```
/// use formulaic::{
///     Engine,
///     interpreter::lexer::{TokenKind, tokenize},
/// };
///
/// let engine = Engine::with_maths();
/// let tokens = tokenize(&engine, "sqrt(4) // four").unwrap();
/// let codes: Vec<_> = tokens.iter().map(|t| t.code.as_str()).collect();
/// assert_eq!(codes, ["sqrt(", "4", ")"]);
/// assert!(matches!(tokens[0].kind, TokenKind::Call { .. }));
/// ```
pub fn tokenize(engine: &Engine, text: &str) -> ParseResult<Vec<Token>> {
    let source = format!("{text}\n");
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < source.len() {
        let rest = &source[offset..];
        let structure = structure_at(rest);

        if let Some((Structure::LineComment | Structure::BlockComment, len)) = structure {
            offset += len;
            continue;
        }

        if let Some(token) = match_concept(engine, rest, &tokens)? {
            offset += token.code.len();
            tokens.push(token);
            continue;
        }

        let separator = engine.config.separator;
        let (kind, len) = match structure {
            Some((Structure::Call, len)) => {
                let name = rest[..len - 1].trim_end().to_string();
                (TokenKind::Call { name }, len)
            },
            _ if rest.starts_with(separator) => (TokenKind::Separator, separator.len_utf8()),
            Some((Structure::Open, len)) => (TokenKind::Open, len),
            Some((Structure::Close, len)) => (TokenKind::Close, len),
            Some((Structure::Whitespace, len)) => {
                offset += len;
                continue;
            },
            _ => {
                let token = rest.chars().next().map(String::from).unwrap_or_default();
                return Err(ParseError::UnexpectedToken { token,
                                                         position: source[..offset].chars()
                                                                                   .count() });
            },
        };

        tokens.push(Token::new(kind, &rest[..len]));
        offset += len;
    }

    log::debug!("tokenized {} tokens from '{text}'", tokens.len());
    Ok(tokens)
}

/// Asks every concept in turn for a token at the start of `rest`.
fn match_concept(engine: &Engine, rest: &str, tokens: &[Token]) -> ParseResult<Option<Token>> {
    for concept in engine.concepts() {
        let Some(token) = concept.match_token(engine, rest, tokens) else {
            continue;
        };

        if token.code.is_empty() || !rest.starts_with(&token.code) {
            log::error!("concept returned '{}', which does not prefix the input", token.code);
            return Err(ParseError::ConceptMismatch { token: token.code });
        }

        return Ok(Some(token));
    }

    Ok(None)
}
