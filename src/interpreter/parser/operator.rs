use crate::interpreter::evaluator::function::FunctionBinding;

/// Handle to an operator registered with an [`Engine`](crate::Engine).
///
/// Ids are handed out in registration order, which is also the order in
/// which operators are reduced: lower ids bind more loosely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperatorId(pub(crate) usize);

impl OperatorId {
    /// Position of the operator in the engine's registration order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The shape of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// One operand, written after a prefix operator (`-x`) or before a postfix
    /// one (`x!`).
    Unary {
        /// `true` for prefix, `false` for postfix.
        prefix: bool,
    },
    /// Two operands on either side of the operator.
    Binary {
        /// `true` if `a - b - c` groups as `(a - b) - c`.
        left_associative: bool,
    },
}

/// A family of operator codes sharing a precedence level and a shape.
///
/// Each code maps to the function its node is bound to, so `+` and `-` can
/// share one left-associative binary operator.
///
/// # Example
/// ```
/// use formulaic::interpreter::{
///     evaluator::function::FunctionBinding,
///     parser::operator::{Operator, OperatorKind},
///     value::core::Value,
/// };
///
/// let modulo = Operator::binary(true).with_binding("%",
///                                                  FunctionBinding::eager("mod", |_, args| {
///                                                      Ok(args[0].clone())
///                                                  }));
///
/// assert_eq!(modulo.kind(), OperatorKind::Binary { left_associative: true });
/// assert!(modulo.binding("%").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Operator {
    code_bindings:       Vec<(String, FunctionBinding)>,
    kind:                OperatorKind,
    register_as_concept: bool,
}

impl Operator {
    /// Creates a unary operator without codes.
    #[must_use]
    pub const fn unary(prefix: bool) -> Self {
        Self { code_bindings:       Vec::new(),
               kind:                OperatorKind::Unary { prefix },
               register_as_concept: true, }
    }

    /// Creates a binary operator without codes.
    #[must_use]
    pub const fn binary(left_associative: bool) -> Self {
        Self { code_bindings:       Vec::new(),
               kind:                OperatorKind::Binary { left_associative },
               register_as_concept: true, }
    }

    /// Adds a code and the function nodes written with it are bound to.
    #[must_use]
    pub fn with_binding(mut self, code: impl Into<String>, binding: FunctionBinding) -> Self {
        self.code_bindings.push((code.into(), binding));
        self
    }

    /// Keeps the operator from being recognised in source text. It can then
    /// only appear as the engine's implicit operator.
    #[must_use]
    pub const fn without_concept(mut self) -> Self {
        self.register_as_concept = false;
        self
    }

    /// The operator's shape.
    #[must_use]
    pub const fn kind(&self) -> OperatorKind {
        self.kind
    }

    /// Whether registering the operator also registers a concept for it.
    #[must_use]
    pub const fn registers_concept(&self) -> bool {
        self.register_as_concept
    }

    /// Returns `true` for postfix unary operators.
    #[must_use]
    pub const fn is_postfix(&self) -> bool {
        matches!(self.kind, OperatorKind::Unary { prefix: false })
    }

    /// The codes of the operator, in the order they were added.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.code_bindings.iter().map(|(code, _)| code.as_str())
    }

    /// The first code, used when the operator is inserted implicitly.
    #[must_use]
    pub fn first_code(&self) -> Option<&str> {
        self.codes().next()
    }

    /// The function bound to `code`.
    #[must_use]
    pub fn binding(&self, code: &str) -> Option<&FunctionBinding> {
        self.code_bindings
            .iter()
            .find(|(candidate, _)| candidate == code)
            .map(|(_, binding)| binding)
    }
}
