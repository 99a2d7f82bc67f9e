use crate::interpreter::{evaluator::function::FunctionBinding, value::core::Value};

/// Where a variable token's value lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableSource {
    /// A settable variable.
    Variable,
    /// A read-only constant such as `pi`.
    Constant,
}

/// How a variable reference is resolved when evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableAccess {
    /// Resolve to the variable's current value.
    Value,
    /// Resolve to the variable's identifier, as on the left-hand side of an
    /// assignment.
    Identifier,
}

/// A reference to a variable or constant in the engine's environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableRef {
    /// The name of the variable.
    pub id:     String,
    /// Whether the name refers to a variable or a constant.
    pub source: VariableSource,
    /// Whether the reference reads the value or yields the identifier.
    pub access: VariableAccess,
}

/// Anything that can be evaluated.
///
/// The tree owns its children exclusively; there is no sharing between
/// subtrees and no cycles.
#[derive(Debug, Clone)]
pub enum Entity {
    /// A precomputed value, such as a parsed numeric literal.
    Leaf(Value),
    /// A variable or constant read from the environment at evaluation time.
    Variable(VariableRef),
    /// A function applied to child entities.
    Node(ExpressionNode),
}

/// A node applying a bound function to its children.
///
/// After reduction the children are exactly the arguments of the bound
/// function, in order.
#[derive(Debug, Clone)]
pub struct ExpressionNode {
    /// The arguments of the bound function.
    pub children: Vec<Entity>,
    /// The function applied to the children.
    pub binding:  FunctionBinding,
}

impl ExpressionNode {
    /// Creates a node from its children and bound function.
    #[must_use]
    pub const fn new(children: Vec<Entity>, binding: FunctionBinding) -> Self {
        Self { children, binding }
    }
}

impl Entity {
    /// Returns the name of the settable variable this entity refers to, looking
    /// through brackets and other direct (identity) nodes.
    ///
    /// Constants and arbitrary expressions yield `None`.
    #[must_use]
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::Variable(VariableRef { id,
                                         source: VariableSource::Variable,
                                         .. }) => Some(id),
            Self::Node(node) if node.binding.is_direct() && node.children.len() == 1 => {
                node.children[0].variable_name()
            },
            _ => None,
        }
    }
}

impl From<Value> for Entity {
    fn from(value: Value) -> Self {
        Self::Leaf(value)
    }
}

impl From<ExpressionNode> for Entity {
    fn from(node: ExpressionNode) -> Self {
        Self::Node(node)
    }
}
