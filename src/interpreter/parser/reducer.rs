use crate::{
    Engine,
    ast::{Entity, ExpressionNode},
    error::ParseError,
    interpreter::{
        evaluator::function::FunctionBinding,
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            operator::{Operator, OperatorId, OperatorKind},
        },
    },
};

/// An element of a run being reduced: an operand, or a token still waiting
/// for its operands.
#[derive(Debug, Clone)]
pub enum Item {
    /// An operand.
    Entity(Entity),
    /// An operator or separator token.
    Token(Token),
}

impl Item {
    /// Returns the operator owning this item, if it is an operator token.
    fn owner(&self) -> Option<OperatorId> {
        match self {
            Self::Token(token) => token.owner(),
            Self::Entity(_) => None,
        }
    }

    const fn is_separator(&self) -> bool {
        matches!(self, Self::Token(Token { kind: TokenKind::Separator, .. }))
    }
}

/// Reduces `items` and binds the result to `binding`.
///
/// The items are split into argument slots at separator tokens. Each operator
/// is then applied to every slot, from the lowest precedence to the highest,
/// and the reduced slots become the node's children.
///
/// # Errors
/// - `ParseError::MissingOperand` if an operator token is left over, as in
///   `1 +`.
/// - Any error raised while building nested nodes.
pub fn reduce_into_node(engine: &Engine,
                        items: Vec<Item>,
                        binding: FunctionBinding)
                        -> ParseResult<ExpressionNode> {
    let mut slots = split_slots(items);

    for (id, operator) in engine.operators() {
        for slot in &mut slots {
            reduce_slot(engine, id, operator, slot)?;
        }
    }

    let children = slots.into_iter()
                        .flatten()
                        .map(|item| match item {
                            Item::Entity(entity) => Ok(entity),
                            Item::Token(token) => {
                                Err(ParseError::MissingOperand { code: token.code })
                            },
                        })
                        .collect::<ParseResult<Vec<_>>>()?;

    Ok(ExpressionNode::new(children, binding))
}

fn split_slots(items: Vec<Item>) -> Vec<Vec<Item>> {
    let mut slots = vec![Vec::new()];
    for item in items {
        if item.is_separator() {
            slots.push(Vec::new());
        } else if let Some(slot) = slots.last_mut() {
            slot.push(item);
        }
    }
    slots
}

/// Applies one operator to a slot for as long as it contains the operator's
/// tokens and a reduction is possible.
fn reduce_slot(engine: &Engine,
               id: OperatorId,
               operator: &Operator,
               slot: &mut Vec<Item>)
               -> ParseResult<()> {
    while slot.iter().any(|item| item.owner() == Some(id)) {
        let position = match operator.kind() {
            OperatorKind::Binary { left_associative } => binary_split(id, slot, left_associative),
            OperatorKind::Unary { prefix } => unary_position(id, slot, prefix),
        };

        let Some(position) = position else {
            break;
        };

        let mut right = slot.split_off(position);
        let left = std::mem::take(slot);
        let Item::Token(token) = right.remove(0) else {
            break;
        };

        let binding = operator.binding(&token.code)
                              .cloned()
                              .ok_or_else(|| ParseError::ConceptMismatch { token: token.code.clone() })?;

        log::trace!("reducing '{}' with {} left and {} right items",
                    token.code,
                    left.len(),
                    right.len());

        let items = match operator.kind() {
            OperatorKind::Binary { .. } => {
                let separator = Token::new(TokenKind::Separator, engine.config.separator.to_string());
                let mut items = left;
                items.push(Item::Token(separator));
                items.extend(right);
                items
            },
            OperatorKind::Unary { prefix: true } => right,
            OperatorKind::Unary { prefix: false } => left,
        };

        let node = reduce_into_node(engine, items, binding)?;
        *slot = vec![Item::Entity(node.into())];
    }

    Ok(())
}

/// Finds the token splitting a slot in two non-empty sides: the rightmost one
/// for left-associative operators, the leftmost otherwise.
fn binary_split(id: OperatorId, slot: &[Item], left_associative: bool) -> Option<usize> {
    let position = if left_associative {
        slot.iter().rposition(|item| item.owner() == Some(id))
    } else {
        slot.iter().position(|item| item.owner() == Some(id))
    }?;

    (position > 0 && position + 1 < slot.len()).then_some(position)
}

/// Finds the token of a unary operator, which has to sit at the start of the
/// slot for prefix operators and at the end for postfix ones, next to a
/// non-empty operand.
fn unary_position(id: OperatorId, slot: &[Item], prefix: bool) -> Option<usize> {
    if slot.len() < 2 {
        return None;
    }

    let position = if prefix { 0 } else { slot.len() - 1 };
    (slot[position].owner() == Some(id)).then_some(position)
}
