use crate::{
    Engine,
    ast::{Entity, ExpressionNode, VariableAccess, VariableRef},
    error::ParseError,
    interpreter::{
        evaluator::function::FunctionBinding,
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            reducer::{Item, reduce_into_node},
        },
    },
};

/// Builds the expression node for a token sequence.
///
/// Bracketed groups and function calls become nested nodes, literals become
/// leaves and variables become references. A variable directly followed by
/// the assignment operator is referenced by identifier instead of by value.
/// The engine's implicit operator is then inserted between adjacent operands
/// and the run is reduced.
///
/// # Parameters
/// - `engine`: The engine supplying functions, operators and settings.
/// - `tokens`: The tokens inside one pair of brackets, or the whole formula.
/// - `binding`: The function the resulting node is bound to.
///
/// # Errors
/// - `ExpectedClosingBracket` / `ExpectedOpeningBracket` for unbalanced
///   brackets.
/// - `UnknownFunction` if a call names no function and the unknown-function
///   handler declines.
/// - `ConstantAssignment` if a constant is assigned.
/// - Any error raised by a literal rule or the reducer.
///
/// # Example
/// ```
/// use formulaic::{
///     Engine,
///     interpreter::{
///         evaluator::function::FunctionBinding,
///         lexer::tokenize,
///         parser::tree::build_tree,
///     },
/// };
///
/// let engine = Engine::with_maths();
/// let tokens = tokenize(&engine, "1, 2 + 3").unwrap();
/// let node = build_tree(&engine, &tokens, FunctionBinding::direct()).unwrap();
/// assert_eq!(node.children.len(), 2);
///
/// let tokens = tokenize(&engine, "nope(1)").unwrap();
/// assert!(build_tree(&engine, &tokens, FunctionBinding::direct()).is_err());
/// ```
pub fn build_tree(engine: &Engine,
                  tokens: &[Token],
                  binding: FunctionBinding)
                  -> ParseResult<ExpressionNode> {
    let mut items = Vec::with_capacity(tokens.len());
    let mut index = 0;

    while index < tokens.len() {
        let token = &tokens[index];

        match &token.kind {
            TokenKind::Call { .. } | TokenKind::Open => {
                let close = matching_close(tokens, index)?;
                let inner = &tokens[index + 1..close];

                let binding = match &token.kind {
                    TokenKind::Call { name } => {
                        engine.resolve_function(name)
                              .ok_or_else(|| ParseError::UnknownFunction { name: name.clone() })?
                    },
                    _ => FunctionBinding::direct(),
                };

                items.push(Item::Entity(build_tree(engine, inner, binding)?.into()));
                index = close;
            },
            TokenKind::Close => return Err(ParseError::ExpectedOpeningBracket),
            TokenKind::Literal { rule } => {
                items.push(Item::Entity(Entity::Leaf(rule(engine, &token.code)?)));
            },
            TokenKind::Variable(variable) => {
                let assigned = tokens.get(index + 1).is_some_and(|next| {
                                                        next.owner().is_some()
                                                        && next.code
                                                           == engine.config.assignment_operator
                                                    });

                if assigned && !variable.can_set() {
                    return Err(ParseError::ConstantAssignment { name: variable.id.clone() });
                }

                let access = if assigned {
                    VariableAccess::Identifier
                } else {
                    VariableAccess::Value
                };

                items.push(Item::Entity(Entity::Variable(VariableRef { id: variable.id.clone(),
                                                                       source: variable.source,
                                                                       access })));
            },
            TokenKind::Separator | TokenKind::Operator { .. } => {
                items.push(Item::Token(token.clone()));
            },
        }

        index += 1;
    }

    reduce_into_node(engine, insert_implicit_operators(engine, items), binding)
}

/// Returns the index of the `Close` token matching the bracket or call at
/// `open`.
fn matching_close(tokens: &[Token], open: usize) -> ParseResult<usize> {
    let mut depth = 0_usize;

    for (index, token) in tokens.iter().enumerate().skip(open + 1) {
        match token.kind {
            TokenKind::Open | TokenKind::Call { .. } => depth += 1,
            TokenKind::Close if depth == 0 => return Ok(index),
            TokenKind::Close => depth -= 1,
            _ => {},
        }
    }

    Err(ParseError::ExpectedClosingBracket)
}

/// Inserts the engine's implicit operator between every two adjacent
/// operands, turning `2x` into `2 * x`.
fn insert_implicit_operators(engine: &Engine, items: Vec<Item>) -> Vec<Item> {
    let Some(implicit) = engine.implicit_operator() else {
        return items;
    };

    let mut result: Vec<Item> = Vec::with_capacity(items.len() * 2);
    for item in items {
        if matches!(item, Item::Entity(_)) && matches!(result.last(), Some(Item::Entity(_))) {
            result.push(Item::Token(implicit.clone()));
        }
        result.push(item);
    }
    result
}
