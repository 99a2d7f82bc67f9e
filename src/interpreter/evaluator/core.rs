use futures::{
    FutureExt,
    future::{self, LocalBoxFuture},
};

use crate::{
    Engine,
    ast::{Entity, ExpressionNode, VariableAccess, VariableRef, VariableSource},
    error::RuntimeError,
    interpreter::{evaluator::function::Callback, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

impl Entity {
    /// Evaluates the entity against the engine's environment.
    ///
    /// Leaves resolve immediately. Variables are read from the environment when
    /// the returned future is polled, not when it is created. Nodes evaluate
    /// according to their binding's policy.
    ///
    /// # Example
    /// ```
    /// use formulaic::Engine;
    ///
    /// let engine = Engine::with_maths();
    /// let expression = engine.parse("1 + 2 * 3").unwrap();
    /// let value = futures::executor::block_on(expression.root().evaluate(&engine)).unwrap();
    /// assert_eq!(value.as_number().unwrap().real, 7.0);
    /// ```
    pub fn evaluate<'a>(&'a self, engine: &'a Engine) -> LocalBoxFuture<'a, EvalResult<Value>> {
        match self {
            Self::Leaf(value) => future::ready(Ok(value.clone())).boxed_local(),
            Self::Variable(variable) => future::lazy(move |_| engine.resolve(variable)).boxed_local(),
            Self::Node(node) => node.evaluate(engine),
        }
    }
}

impl ExpressionNode {
    /// Evaluates the node.
    ///
    /// Direct and eager bindings evaluate their children one after another,
    /// left to right; the first failure short-circuits. Lazy bindings hand the
    /// raw children to their callback.
    ///
    /// Children never run interleaved, so a calculus function overriding a
    /// variable finishes and restores it before its next sibling starts.
    pub fn evaluate<'a>(&'a self, engine: &'a Engine) -> LocalBoxFuture<'a, EvalResult<Value>> {
        async move {
            match self.binding.callback() {
                Callback::Direct => {
                    let mut values = self.evaluate_children(engine).await?;
                    if values.is_empty() {
                        return Err(RuntimeError::MissingValue);
                    }
                    Ok(values.swap_remove(0))
                },
                Callback::Eager(callback) => {
                    let values = self.evaluate_children(engine).await?;
                    callback(engine, &values)
                },
                Callback::Lazy(callback) => callback(engine, &self.children).await,
            }
        }.boxed_local()
    }

    async fn evaluate_children(&self, engine: &Engine) -> EvalResult<Vec<Value>> {
        let mut values = Vec::with_capacity(self.children.len());
        for child in &self.children {
            values.push(child.evaluate(engine).await?);
        }
        Ok(values)
    }
}

impl Engine {
    /// Resolves a variable reference to its value or identifier.
    fn resolve(&self, variable: &VariableRef) -> EvalResult<Value> {
        if variable.access == VariableAccess::Identifier {
            return Ok(Value::Identifier(variable.id.clone()));
        }

        let value = match variable.source {
            VariableSource::Variable => self.variable(&variable.id),
            VariableSource::Constant => self.constant(&variable.id),
        };

        value.map(Value::Number)
             .ok_or_else(|| RuntimeError::UnknownVariable { name: variable.id.clone() })
    }
}
