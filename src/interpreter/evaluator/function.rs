use std::{fmt, rc::Rc};

use futures::future::LocalBoxFuture;

use crate::{
    Engine,
    ast::Entity,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Callback of an eager function: receives the resolved values of its
/// arguments.
pub type EagerFn = Rc<dyn Fn(&Engine, &[Value]) -> EvalResult<Value>>;

/// Callback of a lazy function: receives its unevaluated arguments and drives
/// their evaluation itself.
pub type LazyFn =
    Rc<dyn for<'a> Fn(&'a Engine, &'a [Entity]) -> LocalBoxFuture<'a, EvalResult<Value>>>;

/// How a bound function receives its arguments.
#[derive(Clone)]
pub enum Callback {
    /// Evaluates to the first argument unchanged. Used for brackets and the
    /// root of an expression.
    Direct,
    /// All arguments are evaluated first, then the callback runs on the
    /// values.
    Eager(EagerFn),
    /// The callback receives the argument entities and evaluates them as and
    /// when it needs to.
    Lazy(LazyFn),
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "Direct"),
            Self::Eager(_) => write!(f, "Eager(..)"),
            Self::Lazy(_) => write!(f, "Lazy(..)"),
        }
    }
}

/// A named function together with its evaluation policy.
///
/// # Example
/// ```
/// use formulaic::{
///     Engine,
///     interpreter::{evaluator::function::FunctionBinding, value::core::Value},
/// };
///
/// let mut engine = Engine::with_maths();
/// engine.register_function(FunctionBinding::eager("twice", |_, args| {
///     let x = args[0].as_number()?;
///     Ok(Value::Number(x + x))
/// }));
///
/// assert_eq!(engine.evaluate("twice(21)").unwrap().real, 42.0);
/// ```
#[derive(Debug, Clone)]
pub struct FunctionBinding {
    name:     String,
    callback: Callback,
}

impl FunctionBinding {
    /// Creates a binding whose arguments are evaluated before `callback` runs.
    pub fn eager<F>(name: impl Into<String>, callback: F) -> Self
        where F: Fn(&Engine, &[Value]) -> EvalResult<Value> + 'static
    {
        Self { name:     name.into(),
               callback: Callback::Eager(Rc::new(callback)), }
    }

    /// Creates a binding whose callback receives the unevaluated argument
    /// entities.
    pub fn lazy<F>(name: impl Into<String>, callback: F) -> Self
        where F: for<'a> Fn(&'a Engine, &'a [Entity]) -> LocalBoxFuture<'a, EvalResult<Value>>
                  + 'static
    {
        Self { name:     name.into(),
               callback: Callback::Lazy(Rc::new(callback)), }
    }

    /// The identity binding, evaluating to its first argument.
    #[must_use]
    pub fn direct() -> Self {
        Self { name:     String::new(),
               callback: Callback::Direct, }
    }

    /// The name the function is called by. Empty for the direct binding.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The evaluation policy and callback.
    #[must_use]
    pub const fn callback(&self) -> &Callback {
        &self.callback
    }

    /// Returns `true` for the identity binding.
    #[must_use]
    pub const fn is_direct(&self) -> bool {
        matches!(self.callback, Callback::Direct)
    }
}

/// Ensures a function received exactly `expected` arguments.
///
/// # Errors
/// Returns `RuntimeError::ArgumentCountMismatch` otherwise.
pub fn check_arity<T>(name: &str, args: &[T], expected: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(crate::error::RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                               expected,
                                                               found: args.len() })
    }
}
