/// Core evaluation logic.
///
/// Contains the `EvalResult` alias and the evaluation of entities and
/// expression nodes against an engine.
pub mod core;

/// Function bindings.
///
/// Defines `FunctionBinding` and its direct, eager and lazy callback kinds.
pub mod function;

/// Cooperative yielding for long loops.
pub mod yield_now;
