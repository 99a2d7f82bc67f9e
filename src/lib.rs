//! # formulaic
//!
//! formulaic is an extensible formula parser and evaluator written in Rust.
//! It turns text such as `2x^2 + sin(pi / 4)` into complex-number results,
//! with a grammar that is assembled at runtime from operators, functions and
//! pluggable lexical concepts.
//!
//! ```
//! use formulaic::{Engine, interpreter::value::complex::ComplexNumber};
//!
//! let mut engine = Engine::with_maths();
//! engine.define_variable("x", ComplexNumber::real(2.0));
//!
//! assert_eq!(engine.evaluate("x = 3").unwrap().real, 3.0);
//! assert_eq!(engine.evaluate("2x^2 + 1").unwrap().real, 19.0);
//! assert_eq!(engine.evaluate("(1 + i)(1 - i)").unwrap().to_string(), "2");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed formulas.
///
/// This module declares `Entity` and `ExpressionNode`, the tree the tree
/// builder produces and the evaluator walks, and the variable references held
/// in its leaves.
///
/// # Responsibilities
/// - Defines the node, leaf and variable reference types.
/// - Records how a variable is read: by value, or by identifier on the
///   left-hand side of an assignment.
pub mod ast;
/// The grammar registry.
///
/// This module declares `Engine`, which owns everything a formula is parsed
/// and evaluated against: registered functions, concepts and operators, the
/// implicit operator, the unknown-function handler, the configuration and the
/// environment of variables and constants.
///
/// # Responsibilities
/// - Provides the registration API used to assemble a grammar.
/// - Stores variables and constants and guards temporary overrides.
/// - Offers `parse` and `evaluate` as entry points.
pub mod engine;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while tokenizing,
/// building or evaluating a formula, and the broad `ErrorKind` categories
/// callers can match on.
///
/// # Responsibilities
/// - Defines error enums for the parse and evaluation phases.
/// - Classifies every error as a syntax, reference, type or internal failure.
pub mod error;
/// Orchestrates the path from text to value.
///
/// This module ties together the lexer, the parser, the evaluator and the
/// value types.
///
/// # Responsibilities
/// - Splits text into tokens using the engine's concepts.
/// - Builds and reduces expression trees.
/// - Evaluates trees as local futures.
pub mod interpreter;
/// The standard mathematical grammar.
///
/// Registers arithmetic operators, numeric literals, the constants `pi`, `e`
/// and `i`, the usual functions and the calculus primitives.
pub mod maths;
/// General numeric helpers.
///
/// # Responsibilities
/// - Round numbers to a number of significant digits for display.
/// - Safely convert `f64` values to bounded integers.
pub mod util;

pub use engine::Engine;
pub use interpreter::parser::core::Expression;
