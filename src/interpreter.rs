/// The evaluator module computes values from expression trees.
///
/// The evaluator walks entities and nodes as local futures. Direct and eager
/// bindings evaluate their children first; lazy bindings receive them
/// unevaluated.
///
/// # Responsibilities
/// - Evaluates leaves, variable references and nodes.
/// - Defines function bindings and their evaluation policies.
/// - Lets long-running functions yield to the executor.
pub mod evaluator;
/// The lexer module tokenizes formulas.
///
/// The lexer reads the raw text and produces tokens, asking the engine's
/// concepts first and falling back to the fixed structure of the language:
/// comments, function calls, brackets, separators and whitespace.
///
/// # Responsibilities
/// - Converts text into tokens carrying their source code.
/// - Defines the `Concept` extension point and the built-in concepts.
/// - Reports characters nothing recognises.
pub mod lexer;
/// The parser module builds expression trees from tokens.
///
/// # Responsibilities
/// - Groups brackets and function calls into nested nodes.
/// - Reduces operators in order of precedence.
/// - Provides `Expression`, a parsed formula.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines `ComplexNumber` with its arithmetic, transcendental functions
///   and formatting.
/// - Defines `Value`, a number or a variable identifier.
pub mod value;
