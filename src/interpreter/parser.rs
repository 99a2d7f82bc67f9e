/// Parsed expressions.
///
/// Contains the `ParseResult` alias and `Expression`, the entry point tying
/// tokenizing, tree building and evaluation together.
pub mod core;

/// Operator definitions.
///
/// Declares `Operator`, its shapes and the `OperatorId` handle tokens carry.
pub mod operator;

/// Operator reduction.
///
/// Contracts the flat run of operands and operator tokens inside one bracket
/// level into nested expression nodes, level by level of precedence.
pub mod reducer;

/// Tree building.
///
/// Turns a token sequence into an expression tree: resolves brackets and
/// function calls, converts literals and variables, inserts implicit operators
/// and hands the result to the reducer.
pub mod tree;
