/// Complex number support.
///
/// Defines the `ComplexNumber` type every formula evaluates to, with the
/// arithmetic operators, powers, roots, logarithms, the trigonometric and
/// hyperbolic families and their inverses, and display formatting.
pub mod complex;

/// The runtime value type.
///
/// Defines `Value`, which is either a number or the identifier of a variable.
pub mod core;
