/// Numeric helpers.
///
/// This module provides rounding to a number of significant digits, used when
/// formatting complex numbers, and a checked conversion from `f64` to a small
/// unsigned integer, used by the factorial.
pub mod num;
