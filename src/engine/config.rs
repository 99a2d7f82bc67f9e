use std::f64::consts::PI;

use crate::interpreter::value::complex::ComplexNumber;

/// Default number of equal steps used by `integ`.
pub const DEFAULT_INTEGRATION_SUBDIVISIONS: usize = 10_000;
/// Default argument separator.
pub const DEFAULT_SEPARATOR: char = ',';
/// Argument separator used when the decimal point is a comma.
pub const COMMA_DECIMAL_SEPARATOR: char = ';';
/// Default assignment operator code.
pub const DEFAULT_ASSIGNMENT_OPERATOR: &str = "=";

/// The unit trigonometric functions take and inverse trigonometric functions
/// return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AngleUnit {
    /// Radians (the default).
    #[default]
    Radians,
    /// Degrees, 360 per turn.
    Degrees,
    /// Gradians, 400 per turn.
    Gradians,
}

impl AngleUnit {
    /// Number of radians in one unit.
    #[must_use]
    pub const fn radians_per_unit(self) -> f64 {
        match self {
            Self::Radians => 1.0,
            Self::Degrees => PI / 180.0,
            Self::Gradians => PI / 200.0,
        }
    }

    /// Converts an angle in this unit to radians.
    #[must_use]
    pub const fn to_radians(self, angle: ComplexNumber) -> ComplexNumber {
        angle.scale(self.radians_per_unit())
    }

    /// Converts an angle in radians to this unit.
    #[must_use]
    pub const fn from_radians(self, angle: ComplexNumber) -> ComplexNumber {
        angle.scale(1.0 / self.radians_per_unit())
    }
}

/// Settings consulted while tokenizing and evaluating.
///
/// ## Usage
///
/// The configuration is a public field of [`Engine`](crate::Engine) and may be
/// changed between parses:
///
/// ```
/// use formulaic::{Engine, engine::config::AngleUnit};
///
/// let mut engine = Engine::with_maths();
/// engine.config.angle_unit = AngleUnit::Degrees;
/// let value = engine.evaluate("sin(90)").unwrap();
/// assert!((value.real - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Character separating function arguments.
    pub separator:                char,
    /// Operator code that marks an assignment for variable lookahead.
    pub assignment_operator:      String,
    /// Whether numeric literals use `,` as their decimal point.
    pub decimal_point_is_comma:   bool,
    /// Unit of trigonometric arguments and inverse trigonometric results.
    pub angle_unit:               AngleUnit,
    /// Number of equal steps `integ` divides its interval into.
    pub integration_subdivisions: usize,
}

impl EngineConfig {
    /// Switches the decimal point convention, moving the argument separator
    /// out of the way (`;` for comma decimals, `,` otherwise).
    pub fn set_decimal_point_is_comma(&mut self, decimal_point_is_comma: bool) {
        self.decimal_point_is_comma = decimal_point_is_comma;
        self.separator = if decimal_point_is_comma {
            COMMA_DECIMAL_SEPARATOR
        } else {
            DEFAULT_SEPARATOR
        };
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { separator:                DEFAULT_SEPARATOR,
               assignment_operator:      DEFAULT_ASSIGNMENT_OPERATOR.to_string(),
               decimal_point_is_comma:   false,
               angle_unit:               AngleUnit::default(),
               integration_subdivisions: DEFAULT_INTEGRATION_SUBDIVISIONS, }
    }
}
