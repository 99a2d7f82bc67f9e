use std::{
    cmp::Ordering,
    f64::consts::FRAC_PI_2,
    fmt::{self, Display},
    hash::{Hash, Hasher},
    ops,
};

use ordered_float::OrderedFloat;

use crate::util::num::{DISPLAY_PRECISION, round_significant};

/// `0` as a complex number.
pub const ZERO: ComplexNumber = ComplexNumber::new(0.0, 0.0);
/// `1` as a complex number.
pub const ONE: ComplexNumber = ComplexNumber::new(1.0, 0.0);
/// The imaginary unit `i`.
pub const I: ComplexNumber = ComplexNumber::new(0.0, 1.0);

/// A complex number, the only kind of number formulas compute with.
///
/// Every operation returns a new value; a `ComplexNumber` is never mutated in
/// place by the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexNumber {
    /// Real component.
    pub real:      f64,
    /// Coefficient of `i`.
    pub imaginary: f64,
}

impl ComplexNumber {
    /// Creates `real + imaginary·i`.
    ///
    /// # Example
    /// ```
    /// use formulaic::interpreter::value::complex::ComplexNumber;
    /// let z = ComplexNumber::new(5.0, -1.0);
    /// assert_eq!((z.real, z.imaginary), (5.0, -1.0));
    /// ```
    #[must_use]
    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }

    /// Constructs a purely real number.
    #[must_use]
    pub const fn real(real: f64) -> Self {
        Self::new(real, 0.0)
    }

    /// A real `NaN`, the result of calculus on values outside their domain.
    #[must_use]
    pub const fn nan() -> Self {
        Self::real(f64::NAN)
    }

    /// Returns `true` if the imaginary part is exactly zero.
    #[must_use]
    pub const fn is_real(&self) -> bool {
        self.imaginary == 0.0
    }

    /// Returns `true` if either part is `NaN`.
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        self.real.is_nan() || self.imaginary.is_nan()
    }

    /// Returns `true` if both parts are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.real == 0.0 && self.imaginary == 0.0
    }

    /// Modulus `|z|`.
    ///
    /// # Example
    /// ```
    /// use formulaic::interpreter::value::complex::ComplexNumber;
    /// assert_eq!(ComplexNumber::new(3.0, 4.0).abs(), 5.0);
    /// ```
    #[must_use]
    pub fn abs(&self) -> f64 {
        self.real.hypot(self.imaginary)
    }

    /// Phase angle in radians, in `(-π, π]`.
    #[must_use]
    pub fn arg(&self) -> f64 {
        self.imaginary.atan2(self.real)
    }

    /// Mirrors the number across the real axis.
    #[must_use]
    pub const fn conj(&self) -> Self {
        Self { real:      self.real,
               imaginary: -self.imaginary, }
    }

    /// Multiplies both parts by a real factor.
    #[must_use]
    pub const fn scale(&self, factor: f64) -> Self {
        Self { real:      self.real * factor,
               imaginary: self.imaginary * factor, }
    }

    /// Raises the complex number to a complex power.
    ///
    /// Cheap closed forms are used where they exist:
    /// - a zero exponent gives `1`;
    /// - a positive real base with a real exponent uses `f64::powf`;
    /// - a real base with an integral real exponent uses `f64::powi`;
    /// - a purely imaginary base with an integral real exponent cycles through
    ///   `1, i, -1, -i`;
    /// - a zero base with a positive real exponent gives `0`.
    ///
    /// Anything else goes through the polar form `r·e^(iθ)`.
    ///
    /// # Example
    /// ```
    /// use formulaic::interpreter::value::complex::ComplexNumber;
    ///
    /// let two = ComplexNumber::real(2.0);
    /// assert_eq!(two.pow(ComplexNumber::real(10.0)), ComplexNumber::real(1024.0));
    ///
    /// let i = ComplexNumber::new(0.0, 1.0);
    /// assert_eq!(i.pow(ComplexNumber::real(2.0)), ComplexNumber::real(-1.0));
    /// ```
    #[must_use]
    pub fn pow(self, power: Self) -> Self {
        if power.is_zero() {
            return ONE;
        }

        if power.is_real() {
            if self.real > 0.0 && self.is_real() {
                return Self::real(self.real.powf(power.real));
            }

            if let Some(exponent) = integral_exponent(power.real) {
                if self.is_real() && self.real != 0.0 {
                    return Self::real(self.real.powi(exponent));
                }

                if self.real == 0.0 && self.imaginary != 0.0 {
                    let magnitude = self.imaginary.powi(exponent);
                    return match exponent.rem_euclid(4) {
                        0 => Self::real(magnitude),
                        1 => Self::new(0.0, magnitude),
                        2 => Self::real(-magnitude),
                        _ => Self::new(0.0, -magnitude),
                    };
                }
            }
        }

        if self.is_zero() && power.real > 0.0 && power.imaginary >= 0.0 {
            return ZERO;
        }

        let arg = self.arg();
        let log_hypot = self.abs().ln();
        let coefficient = power.real.mul_add(log_hypot, -(power.imaginary * arg)).exp();
        let angle = power.imaginary.mul_add(log_hypot, power.real * arg);

        Self { real:      coefficient * angle.cos(),
               imaginary: coefficient * angle.sin(), }
    }

    /// Principal square root. Negative reals give a positive imaginary root.
    ///
    /// # Example
    /// ```
    /// use formulaic::interpreter::value::complex::ComplexNumber;
    ///
    /// assert_eq!(ComplexNumber::real(9.0).sqrt(), ComplexNumber::real(3.0));
    /// assert_eq!(ComplexNumber::real(-4.0).sqrt(), ComplexNumber::new(0.0, 2.0));
    /// ```
    #[must_use]
    pub fn sqrt(self) -> Self {
        if self.is_real() {
            if self.real < 0.0 {
                return Self::new(0.0, (-self.real).sqrt());
            }
            return Self::real(self.real.sqrt());
        }

        self.pow(Self::real(0.5))
    }

    /// `e^z`.
    #[must_use]
    pub fn exp(self) -> Self {
        let magnitude = self.real.exp();
        Self { real:      magnitude * self.imaginary.cos(),
               imaginary: magnitude * self.imaginary.sin(), }
    }

    /// Returns the natural logarithm (principal branch).
    ///
    /// # Example
    /// ```
    /// use formulaic::interpreter::value::complex::ComplexNumber;
    /// let ln = ComplexNumber::real(1.0).ln();
    /// assert!(ln.real.abs() < 1e-12);
    /// assert!(ln.imaginary.abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn ln(self) -> Self {
        Self { real:      self.abs().ln(),
               imaginary: self.arg(), }
    }

    /// Returns the base-10 logarithm.
    #[must_use]
    pub fn log10(self) -> Self {
        self.ln().scale(std::f64::consts::LOG10_E)
    }

    /// Returns the logarithm of `self` in the given base.
    #[must_use]
    pub fn log_base(self, base: Self) -> Self {
        self.ln() / base.ln()
    }

    /// Sine, in radians.
    #[must_use]
    pub fn sin(self) -> Self {
        Self { real:      self.real.sin() * self.imaginary.cosh(),
               imaginary: self.real.cos() * self.imaginary.sinh(), }
    }

    /// Cosine, in radians.
    #[must_use]
    pub fn cos(self) -> Self {
        Self { real:      self.real.cos() * self.imaginary.cosh(),
               imaginary: -self.real.sin() * self.imaginary.sinh(), }
    }

    /// Tangent, `sin(z) / cos(z)`.
    #[must_use]
    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }

    /// Hyperbolic sine.
    #[must_use]
    pub fn sinh(self) -> Self {
        Self { real:      self.real.sinh() * self.imaginary.cos(),
               imaginary: self.real.cosh() * self.imaginary.sin(), }
    }

    /// Hyperbolic cosine.
    #[must_use]
    pub fn cosh(self) -> Self {
        Self { real:      self.real.cosh() * self.imaginary.cos(),
               imaginary: self.real.sinh() * self.imaginary.sin(), }
    }

    /// Hyperbolic tangent, `sinh(z) / cosh(z)`.
    #[must_use]
    pub fn tanh(self) -> Self {
        self.sinh() / self.cosh()
    }

    /// Returns the inverse sine, `-i·ln(iz + √(1 - z²))`.
    ///
    /// # Example
    /// ```
    /// use formulaic::interpreter::value::complex::ComplexNumber;
    /// let angle = ComplexNumber::real(0.5).asin();
    /// assert!((angle.real - std::f64::consts::FRAC_PI_6).abs() < 1e-12);
    /// assert!(angle.imaginary.abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn asin(self) -> Self {
        let root = (ONE - self * self).sqrt();
        -(I * (I * self + root).ln())
    }

    /// Returns the inverse cosine, `π/2 - asin(z)`.
    #[must_use]
    pub fn acos(self) -> Self {
        Self::real(FRAC_PI_2) - self.asin()
    }

    /// Returns the inverse tangent, `(i/2)·(ln(1 - iz) - ln(1 + iz))`.
    #[must_use]
    pub fn atan(self) -> Self {
        let iz = I * self;
        (I * ((ONE - iz).ln() - (ONE + iz).ln())).scale(0.5)
    }

    /// Returns the inverse hyperbolic sine, `ln(z + √(z² + 1))`.
    #[must_use]
    pub fn asinh(self) -> Self {
        (self + (self * self + ONE).sqrt()).ln()
    }

    /// Returns the inverse hyperbolic cosine, `ln(z + √(z + 1)·√(z - 1))`.
    #[must_use]
    pub fn acosh(self) -> Self {
        (self + (self + ONE).sqrt() * (self - ONE).sqrt()).ln()
    }

    /// Returns the inverse hyperbolic tangent, `½·ln((1 + z) / (1 - z))`.
    #[must_use]
    pub fn atanh(self) -> Self {
        ((ONE + self) / (ONE - self)).ln().scale(0.5)
    }

    /// Rounds both parts to the given number of significant digits.
    #[must_use]
    pub fn round_precision(&self, digits: usize) -> Self {
        Self { real:      round_significant(self.real, digits),
               imaginary: round_significant(self.imaginary, digits), }
    }
}

/// Returns the exponent as `i32` if it is integral and small enough for
/// `powi`.
#[allow(clippy::cast_possible_truncation)]
fn integral_exponent(power: f64) -> Option<i32> {
    if power.fract() == 0.0 && power.abs() <= f64::from(i32::MAX) {
        Some(power as i32)
    } else {
        None
    }
}

/// Writes a real number the way formulas spell it.
fn write_real(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        write!(f, "NaN")
    } else if value.is_infinite() {
        write!(f, "{}Infinity", if value < 0.0 { "-" } else { "" })
    } else {
        write!(f, "{value}")
    }
}

impl Display for ComplexNumber {
    /// Formats the number rounded to 15 significant digits.
    ///
    /// # Example
    /// ```
    /// use formulaic::interpreter::value::complex::ComplexNumber;
    ///
    /// assert_eq!(ComplexNumber::new(3.0, 0.0).to_string(), "3");
    /// assert_eq!(ComplexNumber::new(0.0, -1.0).to_string(), "-i");
    /// assert_eq!(ComplexNumber::new(2.0, 1.0).to_string(), "2 + i");
    /// assert_eq!(ComplexNumber::new(2.0, -3.5).to_string(), "2 - 3.5i");
    /// assert_eq!(ComplexNumber::new(0.1 + 0.2, 0.0).to_string(), "0.3");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let output = self.round_precision(DISPLAY_PRECISION);

        if output.is_nan() {
            return write!(f, "NaN");
        }

        if output.imaginary == 0.0 {
            return write_real(f, output.real);
        }

        if output.real == 0.0 {
            return match output.imaginary {
                1.0 => write!(f, "i"),
                -1.0 => write!(f, "-i"),
                imaginary => {
                    write_real(f, imaginary)?;
                    write!(f, "i")
                },
            };
        }

        write_real(f, output.real)?;
        write!(f, " {} ", if output.imaginary < 0.0 { "-" } else { "+" })?;

        let coefficient = output.imaginary.abs();
        if coefficient != 1.0 {
            write_real(f, coefficient)?;
        }
        write!(f, "i")
    }
}

impl ops::Neg for ComplexNumber {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { real:      -self.real,
               imaginary: -self.imaginary, }
    }
}

impl ops::Add for ComplexNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { real:      self.real + rhs.real,
               imaginary: self.imaginary + rhs.imaginary, }
    }
}

impl ops::AddAssign for ComplexNumber {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl ops::Sub for ComplexNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { real:      self.real - rhs.real,
               imaginary: self.imaginary - rhs.imaginary, }
    }
}

impl ops::Mul for ComplexNumber {
    type Output = Self;

    // (a + bi)(c + di) = (ac - bd) + (ad + bc)i
    fn mul(self, rhs: Self) -> Self::Output {
        Self { real:      self.real
                              .mul_add(rhs.real, -(self.imaginary * rhs.imaginary)),
               imaginary: self.real.mul_add(rhs.imaginary, self.imaginary * rhs.real), }
    }
}

impl ops::MulAssign for ComplexNumber {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl ops::Div for ComplexNumber {
    type Output = Self;

    // Division by zero is not special-cased; `inf` and `NaN` propagate.
    fn div(self, rhs: Self) -> Self::Output {
        let denom = rhs.real.mul_add(rhs.real, rhs.imaginary * rhs.imaginary);
        Self { real:      self.real.mul_add(rhs.real, self.imaginary * rhs.imaginary) / denom,
               imaginary: self.imaginary
                              .mul_add(rhs.real, -(self.real * rhs.imaginary))
                          / denom, }
    }
}

impl From<f64> for ComplexNumber {
    fn from(value: f64) -> Self {
        Self::real(value)
    }
}

impl PartialEq for ComplexNumber {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.real) == OrderedFloat(other.real)
        && OrderedFloat(self.imaginary) == OrderedFloat(other.imaginary)
    }
}

impl Eq for ComplexNumber {}

impl Hash for ComplexNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        OrderedFloat(self.real).hash(state);
        OrderedFloat(self.imaginary).hash(state);
    }
}

impl PartialOrd for ComplexNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComplexNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.real).cmp(&OrderedFloat(other.real))
                               .then_with(|| {
                                   OrderedFloat(self.imaginary).cmp(&OrderedFloat(other.imaginary))
                               })
    }
}
