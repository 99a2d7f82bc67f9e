/// Number of significant digits kept when a number is displayed.
pub const DISPLAY_PRECISION: usize = 15;

/// Rounds `value` to `digits` significant decimal digits.
///
/// Zero, infinities and `NaN` are returned unchanged. `-0.0` is normalised to
/// `0.0` so that it never prints with a sign.
///
/// ## Parameters
/// - `value`: The number to round.
/// - `digits`: The number of significant digits to keep (at least one).
///
/// ## Example
/// ```
/// use formulaic::util::num::round_significant;
///
/// assert_eq!(round_significant(0.1 + 0.2, 15), 0.3);
/// assert_eq!(round_significant(123_456.0, 2), 120_000.0);
/// assert!(round_significant(f64::NAN, 15).is_nan());
/// ```
#[must_use]
pub fn round_significant(value: f64, digits: usize) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value + 0.0;
    }

    let precision = digits.max(1) - 1;
    format!("{value:.precision$e}").parse::<f64>()
                                   .map_or(value, |rounded| rounded + 0.0)
}

/// Converts a finite `f64` holding an integral value in `[0, max]` to `u32`.
///
/// ## Returns
/// - `Some(u32)`: The converted value if it is integral and within range.
/// - `None`: If the value is fractional, negative, non-finite or above `max`.
///
/// ## Example
/// ```
/// use formulaic::util::num::f64_to_u32_bounded;
///
/// assert_eq!(f64_to_u32_bounded(5.0, 170), Some(5));
/// assert_eq!(f64_to_u32_bounded(5.5, 170), None);
/// assert_eq!(f64_to_u32_bounded(171.0, 170), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f64_to_u32_bounded(value: f64, max: u32) -> Option<u32> {
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value > f64::from(max) {
        return None;
    }

    Some(value as u32)
}
