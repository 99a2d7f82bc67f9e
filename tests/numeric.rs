use std::f64::consts::{FRAC_PI_3, PI};

use formulaic::{
    Engine,
    error::ParseError,
    interpreter::value::{
        complex::{ComplexNumber, I, ONE, ZERO},
        core::Value,
    },
    maths::literal::{parse_decimal, parse_radix},
    util::num::round_significant,
};

fn assert_near(actual: ComplexNumber, expected: ComplexNumber) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

#[test]
fn powers() {
    let two = ComplexNumber::real(2.0);

    assert_eq!(ZERO.pow(ZERO), ONE);
    assert_eq!(ZERO.pow(two), ZERO);
    assert_eq!(ComplexNumber::real(-2.0).pow(ComplexNumber::real(3.0)), ComplexNumber::real(-8.0));
    assert_eq!(two.pow(ComplexNumber::real(-2.0)), ComplexNumber::real(0.25));

    assert_eq!(I.pow(ComplexNumber::real(-1.0)), ComplexNumber::new(0.0, -1.0));
    assert_eq!(ComplexNumber::new(0.0, 2.0).pow(ComplexNumber::real(3.0)), ComplexNumber::new(0.0, -8.0));

    // Principal cube root of a negative number.
    assert_near(ComplexNumber::real(-8.0).pow(ComplexNumber::real(1.0 / 3.0)),
                ComplexNumber::new(1.0, 3_f64.sqrt()));
    // i^i is real.
    assert_near(I.pow(I), ComplexNumber::real((-PI / 2.0).exp()));
}

#[test]
fn roots_and_logarithms() {
    assert_near(ComplexNumber::new(3.0, 4.0).sqrt(), ComplexNumber::new(2.0, 1.0));
    assert_near(ComplexNumber::real(-1.0).ln(), ComplexNumber::new(0.0, PI));
    assert_near(ComplexNumber::real(1000.0).log10(), ComplexNumber::real(3.0));
    assert_near(ComplexNumber::real(8.0).log_base(ComplexNumber::real(2.0)), ComplexNumber::real(3.0));
}

#[test]
fn transcendental_identities() {
    let z = ComplexNumber::new(1.0, 2.0);

    assert_near(ComplexNumber::new(0.0, PI).exp(), ComplexNumber::real(-1.0));
    assert_near(z.sin() * z.sin() + z.cos() * z.cos(), ONE);
    assert_near(z.cosh() * z.cosh() - z.sinh() * z.sinh(), ONE);
    assert_near(z.tan(), z.sin() / z.cos());

    assert_near(z.sin().asin(), z);
    assert_near(z.tan().atan(), z);

    // Inverse hyperbolic functions return imaginary parts within ±π/2.
    let w = ComplexNumber::new(0.5, 1.0);
    assert_near(w.sinh().asinh(), w);
    assert_near(w.cosh().acosh(), w);
    assert_near(w.tanh().atanh(), w);
    assert_near(ComplexNumber::real(0.5).acos(), ComplexNumber::real(FRAC_PI_3));
}

#[test]
fn display() {
    assert_eq!(ZERO.to_string(), "0");
    assert_eq!(ComplexNumber::new(-0.0, -0.0).to_string(), "0");
    assert_eq!(I.to_string(), "i");
    assert_eq!(ComplexNumber::new(1.0, -1.0).to_string(), "1 - i");
    assert_eq!(ComplexNumber::new(-2.5, 0.5).to_string(), "-2.5 + 0.5i");
    assert_eq!(ComplexNumber::real(2.0 / 3.0).to_string(), "0.666666666666667");

    assert_eq!(ComplexNumber::nan().to_string(), "NaN");
    assert_eq!(ComplexNumber::new(1.0, f64::NAN).to_string(), "NaN");
    assert_eq!(ComplexNumber::real(f64::INFINITY).to_string(), "Infinity");
    assert_eq!(ComplexNumber::real(f64::NEG_INFINITY).to_string(), "-Infinity");
    assert_eq!((ONE / ZERO).to_string(), "NaN");
}

#[test]
fn equality_and_ordering() {
    assert_eq!(ComplexNumber::nan(), ComplexNumber::nan());
    assert_eq!(ComplexNumber::real(0.0), ComplexNumber::real(-0.0));
    assert_ne!(ONE, I);

    let mut values = vec![I, ONE, ZERO, ComplexNumber::real(-1.0)];
    values.sort();
    assert_eq!(values, [ComplexNumber::real(-1.0), ZERO, I, ONE]);
}

#[test]
fn significant_digits() {
    assert_eq!(round_significant(-0.000_123_456, 3), -0.000_123);
    assert_eq!(round_significant(987.654, 1), 1000.0);
    assert_eq!(round_significant(-0.0, 15).to_string(), "0");
    assert_eq!(round_significant(f64::INFINITY, 15), f64::INFINITY);
}

#[test]
fn literal_rules() {
    let mut engine = Engine::with_maths();

    assert_eq!(parse_decimal(&engine, "2.5i"), Ok(Value::Number(ComplexNumber::new(0.0, 2.5))));
    assert_eq!(parse_decimal(&engine, "1e3"), Ok(Value::from(1000.0)));
    assert_eq!(parse_decimal(&engine, "1,5"),
               Err(ParseError::InvalidLiteral { code: "1,5".to_string() }));

    engine.config.set_decimal_point_is_comma(true);
    assert_eq!(parse_decimal(&engine, "1,5"), Ok(Value::from(1.5)));

    assert_eq!(parse_radix(&engine, "0xff"), Ok(Value::from(255.0)));
    assert_eq!(parse_radix(&engine, "0B1001"), Ok(Value::from(9.0)));
    assert!(parse_radix(&engine, "0o9").is_err());
    assert!(parse_radix(&engine, "12").is_err());
}
