use formulaic::{
    Engine,
    engine::config::AngleUnit,
    error::{Error, ErrorKind, ParseError, RuntimeError},
    interpreter::value::complex::ComplexNumber,
};

fn engine() -> Engine {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut engine = Engine::with_maths();
    engine.define_variable("x", ComplexNumber::real(3.0));
    engine.define_variable("y", ComplexNumber::real(4.0));
    engine
}

fn evaluate(engine: &Engine, src: &str) -> ComplexNumber {
    engine.evaluate(src)
          .unwrap_or_else(|e| panic!("Formula '{src}' failed: {e}"))
}

fn assert_value(src: &str, expected: f64) {
    let value = evaluate(&engine(), src);
    assert!((value.real - expected).abs() < 1e-9 && value.imaginary.abs() < 1e-9,
            "Formula '{src}' evaluated to {value}, expected {expected}");
}

fn assert_display(src: &str, expected: &str) {
    assert_eq!(evaluate(&engine(), src).to_string(), expected, "Formula '{src}'");
}

fn assert_failure(src: &str, kind: ErrorKind) -> Error {
    match engine().evaluate(src) {
        Ok(value) => panic!("Formula '{src}' evaluated to {value} but was expected to fail"),
        Err(e) => {
            assert_eq!(e.kind(), kind, "Formula '{src}' failed with {e}");
            e
        },
    }
}

#[test]
fn arithmetic_and_precedence() {
    assert_value("1 + 2 * 3", 7.0);
    assert_value("(1 + 2) * 3", 9.0);
    assert_value("10 - 4 - 3", 3.0);
    assert_value("100 / 10 / 5", 2.0);
    assert_value("2 × 3 ÷ 4", 1.5);
    assert_value("2^3^2", 512.0);
    assert_value("(2^3)^2", 64.0);
}

#[test]
fn unary_and_postfix_operators() {
    assert_value("-2^2", -4.0);
    assert_value("2^-1", 0.5);
    assert_value("+5", 5.0);
    assert_value("3 - -2", 5.0);
    assert_value("3! + 1", 7.0);
    assert_value("-3!", -6.0);
    assert_value("2 * 3!", 12.0);
}

#[test]
fn implicit_multiplication() {
    assert_value("2x", 6.0);
    assert_value("xy", 12.0);
    assert_value("2(3 + 1)", 8.0);
    assert_value("(1 + 1)(2 + 2)", 8.0);
    assert_value("x(2)", 6.0);
    assert_value("3x!", 18.0);
    assert_value("2pi", 2.0 * std::f64::consts::PI);
}

#[test]
fn names_prefer_longest_match_and_variables() {
    let mut engine = engine();
    engine.define_variable("p", ComplexNumber::real(2.0));
    engine.define_variable("s", ComplexNumber::real(5.0));

    assert!((evaluate(&engine, "pi").real - std::f64::consts::PI).abs() < 1e-12);
    assert_eq!(evaluate(&engine, "p").real, 2.0);
    assert_eq!(evaluate(&engine, "sin(0)").real, 0.0);

    engine.define_variable("e", ComplexNumber::real(7.0));
    assert_eq!(evaluate(&engine, "e").real, 7.0);
}

#[test]
fn assignment() {
    let engine = engine();

    assert_eq!(evaluate(&engine, "x = 5").real, 5.0);
    assert_eq!(engine.variable("x"), Some(ComplexNumber::real(5.0)));

    assert_eq!(evaluate(&engine, "x = x + 1").real, 6.0);
    assert_eq!(engine.variable("x"), Some(ComplexNumber::real(6.0)));

    assert_eq!(evaluate(&engine, "x = y = 2").real, 2.0);
    assert_eq!(engine.variable("x"), Some(ComplexNumber::real(2.0)));
    assert_eq!(engine.variable("y"), Some(ComplexNumber::real(2.0)));
}

#[test]
fn comments_are_ignored() {
    assert_value("1 + /* two */ 2 // and a comment", 3.0);
    assert_value("/* multi\nline */ 4", 4.0);
}

#[test]
fn number_literals() {
    assert_value("0x1F", 31.0);
    assert_value("0b101", 5.0);
    assert_value("0o17", 15.0);
    assert_value(".5 + 1.", 1.5);
    assert_value("2.5e2", 250.0);
    assert_value("1E-2", 0.01);
    assert_display("4i", "4i");
    assert_display("2 - 3.5i", "2 - 3.5i");
}

#[test]
fn complex_results() {
    assert_display("sqrt(-4)", "2i");
    assert_display("i * i", "-1");
    assert_display("(1 + i)(1 - i)", "2");
    assert_display("(2 + 3i) - (2 + 3i)", "0");
    assert_display("i^3", "-i");
    assert_display("0.1 + 0.2", "0.3");
    assert_display("1 / 3", "0.333333333333333");
}

#[test]
fn syntax_errors() {
    assert_failure("(1 + 2", ErrorKind::Syntax);
    assert_failure("1 + 2)", ErrorKind::Syntax);

    let e = assert_failure("1 +", ErrorKind::Syntax);
    assert_eq!(e, Error::Parse(ParseError::MissingOperand { code: "+".to_string() }));

    let e = assert_failure("1 $ 2", ErrorKind::Syntax);
    assert_eq!(e,
               Error::Parse(ParseError::UnexpectedToken { token:    "$".to_string(),
                                                          position: 2, }));
}

#[test]
fn reference_errors() {
    let e = assert_failure("nope(1)", ErrorKind::Reference);
    assert_eq!(e, Error::Parse(ParseError::UnknownFunction { name: "nope".to_string() }));

    let mut engine = engine();
    let expression = engine.parse("x + 1").unwrap();
    engine.remove_variable("x");
    assert_eq!(expression.evaluate_blocking(&engine),
               Err(RuntimeError::UnknownVariable { name: "x".to_string() }));
}

#[test]
fn type_errors() {
    let e = assert_failure("pi = 3", ErrorKind::Type);
    assert_eq!(e, Error::Parse(ParseError::ConstantAssignment { name: "pi".to_string() }));

    let e = assert_failure("sqrt(1, 2)", ErrorKind::Type);
    assert_eq!(e,
               Error::Runtime(RuntimeError::ArgumentCountMismatch { name:     "sqrt".to_string(),
                                                                    expected: 1,
                                                                    found:    2, }));

    assert_failure("()", ErrorKind::Type);
    assert_failure("", ErrorKind::Type);
}

#[test]
fn comma_decimal_point() {
    let mut engine = engine();
    engine.config.set_decimal_point_is_comma(true);

    assert_eq!(engine.config.separator, ';');
    assert_eq!(evaluate(&engine, "1,5 + 1").real, 2.5);
    assert_eq!(evaluate(&engine, "logab(2; 8)").to_string(), "3");

    engine.config.set_decimal_point_is_comma(false);
    assert_eq!(engine.config.separator, ',');
    assert_eq!(evaluate(&engine, "logab(2, 8)").to_string(), "3");
}

#[test]
fn angle_units() {
    let mut engine = engine();

    engine.config.angle_unit = AngleUnit::Degrees;
    assert!((evaluate(&engine, "sin(30)").real - 0.5).abs() < 1e-12);
    assert!((evaluate(&engine, "asin(1)").real - 90.0).abs() < 1e-9);

    engine.config.angle_unit = AngleUnit::Gradians;
    assert!((evaluate(&engine, "cos(200)").real + 1.0).abs() < 1e-12);

    engine.config.angle_unit = AngleUnit::Radians;
    assert!((evaluate(&engine, "cos(pi)").real + 1.0).abs() < 1e-12);
}

#[test]
fn formatted_values_parse_back() {
    let engine = engine();

    for value in [ComplexNumber::real(2.5),
                  ComplexNumber::real(-4.0),
                  ComplexNumber::new(0.0, 3.0),
                  ComplexNumber::new(0.0, -1.0),
                  ComplexNumber::new(2.0, -3.5),
                  ComplexNumber::new(1.5, 1.0)]
    {
        let text = value.to_string();
        assert_eq!(evaluate(&engine, &text), value, "round trip of '{text}'");
    }
}

#[test]
fn expressions_can_be_reused() {
    let mut engine = engine();
    let expression = engine.parse("x^2 + y").unwrap();

    assert_eq!(expression.evaluate_blocking(&engine), Ok(ComplexNumber::real(13.0)));
    engine.define_variable("x", ComplexNumber::real(5.0));
    assert_eq!(expression.evaluate_blocking(&engine), Ok(ComplexNumber::real(29.0)));
}
