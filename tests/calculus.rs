use std::{
    future::Future,
    task::{Context, Poll},
};

use formulaic::{
    Engine,
    error::{Error, ErrorKind, RuntimeError},
    interpreter::value::complex::ComplexNumber,
    maths::calculus::{FALLBACK_STEP, derivative_step},
};
use futures::task::noop_waker_ref;

fn engine() -> Engine {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut engine = Engine::with_maths();
    engine.define_variable("x", ComplexNumber::real(7.0));
    engine.define_variable("i", ComplexNumber::real(0.0));
    engine
}

fn evaluate(engine: &Engine, src: &str) -> ComplexNumber {
    engine.evaluate(src)
          .unwrap_or_else(|e| panic!("Formula '{src}' failed: {e}"))
}

fn assert_close(src: &str, expected: f64, tolerance: f64) {
    let value = evaluate(&engine(), src);
    assert!((value.real - expected).abs() < tolerance && value.imaginary.abs() < tolerance,
            "Formula '{src}' evaluated to {value}, expected {expected}");
}

/// Polls the evaluation of `src` by hand, counting how often it yields.
fn count_yields(engine: &Engine, src: &str) -> (usize, ComplexNumber) {
    let expression = engine.parse(src).unwrap();
    let mut future = Box::pin(expression.evaluate(engine));
    let mut cx = Context::from_waker(noop_waker_ref());
    let mut yields = 0;

    loop {
        match future.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return (yields, result.unwrap()),
            Poll::Pending => yields += 1,
        }
    }
}

#[test]
fn sums_and_products() {
    assert_close("sum(i, 1, 5, i)", 15.0, 1e-12);
    assert_close("product(i, 1, 5, i)", 120.0, 1e-12);
    assert_close("sum(x, -2, 2, x)", 0.0, 1e-12);
    assert_close("sum(x, 1, 0, x)", 0.0, 1e-12);
    assert_close("product(x, 1, 0, x)", 1.0, 1e-12);
    assert_close("sum(x, 1.5, 3, x)", 4.0, 1e-12);
    assert_close("sum(i, 1, 3, sum(x, 1, i, x))", 10.0, 1e-12);
}

#[test]
fn derivatives() {
    assert_close("deriv(x^2, x, 3)", 6.0, 1e-6);
    assert_close("deriv(sin(x), x, 0)", 1.0, 1e-6);
    // The step grows with the magnitude of the point: 1 around -20.
    assert_close("deriv(x^2, x, -20)", -40.0, 1e-9);
    assert_close("deriv(x^3, x, -20)", 1201.0, 1e-6);
    assert_close("secderiv(x^3, x, 2)", 12.0, 1e-6);
    assert_close("secderiv(exp(x), x, 1)", std::f64::consts::E, 1e-2);
}

#[test]
fn derivative_steps_use_the_magnitude_of_the_point() {
    assert!((derivative_step(ComplexNumber::real(-0.5)) - 0.01).abs() < 1e-15);
    assert!((derivative_step(ComplexNumber::real(-3.0)) - 0.1).abs() < 1e-15);
    assert_eq!(derivative_step(ComplexNumber::real(0.0)), FALLBACK_STEP);
    assert_eq!(derivative_step(ComplexNumber::new(0.0, 5.0)), FALLBACK_STEP);

    assert_close("deriv(x^2, x, -3)", -6.0, 1e-9);
    assert_close("deriv(x^2, x, -0.5)", -1.0, 1e-9);
}

#[test]
fn integrals() {
    let value = evaluate(&engine(), "integ(0, 1, x^2, x)");
    assert!((value.real - 0.333_283_335).abs() < 1e-6, "got {value}");
    assert!((value.real - 1.0 / 3.0).abs() < 1e-3);

    let mut coarse = engine();
    coarse.config.integration_subdivisions = 4;
    // 0.25 * (0 + 2 * (0.25 + 0.5 + 0.75)) / 2
    assert_eq!(evaluate(&coarse, "integ(0, 1, x, x)").to_string(), "0.375");
}

#[test]
fn variables_are_restored() {
    let engine = engine();

    assert_eq!(evaluate(&engine, "sum(x, 1, 3, x)").real, 6.0);
    assert_eq!(engine.variable("x"), Some(ComplexNumber::real(7.0)));

    let error = engine.evaluate("sum(x, 1, 3, sqrt(x, 1))").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Type);
    assert_eq!(engine.variable("x"), Some(ComplexNumber::real(7.0)));

    assert!(engine.evaluate("deriv(sqrt(x, 1), x, 1)").is_err());
    assert!(engine.evaluate("integ(0, 1, sqrt(x, 1), x)").is_err());
    assert_eq!(engine.variable("x"), Some(ComplexNumber::real(7.0)));
}

#[test]
fn variable_argument_must_be_a_variable() {
    let engine = engine();

    for src in ["sum(pi, 1, 3, 1)", "sum(2, 1, 3, 1)", "deriv(x^2, 3, 1)", "integ(0, 1, x, x + 1)"] {
        let error = engine.evaluate(src).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Reference, "Formula '{src}' failed with {error}");
        assert!(matches!(error, Error::Runtime(RuntimeError::ExpectedVariable { .. })));
    }

    assert_close("sum((x), 1, 3, x)", 6.0, 1e-12);
}

#[test]
fn non_real_bounds_give_nan() {
    let mut engine = engine();
    engine.remove_variable("i");

    assert!(evaluate(&engine, "sum(x, i, 3, x)").is_nan());
    assert!(evaluate(&engine, "product(x, 1, 2 + i, x)").is_nan());
}

#[test]
fn counters_too_large_to_step_give_nan() {
    let engine = engine();

    assert!(evaluate(&engine, "sum(x, 1e16, 1e16 + 5, 1)").is_nan());
    assert!(evaluate(&engine, "product(x, 1e16, 1e16 + 5, 1)").is_nan());
    assert_eq!(engine.variable("x"), Some(ComplexNumber::real(7.0)));
}

#[test]
fn sibling_loops_do_not_interleave() {
    let mut engine = engine();
    engine.define_variable("n", ComplexNumber::real(0.0));

    assert_eq!(evaluate(&engine, "sum(n, 1, 2000, 1) + sum(n, 1, 3000, 1)").real, 5000.0);
    assert_eq!(engine.variable("n"), Some(ComplexNumber::real(0.0)));

    assert_eq!(evaluate(&engine, "sum(n, 1, 2000, 0) + n").real, 0.0);
    assert_eq!(evaluate(&engine, "n + sum(n, 1, 2000, n)").real, 2_001_000.0);
    assert_eq!(evaluate(&engine, "logab(2, sum(n, 1, 1500, 0) + 2^n)").real, 0.0);
    assert_eq!(engine.variable("n"), Some(ComplexNumber::real(0.0)));

    // Yields still reach the executor, one sibling at a time.
    let (yields, value) = count_yields(&engine, "sum(n, 1, 2000, 1) + sum(n, 1, 3000, 1)");
    assert_eq!(yields, 5);
    assert_eq!(value.real, 5000.0);
    assert_eq!(engine.variable("n"), Some(ComplexNumber::real(0.0)));
}

#[test]
fn factorial() {
    assert_close("5!", 120.0, 1e-12);
    assert_close("factorial(4)", 24.0, 1e-12);
    assert_close("3.4!", 6.0, 1e-12);
    assert_close("170! / 169!", 170.0, 1e-6);

    let engine = Engine::with_maths();
    assert_eq!(evaluate(&engine, "171!").to_string(), "Infinity");
    assert_eq!(evaluate(&engine, "0!").to_string(), "Infinity");
    assert!(evaluate(&engine, "(2i)!").is_nan());
}

#[test]
fn long_loops_yield_periodically() {
    let engine = engine();

    let (yields, value) = count_yields(&engine, "sum(i, 1, 5000, i)");
    assert_eq!(yields, 5);
    assert_eq!(value.real, 12_502_500.0);

    let (yields, _) = count_yields(&engine, "sum(i, 1, 999, i)");
    assert_eq!(yields, 0);

    let (yields, value) = count_yields(&engine, "integ(0, 1, x, x)");
    assert_eq!(yields, 10);
    assert!((value.real - 0.5).abs() < 1e-3);

    assert_eq!(engine.variable("i"), Some(ComplexNumber::real(0.0)));
}
