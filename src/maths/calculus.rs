use futures::{FutureExt, future::LocalBoxFuture};

use crate::{
    Engine,
    ast::Entity,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::{FunctionBinding, check_arity},
            yield_now::yield_periodically,
        },
        value::{
            complex::{ComplexNumber, ONE, ZERO},
            core::Value,
        },
    },
    maths::functions::unary,
    util::num::f64_to_u32_bounded,
};

/// Largest `n` whose factorial is finite in `f64`.
pub const MAX_FACTORIAL: u32 = 170;

/// Step used by `deriv` and `secderiv` around zero.
pub const FALLBACK_STEP: f64 = 1e-3;

/// Registers `sum`, `product`, `deriv`, `secderiv`, `integ` and `factorial`.
///
/// The first five are lazy: they receive their arguments unevaluated and
/// evaluate the body once per value of the variable, which is overridden for
/// the duration of the call and restored afterwards, even on error.
///
/// # Example
/// ```
/// use formulaic::{Engine, interpreter::value::complex::ComplexNumber};
///
/// let mut engine = Engine::with_maths();
/// engine.define_variable("n", ComplexNumber::real(0.0));
///
/// assert_eq!(engine.evaluate("sum(n, 1, 4, n^2)").unwrap().real, 30.0);
/// assert_eq!(engine.evaluate("product(n, 1, 5, n)").unwrap().real, 120.0);
/// assert_eq!(engine.variable("n"), Some(ComplexNumber::real(0.0)));
/// ```
pub fn register(engine: &mut Engine) {
    engine.register_function(FunctionBinding::lazy("sum", sum));
    engine.register_function(FunctionBinding::lazy("product", product));
    engine.register_function(FunctionBinding::lazy("deriv", deriv));
    engine.register_function(FunctionBinding::lazy("secderiv", secderiv));
    engine.register_function(FunctionBinding::lazy("integ", integ));
    engine.register_function(factorial_binding());
}

/// The binding of the `factorial` function and the postfix `!` operator.
#[must_use]
pub fn factorial_binding() -> FunctionBinding {
    unary("factorial", factorial)
}

/// Returns `x!` for real `x`, rounded to the nearest integer first.
///
/// Non-real arguments give `NaN`. Arguments below one or above
/// [`MAX_FACTORIAL`] give `Infinity`, zero included.
///
/// # Example
/// ```
/// use formulaic::{interpreter::value::complex::ComplexNumber, maths::calculus::factorial};
///
/// assert_eq!(factorial(ComplexNumber::real(5.0)).real, 120.0);
/// assert_eq!(factorial(ComplexNumber::real(4.6)).real, 120.0);
/// assert!(factorial(ComplexNumber::real(171.0)).real.is_infinite());
/// assert!(factorial(ComplexNumber::new(0.0, 2.0)).is_nan());
/// ```
#[must_use]
pub fn factorial(x: ComplexNumber) -> ComplexNumber {
    if !x.is_real() || x.real.is_nan() {
        return ComplexNumber::nan();
    }

    match f64_to_u32_bounded(x.real.round(), MAX_FACTORIAL) {
        Some(n) if n >= 1 => ComplexNumber::real((1..=n).map(f64::from).product()),
        _ => ComplexNumber::real(f64::INFINITY),
    }
}

/// Returns the step `deriv` and `secderiv` sample around `at`: one order of
/// magnitude below the real part of `at`.
///
/// The magnitude `|at.real|` is used, so negative points get the same step
/// as their mirror image, and zero falls back to [`FALLBACK_STEP`]. Taking
/// `10^floor(log10(at.real) - 1)` literally would give `NaN` at zero and at
/// every negative point.
///
/// # Example
/// ```
/// use formulaic::{
///     interpreter::value::complex::ComplexNumber,
///     maths::calculus::{FALLBACK_STEP, derivative_step},
/// };
///
/// assert!((derivative_step(ComplexNumber::real(3.0)) - 0.1).abs() < 1e-15);
/// assert!((derivative_step(ComplexNumber::real(-250.0)) - 10.0).abs() < 1e-12);
/// assert_eq!(derivative_step(ComplexNumber::real(0.0)), FALLBACK_STEP);
/// ```
#[must_use]
pub fn derivative_step(at: ComplexNumber) -> f64 {
    let magnitude = at.real.abs();
    if magnitude == 0.0 {
        return FALLBACK_STEP;
    }

    let step = 10_f64.powf((magnitude.log10() - 1.0).floor());
    if step.is_finite() && step > 0.0 {
        step
    } else {
        FALLBACK_STEP
    }
}

async fn evaluate_number(engine: &Engine, entity: &Entity) -> EvalResult<ComplexNumber> {
    entity.evaluate(engine).await?.as_number()
}

/// Returns the name of the variable a calculus function iterates over.
fn variable_argument<'a>(function: &str, entity: &'a Entity, engine: &Engine) -> EvalResult<&'a str> {
    entity.variable_name()
          .filter(|name| engine.variable(name).is_some())
          .ok_or_else(|| RuntimeError::ExpectedVariable { function: function.to_string() })
}

fn sum<'a>(engine: &'a Engine, args: &'a [Entity]) -> LocalBoxFuture<'a, EvalResult<Value>> {
    accumulate(engine, args, "sum", ZERO, |total, value| total + value).boxed_local()
}

fn product<'a>(engine: &'a Engine, args: &'a [Entity]) -> LocalBoxFuture<'a, EvalResult<Value>> {
    accumulate(engine, args, "product", ONE, |total, value| total * value).boxed_local()
}

/// Folds the body over the variable stepping by one from the start bound to
/// the end bound inclusive. Only real parts of the bounds are used; a bound
/// with an imaginary part gives `NaN`.
///
/// A counter too large to step by one in `f64` (from 2^53 on, or infinite)
/// also gives `NaN` instead of looping forever.
async fn accumulate(engine: &Engine,
                    args: &[Entity],
                    name: &str,
                    initial: ComplexNumber,
                    combine: fn(ComplexNumber, ComplexNumber) -> ComplexNumber)
                    -> EvalResult<Value> {
    check_arity(name, args, 4)?;
    let variable = variable_argument(name, &args[0], engine)?;
    let start = evaluate_number(engine, &args[1]).await?;
    let end = evaluate_number(engine, &args[2]).await?;

    if !start.is_real() || !end.is_real() {
        return Ok(Value::Number(ComplexNumber::nan()));
    }

    let guard = engine.override_variable(variable)?;
    let mut total = initial;
    let mut counter = start.real;
    let mut completed = 0;

    while counter <= end.real {
        let next = counter + 1.0;
        if next == counter {
            log::debug!("{name} over '{variable}' cannot step past {counter}");
            return Ok(Value::Number(ComplexNumber::nan()));
        }

        guard.set(ComplexNumber::real(counter));
        total = combine(total, evaluate_number(engine, &args[3]).await?);

        counter = next;
        completed += 1;
        yield_periodically(completed).await;
    }

    log::debug!("{name} over '{variable}' finished after {completed} iterations");
    Ok(Value::Number(total))
}

fn deriv<'a>(engine: &'a Engine, args: &'a [Entity]) -> LocalBoxFuture<'a, EvalResult<Value>> {
    async move {
        check_arity("deriv", args, 3)?;
        let variable = variable_argument("deriv", &args[1], engine)?;
        let at = evaluate_number(engine, &args[2]).await?;
        let step = derivative_step(at);

        let guard = engine.override_variable(variable)?;
        guard.set(at + ComplexNumber::real(step));
        let ahead = evaluate_number(engine, &args[0]).await?;
        guard.set(at - ComplexNumber::real(step));
        let behind = evaluate_number(engine, &args[0]).await?;

        Ok(Value::Number((ahead - behind).scale(1.0 / (2.0 * step))))
    }.boxed_local()
}

fn secderiv<'a>(engine: &'a Engine, args: &'a [Entity]) -> LocalBoxFuture<'a, EvalResult<Value>> {
    async move {
        check_arity("secderiv", args, 3)?;
        let variable = variable_argument("secderiv", &args[1], engine)?;
        let at = evaluate_number(engine, &args[2]).await?;
        let step = derivative_step(at);

        let guard = engine.override_variable(variable)?;
        guard.set(at + ComplexNumber::real(step));
        let ahead = evaluate_number(engine, &args[0]).await?;
        guard.set(at);
        let here = evaluate_number(engine, &args[0]).await?;
        guard.set(at - ComplexNumber::real(step));
        let behind = evaluate_number(engine, &args[0]).await?;

        Ok(Value::Number((ahead - here.scale(2.0) + behind).scale(1.0 / (step * step))))
    }.boxed_local()
}

/// Trapezoidal sum over `integration_subdivisions` equal steps. The right
/// endpoint is not sampled.
#[allow(clippy::cast_precision_loss)]
fn integ<'a>(engine: &'a Engine, args: &'a [Entity]) -> LocalBoxFuture<'a, EvalResult<Value>> {
    async move {
        check_arity("integ", args, 4)?;
        let variable = variable_argument("integ", &args[3], engine)?;
        let start = evaluate_number(engine, &args[0]).await?;
        let end = evaluate_number(engine, &args[1]).await?;

        let subdivisions = engine.config.integration_subdivisions.max(1);
        let step = (end - start).scale(1.0 / subdivisions as f64);

        let guard = engine.override_variable(variable)?;
        let mut total = ZERO;

        for k in 0..subdivisions {
            guard.set(start + step.scale(k as f64));
            let weight = if k == 0 { 1.0 } else { 2.0 };
            total += evaluate_number(engine, &args[2]).await?.scale(weight);

            yield_periodically(k + 1).await;
        }

        log::debug!("integ over '{variable}' finished after {subdivisions} steps");
        Ok(Value::Number(total * step.scale(0.5)))
    }.boxed_local()
}
