use crate::{
    Engine,
    interpreter::{
        evaluator::function::{FunctionBinding, check_arity},
        value::{complex::ComplexNumber, core::Value},
    },
};

/// Registers the named functions of the standard grammar.
///
/// # Example
/// ```
/// use formulaic::Engine;
///
/// let engine = Engine::with_maths();
/// assert_eq!(engine.evaluate("logab(2, 8)").unwrap().to_string(), "3");
/// assert_eq!(engine.evaluate("abs(3 + 4i)").unwrap().real, 5.0);
/// assert_eq!(engine.evaluate("conj(1 + 2i)").unwrap().to_string(), "1 - 2i");
/// ```
pub fn register(engine: &mut Engine) {
    engine.register_function(unary("sqrt", ComplexNumber::sqrt));
    engine.register_function(unary("exp", ComplexNumber::exp));
    engine.register_function(unary("ln", ComplexNumber::ln));
    engine.register_function(unary("log", ComplexNumber::log10));
    engine.register_function(FunctionBinding::eager("logab", |_, args| {
                                 check_arity("logab", args, 2)?;
                                 let base = args[0].as_number()?;
                                 Ok(Value::Number(args[1].as_number()?.log_base(base)))
                             }));

    engine.register_function(angle_input("sin", ComplexNumber::sin));
    engine.register_function(angle_input("cos", ComplexNumber::cos));
    engine.register_function(angle_input("tan", ComplexNumber::tan));
    engine.register_function(unary("sinh", ComplexNumber::sinh));
    engine.register_function(unary("cosh", ComplexNumber::cosh));
    engine.register_function(unary("tanh", ComplexNumber::tanh));

    engine.register_function(angle_output("asin", ComplexNumber::asin));
    engine.register_function(angle_output("acos", ComplexNumber::acos));
    engine.register_function(angle_output("atan", ComplexNumber::atan));
    engine.register_function(unary("asinh", ComplexNumber::asinh));
    engine.register_function(unary("acosh", ComplexNumber::acosh));
    engine.register_function(unary("atanh", ComplexNumber::atanh));

    engine.register_function(unary("abs", |x| ComplexNumber::real(x.abs())));
    engine.register_function(unary("arg", |x| ComplexNumber::real(x.arg())));
    engine.register_function(unary("re", |x| ComplexNumber::real(x.real)));
    engine.register_function(unary("im", |x| ComplexNumber::real(x.imaginary)));
    engine.register_function(unary("conj", |x| x.conj()));
}

/// Binds a one-argument numeric function.
pub fn unary(name: &'static str, function: fn(ComplexNumber) -> ComplexNumber) -> FunctionBinding {
    FunctionBinding::eager(name, move |_, args| {
        check_arity(name, args, 1)?;
        Ok(Value::Number(function(args[0].as_number()?)))
    })
}

/// Binds a trigonometric function, converting its argument from the
/// configured angle unit to radians.
fn angle_input(name: &'static str, function: fn(ComplexNumber) -> ComplexNumber) -> FunctionBinding {
    FunctionBinding::eager(name, move |engine, args| {
        check_arity(name, args, 1)?;
        let angle = engine.config.angle_unit.to_radians(args[0].as_number()?);
        Ok(Value::Number(function(angle)))
    })
}

/// Binds an inverse trigonometric function, converting its result from
/// radians to the configured angle unit.
fn angle_output(name: &'static str, function: fn(ComplexNumber) -> ComplexNumber) -> FunctionBinding {
    FunctionBinding::eager(name, move |engine, args| {
        check_arity(name, args, 1)?;
        let angle = function(args[0].as_number()?);
        Ok(Value::Number(engine.config.angle_unit.from_radians(angle)))
    })
}
