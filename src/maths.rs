use std::f64::consts::{E, PI};

use crate::{
    Engine,
    interpreter::{
        evaluator::function::{FunctionBinding, check_arity},
        lexer::concept::EnvironmentConcept,
        parser::operator::Operator,
        value::{
            complex::{ComplexNumber, I, ZERO},
            core::Value,
        },
    },
};

/// Calculus primitives.
///
/// Sums, products, derivatives and integrals over a variable, evaluated
/// lazily so the variable can be rebound between evaluations of the body, and
/// the factorial.
pub mod calculus;
/// Named mathematical functions.
///
/// Roots, exponentials, logarithms, the trigonometric and hyperbolic families
/// and the accessors for the parts of a complex number.
pub mod functions;
/// Numeric literals.
///
/// The concept recognising decimal, hexadecimal, binary and octal numbers and
/// the rules converting them to values.
pub mod literal;

/// Registers the standard mathematical grammar on `engine`.
///
/// Operators, from the loosest binding to the tightest:
///
/// | Operator        | Shape                       |
/// |-----------------|-----------------------------|
/// | `=`             | binary, right-associative   |
/// | `+ -`           | binary                      |
/// | `* × / ÷`       | binary                      |
/// | `+`             | prefix                      |
/// | `-`             | prefix                      |
/// | implicit `*`    | binary, between operands    |
/// | `^`             | binary, right-associative   |
/// | `!`             | postfix                     |
///
/// After the operators come the concepts for variables and constants and for
/// numeric literals, then the constants `pi`, `π`, `e` and `i` and the
/// functions of [`functions`] and [`calculus`].
///
/// # Example
/// ```
/// use formulaic::{Engine, maths};
///
/// let mut engine = Engine::new();
/// maths::register(&mut engine);
/// assert_eq!(engine.evaluate("-2^2 + 3!").unwrap().real, 2.0);
/// ```
pub fn register(engine: &mut Engine) {
    register_operators(engine);

    engine.register_concept(EnvironmentConcept);
    engine.register_concept(literal::NumberConcept);

    engine.define_constant("pi", ComplexNumber::real(PI));
    engine.define_constant("π", ComplexNumber::real(PI));
    engine.define_constant("e", ComplexNumber::real(E));
    engine.define_constant("i", I);

    functions::register(engine);
    calculus::register(engine);

    log::debug!("registered the standard maths grammar");
}

fn register_operators(engine: &mut Engine) {
    let assign = engine.config.assignment_operator.clone();
    engine.register_operator(Operator::binary(false).with_binding(assign, assignment()));

    engine.register_operator(Operator::binary(true).with_binding("+", arithmetic("add", |a, b| a + b))
                                                   .with_binding("-",
                                                                 arithmetic("subtract", |a, b| a - b)));

    let multiply = arithmetic("multiply", |a, b| a * b);
    let divide = arithmetic("divide", |a, b| a / b);
    engine.register_operator(Operator::binary(true).with_binding("*", multiply.clone())
                                                   .with_binding("×", multiply.clone())
                                                   .with_binding("/", divide.clone())
                                                   .with_binding("÷", divide));

    engine.register_operator(Operator::unary(true).with_binding("+", FunctionBinding::direct()));
    engine.register_operator(Operator::unary(true).with_binding("-",
                                                                functions::unary("negate", |x| ZERO - x)));

    let implicit = engine.register_operator(Operator::binary(true).with_binding("*", multiply)
                                                                  .without_concept());
    engine.set_implicit_operator(implicit, None);

    engine.register_operator(Operator::binary(false).with_binding("^",
                                                                  arithmetic("exponent", ComplexNumber::pow)));

    engine.register_operator(Operator::unary(false).with_binding("!", calculus::factorial_binding()));
}

/// Binds a two-argument numeric function.
fn arithmetic(name: &'static str, operation: fn(ComplexNumber, ComplexNumber) -> ComplexNumber)
              -> FunctionBinding {
    FunctionBinding::eager(name, move |_, args| {
        check_arity(name, args, 2)?;
        Ok(Value::Number(operation(args[0].as_number()?, args[1].as_number()?)))
    })
}

/// Stores the right-hand side in the variable named on the left and
/// evaluates to it.
fn assignment() -> FunctionBinding {
    FunctionBinding::eager("assign", |engine, args| {
        check_arity("assign", args, 2)?;
        let name = args[0].as_identifier()?;
        let value = args[1].as_number()?;
        engine.assign_variable(name, value)?;
        Ok(Value::Number(value))
    })
}
