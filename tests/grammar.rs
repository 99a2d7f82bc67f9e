use formulaic::{
    Engine,
    ast::Entity,
    error::{Error, ErrorKind, ParseError, RuntimeError},
    interpreter::{
        evaluator::{core::EvalResult, function::FunctionBinding},
        lexer::{Token, TokenKind, tokenize},
        parser::operator::Operator,
        value::{complex::ComplexNumber, core::Value},
    },
    maths::{self, functions::unary, literal::NumberConcept},
};
use futures::{FutureExt, future::LocalBoxFuture};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Evaluates the second or third argument depending on the first, leaving
/// the other one untouched.
fn choose<'a>(engine: &'a Engine, args: &'a [Entity]) -> LocalBoxFuture<'a, EvalResult<Value>> {
    async move {
        let condition = args[0].evaluate(engine).await?.as_number()?;
        let branch = if condition.is_zero() { &args[2] } else { &args[1] };
        branch.evaluate(engine).await
    }.boxed_local()
}

#[test]
fn empty_engine_recognises_nothing() {
    init_logger();
    let engine = Engine::new();

    assert_eq!(engine.evaluate("1"),
               Err(Error::Parse(ParseError::UnexpectedToken { token:    "1".to_string(),
                                                              position: 0, })));
    assert!(matches!(engine.evaluate("()"), Err(Error::Runtime(RuntimeError::MissingValue))));
}

#[test]
fn grammar_built_from_scratch() {
    init_logger();
    let mut engine = Engine::new();
    engine.register_operator(Operator::binary(true).with_binding("+",
                                                                 FunctionBinding::eager("add", |_, args| {
                                                                     let sum = args[0].as_number()?
                                                                               + args[1].as_number()?;
                                                                     Ok(Value::Number(sum))
                                                                 })));
    engine.register_concept(NumberConcept);

    assert_eq!(engine.evaluate("2 + 3 + 4").unwrap().real, 9.0);
    assert_eq!(engine.evaluate("(5)").unwrap().real, 5.0);
    // Without an implicit operator adjacent operands stay separate values and
    // the root yields the first.
    assert_eq!(engine.evaluate("2 3").unwrap().real, 2.0);
    assert_eq!(engine.evaluate("2 * 3").unwrap_err().kind(), ErrorKind::Syntax);
}

#[test]
fn later_operators_bind_tighter() {
    init_logger();
    let mut engine = Engine::with_maths();
    engine.register_operator(Operator::binary(true).with_binding("&",
                                                                 FunctionBinding::eager("max", |_, args| {
                                                                     let a = args[0].as_number()?;
                                                                     let b = args[1].as_number()?;
                                                                     Ok(Value::Number(if a.real >= b.real { a } else { b }))
                                                                 })));

    assert_eq!(engine.evaluate("1 + 2 & 5").unwrap().real, 6.0);
    assert_eq!(engine.evaluate("3 & 2^2").unwrap().real, 9.0);
}

#[test]
fn custom_postfix_operator() {
    init_logger();
    let mut engine = Engine::with_maths();
    engine.register_operator(Operator::unary(false).with_binding("%",
                                                                 unary("percent", |x| x.scale(0.01))));

    assert_eq!(engine.evaluate("50% * 4").unwrap().to_string(), "2");
    assert_eq!(engine.evaluate("-25%").unwrap().to_string(), "-0.25");
}

#[test]
fn closure_concepts() {
    init_logger();
    let mut engine = Engine::with_maths();
    engine.register_concept(|_: &Engine, code: &str, _: &[Token]| {
                                code.starts_with("half")
                                    .then(|| Token::literal("half", |_, _| Ok(Value::from(0.5))))
                            });

    assert_eq!(engine.evaluate("4half").unwrap().real, 2.0);
}

#[test]
fn misbehaving_concept_is_an_internal_error() {
    init_logger();
    let mut engine = Engine::with_maths();
    engine.register_concept(|_: &Engine, code: &str, _: &[Token]| {
                                code.starts_with('?')
                                    .then(|| Token::literal("??", |_, _| Ok(Value::from(0.0))))
                            });

    let error = engine.evaluate("1 + ?").unwrap_err();
    assert_eq!(error, Error::Parse(ParseError::ConceptMismatch { token: "??".to_string() }));
    assert_eq!(error.kind(), ErrorKind::Internal);
}

#[test]
fn unknown_function_handler() {
    init_logger();
    let mut engine = Engine::with_maths();
    engine.set_unknown_function_handler(|name| {
                                            let value = name.strip_prefix('k')?.parse::<f64>().ok()?;
                                            Some(FunctionBinding::eager(name, move |_, _| Ok(Value::from(value))))
                                        });

    assert_eq!(engine.evaluate("k42() + 1").unwrap().real, 43.0);
    assert_eq!(engine.evaluate("sqrt(16)").unwrap().real, 4.0);
    assert_eq!(engine.evaluate("other(1)"),
               Err(Error::Parse(ParseError::UnknownFunction { name: "other".to_string() })));
}

#[test]
fn lazy_functions_choose_what_to_evaluate() {
    init_logger();
    let mut engine = Engine::with_maths();
    engine.register_function(FunctionBinding::lazy("choose", choose));

    assert_eq!(engine.evaluate("choose(0, sqrt(1, 2), 5)").unwrap().real, 5.0);
    assert_eq!(engine.evaluate("choose(1, sqrt(1, 2), 5)").unwrap_err().kind(),
               ErrorKind::Type);
}

#[test]
fn custom_assignment_operator() {
    init_logger();
    let mut engine = Engine::new();
    engine.config.assignment_operator = ":=".to_string();
    maths::register(&mut engine);
    engine.define_variable("x", ComplexNumber::real(0.0));

    assert_eq!(engine.evaluate("x := 4").unwrap().real, 4.0);
    assert_eq!(engine.variable("x"), Some(ComplexNumber::real(4.0)));
}

#[test]
fn custom_separator() {
    init_logger();
    let mut engine = Engine::with_maths();
    engine.config.separator = '|';

    assert_eq!(engine.evaluate("logab(10 | 1000)").unwrap().to_string(), "3");
}

#[test]
fn tokens_keep_their_source() {
    init_logger();
    let mut engine = Engine::with_maths();
    engine.define_variable("x", ComplexNumber::real(1.0));

    let tokens = tokenize(&engine, "sin (x) + 2.5").unwrap();
    let codes: Vec<_> = tokens.iter().map(|t| t.code.as_str()).collect();
    assert_eq!(codes, ["sin (", "x", ")", "+", "2.5"]);

    assert!(matches!(&tokens[0].kind, TokenKind::Call { name } if name == "sin"));
    assert!(matches!(tokens[1].kind, TokenKind::Variable(_)));
    assert!(matches!(tokens[2].kind, TokenKind::Close));
    assert!(tokens[3].owner().is_some());
    assert!(matches!(tokens[4].kind, TokenKind::Literal { .. }));
}

#[test]
fn minus_after_brackets_and_operators() {
    init_logger();
    let engine = Engine::with_maths();
    let tokens = tokenize(&engine, "(-1) - -1").unwrap();

    // The same code is owned by the unary operator after `(` and after `-`,
    // and by the binary operator after `)`.
    let owners: Vec<_> = tokens.iter().filter_map(Token::owner).collect();
    assert_eq!(owners.len(), 3);
    assert_eq!(owners[0], owners[2]);
    assert_ne!(owners[0], owners[1]);

    assert_eq!(engine.evaluate("(-1) - -1").unwrap().real, 0.0);
}
