// ABOUTME: End-to-end scenarios exercising the lexer, parser, and evaluator together

use ape::env::Environment;
use ape::error::EvalError;
use ape::eval::eval_program;
use ape::lexer::Lexer;
use ape::parser::Parser;
use ape::value::Value;

fn run(input: &str) -> Result<Value, EvalError> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();
    assert!(parser.errors().is_empty(), "parse errors: {:?}", parser.errors());
    let env = Environment::new();
    eval_program(&program, env)
}

/// `Value::Array` has no structural `PartialEq` (arrays compare by identity
/// like the original, per DESIGN.md); unwrap elements to compare
/// array-returning results in tests.
fn array_elements(value: Value) -> Vec<Value> {
    match value {
        Value::Array(elements) => elements,
        other => panic!("expected Array, got {:?}", other),
    }
}

#[test]
fn let_chain_arithmetic() {
    assert_eq!(
        run("let a = 5; let b = a; let c = a + b + 5; c;"),
        Ok(Value::Integer(15))
    );
}

#[test]
fn string_concatenation() {
    assert_eq!(
        run(r#""Hello" + " " + "World!""#),
        Ok(Value::String("Hello World!".to_string()))
    );
}

#[test]
fn closures_and_currying() {
    let input = "let newAdder = fn(x){ fn(y){ x + y } }; let addTwo = newAdder(2); addTwo(3);";
    assert_eq!(run(input), Ok(Value::Integer(5)));
}

#[test]
fn array_map() {
    assert_eq!(
        array_elements(run("[1,2,3].map(fn(x){ x * x })").unwrap()),
        vec![Value::Integer(1), Value::Integer(4), Value::Integer(9)]
    );
}

#[test]
fn missing_hash_key_is_null() {
    assert_eq!(run(r#"{"foo": 5}["bar"]"#), Ok(Value::Null));
}

#[test]
fn arrays_compare_by_identity_not_contents() {
    assert_eq!(run("[1, 2] == [1, 2]"), Ok(Value::Boolean(false)));
    assert_eq!(run("[1, 2] != [1, 2]"), Ok(Value::Boolean(true)));
}

#[test]
fn if_else_picks_the_false_branch() {
    assert_eq!(run("if (1 > 2) { 10 } else { 20 }"), Ok(Value::Integer(20)));
}

#[test]
fn len_of_integer_is_a_type_error() {
    let err = run("len(1)").unwrap_err();
    assert_eq!(err.to_string(), "argument to `len` not supported, got=INTEGER");
}

#[test]
fn array_reduce() {
    assert_eq!(
        run("[1,2,3].reduce(fn(acc,x){ acc + x }, 0)"),
        Ok(Value::Integer(6))
    );
}

#[test]
fn closure_law_holds_for_arbitrary_integers() {
    for (a, b) in [(1, 2), (-3, 4), (0, 0), (100, -50)] {
        let input = format!(
            "let f = fn(x){{ fn(y){{ x + y }} }}; f({})({});",
            a, b
        );
        assert_eq!(run(&input), Ok(Value::Integer(a + b)));
    }
}

#[test]
fn array_method_laws() {
    assert_eq!(
        array_elements(run("[1,2,3].map(fn(x){ x })").unwrap()),
        vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]
    );
    assert_eq!(
        array_elements(run("[1,2,3].filter(fn(x){ true })").unwrap()),
        vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]
    );
    assert_eq!(
        run("[1,2,3,4].reduce(fn(acc,x){ acc + x }, 0)"),
        Ok(Value::Integer(10))
    );
}

#[test]
fn hash_round_trip_for_any_hashable_key() {
    assert_eq!(run(r#"{"k": 1}["k"]"#), Ok(Value::Integer(1)));
    assert_eq!(run("{1: \"one\"}[1]"), Ok(Value::String("one".to_string())));
    assert_eq!(run("{true: 9}[true]"), Ok(Value::Integer(9)));
}

#[test]
fn round_trip_to_string_reparses_identically() {
    let source = "a + b * c - d / e";
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();
    let printed = program.to_string();

    let reparsed_lexer = Lexer::new(&printed);
    let mut reparsed_parser = Parser::new(reparsed_lexer);
    let reparsed_program = reparsed_parser.parse_program();

    assert_eq!(printed, reparsed_program.to_string());
}

#[test]
fn double_bang_matches_truthiness() {
    assert_eq!(run("!!5"), Ok(Value::Boolean(true)));
    assert_eq!(run("!!0"), Ok(Value::Boolean(true)));
    assert_eq!(run(r#"!!"""#), Ok(Value::Boolean(true)));
    assert_eq!(run("!!true"), Ok(Value::Boolean(true)));
    assert_eq!(run("!!false"), Ok(Value::Boolean(false)));
    assert_eq!(run("!!if (false) { 1 }"), Ok(Value::Boolean(false)));
}
