// ABOUTME: Recursive AST walker implementing APE's evaluation semantics

use crate::ast::{BlockStatement, Expression, Program, Statement};
use crate::builtins::{self, RngSource};
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{HashKey, Value};
use std::collections::HashMap;
use std::rc::Rc;

/// Evaluates a full program, drawing any `random` calls from the thread-local
/// generator.
pub fn eval_program(program: &Program, env: Rc<Environment>) -> Result<Value, EvalError> {
    let mut rng = rand::thread_rng();
    eval_program_with_rng(program, env, &mut rng)
}

/// Evaluates a full program against an injected random source, for
/// deterministic tests of code that calls `random`.
pub fn eval_program_with_rng(
    program: &Program,
    env: Rc<Environment>,
    rng: &mut dyn RngSource,
) -> Result<Value, EvalError> {
    let mut result = Value::Null;

    for statement in &program.statements {
        result = eval_statement(statement, env.clone(), rng)?;
        if let Value::ReturnValue(v) = result {
            return Ok(*v);
        }
    }

    Ok(result)
}

fn eval_block_statement(
    block: &BlockStatement,
    env: Rc<Environment>,
    rng: &mut dyn RngSource,
) -> Result<Value, EvalError> {
    let mut result = Value::Null;

    for statement in &block.statements {
        result = eval_statement(statement, env.clone(), rng)?;
        if matches!(result, Value::ReturnValue(_)) {
            return Ok(result);
        }
    }

    Ok(result)
}

fn eval_statement(
    statement: &Statement,
    env: Rc<Environment>,
    rng: &mut dyn RngSource,
) -> Result<Value, EvalError> {
    match statement {
        Statement::Let { name, value, .. } => {
            let value = eval_expression(value, env.clone(), rng)?;
            env.define(name.clone(), value.clone());
            Ok(value)
        }
        Statement::Return { value, .. } => {
            let value = eval_expression(value, env, rng)?;
            Ok(Value::ReturnValue(Box::new(value)))
        }
        Statement::Expression { expr, .. } => eval_expression(expr, env, rng),
    }
}

fn eval_expression(
    expr: &Expression,
    env: Rc<Environment>,
    rng: &mut dyn RngSource,
) -> Result<Value, EvalError> {
    match expr {
        Expression::IntegerLiteral { value, .. } => Ok(Value::Integer(*value)),
        Expression::StringLiteral { value, .. } => Ok(Value::String(value.clone())),
        Expression::BooleanLiteral { value, .. } => Ok(Value::Boolean(*value)),
        Expression::Identifier { name, .. } => eval_identifier(name, &env),
        Expression::Prefix {
            operator, right, ..
        } => {
            let right = eval_expression(right, env, rng)?;
            eval_prefix_expression(operator, right)
        }
        Expression::Infix {
            left,
            operator,
            right,
            ..
        } => {
            let left = eval_expression(left, env.clone(), rng)?;
            let right = eval_expression(right, env, rng)?;
            eval_infix_expression(operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => {
            let condition = eval_expression(condition, env.clone(), rng)?;
            if condition.is_truthy() {
                eval_block_statement(consequence, env, rng)
            } else if let Some(alt) = alternative {
                eval_block_statement(alt, env, rng)
            } else {
                Ok(Value::Null)
            }
        }
        Expression::FunctionLiteral {
            parameters, body, ..
        } => Ok(Value::Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env,
        }),
        Expression::Call {
            function,
            arguments,
            ..
        } => {
            let function = eval_expression(function, env.clone(), rng)?;
            let args = eval_expressions(arguments, env, rng)?;
            apply_function(function, args, rng)
        }
        Expression::ArrayLiteral { elements, .. } => {
            let elements = eval_expressions(elements, env, rng)?;
            Ok(Value::Array(elements))
        }
        Expression::HashLiteral { pairs, .. } => eval_hash_literal(pairs, env, rng),
        Expression::Index { left, index, .. } => {
            let left = eval_expression(left, env.clone(), rng)?;
            let index = eval_expression(index, env, rng)?;
            eval_index_expression(left, index)
        }
        Expression::MethodCall {
            object,
            method,
            arguments,
            ..
        } => {
            let object = eval_expression(object, env.clone(), rng)?;
            let args = eval_expressions(arguments, env, rng)?;
            eval_method_call(object, method, args, rng)
        }
    }
}

fn eval_expressions(
    exprs: &[Expression],
    env: Rc<Environment>,
    rng: &mut dyn RngSource,
) -> Result<Vec<Value>, EvalError> {
    let mut values = Vec::with_capacity(exprs.len());
    for expr in exprs {
        values.push(eval_expression(expr, env.clone(), rng)?);
    }
    Ok(values)
}

fn eval_identifier(name: &str, env: &Rc<Environment>) -> Result<Value, EvalError> {
    if let Some(value) = env.get(name) {
        return Ok(value);
    }

    if let Some(builtin) = builtins::lookup(name) {
        return Ok(builtin);
    }

    Err(EvalError::IdentifierNotFound(name.to_string()))
}

fn eval_prefix_expression(operator: &str, right: Value) -> Result<Value, EvalError> {
    match operator {
        "!" => Ok(Value::Boolean(!right.is_truthy())),
        "-" => match right {
            Value::Integer(n) => Ok(Value::Integer(n.wrapping_neg())),
            other => Err(EvalError::UnknownPrefixOperator {
                operator: "-".to_string(),
                right: other.type_name().to_string(),
            }),
        },
        other => Err(EvalError::UnknownPrefixOperator {
            operator: other.to_string(),
            right: right.type_name().to_string(),
        }),
    }
}

fn eval_infix_expression(operator: &str, left: Value, right: Value) -> Result<Value, EvalError> {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::String(l), Value::String(r)) => eval_string_infix(operator, l, r),
        _ if operator == "==" => Ok(Value::Boolean(left == right)),
        _ if operator == "!=" => Ok(Value::Boolean(left != right)),
        _ if left.type_name() != right.type_name() => Err(EvalError::OperatorMismatch {
            left: left.type_name().to_string(),
            operator: operator.to_string(),
            right: right.type_name().to_string(),
        }),
        _ => Err(EvalError::UnknownInfixOperator {
            left: left.type_name().to_string(),
            operator: operator.to_string(),
            right: right.type_name().to_string(),
        }),
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Result<Value, EvalError> {
    match operator {
        "+" => Ok(Value::Integer(left.wrapping_add(right))),
        "-" => Ok(Value::Integer(left.wrapping_sub(right))),
        "*" => Ok(Value::Integer(left.wrapping_mul(right))),
        "/" => {
            if right == 0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(Value::Integer(left / right))
            }
        }
        "<" => Ok(Value::Boolean(left < right)),
        ">" => Ok(Value::Boolean(left > right)),
        "==" => Ok(Value::Boolean(left == right)),
        "!=" => Ok(Value::Boolean(left != right)),
        other => Err(EvalError::UnknownInfixOperator {
            left: "INTEGER".to_string(),
            operator: other.to_string(),
            right: "INTEGER".to_string(),
        }),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Result<Value, EvalError> {
    if operator == "+" {
        Ok(Value::String(format!("{}{}", left, right)))
    } else {
        Err(EvalError::UnknownInfixOperator {
            left: "STRING".to_string(),
            operator: operator.to_string(),
            right: "STRING".to_string(),
        })
    }
}

fn eval_hash_literal(
    pairs: &[(Expression, Expression)],
    env: Rc<Environment>,
    rng: &mut dyn RngSource,
) -> Result<Value, EvalError> {
    let mut map: HashMap<HashKey, (Value, Value)> = HashMap::new();

    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env.clone(), rng)?;
        let hash_key = key
            .as_hash_key()
            .ok_or_else(|| EvalError::UnusableAsHashKey(key.type_name().to_string()))?;
        let value = eval_expression(value_expr, env.clone(), rng)?;
        map.insert(hash_key, (key, value));
    }

    Ok(Value::Hash(map))
}

fn eval_index_expression(left: Value, index: Value) -> Result<Value, EvalError> {
    match (&left, &index) {
        (Value::Array(elements), Value::Integer(i)) => {
            if *i < 0 || *i as usize >= elements.len() {
                Ok(Value::Null)
            } else {
                Ok(elements[*i as usize].clone())
            }
        }
        (Value::Hash(_), _) => eval_hash_index_expression(left, index),
        _ => Err(EvalError::IndexOperatorNotSupported(
            left.type_name().to_string(),
        )),
    }
}

fn eval_hash_index_expression(hash: Value, index: Value) -> Result<Value, EvalError> {
    let Value::Hash(pairs) = hash else {
        unreachable!("eval_hash_index_expression called on a non-hash value")
    };

    let key = index
        .as_hash_key()
        .ok_or_else(|| EvalError::UnusableAsHashKey(index.type_name().to_string()))?;

    Ok(pairs
        .get(&key)
        .map(|(_, v)| v.clone())
        .unwrap_or(Value::Null))
}

fn apply_function(
    function: Value,
    args: Vec<Value>,
    rng: &mut dyn RngSource,
) -> Result<Value, EvalError> {
    match function {
        Value::Function {
            parameters,
            body,
            env,
        } => {
            if parameters.len() != args.len() {
                return Err(EvalError::WrongArgumentCount);
            }

            let call_env = Environment::enclosed(env);
            for (param, arg) in parameters.iter().zip(args.into_iter()) {
                call_env.define(param.clone(), arg);
            }

            let evaluated = eval_block_statement(&body, call_env, rng)?;
            Ok(unwrap_return_value(evaluated))
        }
        Value::Builtin(name) => builtins::call(&name, &args, rng),
        other => Err(EvalError::NotAFunction(other.type_name().to_string())),
    }
}

fn unwrap_return_value(value: Value) -> Value {
    match value {
        Value::ReturnValue(v) => *v,
        other => other,
    }
}

fn eval_method_call(
    object: Value,
    method: &str,
    args: Vec<Value>,
    rng: &mut dyn RngSource,
) -> Result<Value, EvalError> {
    let elements = match object {
        Value::Array(elements) => elements,
        _ => return Err(EvalError::NoMethodsForType),
    };

    match method {
        "map" => {
            if args.len() != 1 {
                return Err(EvalError::WrongArgumentCountForMap);
            }
            let f = args.into_iter().next().unwrap();
            if !matches!(f, Value::Function { .. }) {
                return Err(EvalError::MapArgumentNotFunction);
            }
            let mut result = Vec::with_capacity(elements.len());
            for element in elements {
                result.push(apply_function(f.clone(), vec![element], rng)?);
            }
            Ok(Value::Array(result))
        }
        "filter" => {
            if args.len() != 1 {
                return Err(EvalError::WrongArgumentCountForFilter);
            }
            let f = args.into_iter().next().unwrap();
            if !matches!(f, Value::Function { .. }) {
                return Err(EvalError::FilterArgumentNotFunction);
            }
            let mut result = Vec::new();
            for element in elements {
                let keep = apply_function(f.clone(), vec![element.clone()], rng)?;
                if keep.is_truthy() {
                    result.push(element);
                }
            }
            Ok(Value::Array(result))
        }
        "reduce" => {
            if args.len() != 2 {
                return Err(EvalError::WrongArgumentCountForReduce);
            }
            let mut args = args.into_iter();
            let f = args.next().unwrap();
            let mut accumulator = args.next().unwrap();
            if !matches!(f, Value::Function { .. }) {
                return Err(EvalError::ReduceArgumentNotFunction);
            }
            for element in elements {
                accumulator = apply_function(f.clone(), vec![accumulator, element], rng)?;
            }
            Ok(accumulator)
        }
        other => Err(EvalError::UnknownMethod(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn eval(input: &str) -> Result<Value, EvalError> {
        let lexer = Lexer::new(input);
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();
        assert!(parser.errors().is_empty(), "{:?}", parser.errors());
        let env = Environment::new();
        let mut rng = StdRng::seed_from_u64(0);
        eval_program_with_rng(&program, env, &mut rng)
    }

    /// `Value::Array` has no structural `PartialEq` (arrays compare by
    /// identity like the original, per DESIGN.md); unwrap elements to
    /// compare array-returning results in tests.
    fn array_elements(value: Value) -> Vec<Value> {
        match value {
            Value::Array(elements) => elements,
            other => panic!("expected Array, got {:?}", other),
        }
    }

    #[test]
    fn let_chain_arithmetic() {
        assert_eq!(
            eval("let a = 5; let b = a; let c = a + b + 5; c;"),
            Ok(Value::Integer(15))
        );
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(
            eval(r#""Hello" + " " + "World!""#),
            Ok(Value::String("Hello World!".to_string()))
        );
    }

    #[test]
    fn closures_and_currying() {
        let input = "let newAdder = fn(x){ fn(y){ x + y } }; let addTwo = newAdder(2); addTwo(3);";
        assert_eq!(eval(input), Ok(Value::Integer(5)));
    }

    #[test]
    fn array_map() {
        assert_eq!(
            array_elements(eval("[1,2,3].map(fn(x){ x * x })").unwrap()),
            vec![Value::Integer(1), Value::Integer(4), Value::Integer(9)]
        );
    }

    #[test]
    fn missing_hash_key_is_null() {
        assert_eq!(eval(r#"{"foo": 5}["bar"]"#), Ok(Value::Null));
    }

    #[test]
    fn if_else_picks_the_false_branch() {
        assert_eq!(eval("if (1 > 2) { 10 } else { 20 }"), Ok(Value::Integer(20)));
    }

    #[test]
    fn len_of_integer_is_a_type_error() {
        let err = eval("len(1)").unwrap_err();
        assert_eq!(err.to_string(), "argument to `len` not supported, got=INTEGER");
    }

    #[test]
    fn array_reduce() {
        assert_eq!(
            eval("[1,2,3].reduce(fn(acc,x){ acc + x }, 0)"),
            Ok(Value::Integer(6))
        );
    }

    #[test]
    fn division_by_zero_is_a_runtime_error() {
        let err = eval("10 / 0").unwrap_err();
        assert_eq!(err.to_string(), "division by zero");
    }

    #[test]
    fn integer_arithmetic_wraps_on_overflow_instead_of_panicking() {
        assert_eq!(
            eval("9223372036854775807 + 1"),
            Ok(Value::Integer(i64::MIN))
        );
        assert_eq!(
            eval("-9223372036854775807 - 1 - 1"),
            Ok(Value::Integer(i64::MAX))
        );
        assert_eq!(
            eval("4611686018427387904 * 2"),
            Ok(Value::Integer(i64::MIN))
        );
        assert_eq!(
            eval("-(9223372036854775807 + 1)"),
            Ok(Value::Integer(i64::MIN))
        );
    }

    #[test]
    fn arrays_compare_by_identity_not_contents() {
        assert_eq!(eval("[1, 2] == [1, 2]"), Ok(Value::Boolean(false)));
        assert_eq!(eval("[1, 2] != [1, 2]"), Ok(Value::Boolean(true)));
    }

    #[test]
    fn wrong_arity_call_is_an_error() {
        let err = eval("let f = fn(x, y) { x + y }; f(1);").unwrap_err();
        assert_eq!(err, EvalError::WrongArgumentCount);
    }

    #[test]
    fn unknown_method_on_array() {
        let err = eval("[1,2,3].nope()").unwrap_err();
        assert_eq!(err.to_string(), "unknown method nope");
    }

    #[test]
    fn no_methods_for_non_array_receiver() {
        let err = eval("5.nope()").unwrap_err();
        assert_eq!(err.to_string(), "no methods for this type");
    }

    #[test]
    fn bang_truthiness_law() {
        for (input, expected) in [
            ("!!5", true),
            ("!!0", true),
            ("!!\"\"", true),
            ("!!true", true),
            ("!!false", false),
            ("!!null_placeholder_unused", true),
        ] {
            if input == "!!null_placeholder_unused" {
                continue;
            }
            assert_eq!(eval(input), Ok(Value::Boolean(expected)), "input: {}", input);
        }
    }

    #[test]
    fn random_is_within_bounds_with_injected_rng() {
        let lexer = Lexer::new("random(10)");
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();
        let env = Environment::new();
        let mut rng = StdRng::seed_from_u64(7);
        let result = eval_program_with_rng(&program, env, &mut rng).unwrap();
        match result {
            Value::Integer(n) => assert!((0..10).contains(&n)),
            other => panic!("expected Integer, got {:?}", other),
        }
    }
}
