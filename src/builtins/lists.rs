//! Array built-ins: `len`, `first`, `last`, `rest`, `push`.

use crate::error::EvalError;
use crate::value::Value;

pub fn len(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::WrongArgumentCountExact {
            got: args.len(),
            want: 1,
        });
    }

    match &args[0] {
        Value::String(s) => Ok(Value::Integer(s.len() as i64)),
        Value::Array(elements) => Ok(Value::Integer(elements.len() as i64)),
        other => Err(EvalError::LenNotSupported(other.type_name().to_string())),
    }
}

pub fn first(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::WrongArgumentCountExact {
            got: args.len(),
            want: 1,
        });
    }

    match &args[0] {
        Value::Array(elements) => Ok(elements.first().cloned().unwrap_or(Value::Null)),
        other => Err(EvalError::FirstNotArray(other.type_name().to_string())),
    }
}

pub fn last(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::WrongArgumentCountExact {
            got: args.len(),
            want: 1,
        });
    }

    match &args[0] {
        Value::Array(elements) => Ok(elements.last().cloned().unwrap_or(Value::Null)),
        other => Err(EvalError::LastNotArray(other.type_name().to_string())),
    }
}

pub fn rest(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::WrongArgumentCountExact {
            got: args.len(),
            want: 1,
        });
    }

    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(Value::Array(elements[1..].to_vec()))
            }
        }
        other => Err(EvalError::RestNotArray(other.type_name().to_string())),
    }
}

pub fn push(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::WrongArgumentCountExact {
            got: args.len(),
            want: 2,
        });
    }

    match &args[0] {
        Value::Array(elements) => {
            let mut new_elements = elements.clone();
            new_elements.push(args[1].clone());
            Ok(Value::Array(new_elements))
        }
        other => Err(EvalError::PushNotArray(other.type_name().to_string())),
    }
}
