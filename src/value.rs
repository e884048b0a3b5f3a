// ABOUTME: Runtime value types produced by the evaluator

use crate::ast::BlockStatement;
use crate::env::Environment;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A hashable projection of `Value`, used as the key type for `Value::Hash`.
/// Only integers, booleans, and strings are hashable; everything else fails
/// to convert (see `Value::as_hash_key`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    Array(Vec<Value>),
    Hash(HashMap<HashKey, (Value, Value)>),
    Function {
        parameters: Vec<String>,
        body: BlockStatement,
        env: Rc<Environment>,
    },
    Builtin(String),
    ReturnValue(Box<Value>),
}

impl Value {
    /// `NULL` and `FALSE` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    /// Upper-case type tag used in error messages (`got=INTEGER`, etc).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::String(_) => "STRING",
            Value::Null => "NULL",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function { .. } => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::ReturnValue(_) => "RETURN_VALUE",
        }
    }

    /// Converts to a `HashKey`, or `None` if this value is not hashable.
    pub fn as_hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(i) => Some(HashKey::Integer(*i)),
            Value::Boolean(b) => Some(HashKey::Boolean(*b)),
            Value::String(s) => Some(HashKey::String(s.clone())),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::ReturnValue(a), Value::ReturnValue(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", s),
            Value::Null => write!(f, "null"),
            Value::Array(elements) => {
                let items: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::Hash(pairs) => {
                let items: Vec<String> = pairs
                    .values()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect();
                write!(f, "{{{}}}", items.join(", "))
            }
            Value::Function {
                parameters, body, ..
            } => write!(f, "fn({}){{\n{}\n}}", parameters.join(", "), body),
            Value::Builtin(name) => write!(f, "builtin function: {}", name),
            Value::ReturnValue(v) => write!(f, "{}", v),
        }
    }
}
