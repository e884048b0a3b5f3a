// ABOUTME: Runtime error taxonomy produced by the evaluator and built-ins

use thiserror::Error;

/// Every failure mode the evaluator or a built-in can surface. One variant
/// per message shape so the wording stays centralized instead of scattered
/// across `format!` call sites.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),

    #[error("unknown operator: {operator}{right}")]
    UnknownPrefixOperator { operator: String, right: String },

    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: String,
        operator: String,
        right: String,
    },

    #[error("operator mismatch: {left} {operator} {right}")]
    OperatorMismatch {
        left: String,
        operator: String,
        right: String,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("not a function: {0}")]
    NotAFunction(String),

    #[error("wrong number of arguments")]
    WrongArgumentCount,

    #[error("wrong number of arguments. got={got}, want={want}")]
    WrongArgumentCountExact { got: usize, want: usize },

    #[error("unusable as hash key: {0}")]
    UnusableAsHashKey(String),

    #[error("index operator not supported: {0}")]
    IndexOperatorNotSupported(String),

    #[error("unknown method {0}")]
    UnknownMethod(String),

    #[error("no methods for this type")]
    NoMethodsForType,

    #[error("argument to `len` not supported, got={0}")]
    LenNotSupported(String),

    #[error("argument to `first` must be ARRAY, got={0}")]
    FirstNotArray(String),

    #[error("argument to `last` must be ARRAY, got={0}")]
    LastNotArray(String),

    #[error("argument to `rest` must be ARRAY, got={0}")]
    RestNotArray(String),

    #[error("argument to `push` must be ARRAY, got={0}")]
    PushNotArray(String),

    #[error("argument to `random` must be a positive integer, got={0}")]
    RandomNotPositive(i64),

    #[error("argument to `random` not supported, got={0}")]
    RandomNotSupported(String),

    #[error("wrong number of arguments for map")]
    WrongArgumentCountForMap,

    #[error("argument to map must be a function")]
    MapArgumentNotFunction,

    #[error("wrong number of arguments for filter")]
    WrongArgumentCountForFilter,

    #[error("argument to filter must be a function")]
    FilterArgumentNotFunction,

    #[error("wrong number of arguments for reduce")]
    WrongArgumentCountForReduce,

    #[error("first argument to reduce must be a function")]
    ReduceArgumentNotFunction,
}
