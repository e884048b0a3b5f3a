//! Host-provided functions available to every program without an import.
//!
//! Built-ins are not bound in any `Environment` frame; `eval::eval_identifier`
//! consults the environment chain first and falls back to [`lookup`] only on
//! a miss, matching the resolution order the evaluator's identifier rule
//! requires.

use crate::error::EvalError;
use crate::value::Value;
use rand::Rng;

pub mod console;
pub mod lists;
pub mod random;

/// Returns the builtin bound to `name`, if one exists.
pub fn lookup(name: &str) -> Option<Value> {
    match name {
        "len" | "first" | "last" | "rest" | "push" | "puts" | "random" => {
            Some(Value::Builtin(name.to_string()))
        }
        _ => None,
    }
}

/// Dispatches a call to the builtin named `name`. `rng` backs `random` so
/// callers can inject a seeded generator for deterministic tests.
pub fn call(name: &str, args: &[Value], rng: &mut dyn RngSource) -> Result<Value, EvalError> {
    match name {
        "len" => lists::len(args),
        "first" => lists::first(args),
        "last" => lists::last(args),
        "rest" => lists::rest(args),
        "push" => lists::push(args),
        "puts" => console::puts(args),
        "random" => random::random(args, rng),
        other => Err(EvalError::NotAFunction(other.to_string())),
    }
}

/// A source of randomness a builtin can draw from. Implemented for both
/// `rand::rngs::ThreadRng` (the default) and `rand::rngs::StdRng` (seeded,
/// for deterministic tests) — see `eval::eval_program_with_rng`.
pub trait RngSource {
    fn gen_range_usize(&mut self, upper: i64) -> i64;
}

impl<T: Rng> RngSource for T {
    fn gen_range_usize(&mut self, upper: i64) -> i64 {
        self.gen_range(0..upper)
    }
}
