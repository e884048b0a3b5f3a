//! `random(n)` — a uniform integer in `[0, n)`, drawn from an injectable source.

use super::RngSource;
use crate::error::EvalError;
use crate::value::Value;

pub fn random(args: &[Value], rng: &mut dyn RngSource) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::WrongArgumentCountExact {
            got: args.len(),
            want: 1,
        });
    }

    match &args[0] {
        Value::Integer(n) if *n > 0 => Ok(Value::Integer(rng.gen_range_usize(*n))),
        Value::Integer(n) => Err(EvalError::RandomNotPositive(*n)),
        other => Err(EvalError::RandomNotSupported(other.type_name().to_string())),
    }
}
