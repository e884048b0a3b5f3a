//! Console output: `puts`.

use crate::error::EvalError;
use crate::value::Value;

/// Prints each argument's `inspect` form on its own line. Always succeeds.
pub fn puts(args: &[Value]) -> Result<Value, EvalError> {
    for arg in args {
        println!("{}", arg);
    }
    Ok(Value::Null)
}
