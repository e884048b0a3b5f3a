// ABOUTME: Lexically-nested name-to-value bindings with shadowing

use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new environment enclosing `parent`. Its lifetime is the
    /// lifetime of whatever closure or call frame holds it.
    pub fn enclosed(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Binds `name` in this frame only, shadowing any outer binding.
    pub fn define(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Walks this frame and then each enclosing frame in turn.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }

        if let Some(ref parent) = self.parent {
            return parent.get(name);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_get() {
        let env = Environment::new();
        env.define("x".to_string(), Value::Integer(42));

        match env.get("x") {
            Some(Value::Integer(n)) => assert_eq!(n, 42),
            _ => panic!("expected Integer(42)"),
        }
    }

    #[test]
    fn undefined_identifier() {
        let env = Environment::new();
        assert!(env.get("undefined").is_none());
    }

    #[test]
    fn shadowing() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Integer(42));

        let child = Environment::enclosed(parent);
        child.define("x".to_string(), Value::Integer(100));

        match child.get("x") {
            Some(Value::Integer(n)) => assert_eq!(n, 100),
            _ => panic!("expected Integer(100)"),
        }
    }

    #[test]
    fn parent_lookup() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Integer(42));

        let child = Environment::enclosed(parent);

        match child.get("x") {
            Some(Value::Integer(n)) => assert_eq!(n, 42),
            _ => panic!("expected Integer(42)"),
        }
    }

    #[test]
    fn multiple_levels() {
        let grandparent = Environment::new();
        grandparent.define("a".to_string(), Value::Integer(1));

        let parent = Environment::enclosed(grandparent);
        parent.define("b".to_string(), Value::Integer(2));

        let child = Environment::enclosed(parent);
        child.define("c".to_string(), Value::Integer(3));

        assert_eq!(child.get("a"), Some(Value::Integer(1)));
        assert_eq!(child.get("b"), Some(Value::Integer(2)));
        assert_eq!(child.get("c"), Some(Value::Integer(3)));
    }

    #[test]
    fn set_only_affects_current_frame() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Integer(1));

        let child = Environment::enclosed(parent.clone());
        child.define("x".to_string(), Value::Integer(2));

        assert_eq!(parent.get("x"), Some(Value::Integer(1)));
        assert_eq!(child.get("x"), Some(Value::Integer(2)));
    }
}
