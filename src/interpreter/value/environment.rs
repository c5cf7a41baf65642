use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// A flat mapping from variable names to values.
///
/// Environments do not chain. A function call takes a full copy of the
/// caller's environment, binds its parameters into the copy and discards it
/// when the call ends, so writes made by the callee never reach the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Creates or overwrites a binding.
    pub fn define(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
        } else {
            self.bindings.insert(name.to_string(), value);
        }
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Builds the environment a function body runs in: a snapshot of `self`
    /// with every parameter bound to its argument.
    ///
    /// # Example
    /// ```
    /// use plume::interpreter::value::{core::Value, environment::Environment};
    ///
    /// let mut caller = Environment::new();
    /// caller.define("x", Value::Integer(1));
    /// caller.define("y", Value::Integer(2));
    ///
    /// let frame = caller.snapshot_with(&["y".to_string()], vec![Value::Integer(20)]);
    ///
    /// assert_eq!(frame.get("x"), Some(&Value::Integer(1)));
    /// assert_eq!(frame.get("y"), Some(&Value::Integer(20)));
    /// assert_eq!(caller.get("y"), Some(&Value::Integer(2)));
    /// ```
    #[must_use]
    pub fn snapshot_with(&self, params: &[String], args: Vec<Value>) -> Self {
        let mut frame = self.clone();
        for (param, arg) in params.iter().zip(args) {
            frame.define(param, arg);
        }
        frame
    }
}
