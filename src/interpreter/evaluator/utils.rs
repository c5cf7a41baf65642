use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{core::Value, environment::Environment},
    },
};

impl Context {
    /// Returns the environment of the innermost active call, or the globals at
    /// the top level.
    ///
    /// # Example
    /// ```
    /// use plume::interpreter::evaluator::core::Context;
    ///
    /// let context = Context::new();
    /// assert!(context.current_env().is_empty());
    /// ```
    ///
    /// # Panics
    /// Panics if the stack is empty, which indicates an internal error.
    #[must_use]
    pub fn current_env(&self) -> &Environment {
        self.scope_stack.last().expect("at least global")
    }

    fn current_env_mut(&mut self) -> &mut Environment {
        self.scope_stack.last_mut().expect("at least global")
    }

    /// Binds `name` in the current environment, creating or overwriting it.
    ///
    /// Inside a function body this only affects the call's own environment;
    /// the caller never sees the write.
    ///
    /// # Example
    /// ```
    /// use plume::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let mut context = Context::new();
    /// context.assign("x", Value::Integer(1));
    /// context.assign("x", Value::Integer(2));
    ///
    /// assert_eq!(context.get_variable("x"), Some(&Value::Integer(2)));
    /// ```
    pub fn assign(&mut self, name: &str, value: Value) {
        self.current_env_mut().define(name, value);
    }

    /// Looks a variable up in the current environment, then in the globals.
    ///
    /// Returns `None` if neither binds the name.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.current_env()
            .get(name)
            .or_else(|| self.scope_stack.first().and_then(|globals| globals.get(name)))
    }

    /// Resolves an identifier to a copy of its value.
    ///
    /// # Errors
    /// Returns `UnknownVariable` if the name is bound nowhere.
    pub fn lookup_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.get_variable(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_falls_back_to_globals() {
        let mut context = Context::new();
        context.assign("g", Value::Integer(1));
        context.scope_stack.push(Environment::new());
        context.assign("local", Value::Integer(2));

        assert_eq!(context.lookup_variable("g", 1), Ok(Value::Integer(1)));
        assert_eq!(context.lookup_variable("local", 1), Ok(Value::Integer(2)));

        context.scope_stack.pop();
        assert!(context.lookup_variable("local", 3).is_err());
    }

    #[test]
    fn current_binding_shadows_global() {
        let mut context = Context::new();
        context.assign("x", Value::Integer(1));
        context.scope_stack.push(Environment::new());
        context.assign("x", Value::from("inner"));

        assert_eq!(context.get_variable("x"), Some(&Value::from("inner")));
    }
}
