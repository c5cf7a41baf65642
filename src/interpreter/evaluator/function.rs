use std::rc::Rc;

use crate::{
    ast::{Call, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        value::core::Value,
    },
};

impl Context {
    /// Registers a function definition under its name.
    ///
    /// A later definition with the same name replaces the earlier one. The
    /// body is not evaluated.
    pub fn define_function(&mut self, def: &Rc<FunctionDef>) {
        tracing::debug!(name = %def.name, params = def.params.len(), "defining function");
        self.functions.insert(def.name.clone(), Rc::clone(def));
    }

    /// Evaluates a call to a user-defined function.
    ///
    /// The steps are:
    /// 1. resolve the callee in the function table,
    /// 2. evaluate the arguments left to right in the caller's environment,
    /// 3. check that the argument count matches the parameter count,
    /// 4. run the body in a copy of the caller's environment with the
    ///    parameters bound,
    /// 5. restore the caller's environment, on success and on failure alike.
    ///
    /// # Returns
    /// The value of the `return` that ended the body, or `nil` if the body ran
    /// to completion.
    ///
    /// # Errors
    /// - `UnknownFunction` if no function has this name.
    /// - `ArgumentCountMismatch` if the arity differs.
    /// - `RecursionLimit` if the call would exceed the configured depth.
    /// - Any error raised while evaluating arguments or the body.
    ///
    /// # Example
    /// ```
    /// use plume::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let mut context = Context::new();
    /// let source = "function fact(n) { if (n <= 1) { return 1; } return n * fact(n - 1); }";
    /// context.run_source(source).unwrap();
    ///
    /// let execution = context.run_source("return fact(10);").unwrap();
    /// assert_eq!(execution.value, Some(Value::Integer(3_628_800)));
    /// ```
    pub fn eval_call(&mut self, call: &Call) -> EvalResult<Value> {
        let Call { name, arguments, line } = call;

        let function =
            self.functions
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::UnknownFunction { name: name.clone(),
                                                               line: *line, })?;

        let args = arguments.iter()
                            .map(|arg| self.eval(arg))
                            .collect::<EvalResult<Vec<_>>>()?;

        if args.len() != function.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name:     name.clone(),
                                                             expected: function.params.len(),
                                                             found:    args.len(),
                                                             line:     *line, });
        }

        if self.depth >= self.options.max_call_depth {
            return Err(RuntimeError::RecursionLimit { limit: self.options.max_call_depth,
                                                      line:  *line, });
        }

        tracing::trace!(name = %name, depth = self.depth + 1, "calling function");
        let frame = self.current_env().snapshot_with(&function.params, args);
        self.scope_stack.push(frame);
        self.depth += 1;

        let result = self.eval_block(&function.body);

        self.depth -= 1;
        self.scope_stack.pop();

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}
