use crate::{
    ast::{ElseIf, Expr, Statement},
    interpreter::evaluator::core::{Context, EvalResult, Flow},
};

impl Context {
    /// Evaluates an `if` statement.
    ///
    /// The first branch whose condition is truthy runs, trying the `if`
    /// condition and then each `else if` in order. The `else` block runs only
    /// when nothing matched. The chosen block's flow is the statement's flow.
    ///
    /// # Parameters
    /// - `condition`: The `if` condition.
    /// - `body`: Statements run when `condition` holds.
    /// - `else_ifs`: The `else if` clauses, in source order.
    /// - `else_body`: The optional trailing `else` block.
    ///
    /// # Returns
    /// The flow of the executed block, or `Flow::Normal` if no branch ran.
    pub fn eval_if(&mut self,
                   condition: &Expr,
                   body: &[Statement],
                   else_ifs: &[ElseIf],
                   else_body: Option<&[Statement]>)
                   -> EvalResult<Flow> {
        if self.eval(condition)?.is_truthy() {
            return self.eval_block(body);
        }
        for clause in else_ifs {
            if self.eval(&clause.condition)?.is_truthy() {
                return self.eval_block(&clause.body);
            }
        }
        match else_body {
            Some(statements) => self.eval_block(statements),
            None => Ok(Flow::Normal),
        }
    }

    /// Evaluates a `while` loop.
    ///
    /// The condition is re-evaluated once before every pass. A `return` from
    /// the body ends the loop and becomes the statement's flow.
    pub fn eval_while(&mut self, condition: &Expr, body: &[Statement]) -> EvalResult<Flow> {
        while self.eval(condition)?.is_truthy() {
            if let flow @ Flow::Return(_) = self.eval_block(body)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::interpreter::{evaluator::core::Context, value::core::Value};

    fn output(source: &str) -> Vec<String> {
        Context::new().run_source(source).unwrap().output
    }

    #[test]
    fn first_true_branch_wins() {
        let source = "x = 2; if (x == 1) { print(\"one\"); } else if (x > 1) { print(\"big\"); } \
                      else if (x == 2) { print(\"two\"); } else { print(\"other\"); }";
        assert_eq!(output(source), vec!["big"]);
    }

    #[test]
    fn else_runs_when_nothing_matched() {
        assert_eq!(output("if (0) { print(1); } else if (\"\") { print(2); } else { print(3); }"),
                   vec!["3"]);
    }

    #[test]
    fn no_branch_taken_is_silent() {
        assert!(output("if (false) { print(1); }").is_empty());
    }

    #[test]
    fn while_counts() {
        assert_eq!(output("i = 0; while (i < 3) { print(i); i = i + 1; }"),
                   vec!["0", "1", "2"]);
    }

    #[test]
    fn while_with_false_condition_never_runs() {
        assert!(output("while (0) { print(1); }").is_empty());
    }

    #[test]
    fn return_escapes_nested_loops() {
        let source = "function f() { i = 0; while (true) { while (true) { if (i == 2) { return \
                      i; } i = i + 1; } } } return f();";
        let execution = Context::new().run_source(source).unwrap();
        assert_eq!(execution.value, Some(Value::Integer(2)));
    }
}
