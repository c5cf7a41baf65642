use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{Expr, FunctionDef, Program, Statement},
    error::{Error, RuntimeError},
    interpreter::{
        lexer::tokenize,
        parser::core::parse_program,
        value::{core::Value, environment::Environment},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default maximum nesting of user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 200;

/// How control leaves a statement.
///
/// `Return` unwinds every enclosing block and loop up to the nearest function
/// call, or to the program when there is none.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Continue with the next statement.
    Normal,
    /// A `return` fired with this value.
    Return(Value),
}

/// Tunable evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Also write every printed line to stdout as it is produced.
    pub echo:           bool,
    /// Nested user calls allowed before `RecursionLimit` is raised.
    pub max_call_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { echo:           false,
               max_call_depth: DEFAULT_MAX_CALL_DEPTH, }
    }
}

/// The observable outcome of running a program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Execution {
    /// One entry per executed `print`, in order.
    pub output: Vec<String>,
    /// The value of a top-level `return`, if one fired.
    pub value:  Option<Value>,
}

/// Stores the runtime evaluation context.
///
/// Holds the interpreter state: the environment stack, the function table and
/// the output collected from `print`.
///
/// ## Usage
///
/// A `Context` may run several programs in turn. Global variables and defined
/// functions persist between runs; the output buffer is drained by each run.
///
/// ```
/// use plume::interpreter::{evaluator::core::Context, value::core::Value};
///
/// let mut context = Context::new();
/// context.run_source("function double(n) { return n * 2; } x = 4;").unwrap();
///
/// let execution = context.run_source("print(double(x)); return x;").unwrap();
/// assert_eq!(execution.output, vec!["8"]);
/// assert_eq!(execution.value, Some(Value::Integer(4)));
/// ```
pub struct Context {
    /// Environments of the active calls. The first entry holds the globals
    /// and the last entry is the current environment.
    pub(crate) scope_stack: Vec<Environment>,
    /// A mapping from function names to their definitions.
    pub functions:   HashMap<String, Rc<FunctionDef>>,
    pub(crate) output: Vec<String>,
    pub(crate) options: Options,
    pub(crate) depth: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context with an empty global environment, no functions and
    /// default [`Options`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Creates an empty context using the given options.
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self { scope_stack: vec![Environment::new()],
               functions: HashMap::new(),
               output: Vec::new(),
               options,
               depth: 0 }
    }

    /// Runs a parsed program.
    ///
    /// Statements execute in order. A top-level `return` ends the program and
    /// its value becomes [`Execution::value`].
    ///
    /// The printed output is returned even when it is empty. If the program
    /// fails, output produced before the failure is discarded from the buffer
    /// along with the error.
    ///
    /// # Errors
    /// Returns the first `RuntimeError` raised by the program.
    pub fn run_program(&mut self, program: &Program) -> EvalResult<Execution> {
        self.output.clear();
        let flow = self.eval_block(&program.statements);
        let output = std::mem::take(&mut self.output);

        let value = match flow? {
            Flow::Return(value) => Some(value),
            Flow::Normal => None,
        };
        tracing::debug!(lines = output.len(), returned = value.is_some(), "program finished");

        Ok(Execution { output, value })
    }

    /// Tokenizes, parses and runs `source` in this context.
    ///
    /// # Errors
    /// Returns [`Error::Parse`] if the source does not parse and
    /// [`Error::Runtime`] if the program fails.
    pub fn run_source(&mut self, source: &str) -> Result<Execution, Error> {
        let tokens = tokenize(source)?;
        let program = parse_program(&tokens)?;
        Ok(self.run_program(&program)?)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Every
    /// expression yields a value; a call whose body finishes without `return`
    /// yields `nil`.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The computed `Value`.
    ///
    /// # Example
    /// ```
    /// use plume::{
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut context = Context::new();
    /// let expr = Expr::BinaryOp { left:  Box::new(Expr::Literal { value: 7.into(),
    ///                                                             line:  1, }),
    ///                             op:    BinaryOperator::FloorDiv,
    ///                             right: Box::new(Expr::Literal { value: 2.into(),
    ///                                                             line:  1, }),
    ///                             line:  1, };
    ///
    /// assert_eq!(context.eval(&expr).unwrap(), Value::Integer(3));
    /// ```
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name, line } => self.lookup_variable(name, *line),
            Expr::UnaryOp { op, expr, .. } => {
                let value = self.eval(expr)?;
                Ok(Self::eval_unary(*op, &value))
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
            Expr::Call(call) => self.eval_call(call),
        }
    }

    /// Evaluates a single statement.
    ///
    /// # Returns
    /// [`Flow::Return`] if a `return` fired inside the statement, otherwise
    /// [`Flow::Normal`].
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Assignment { name, value, .. } => {
                let value = self.eval(value)?;
                self.assign(name, value);
                Ok(Flow::Normal)
            },
            Statement::Call(call) => {
                self.eval_call(call)?;
                Ok(Flow::Normal)
            },
            Statement::Function(def) => {
                self.define_function(def);
                Ok(Flow::Normal)
            },
            Statement::Print { value, .. } => {
                let value = self.eval(value)?;
                self.emit(value.to_string());
                Ok(Flow::Normal)
            },
            Statement::If { condition,
                            body,
                            else_ifs,
                            else_body,
                            .. } => self.eval_if(condition, body, else_ifs, else_body.as_deref()),
            Statement::While { condition, body, .. } => self.eval_while(condition, body),
            Statement::Return { value, .. } => Ok(Flow::Return(self.eval(value)?)),
        }
    }

    /// Evaluates statements in order until one returns.
    ///
    /// A [`Flow::Return`] stops the block and is handed back unchanged.
    pub fn eval_block(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        for statement in statements {
            if let flow @ Flow::Return(_) = self.eval_statement(statement)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Records one line of program output.
    fn emit(&mut self, line: String) {
        if self.options.echo {
            println!("{line}");
        }
        self.output.push(line);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(source: &str) -> Result<Execution, Error> {
        Context::new().run_source(source)
    }

    #[test]
    fn print_collects_display_forms() {
        let execution = run("print(1); print(2.0); print(\"s\"); print(true);").unwrap();
        assert_eq!(execution.output, vec!["1", "2.0", "s", "true"]);
        assert_eq!(execution.value, None);
    }

    #[test]
    fn top_level_return_stops_the_program() {
        let execution = run("print(1); return 5; print(2);").unwrap();
        assert_eq!(execution.output, vec!["1"]);
        assert_eq!(execution.value, Some(Value::Integer(5)));
    }

    #[test]
    fn globals_and_functions_survive_between_runs() {
        let mut context = Context::new();
        context.run_source("base = 10; function add(n) { return base + n; }")
               .unwrap();
        let execution = context.run_source("return add(5);").unwrap();
        assert_eq!(execution.value, Some(Value::Integer(15)));
    }

    #[test]
    fn output_buffer_is_drained_each_run() {
        let mut context = Context::new();
        context.run_source("print(1);").unwrap();
        let execution = context.run_source("print(2);").unwrap();
        assert_eq!(execution.output, vec!["2"]);
    }

    #[test]
    fn assignment_overwrites() {
        let execution = run("x = 1; x = x + 1; return x;").unwrap();
        assert_eq!(execution.value, Some(Value::Integer(2)));
    }

    #[test]
    fn unknown_variable_reports_name_and_line() {
        let err = run("x = 1;\nprint(y);").unwrap_err();
        assert_eq!(err,
                   Error::Runtime(RuntimeError::UnknownVariable { name: "y".to_string(),
                                                                  line: 2, }));
    }

    #[test]
    fn parse_errors_surface_through_run_source() {
        assert!(matches!(run("x = ;"), Err(Error::Parse(_))));
        assert!(matches!(run("}"), Err(Error::Parse(_))));
    }
}
