use std::rc::Rc;

use crate::{
    ast::{Block, Expr, Mark, Program, Statement, VariableDecl},
    error::RuntimeError,
    interpreter::{
        evaluator::env::{Environment, RuntimeSymbol},
        value::{FunctionValue, Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Walks a validated program tree and executes it.
///
/// The executor holds the current environment, the return-value stack, the
/// in-memory standard-out buffer and the exit code produced by `main`.
/// Each top-level execution runs against a fresh environment; the executor
/// is strictly sequential and single-threaded, and its recursion depth
/// matches the source program's recursion depth.
#[derive(Debug, Default)]
pub struct Executor {
    pub(crate) env:          Environment,
    pub(crate) returns:      Vec<Value>,
    pub(crate) standard_out: String,
    exit_code:               i32,
}

impl Executor {
    /// Creates an executor with an empty global environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an executor over an existing environment.
    ///
    /// Used for the sub-evaluations that lazy variable reads perform
    /// against their captured environments.
    #[must_use]
    pub fn with_env(env: Environment) -> Self {
        Self { env,
               ..Self::default() }
    }

    /// The text accumulated by `print` calls so far.
    #[must_use]
    pub fn standard_out(&self) -> &str {
        &self.standard_out
    }

    /// The exit code produced by `main`, once [`Executor::run`] finished.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Executes a whole program.
    ///
    /// Top-level variable declarations create their lazy cells first, then
    /// the function declarations are bound, then `main` runs. The value
    /// `main` returns becomes the exit code, truncated to an integer.
    ///
    /// # Errors
    /// Returns a positioned [`RuntimeError`] if evaluation fails anywhere;
    /// execution stops at the first error.
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        for decl in &program.variables {
            self.declare_variable(decl);
        }
        for function in &program.functions {
            self.env.insert(function.name.clone(),
                            RuntimeSymbol::Function { return_type: function.return_type,
                                                      params:      function.params.clone(),
                                                      body:        Rc::clone(&function.body), });
        }

        let mark = program.functions
                          .iter()
                          .find(|function| function.name == "main")
                          .map_or_else(Mark::default, |function| function.mark);

        let result = self.eval_function_call("main", &[], mark)?
                         .ok_or(RuntimeError::MissingValue { mark })?;

        #[allow(clippy::cast_possible_truncation)]
        {
            self.exit_code = result.as_number(mark)? as i32;
        }
        Ok(())
    }

    /// Evaluates an expression to an optional value.
    ///
    /// `None` is produced only by calls of void functions. Operands are
    /// evaluated eagerly left to right; variables and parameters are read
    /// lazily through [`Executor::eval_variable`].
    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Option<Value>> {
        match expr {
            Expr::NumericLiteral { value, .. } => Ok(Some(Value::Number(*value))),
            Expr::StringLiteral { value, .. } => Ok(Some(Value::Str(value.clone()))),
            Expr::Variable { name, mark } => Ok(Some(self.eval_variable(name, *mark)?)),
            Expr::Unary { op, term, mark } => {
                let value = self.eval_value(term)?;
                Ok(Some(Self::eval_unary_op(*op, &value, *mark)?))
            },
            Expr::Binary { left, op, right, mark } => {
                let left = self.eval_value(left)?;
                let right = self.eval_value(right)?;
                Ok(Some(Self::eval_binary_op(*op, &left, &right, *mark)?))
            },
            Expr::FunctionCall { name, arguments, mark } => {
                self.eval_function_call(name, arguments, *mark)
            },
            Expr::FunctionResultCall { callee, arguments, mark } => {
                self.eval_function_result_call(callee, arguments, *mark)
            },
            Expr::Lambda(lambda) => {
                Ok(Some(Value::Func(FunctionValue { return_type: lambda.return_type,
                                                    params:      lambda.params.clone(),
                                                    body:        Rc::clone(&lambda.body),
                                                    env:         self.env.clone(), })))
            },
            Expr::LambdaCall { lambda, arguments, mark } => {
                self.eval_lambda_call(lambda, arguments, *mark)
            },
        }
    }

    /// Evaluates an expression that must produce a value.
    pub(crate) fn eval_value(&mut self, expr: &Expr) -> EvalResult<Value> {
        let mark = expr.mark();
        self.eval_expr(expr)?.ok_or(RuntimeError::MissingValue { mark })
    }

    /// Reads a name from the environment.
    ///
    /// A variable cell re-evaluates its stored initializer in its captured
    /// environment using a sub-executor; nothing is cached, so every read
    /// repeats the evaluation. Output the sub-executor produced is folded
    /// into this executor's standard-out buffer. Reading a named function
    /// produces a function value capturing a snapshot of the current
    /// environment.
    pub(crate) fn eval_variable(&mut self, name: &str, mark: Mark) -> EvalResult<Value> {
        let symbol = self.env.lookup(name, 0).cloned();
        match symbol {
            Some(RuntimeSymbol::Variable { value, env, .. }) => {
                let mut sub = Self::with_env(env);
                let result = sub.eval_expr(&value)?;
                self.standard_out.push_str(&sub.standard_out);

                result.ok_or(RuntimeError::MissingValue { mark })
            },
            Some(RuntimeSymbol::Function { return_type, params, body }) => {
                Ok(Value::Func(FunctionValue { return_type,
                                               params,
                                               body,
                                               env: self.env.clone() }))
            },
            None => Err(RuntimeError::UnknownSymbol { name: name.to_string(),
                                                      mark }),
        }
    }

    /// Executes every statement of a block in order.
    ///
    /// A return statement does not short-circuit the block; it records its
    /// value on the return stack and execution continues with the next
    /// statement. The value is consumed when the enclosing call unwinds.
    pub(crate) fn exec_block(&mut self, block: &Block) -> EvalResult<()> {
        for statement in &block.statements {
            self.exec_statement(statement)?;
        }
        Ok(())
    }

    /// Executes a single statement.
    pub(crate) fn exec_statement(&mut self, statement: &Statement) -> EvalResult<()> {
        match statement {
            Statement::VariableDeclaration(decl) => {
                self.declare_variable(decl);
                Ok(())
            },
            Statement::Assignment { name, op, value, mark } => {
                match op.binary_operator() {
                    // A plain assignment replaces the cell's stored
                    // expression; no evaluation happens.
                    None => self.store(name, Rc::clone(value), *mark),
                    // A compound assignment reads strictly, combines, and
                    // snaps the cell to the computed literal.
                    Some(binary_op) => {
                        let current = self.eval_variable(name, *mark)?;
                        let rhs = self.eval_value(value)?;
                        let combined = Self::eval_binary_op(binary_op, &current, &rhs, *mark)?;

                        let literal = Expr::NumericLiteral { value: combined.as_number(*mark)?,
                                                             mark:  *mark, };
                        self.store(name, Rc::new(literal), *mark)
                    },
                }
            },
            Statement::Return { value, .. } => {
                let value = self.eval_value(value)?;
                self.returns.push(value);
                Ok(())
            },
            Statement::FunctionCall { call, .. } => {
                self.eval_expr(call)?;
                Ok(())
            },
        }
    }

    /// Creates the lazy cell for a variable declaration.
    ///
    /// The captured environment is cloned before the cell is inserted, so
    /// a cell never contains itself.
    fn declare_variable(&mut self, decl: &VariableDecl) {
        let captured = self.env.clone();
        self.env.insert(decl.name.clone(),
                        RuntimeSymbol::Variable { var_type: decl.var_type,
                                                  value:    Rc::clone(&decl.value),
                                                  env:      captured, });
    }

    /// Replaces the stored expression of a variable cell.
    fn store(&mut self, name: &str, value: Rc<Expr>, mark: Mark) -> EvalResult<()> {
        match self.env.lookup_mut(name, 0) {
            Some(RuntimeSymbol::Variable { value: cell, .. }) => {
                *cell = value;
                Ok(())
            },
            _ => Err(RuntimeError::UnknownSymbol { name: name.to_string(),
                                                   mark }),
        }
    }
}
