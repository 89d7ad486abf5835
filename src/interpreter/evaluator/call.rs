use std::rc::Rc;

use crate::{
    ast::{Block, Expr, LambdaExpr, Mark, Parameters, TypeName},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Executor},
            env::RuntimeSymbol,
        },
        value::{FunctionValue, Value},
    },
};

/// The margin around zero inside which an `if` condition counts as false.
pub const TRUTH_TOLERANCE: f64 = 1e-4;

impl Executor {
    /// Evaluates a call of a named symbol.
    ///
    /// The builtin names are dispatched first: `print` appends its string
    /// argument and a newline to the standard-out buffer, and `if`
    /// evaluates its condition and then exactly one of its two branches.
    /// Any other name resolves through the environment: a function binding
    /// runs directly, a variable must produce a function value which is
    /// then called.
    ///
    /// # Errors
    /// Returns a positioned [`RuntimeError`] for unknown names, arity
    /// mismatches and ill-typed builtin arguments.
    pub(crate) fn eval_function_call(&mut self,
                                     name: &str,
                                     arguments: &[Rc<Expr>],
                                     mark: Mark)
                                     -> EvalResult<Option<Value>> {
        if name == "print" {
            return self.eval_print(arguments, mark);
        }
        if name == "if" {
            return self.eval_if(arguments, mark);
        }

        let symbol = self.env.lookup(name, 0).cloned();
        match symbol {
            Some(RuntimeSymbol::Function { return_type, params, body }) => {
                self.call_named(return_type, &params, &body, arguments, mark)
            },
            Some(RuntimeSymbol::Variable { .. }) => {
                let value = self.eval_variable(name, mark)?;
                let function = value.into_function(mark)?;
                self.call_value(function, arguments, mark)
            },
            None => Err(RuntimeError::UnknownSymbol { name: name.to_string(),
                                                      mark }),
        }
    }

    /// The `print` builtin: appends its argument and a newline to the
    /// standard-out buffer. Produces no value.
    fn eval_print(&mut self,
                  arguments: &[Rc<Expr>],
                  mark: Mark)
                  -> EvalResult<Option<Value>> {
        if arguments.len() != 1 {
            return Err(RuntimeError::ArityMismatch { expected: 1,
                                                     found: arguments.len(),
                                                     mark });
        }

        let value = self.eval_value(&arguments[0])?;
        let text = value.as_str(mark)?;
        self.standard_out.push_str(text);
        self.standard_out.push('\n');

        Ok(None)
    }

    /// The `if` builtin: evaluates the condition and then exactly one of
    /// the two branches.
    ///
    /// The condition counts as true iff its magnitude exceeds
    /// [`TRUTH_TOLERANCE`]. The unselected branch is never evaluated,
    /// which, combined with lazy parameters, is what lets recursive
    /// definitions terminate.
    fn eval_if(&mut self,
               arguments: &[Rc<Expr>],
               mark: Mark)
               -> EvalResult<Option<Value>> {
        if arguments.len() != 3 {
            return Err(RuntimeError::ArityMismatch { expected: 3,
                                                     found: arguments.len(),
                                                     mark });
        }

        let condition = self.eval_value(&arguments[0])?.as_number(mark)?;
        let selected = if condition.abs() > TRUTH_TOLERANCE {
            &arguments[1]
        } else {
            &arguments[2]
        };

        Ok(Some(self.eval_value(selected)?))
    }

    /// Runs a named function in a new scope of the current environment.
    ///
    /// Parameters are not pre-evaluated: each one becomes a lazy cell
    /// holding the corresponding argument AST and a snapshot of the
    /// environment taken before the scope was entered.
    pub(crate) fn call_named(&mut self,
                             return_type: TypeName,
                             params: &Parameters,
                             body: &Rc<Block>,
                             arguments: &[Rc<Expr>],
                             mark: Mark)
                             -> EvalResult<Option<Value>> {
        if params.len() != arguments.len() {
            return Err(RuntimeError::ArityMismatch { expected: params.len(),
                                                     found: arguments.len(),
                                                     mark });
        }

        let captured = self.env.clone();
        self.env.enter_scope();
        for ((name, var_type), argument) in params.iter().zip(arguments) {
            self.env.insert(name.clone(),
                            RuntimeSymbol::Variable { var_type: *var_type,
                                                      value:    Rc::clone(argument),
                                                      env:      captured.clone(), });
        }

        let frame = self.returns.len();
        let result = self.exec_block(body);
        self.env.leave_scope();
        result?;

        self.finish_call(return_type, frame, mark)
    }

    /// Calls a function value.
    ///
    /// The body runs in a new scope of the value's captured environment,
    /// while the parameters are bound to the argument ASTs against a
    /// snapshot of the caller's environment.
    pub(crate) fn call_value(&mut self,
                             function: FunctionValue,
                             arguments: &[Rc<Expr>],
                             mark: Mark)
                             -> EvalResult<Option<Value>> {
        if function.params.len() != arguments.len() {
            return Err(RuntimeError::ArityMismatch { expected: function.params.len(),
                                                     found: arguments.len(),
                                                     mark });
        }

        let caller_snapshot = self.env.clone();
        let saved = std::mem::replace(&mut self.env, function.env);
        self.env.enter_scope();
        for ((name, var_type), argument) in function.params.iter().zip(arguments) {
            self.env.insert(name.clone(),
                            RuntimeSymbol::Variable { var_type: *var_type,
                                                      value:    Rc::clone(argument),
                                                      env:      caller_snapshot.clone(), });
        }

        let frame = self.returns.len();
        let result = self.exec_block(&function.body);
        self.env.leave_scope();
        self.env = saved;
        result?;

        self.finish_call(function.return_type, frame, mark)
    }

    /// Runs an immediately invoked lambda through the fused path: a new
    /// scope in the current environment, the same lazy parameter
    /// discipline as any other call.
    pub(crate) fn eval_lambda_call(&mut self,
                                   lambda: &LambdaExpr,
                                   arguments: &[Rc<Expr>],
                                   mark: Mark)
                                   -> EvalResult<Option<Value>> {
        if lambda.params.len() != arguments.len() {
            return Err(RuntimeError::ArityMismatch { expected: lambda.params.len(),
                                                     found: arguments.len(),
                                                     mark });
        }

        let captured = self.env.clone();
        self.env.enter_scope();
        for ((name, var_type), argument) in lambda.params.iter().zip(arguments) {
            self.env.insert(name.clone(),
                            RuntimeSymbol::Variable { var_type: *var_type,
                                                      value:    Rc::clone(argument),
                                                      env:      captured.clone(), });
        }

        let frame = self.returns.len();
        let result = self.exec_block(&lambda.body);
        self.env.leave_scope();
        result?;

        self.finish_call(lambda.return_type, frame, mark)
    }

    /// Calls whatever function value the callee expression produces.
    pub(crate) fn eval_function_result_call(&mut self,
                                            callee: &Expr,
                                            arguments: &[Rc<Expr>],
                                            mark: Mark)
                                            -> EvalResult<Option<Value>> {
        let value = self.eval_value(callee)?;
        let function = value.into_function(mark)?;

        self.call_value(function, arguments, mark)
    }

    /// Collects the result of a finished call frame.
    ///
    /// Non-void calls take the top of the return stack; in either case the
    /// stack is truncated back to its depth at frame entry, so stray extra
    /// returns cannot leak into an outer frame.
    fn finish_call(&mut self,
                   return_type: TypeName,
                   frame: usize,
                   mark: Mark)
                   -> EvalResult<Option<Value>> {
        if return_type == TypeName::Void {
            self.returns.truncate(frame);
            return Ok(None);
        }

        if self.returns.len() <= frame {
            return Err(RuntimeError::MissingReturnValue { mark });
        }
        let value = self.returns.pop().ok_or(RuntimeError::MissingReturnValue { mark })?;
        self.returns.truncate(frame);

        Ok(Some(value))
    }
}
