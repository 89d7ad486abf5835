use crate::{
    ast::{AssignmentOperator, Block, Expr, FunctionDecl, LambdaExpr, Mark, Program, Statement,
          TypeName, VariableDecl},
    error::SemanticError,
    interpreter::analyzer::{
        symbol::{Signature, Symbol, SymbolTable},
        type_check::deduce_type,
    },
};

/// Per-frame return tracking.
///
/// A frame is pushed for every function or lambda body. A return statement
/// overwrites the frame, so only the last return seen decides whether the
/// body returns and which type it yields. Branches taken through `if` are
/// not merged; the analysis is deliberately shallow.
#[derive(Debug, Default, Clone, Copy)]
struct ReturnInfo {
    has_return:  bool,
    return_type: Option<TypeName>,
}

/// Result type used by the semantic analyzer.
pub type AnalysisResult = Result<(), SemanticError>;

/// Validates a parsed program before execution.
///
/// The analyzer walks the tree top-down, maintaining a scoped
/// [`SymbolTable`], and enforces name resolution, redefinition rules,
/// declaration and assignment type conformance, call arity and argument
/// types, return-path rules and the `main` entry requirement.
///
/// The built-in functions `print(string): void` and
/// `if(f32, f32, f32): f32` are pre-seeded into the global scope; exactly
/// these two names are special.
pub struct SemanticAnalyser {
    symbols: SymbolTable,
    returns: Vec<ReturnInfo>,
}

impl Default for SemanticAnalyser {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyser {
    /// Creates an analyzer with the built-in symbols in scope.
    #[must_use]
    pub fn new() -> Self {
        let mut symbols = SymbolTable::new();
        symbols.insert("if",
                       Symbol::Function { return_type: TypeName::F32,
                                          params:      vec![TypeName::F32,
                                                            TypeName::F32,
                                                            TypeName::F32], });
        symbols.insert("print",
                       Symbol::Function { return_type: TypeName::Void,
                                          params:      vec![TypeName::String], });

        Self { symbols,
               returns: Vec::new() }
    }

    /// Validates a whole program.
    ///
    /// Top-level variables are checked first, then functions, both in
    /// source order; a declaration may only use names that are already in
    /// scope. Afterwards a function `main` returning `f32` must exist.
    ///
    /// # Errors
    /// Returns the first [`SemanticError`] encountered; analysis does not
    /// attempt recovery.
    ///
    /// # Examples
    /// ```
    /// use lazuli::interpreter::{
    ///     analyzer::semantic::SemanticAnalyser,
    ///     lexer::tokenize,
    ///     parser::core::parse_program,
    /// };
    ///
    /// let tokens = tokenize("fn main(): f32 { ret 0; }").unwrap();
    /// let program = parse_program(&mut tokens.iter().peekable()).unwrap();
    ///
    /// assert!(SemanticAnalyser::new().analyse(&program).is_ok());
    /// ```
    pub fn analyse(&mut self, program: &Program) -> AnalysisResult {
        for variable in &program.variables {
            self.declare_variable(variable)?;
        }
        for function in &program.functions {
            self.declare_function(function)?;
        }

        self.check_main()
    }

    /// Checks a variable declaration and brings its name into scope.
    ///
    /// The initializer is analyzed and type-deduced before the name is
    /// inserted, so a declaration cannot refer to itself.
    fn declare_variable(&mut self, decl: &VariableDecl) -> AnalysisResult {
        if self.symbols.lookup(&decl.name, 1).is_some() {
            return Err(SemanticError::Redefinition { name: decl.name.clone(),
                                                     mark: decl.mark, });
        }

        self.analyse_expr(&decl.value)?;

        if let Some(found) = deduce_type(&self.symbols, &decl.value)?
           && found != decl.var_type
        {
            return Err(SemanticError::AssignedTypeMismatch { name: decl.name.clone(),
                                                             found,
                                                             mark: decl.mark, });
        }

        self.symbols.insert(decl.name.clone(), Symbol::Variable { var_type: decl.var_type });
        Ok(())
    }

    /// Checks a function declaration: redefinition, parameter scope, body
    /// and return paths.
    ///
    /// The function's symbol is inserted before its body is analyzed, so
    /// recursion resolves.
    fn declare_function(&mut self, function: &FunctionDecl) -> AnalysisResult {
        if self.symbols.lookup(&function.name, 1).is_some() {
            return Err(SemanticError::Redefinition { name: function.name.clone(),
                                                     mark: function.mark, });
        }

        let param_types = function.params.iter().map(|(_, t)| *t).collect();
        self.symbols.insert(function.name.clone(),
                            Symbol::Function { return_type: function.return_type,
                                               params:      param_types, });

        self.analyse_body(&function.params, &function.body, function.mark)?;
        let info = self.returns.pop().unwrap_or_default();

        self.check_return_info(Some(function.name.as_str()),
                               function.return_type,
                               info,
                               function.mark)
    }

    /// Analyzes a function or lambda body in a fresh scope with its
    /// parameters bound, leaving the produced [`ReturnInfo`] on the stack.
    fn analyse_body(&mut self,
                    params: &crate::ast::Parameters,
                    body: &Block,
                    mark: Mark)
                    -> AnalysisResult {
        self.returns.push(ReturnInfo::default());
        self.symbols.enter_scope();

        for (name, type_name) in params {
            if self.symbols.lookup(name, 1).is_some() {
                self.symbols.leave_scope();
                return Err(SemanticError::Redefinition { name: name.clone(),
                                                         mark });
            }
            self.symbols.insert(name.clone(), Symbol::Variable { var_type: *type_name });
        }

        let result = self.analyse_block(body);
        self.symbols.leave_scope();
        result
    }

    fn analyse_block(&mut self, block: &Block) -> AnalysisResult {
        for statement in &block.statements {
            self.analyse_statement(statement)?;
        }
        Ok(())
    }

    fn analyse_statement(&mut self, statement: &Statement) -> AnalysisResult {
        match statement {
            Statement::VariableDeclaration(decl) => self.declare_variable(decl),
            Statement::Assignment { name, op, value, mark } => {
                self.check_assignment(name, *op, value, *mark)
            },
            Statement::Return { value, .. } => {
                self.analyse_expr(value)?;
                let return_type = deduce_type(&self.symbols, value)?;
                if let Some(info) = self.returns.last_mut() {
                    *info = ReturnInfo { has_return: true,
                                         return_type };
                }
                Ok(())
            },
            Statement::FunctionCall { call, .. } => self.analyse_expr(call),
        }
    }

    /// Checks an assignment statement.
    ///
    /// The target must resolve to a variable. Compound assignments are
    /// forbidden on variables of type `function`, and the right-hand side
    /// must type-match the target unless its type is indeterminate.
    fn check_assignment(&mut self,
                        name: &str,
                        op: AssignmentOperator,
                        value: &Expr,
                        mark: Mark)
                        -> AnalysisResult {
        let Some(symbol) = self.symbols.lookup(name, 0) else {
            return Err(SemanticError::UndeclaredSymbol { name: name.to_string(),
                                                         mark });
        };
        let Some(var_type) = symbol.variable_type() else {
            return Err(SemanticError::AssignmentToNonVariable { name: name.to_string(),
                                                                mark });
        };

        if var_type == TypeName::Function && op != AssignmentOperator::Assign {
            return Err(SemanticError::CompoundAssignmentOnFunction { name: name.to_string(),
                                                                     mark });
        }

        self.analyse_expr(value)?;

        if let Some(found) = deduce_type(&self.symbols, value)?
           && found != var_type
        {
            return Err(SemanticError::AssignedTypeMismatch { name: name.to_string(),
                                                             found,
                                                             mark });
        }

        Ok(())
    }

    /// Resolves and checks an expression recursively.
    fn analyse_expr(&mut self, expr: &Expr) -> AnalysisResult {
        match expr {
            Expr::NumericLiteral { .. } | Expr::StringLiteral { .. } => Ok(()),
            Expr::Variable { name, mark } => {
                if self.symbols.lookup(name, 0).is_none() {
                    return Err(SemanticError::UndeclaredSymbol { name: name.clone(),
                                                                 mark: *mark, });
                }
                Ok(())
            },
            Expr::Unary { term, .. } => self.analyse_expr(term),
            Expr::Binary { left, right, .. } => {
                self.analyse_expr(left)?;
                self.analyse_expr(right)
            },
            Expr::FunctionCall { name, arguments, mark } => {
                self.check_call(name, arguments, *mark)
            },
            Expr::FunctionResultCall { callee, arguments, mark } => {
                self.analyse_expr(callee)?;

                if let Some(found) = deduce_type(&self.symbols, callee)?
                   && found != TypeName::Function
                {
                    return Err(SemanticError::ResultNotCallable { found,
                                                                  mark: *mark });
                }

                for argument in arguments {
                    self.analyse_expr(argument)?;
                }
                Ok(())
            },
            Expr::Lambda(lambda) => self.analyse_lambda(lambda),
            Expr::LambdaCall { lambda, arguments, mark } => {
                self.analyse_lambda(lambda)?;

                if lambda.params.len() != arguments.len() {
                    return Err(SemanticError::ArityMismatch { name:     None,
                                                              expected: lambda.params.len(),
                                                              found:    arguments.len(),
                                                              mark:     *mark, });
                }

                for (argument, (_, expected)) in arguments.iter().zip(&lambda.params) {
                    self.analyse_expr(argument)?;

                    if let Some(found) = deduce_type(&self.symbols, argument)?
                       && found != *expected
                    {
                        return Err(SemanticError::ArgumentTypeMismatch { name:     None,
                                                                         expected: *expected,
                                                                         found,
                                                                         mark:     *mark, });
                    }
                }
                Ok(())
            },
        }
    }

    /// Checks a call of a named symbol.
    ///
    /// A known signature is checked for arity and per-argument types.
    /// Calling a variable of type `function` is accepted with the
    /// arguments merely name-resolved, since the signature is unknown.
    fn check_call(&mut self,
                  name: &str,
                  arguments: &[std::rc::Rc<Expr>],
                  mark: Mark)
                  -> AnalysisResult {
        let Some(symbol) = self.symbols.lookup(name, 0) else {
            return Err(SemanticError::UndeclaredSymbol { name: name.to_string(),
                                                         mark });
        };
        let Some(signature) = symbol.signature() else {
            return Err(SemanticError::NotCallable { name: name.to_string(),
                                                    mark });
        };

        match signature {
            Signature::Known { params, .. } => {
                if params.len() != arguments.len() {
                    return Err(SemanticError::ArityMismatch { name:     Some(name.to_string()),
                                                              expected: params.len(),
                                                              found:    arguments.len(),
                                                              mark });
                }

                for (argument, expected) in arguments.iter().zip(params) {
                    self.analyse_expr(argument)?;

                    if let Some(found) = deduce_type(&self.symbols, argument)?
                       && found != expected
                    {
                        return Err(SemanticError::ArgumentTypeMismatch { name: Some(name.to_string()),
                                                                         expected,
                                                                         found,
                                                                         mark });
                    }
                }
            },
            Signature::Unknown => {
                for argument in arguments {
                    self.analyse_expr(argument)?;
                }
            },
        }

        Ok(())
    }

    /// Analyzes a lambda: parameter scope, body and return paths.
    fn analyse_lambda(&mut self, lambda: &LambdaExpr) -> AnalysisResult {
        self.analyse_body(&lambda.params, &lambda.body, lambda.mark)?;
        let info = self.returns.pop().unwrap_or_default();

        self.check_return_info(None, lambda.return_type, info, lambda.mark)
    }

    /// Applies the return-path rules to a finished body.
    ///
    /// Non-void bodies must return on the observed path, void bodies must
    /// not, and a concrete deduced return type must equal the declared one.
    fn check_return_info(&self,
                         name: Option<&str>,
                         declared: TypeName,
                         info: ReturnInfo,
                         mark: Mark)
                         -> AnalysisResult {
        let name = name.map(String::from);

        if declared != TypeName::Void && !info.has_return {
            return Err(SemanticError::MissingReturn { name, mark });
        }
        if declared == TypeName::Void && info.has_return {
            return Err(SemanticError::UnexpectedReturn { name, mark });
        }
        if declared != TypeName::Void
           && let Some(found) = info.return_type
           && found != declared
        {
            return Err(SemanticError::ReturnTypeMismatch { name,
                                                           expected: declared,
                                                           found,
                                                           mark });
        }

        Ok(())
    }

    /// Requires a `main` function returning `f32` to exist.
    fn check_main(&self) -> AnalysisResult {
        let mark = Mark::default();
        let Some(symbol) = self.symbols.lookup("main", 0) else {
            return Err(SemanticError::MissingMain { mark });
        };

        match symbol.signature() {
            Some(Signature::Known { return_type: TypeName::F32, .. }) => Ok(()),
            _ => Err(SemanticError::InvalidMain { mark }),
        }
    }
}
