use std::{collections::HashMap, rc::Rc};

use crate::ast::{Block, Expr, Parameters, TypeName};

/// A runtime binding stored in the environment.
///
/// Variables do not hold computed values. A variable cell stores the
/// initializer expression together with a deep copy of the environment it
/// was declared in, and every read re-evaluates the expression against that
/// snapshot. Functions hold their signature and shared body; top-level
/// functions carry no environment because they are only reachable through
/// the global scope.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeSymbol {
    /// A lazy variable cell.
    Variable {
        /// The declared type.
        var_type: TypeName,
        /// The shared initializer expression, re-evaluated on every read.
        value:    Rc<Expr>,
        /// The captured environment the initializer is evaluated in.
        env:      Environment,
    },
    /// A named function binding.
    Function {
        /// The declared return type.
        return_type: TypeName,
        /// The parameter list.
        params:      Parameters,
        /// The shared body block.
        body:        Rc<Block>,
    },
}

/// A stack of runtime scopes mapping names to [`RuntimeSymbol`]s.
///
/// Structurally identical to the analysis-time symbol table, but holding
/// runtime bindings and supporting a full deep copy: cloning an environment
/// clones every scope and every variable cell's captured environment, so a
/// snapshot never observes later mutations of its original. Scopes are
/// pushed on function and lambda entry only; blocks are flat within their
/// function's scope.
///
/// ## Example
/// ```
/// use std::rc::Rc;
///
/// use lazuli::{
///     ast::{Expr, Mark, TypeName},
///     interpreter::evaluator::env::{Environment, RuntimeSymbol},
/// };
///
/// let cell = |n: f64| RuntimeSymbol::Variable {
///     var_type: TypeName::F32,
///     value: Rc::new(Expr::NumericLiteral { value: n, mark: Mark::default() }),
///     env: Environment::new(),
/// };
///
/// let mut env = Environment::new();
/// env.insert("x", cell(1.0));
/// let snapshot = env.clone();
/// env.insert("y", cell(2.0));
///
/// // The snapshot never observes later mutations of the original.
/// assert!(snapshot.lookup("y", 0).is_none());
/// assert!(env.lookup("y", 0).is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    scopes: Vec<HashMap<String, RuntimeSymbol>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment containing only the empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes: vec![HashMap::new()] }
    }

    /// Pushes a fresh innermost scope.
    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pops the innermost scope, discarding its bindings.
    pub fn leave_scope(&mut self) {
        self.scopes.pop();
    }

    /// Inserts a binding into the innermost scope.
    pub fn insert(&mut self, name: impl Into<String>, symbol: RuntimeSymbol) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), symbol);
        }
    }

    /// Looks up a name, walking from the innermost scope outward.
    ///
    /// `max_depth` limits how many scopes are searched; `0` means
    /// unlimited.
    #[must_use]
    pub fn lookup(&self, name: &str, max_depth: usize) -> Option<&RuntimeSymbol> {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if let Some(symbol) = scope.get(name) {
                return Some(symbol);
            }
            if max_depth != 0 && depth + 1 == max_depth {
                break;
            }
        }

        None
    }

    /// Looks up a name for mutation, walking from the innermost scope
    /// outward.
    #[must_use]
    pub fn lookup_mut(&mut self, name: &str, max_depth: usize) -> Option<&mut RuntimeSymbol> {
        let mut found = None;
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(name) {
                found = Some(self.scopes.len() - 1 - depth);
                break;
            }
            if max_depth != 0 && depth + 1 == max_depth {
                break;
            }
        }

        found.and_then(|index| self.scopes[index].get_mut(name))
    }
}
