use std::collections::HashMap;

use crate::ast::TypeName;

/// An analysis-time symbol: what a declared name refers to and its static
/// type information.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    /// A declared variable.
    Variable {
        /// The declared type.
        var_type: TypeName,
    },
    /// A declared function.
    Function {
        /// The declared return type.
        return_type: TypeName,
        /// The declared parameter types, in order.
        params:      Vec<TypeName>,
    },
}

/// What is known about a callable symbol.
///
/// Calling a variable of type `function` is legal, but nothing is known
/// statically about its return type or parameters; such calls probe as
/// [`Signature::Unknown`] and are accepted without argument checks.
#[derive(Debug, Clone, PartialEq)]
pub enum Signature {
    /// A function with a fully known signature.
    Known {
        /// The declared return type.
        return_type: TypeName,
        /// The declared parameter types, in order.
        params:      Vec<TypeName>,
    },
    /// Callable, but the signature is not statically known.
    Unknown,
}

impl Symbol {
    /// Probes the symbol as a variable.
    ///
    /// Returns the declared type for variables and `None` for functions.
    #[must_use]
    pub const fn variable_type(&self) -> Option<TypeName> {
        match self {
            Self::Variable { var_type } => Some(*var_type),
            Self::Function { .. } => None,
        }
    }

    /// Probes the symbol as a callable.
    ///
    /// Returns a full [`Signature::Known`] for functions, an
    /// [`Signature::Unknown`] for variables of type `function`, and `None`
    /// for anything else.
    #[must_use]
    pub fn signature(&self) -> Option<Signature> {
        match self {
            Self::Function { return_type, params } => {
                Some(Signature::Known { return_type: *return_type,
                                        params:      params.clone(), })
            },
            Self::Variable { var_type: TypeName::Function } => Some(Signature::Unknown),
            Self::Variable { .. } => None,
        }
    }
}

/// A stack of lexical scopes mapping names to symbols.
///
/// The table always contains at least the global scope. Lookups walk from
/// the innermost scope outward and can be depth-limited, which is how
/// same-scope redefinitions are detected while shadowing across scopes
/// stays legal.
#[derive(Debug, Default)]
pub struct SymbolTable {
    scopes: Vec<HashMap<String, Symbol>>,
}

impl SymbolTable {
    /// Creates a table containing only the empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes: vec![HashMap::new()] }
    }

    /// Pushes a fresh innermost scope.
    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pops the innermost scope, discarding its symbols.
    pub fn leave_scope(&mut self) {
        self.scopes.pop();
    }

    /// Inserts a symbol into the innermost scope.
    pub fn insert(&mut self, name: impl Into<String>, symbol: Symbol) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), symbol);
        }
    }

    /// Looks up a name, walking from the innermost scope outward.
    ///
    /// `max_depth` limits how many scopes are searched; `0` means
    /// unlimited, `1` restricts the search to the innermost scope. The
    /// depth limit is how same-scope redefinitions are told apart from
    /// legal shadowing.
    ///
    /// ## Example
    /// ```
    /// use lazuli::{
    ///     ast::TypeName,
    ///     interpreter::analyzer::symbol::{Symbol, SymbolTable},
    /// };
    ///
    /// let mut symbols = SymbolTable::new();
    /// symbols.insert("x", Symbol::Variable { var_type: TypeName::F32 });
    /// symbols.enter_scope();
    ///
    /// assert!(symbols.lookup("x", 0).is_some());
    /// assert!(symbols.lookup("x", 1).is_none());
    /// ```
    #[must_use]
    pub fn lookup(&self, name: &str, max_depth: usize) -> Option<&Symbol> {
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
}
