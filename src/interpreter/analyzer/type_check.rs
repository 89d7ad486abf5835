use crate::{
    ast::{BinaryOperator, Expr, TypeName},
    error::SemanticError,
    interpreter::analyzer::symbol::{Symbol, SymbolTable},
};

/// Deduces the static type of an expression, if one can be known.
///
/// `Ok(None)` means the type is indeterminate, which happens wherever a
/// variable of type `function` is called: nothing is known statically about
/// what such a call produces. Indeterminacy propagates through operators;
/// the analyzer accepts indeterminate values everywhere a concrete type
/// would be checked.
///
/// Key rules:
/// - numeric literal ⇒ `f32`, string literal ⇒ `string`;
/// - `string + anything` ⇒ `string`; any other operator on a string is an
///   error;
/// - all other binary operators require both sides `f32` and yield `f32`;
/// - unary operators require `f32`;
/// - a lambda ⇒ `function`; a variable takes its declared type; a named
///   function referenced as a value ⇒ `function`.
///
/// # Errors
/// Returns a [`SemanticError`] when an operand has a concrete type the
/// operator cannot accept, or when a referenced name is not in scope.
pub fn deduce_type(symbols: &SymbolTable, expr: &Expr) -> Result<Option<TypeName>, SemanticError> {
    match expr {
        Expr::NumericLiteral { .. } => Ok(Some(TypeName::F32)),
        Expr::StringLiteral { .. } => Ok(Some(TypeName::String)),
        Expr::Variable { name, mark } => match symbols.lookup(name, 0) {
            Some(Symbol::Variable { var_type }) => Ok(Some(*var_type)),
            Some(Symbol::Function { .. }) => Ok(Some(TypeName::Function)),
            None => Err(SemanticError::UndeclaredSymbol { name: name.clone(),
                                                          mark: *mark, }),
        },
        Expr::Unary { term, mark, .. } => match deduce_type(symbols, term)? {
            None => Ok(None),
            Some(TypeName::F32) => Ok(Some(TypeName::F32)),
            Some(type_name) => Err(SemanticError::InvalidOperation { type_name,
                                                                     mark: *mark }),
        },
        Expr::Binary { left, op, right, mark } => {
            let left_type = deduce_type(symbols, left)?;
            let right_type = deduce_type(symbols, right)?;

            match left_type {
                None => Ok(None),
                Some(TypeName::String) => {
                    if *op == BinaryOperator::Add {
                        Ok(Some(TypeName::String))
                    } else {
                        Err(SemanticError::InvalidOperation { type_name: TypeName::String,
                                                              mark:      *mark, })
                    }
                },
                Some(TypeName::F32) => match right_type {
                    None => Ok(None),
                    Some(TypeName::F32) => Ok(Some(TypeName::F32)),
                    Some(type_name) => Err(SemanticError::InvalidOperation { type_name,
                                                                             mark: *mark }),
                },
                Some(type_name) => Err(SemanticError::InvalidOperation { type_name,
                                                                         mark: *mark }),
            }
        },
        Expr::FunctionCall { name, .. } => match symbols.lookup(name, 0) {
            Some(Symbol::Function { return_type, .. }) => Ok(Some(*return_type)),
            _ => Ok(None),
        },
        Expr::FunctionResultCall { .. } => Ok(None),
        Expr::Lambda(_) => Ok(Some(TypeName::Function)),
        Expr::LambdaCall { lambda, .. } => Ok(Some(lambda.return_type)),
    }
}
