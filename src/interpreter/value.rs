use std::rc::Rc;

use crate::{
    ast::{Block, Mark, Parameters, TypeName},
    error::RuntimeError,
    interpreter::evaluator::{core::EvalResult, env::Environment},
};

/// A first-class function value.
///
/// Produced by evaluating a lambda expression or by reading a named
/// function as a value. The captured environment is a deep copy of the
/// defining environment taken at the moment the value was created; later
/// mutations of the original are never observed.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionValue {
    /// The declared return type.
    pub return_type: TypeName,
    /// The parameter list.
    pub params:      Parameters,
    /// The shared body block.
    pub body:        Rc<Block>,
    /// The captured environment snapshot.
    pub env:         Environment,
}

/// Represents a runtime value in the interpreter.
///
/// This enum models the closed set of types a validated expression can
/// produce: numbers, immutable strings and function values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value (double-precision floating point).
    Number(f64),
    /// An immutable string value.
    Str(String),
    /// A first-class function value with its captured environment.
    Func(FunctionValue),
}

impl Value {
    /// Gets the static type of the value.
    #[must_use]
    pub const fn type_name(&self) -> TypeName {
        match self {
            Self::Number(_) => TypeName::F32,
            Self::Str(_) => TypeName::String,
            Self::Func(_) => TypeName::Function,
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Parameters
    /// - `mark`: Source position for error reporting.
    ///
    /// # Errors
    /// Returns `RuntimeError::ExpectedNumber` for strings and functions.
    ///
    /// # Example
    /// ```
    /// use lazuli::{ast::Mark, interpreter::value::Value};
    ///
    /// let x = Value::Number(10.0);
    /// assert_eq!(x.as_number(Mark::default()).unwrap(), 10.0);
    ///
    /// let s = Value::Str("text".to_string());
    /// assert!(s.as_number(Mark::default()).is_err());
    /// ```
    pub const fn as_number(&self, mark: Mark) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(RuntimeError::ExpectedNumber { mark }),
        }
    }

    /// Borrows the value as text, or returns an error if not a string.
    ///
    /// # Parameters
    /// - `mark`: Source position for error reporting.
    ///
    /// # Errors
    /// Returns `RuntimeError::ExpectedString` for numbers and functions.
    pub fn as_str(&self, mark: Mark) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            _ => Err(RuntimeError::ExpectedString { mark }),
        }
    }

    /// Converts the value into a function value, or returns an error.
    ///
    /// # Parameters
    /// - `mark`: Source position for error reporting.
    ///
    /// # Errors
    /// Returns `RuntimeError::ExpectedFunction` for numbers and strings.
    pub fn into_function(self, mark: Mark) -> EvalResult<FunctionValue> {
        match self {
            Self::Func(function) => Ok(function),
            _ => Err(RuntimeError::ExpectedFunction { mark }),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Func(_) => write!(f, "<function>"),
        }
    }
}
