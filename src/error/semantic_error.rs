use crate::ast::{Mark, TypeName};

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors the semantic analyzer can report.
pub enum SemanticError {
    /// A name was declared twice in the same scope.
    Redefinition {
        /// The redeclared name.
        name: String,
        /// Where the second declaration appears.
        mark: Mark,
    },
    /// A name was used that is not in scope.
    UndeclaredSymbol {
        /// The unknown name.
        name: String,
        /// Where it was used.
        mark: Mark,
    },
    /// A call target does not name anything callable.
    NotCallable {
        /// The name that was called.
        name: String,
        /// Where the call appears.
        mark: Mark,
    },
    /// An assignment targeted something that is not a variable.
    AssignmentToNonVariable {
        /// The target name.
        name: String,
        /// Where the assignment appears.
        mark: Mark,
    },
    /// A compound assignment targeted a variable of type `function`.
    CompoundAssignmentOnFunction {
        /// The target name.
        name: String,
        /// Where the assignment appears.
        mark: Mark,
    },
    /// A call supplied the wrong number of arguments.
    ArityMismatch {
        /// The callee name, or `None` for an inline lambda.
        name:     Option<String>,
        /// How many arguments the callee declares.
        expected: usize,
        /// How many arguments were supplied.
        found:    usize,
        /// Where the call appears.
        mark:     Mark,
    },
    /// A call argument has the wrong type.
    ArgumentTypeMismatch {
        /// The callee name, or `None` for an inline lambda.
        name:     Option<String>,
        /// The declared parameter type.
        expected: TypeName,
        /// The deduced argument type.
        found:    TypeName,
        /// Where the call appears.
        mark:     Mark,
    },
    /// A declaration or assignment value does not match the variable type.
    AssignedTypeMismatch {
        /// The variable name.
        name:  String,
        /// The deduced value type.
        found: TypeName,
        /// Where the declaration or assignment appears.
        mark:  Mark,
    },
    /// The callee of a chained call does not have type `function`.
    ResultNotCallable {
        /// The deduced callee type.
        found: TypeName,
        /// Where the call appears.
        mark:  Mark,
    },
    /// A non-void function or lambda has no return statement.
    MissingReturn {
        /// The function name, or `None` for a lambda.
        name: Option<String>,
        /// Where the declaration appears.
        mark: Mark,
    },
    /// A void function or lambda returns a value.
    UnexpectedReturn {
        /// The function name, or `None` for a lambda.
        name: Option<String>,
        /// Where the declaration appears.
        mark: Mark,
    },
    /// The type of the last return does not match the declared return type.
    ReturnTypeMismatch {
        /// The function name, or `None` for a lambda.
        name:     Option<String>,
        /// The declared return type.
        expected: TypeName,
        /// The deduced return type.
        found:    TypeName,
        /// Where the declaration appears.
        mark:     Mark,
    },
    /// An operator was applied to a value of an unsupported type.
    InvalidOperation {
        /// The offending operand type.
        type_name: TypeName,
        /// Where the operation appears.
        mark:      Mark,
    },
    /// No `main` function exists.
    MissingMain {
        /// The end-of-program position.
        mark: Mark,
    },
    /// `main` exists but does not name a function with return type `f32`.
    InvalidMain {
        /// The end-of-program position.
        mark: Mark,
    },
}

impl std::fmt::Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let owner = |name: &Option<String>| match name {
            Some(name) => format!("Function {name}"),
            None => "Lambda".to_string(),
        };

        match self {
            Self::Redefinition { name, mark } => {
                write!(f, "ERROR ({mark}): Redefinition of symbol {name}!")
            },
            Self::UndeclaredSymbol { name, mark } => {
                write!(f, "ERROR ({mark}): Usage of undeclared symbol {name}!")
            },
            Self::NotCallable { name, mark } => {
                write!(f, "ERROR ({mark}): Symbol {name} does not name a function!")
            },
            Self::AssignmentToNonVariable { name, mark } => {
                write!(f, "ERROR ({mark}): Assignment to a non-variable symbol {name}!")
            },
            Self::CompoundAssignmentOnFunction { name, mark } => {
                write!(f,
                       "ERROR ({mark}): Cannot perform arithmetic operation on function variable {name}!")
            },
            Self::ArityMismatch { name, expected, found, mark } => {
                write!(f,
                       "ERROR ({mark}): {} expected {expected}, but got {found} arguments!",
                       owner(name))
            },
            Self::ArgumentTypeMismatch { name, expected, found, mark } => {
                write!(f,
                       "ERROR ({mark}): {} expected argument of type {expected}, but got {found}!",
                       owner(name))
            },
            Self::AssignedTypeMismatch { name, found, mark } => {
                write!(f,
                       "ERROR ({mark}): Cannot assign value of type {found} to variable {name}!")
            },
            Self::ResultNotCallable { found, mark } => {
                write!(f, "ERROR ({mark}): Cannot call result of function returning {found}!")
            },
            Self::MissingReturn { name, mark } => {
                write!(f, "ERROR ({mark}): {} does not return any value!", owner(name))
            },
            Self::UnexpectedReturn { name, mark } => {
                write!(f, "ERROR ({mark}): Void {} does return!", owner(name).to_lowercase())
            },
            Self::ReturnTypeMismatch { name, expected, found, mark } => {
                write!(f,
                       "ERROR ({mark}): {} should return {expected}, but returns {found}!",
                       owner(name))
            },
            Self::InvalidOperation { type_name, mark } => {
                write!(f, "ERROR ({mark}): Invalid operation on value of type {type_name}!")
            },
            Self::MissingMain { mark } => {
                write!(f, "ERROR ({mark}): Main function was not found!")
            },
            Self::InvalidMain { mark } => {
                write!(f, "ERROR ({mark}): Main should be a function returning f32!")
            },
        }
    }
}

impl std::error::Error for SemanticError {}
