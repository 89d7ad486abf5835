/// Errors raised while lexing or parsing source text.
pub mod parse_error;
/// Errors raised while executing a validated program.
pub mod runtime_error;
/// Errors raised while validating a parsed program.
pub mod semantic_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;
