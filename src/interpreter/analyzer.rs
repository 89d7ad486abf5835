/// Semantic validation of a parsed program.
pub mod semantic;
/// The analysis-time symbol table.
pub mod symbol;
/// Static type deduction for expressions.
pub mod type_check;
