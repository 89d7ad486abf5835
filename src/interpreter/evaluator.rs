/// Call dispatch: builtins, named functions, function values and lambdas.
pub mod call;
/// The executor: tree walking, return stack, standard-out and exit code.
pub mod core;
/// The runtime environment of lazy variable cells and function bindings.
pub mod env;
/// Unary and binary operator evaluation.
pub mod ops;
