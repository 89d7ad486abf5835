/// Precedence ladder for binary expressions.
pub mod binary;
/// Brace-delimited statement blocks.
pub mod block;
/// Parser entry points.
pub mod core;
/// Statement parsing and dispatch.
pub mod statement;
/// Unary expressions, terms, calls and lambdas.
pub mod unary;
/// Shared token-level helpers.
pub mod utils;
