//! # lazuli
//!
//! lazuli is a tree-walking interpreter for a small, statically typed
//! scripting language with first-class functions. Variables are lazy: a
//! declaration stores its initializer expression and a snapshot of the
//! environment, and every read re-evaluates the expression against that
//! snapshot. Closures capture their environment by deep copy at the moment
//! the lambda value is created.
//!
//! Source text is tokenized, parsed into an abstract syntax tree,
//! semantically validated (name resolution, arity and type checks,
//! return-path analysis) and then executed. A program prints to an
//! in-memory standard-out buffer and yields the exit code its `main`
//! function returns.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::{ParseError, RuntimeError},
    interpreter::{
        analyzer::semantic::SemanticAnalyser,
        evaluator::core::Executor,
        lexer::tokenize,
        parser::core::{parse_expression, parse_program},
        value::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the expression and statement enums that represent
/// the syntactic structure of source code as a tree, the operator and type
/// enumerations, and the source [`ast::Mark`] attached to every node for
/// error reporting. The `pretty` submodule renders a tree back to
/// parseable source text.
pub mod ast;
/// Provides unified error types for every phase.
///
/// This module defines all errors that can be raised while lexing,
/// parsing, validating or executing code. Each error carries the source
/// mark of the offending construct and renders as
/// `ERROR (Ln L, Col C): <message>`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together the lexer, the parser, the semantic analyzer
/// and the evaluator. Each phase is fatal on its first error; there is no
/// recovery or continuation.
pub mod interpreter;

/// The observable outcome of running a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Everything the program printed, in order.
    pub standard_out: String,
    /// The integer truncation of the value `main` returned.
    pub exit_code:    i32,
}

/// Tokenizes and parses a complete program.
///
/// # Errors
/// Returns a positioned [`ParseError`] if the source does not lex or does
/// not match the grammar.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    parse_program(&mut tokens.iter().peekable())
}

/// Parses, validates and executes a complete program.
///
/// # Errors
/// Returns the first error of whichever phase fails: lexing, parsing,
/// semantic analysis or execution.
///
/// # Examples
/// ```
/// use lazuli::run;
///
/// let execution = run("fn main(): f32 { print(\"test!\"); ret 12; }").unwrap();
/// assert_eq!(execution.standard_out, "test!\n");
/// assert_eq!(execution.exit_code, 12);
///
/// // The analyzer rejects programs without a main function.
/// assert!(run("fn test(): void { print(\"test\"); }").is_err());
/// ```
pub fn run(source: &str) -> Result<Execution, Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    let program = parse_program(&mut tokens.iter().peekable())?;

    SemanticAnalyser::new().analyse(&program)?;

    let mut executor = Executor::new();
    executor.run(&program)?;

    Ok(Execution { standard_out: executor.standard_out().to_string(),
                   exit_code:    executor.exit_code(), })
}

/// Evaluates a standalone logical expression against an empty environment.
///
/// This is the evaluator's expression entry point; it skips semantic
/// analysis, so the expression may only use literals and operators.
///
/// # Errors
/// Returns an error if the expression does not parse, leaves trailing
/// tokens, or fails to evaluate.
///
/// # Examples
/// ```
/// use lazuli::{eval_expression, interpreter::value::Value};
///
/// let value = eval_expression("(-2 + 5) * 2 + (4 >> 1)").unwrap();
/// assert_eq!(value, Value::Number(8.0));
/// ```
pub fn eval_expression(source: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter)?;

    if let Some((token, mark)) = iter.peek() {
        return Err(Box::new(ParseError::UnexpectedTrailingTokens { token: format!("{token:?}"),
                                                                   mark:  *mark, }));
    }

    let mut executor = Executor::new();
    let value = executor.eval_expr(&expr)?
                        .ok_or(RuntimeError::MissingValue { mark: expr.mark() })?;

    Ok(value)
}
