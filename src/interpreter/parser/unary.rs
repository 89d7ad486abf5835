use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, LambdaExpr, Mark, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_logical_expression,
            block::parse_block,
            core::ParseResult,
            utils::{expect, parse_call_arguments, parse_identifier, parse_parameter_list,
                    parse_type},
        },
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators `-` (numeric negation) and `~` (bitwise
/// complement). Unary operators do not stack: `--4` is rejected because the
/// operand of a unary operator must be a plain term.
///
/// Grammar: `unary := ["-" | "~"] term`.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => Some(UnaryOperator::Minus),
        Some((Token::Tilde, _)) => Some(UnaryOperator::BitwiseNot),
        _ => None,
    };

    if let Some(op) = op {
        let (_, mark) = tokens.next().unwrap();
        let term = parse_term(tokens)?;
        return Ok(Expr::Unary { op,
                                term: Box::new(term),
                                mark: *mark });
    }

    parse_term(tokens)
}

/// Parses a term, the atomic level of the expression grammar.
///
/// A term is one of:
/// - a numeric literal,
/// - an identifier, optionally called and then chained (`f(a)(b)`),
/// - a `print` or `if` call,
/// - a parenthesized logical expression,
/// - an immediately invoked lambda `(\...)(args)`.
///
/// Grammar:
/// ```text
///     term := NUMBER
///           | IDENT ["(" call_args ")"] { "(" call_args ")" }
///           | "(" (lambda_call_tail | logical_expr ")")
/// ```
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { mark: Mark::default() })?;

    match peeked {
        (Token::Number(value), mark) => {
            let node = Expr::NumericLiteral { value: *value,
                                              mark:  *mark, };
            tokens.next();
            Ok(node)
        },
        (Token::Identifier(_) | Token::Print | Token::If, _) => {
            parse_identifier_or_function(tokens)
        },
        (Token::LParen, _) => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            if let Some((Token::Backslash, _)) = lookahead.peek() {
                return parse_lambda_call(tokens);
            }

            let (_, mark) = tokens.next().unwrap();
            let expr = parse_logical_expression(tokens)?;
            match tokens.next() {
                Some((Token::RParen, _)) => Ok(expr),
                Some((token, mark)) => {
                    Err(ParseError::UnexpectedToken { token: format!("Expected ')', found {token:?}"),
                                                      mark:  *mark, })
                },
                None => Err(ParseError::UnexpectedEndOfInput { mark: *mark }),
            }
        },
        (token, mark) => Err(ParseError::UnexpectedToken { token: format!("Unexpected token for term: {token:?}"),
                                                           mark:  *mark, }),
    }
}

/// Parses an identifier, a function call, or a chained call.
///
/// If the identifier is followed by `(`, a call is parsed; every further
/// `(` chains a call of the previous call's result. The builtin names
/// `print` and `if` are keywords but valid in callee position.
fn parse_identifier_or_function<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let (name, mark) = parse_callee_name(tokens)?;

    match tokens.peek() {
        Some((Token::LParen, _)) => {
            tokens.next();
            let arguments = parse_call_arguments(tokens)?;
            let node = Expr::FunctionCall { name, arguments, mark };
            parse_call_chain(tokens, node)
        },
        _ => Ok(Expr::Variable { name, mark }),
    }
}

/// Parses a function call expression: a callee name followed by at least
/// one argument list, with further argument lists chaining into
/// [`Expr::FunctionResultCall`] nodes.
///
/// Grammar: `function_call := IDENT "(" call_args ")" { "(" call_args ")" }`.
///
/// # Errors
/// Returns a `ParseError` if the callee name or any argument list is
/// malformed.
pub fn parse_function_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let (name, mark) = parse_callee_name(tokens)?;

    expect(tokens, &Token::LParen, "Expected '(' after function name")?;
    let arguments = parse_call_arguments(tokens)?;
    let node = Expr::FunctionCall { name, arguments, mark };

    parse_call_chain(tokens, node)
}

/// Consumes a callee name: an identifier or one of the builtin keywords
/// `print` and `if`.
fn parse_callee_name<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(String, Mark)>
    where I: Iterator<Item = &'a (Token, Mark)>
{
    match tokens.peek() {
        Some((Token::Print, mark)) => {
            let result = ("print".to_string(), *mark);
            tokens.next();
            Ok(result)
        },
        Some((Token::If, mark)) => {
            let result = ("if".to_string(), *mark);
            tokens.next();
            Ok(result)
        },
        _ => parse_identifier(tokens),
    }
}

/// Folds any further `(args)` lists into left-associated
/// [`Expr::FunctionResultCall`] nodes: `f(a)(b)(c)` becomes
/// `FunctionResultCall(FunctionResultCall(FunctionCall(f, a), b), c)`.
fn parse_call_chain<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    while let Some((Token::LParen, mark)) = tokens.peek() {
        let mark = *mark;
        tokens.next();

        let arguments = parse_call_arguments(tokens)?;
        node = Expr::FunctionResultCall { callee: Box::new(node),
                                          arguments,
                                          mark };
    }

    Ok(node)
}

/// Parses a lambda expression.
///
/// Grammar: `lambda := "\" "(" [param_list] ")" ":" type "=" block`.
///
/// The body block is wrapped in an `Rc` so closure values can retain it
/// after the declaration site has been evaluated.
///
/// # Errors
/// Returns a `ParseError` if any piece of the lambda syntax is missing or
/// malformed.
pub fn parse_lambda<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<LambdaExpr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let mark = expect(tokens, &Token::Backslash, "Expected '\\' to start a lambda")?;
    expect(tokens, &Token::LParen, "Expected '(' after '\\'")?;
    let params = parse_parameter_list(tokens)?;
    expect(tokens, &Token::Colon, "Expected ':' after lambda parameters")?;
    let return_type = parse_type(tokens)?;
    expect(tokens, &Token::Equals, "Expected '=' before lambda body")?;
    let body = Rc::new(parse_block(tokens)?);

    Ok(LambdaExpr { return_type,
                    params,
                    body,
                    mark })
}

/// Parses an immediately invoked lambda.
///
/// Grammar:
/// `lambda_call := "(" lambda ")" "(" call_args ")" { "(" call_args ")" }`.
///
/// # Errors
/// Returns a `ParseError` if the parenthesized lambda or any argument list
/// is malformed.
pub fn parse_lambda_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let mark = expect(tokens, &Token::LParen, "Expected '(' before lambda")?;
    let lambda = parse_lambda(tokens)?;
    expect(tokens, &Token::RParen, "Expected ')' after lambda")?;

    expect(tokens, &Token::LParen, "Expected '(' to call the lambda")?;
    let arguments = parse_call_arguments(tokens)?;
    let node = Expr::LambdaCall { lambda, arguments, mark };

    parse_call_chain(tokens, node)
}
