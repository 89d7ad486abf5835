use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{AssignmentOperator, Expr, FunctionDecl, Mark, Statement, VariableDecl},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::{parse_arithmetic, parse_logical_expression},
            block::parse_block,
            core::ParseResult,
            unary::{parse_function_call, parse_lambda, parse_lambda_call},
            utils::{expect, parse_identifier, parse_parameter_list, parse_type},
        },
    },
};

/// Parses a single statement inside a block.
///
/// A statement is one of:
/// - a return statement,
/// - a variable declaration,
/// - an assignment,
/// - a function call used for its effect,
/// - an immediately invoked lambda used for its effect.
///
/// The leading token decides the production; an identifier needs one token
/// of lookahead to tell an assignment from a call.
///
/// # Errors
/// Returns a `ParseError` if no statement production matches or the matched
/// production is malformed.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { mark: Mark::default() })?;

    match peeked {
        (Token::Ret, _) => parse_return_statement(tokens),
        (Token::Let, _) => Ok(Statement::VariableDeclaration(parse_variable_declaration(tokens)?)),
        (Token::Print | Token::If, _) => parse_function_call_statement(tokens),
        (Token::LParen, _) => parse_lambda_call_statement(tokens),
        (Token::Identifier(_), _) => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            match lookahead.peek() {
                Some((token, _)) if token_to_assignment_operator(token).is_some() => {
                    parse_assignment(tokens)
                },
                Some((Token::LParen, _)) => parse_function_call_statement(tokens),
                Some((token, mark)) => {
                    Err(ParseError::UnexpectedToken { token: format!("Expected assignment or call, found {token:?}"),
                                                      mark:  *mark, })
                },
                None => Err(ParseError::UnexpectedEndOfInput { mark: Mark::default() }),
            }
        },
        (token, mark) => Err(ParseError::UnexpectedToken { token: format!("Expected statement, found {token:?}"),
                                                           mark:  *mark, }),
    }
}

/// Maps a token to its corresponding assignment operator.
///
/// Returns `None` for all tokens that are not assignment operators.
#[must_use]
pub const fn token_to_assignment_operator(token: &Token) -> Option<AssignmentOperator> {
    match token {
        Token::Equals => Some(AssignmentOperator::Assign),
        Token::PlusAssign => Some(AssignmentOperator::PlusEq),
        Token::MinusAssign => Some(AssignmentOperator::MinusEq),
        Token::MulAssign => Some(AssignmentOperator::MulEq),
        Token::DivAssign => Some(AssignmentOperator::DivEq),
        Token::AndAssign => Some(AssignmentOperator::AndEq),
        Token::OrAssign => Some(AssignmentOperator::OrEq),
        Token::XorAssign => Some(AssignmentOperator::XorEq),
        Token::ShiftLeftAssign => Some(AssignmentOperator::ShiftLeftEq),
        Token::ShiftRightAssign => Some(AssignmentOperator::ShiftRightEq),
        _ => None,
    }
}

/// Parses a variable declaration.
///
/// Grammar: `variable_decl := "let" IDENT ":" type "=" (lambda |
/// logical_expr) ";"`.
///
/// # Errors
/// Returns a `ParseError` if the name, type annotation, initializer or the
/// terminating `;` is missing or malformed.
pub fn parse_variable_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<VariableDecl>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let mark = expect(tokens, &Token::Let, "Expected 'let'")?;
    let (name, _) = parse_identifier(tokens)?;
    expect(tokens, &Token::Colon, "Expected ':' after variable name")?;
    let var_type = parse_type(tokens)?;
    expect(tokens, &Token::Equals, "Expected '=' after variable type")?;

    let value = if let Some((Token::Backslash, _)) = tokens.peek() {
        Expr::Lambda(parse_lambda(tokens)?)
    } else {
        parse_logical_expression(tokens)?
    };
    expect(tokens, &Token::Semicolon, "Expected ';' after declaration")?;

    Ok(VariableDecl { name,
                      var_type,
                      value: Rc::new(value),
                      mark })
}

/// Parses an assignment statement, plain or compound.
///
/// Grammar: `assignment := IDENT assign_op (lambda | arith_expr) ";"`.
///
/// # Errors
/// Returns a `ParseError` if the operator is not an assignment operator or
/// the right-hand side fails to parse.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let (name, mark) = parse_identifier(tokens)?;

    let op = match tokens.next() {
        Some((token, mark)) => match token_to_assignment_operator(token) {
            Some(op) => op,
            None => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected assignment operator, found {token:?}"),
                                                         mark:  *mark, });
            },
        },
        None => return Err(ParseError::UnexpectedEndOfInput { mark }),
    };

    let value = if let Some((Token::Backslash, _)) = tokens.peek() {
        Expr::Lambda(parse_lambda(tokens)?)
    } else {
        parse_arithmetic(tokens)?
    };
    expect(tokens, &Token::Semicolon, "Expected ';' after assignment")?;

    Ok(Statement::Assignment { name,
                               op,
                               value: Rc::new(value),
                               mark })
}

/// Parses a return statement.
///
/// Grammar: `return_stmt := "ret" (lambda | arith_expr) ";"`.
///
/// # Errors
/// Returns a `ParseError` if the value or the terminating `;` is missing.
pub fn parse_return_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let mark = expect(tokens, &Token::Ret, "Expected 'ret'")?;

    let value = if let Some((Token::Backslash, _)) = tokens.peek() {
        Expr::Lambda(parse_lambda(tokens)?)
    } else {
        parse_arithmetic(tokens)?
    };
    expect(tokens, &Token::Semicolon, "Expected ';' after return value")?;

    Ok(Statement::Return { value: Box::new(value),
                           mark })
}

/// Parses a function call used as a statement.
///
/// Grammar: `call_stmt := function_call ";"`.
pub fn parse_function_call_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let call = parse_function_call(tokens)?;
    let mark = call.mark();
    expect(tokens, &Token::Semicolon, "Expected ';' after call")?;

    Ok(Statement::FunctionCall { call: Box::new(call),
                                 mark })
}

/// Parses an immediately invoked lambda used as a statement.
///
/// Grammar: `lambda_call_stmt := lambda_call ";"`.
pub fn parse_lambda_call_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let call = parse_lambda_call(tokens)?;
    let mark = call.mark();
    expect(tokens, &Token::Semicolon, "Expected ';' after call")?;

    Ok(Statement::FunctionCall { call: Box::new(call),
                                 mark })
}

/// Parses a function declaration.
///
/// Grammar: `function_decl := "fn" IDENT "(" [param_list] ")" ":" type
/// block`.
///
/// # Errors
/// Returns a `ParseError` if the name, parameter list, return type or body
/// is missing or malformed.
pub fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<FunctionDecl>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let mark = expect(tokens, &Token::Fn, "Expected 'fn'")?;
    let (name, _) = parse_identifier(tokens)?;
    expect(tokens, &Token::LParen, "Expected '(' after function name")?;
    let params = parse_parameter_list(tokens)?;
    expect(tokens, &Token::Colon, "Expected ':' after parameter list")?;
    let return_type = parse_type(tokens)?;
    let body = Rc::new(parse_block(tokens)?);

    Ok(FunctionDecl { name,
                      return_type,
                      params,
                      body,
                      mark })
}
