use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{BinaryOperator, Expr, Mark, Parameters, TypeName},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::{parse_arithmetic, parse_logical_expression},
            core::ParseResult,
            unary::parse_lambda,
        },
    },
};

/// Consumes the next token and requires it to equal `expected`.
///
/// Returns the mark of the consumed token so callers can stamp the node
/// they are building.
///
/// # Errors
/// Returns a `ParseError` carrying `message` if the next token differs or
/// the input ends.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    message: &str)
                                                    -> ParseResult<Mark>
    where I: Iterator<Item = &'a (Token, Mark)>
{
    match tokens.next() {
        Some((token, mark)) if token == expected => Ok(*mark),
        Some((token, mark)) => {
            Err(ParseError::UnexpectedToken { token: format!("{message}, found {token:?}"),
                                              mark:  *mark, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { mark: Mark::default() }),
    }
}

/// Parses a plain identifier and returns its name and mark.
///
/// Keywords are distinct token kinds, so reserved words fail here without a
/// dedicated check.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, Mark)>
    where I: Iterator<Item = &'a (Token, Mark)>
{
    match tokens.next() {
        Some((Token::Identifier(name), mark)) => Ok((name.clone(), *mark)),
        Some((token, mark)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected identifier, found {token:?}"),
                                              mark:  *mark, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { mark: Mark::default() }),
    }
}

/// Parses a spellable type name: `f32`, `function` or `void`.
///
/// # Errors
/// Returns a `ParseError` if the next token is not a type keyword.
pub(in crate::interpreter::parser) fn parse_type<'a, I>(tokens: &mut Peekable<I>)
                                                        -> ParseResult<TypeName>
    where I: Iterator<Item = &'a (Token, Mark)>
{
    match tokens.next() {
        Some((Token::F32, _)) => Ok(TypeName::F32),
        Some((Token::Function, _)) => Ok(TypeName::Function),
        Some((Token::Void, _)) => Ok(TypeName::Void),
        Some((token, mark)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected type name, found {token:?}"),
                                              mark:  *mark, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { mark: Mark::default() }),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// Shared by parameter lists and call argument lists. The closing token is
/// consumed. An immediately encountered closing token produces an empty
/// list; a trailing comma is an error.
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token is
/// encountered, or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let mut items = Vec::new();
    if let Some((token, _)) = tokens.peek()
       && token == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((token, _)) if token == closing => {
                tokens.next();
                break;
            },
            Some((token, mark)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ',' or {closing:?}, found {token:?}"),
                                                         mark:  *mark, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { mark: Mark::default() }),
        }
    }
    Ok(items)
}

/// Parses a parameter list after the opening `(`, consuming the closing `)`.
///
/// Grammar: `param_list := [ IDENT ":" type { "," IDENT ":" type } ] ")"`.
pub(in crate::interpreter::parser) fn parse_parameter_list<'a, I>(tokens: &mut Peekable<I>)
                                                                  -> ParseResult<Parameters>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    parse_comma_separated(tokens,
                          |tokens| {
                              let (name, _) = parse_identifier(tokens)?;
                              expect(tokens, &Token::Colon, "Expected ':' after parameter name")?;
                              let type_name = parse_type(tokens)?;
                              Ok((name, type_name))
                          },
                          &Token::RParen)
}

/// Parses a call argument list after the opening `(`, consuming the closing
/// `)`.
pub(in crate::interpreter::parser) fn parse_call_arguments<'a, I>(tokens: &mut Peekable<I>)
                                                                  -> ParseResult<Vec<Rc<Expr>>>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    parse_comma_separated(tokens,
                          |tokens| parse_call_argument(tokens).map(Rc::new),
                          &Token::RParen)
}

/// Parses a single call argument.
///
/// An argument starting with a string literal is a string expression, an
/// argument starting with `\` is a lambda, anything else is a full logical
/// expression.
///
/// Grammar: `call_arg := string_expr | lambda | logical_expr`.
fn parse_call_argument<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    match tokens.peek() {
        Some((Token::Str(_), _)) => parse_string_expression(tokens),
        Some((Token::Backslash, _)) => Ok(Expr::Lambda(parse_lambda(tokens)?)),
        _ => parse_logical_expression(tokens),
    }
}

/// Parses a string expression: a string literal optionally followed by `:`
/// separated pieces.
///
/// The separator concatenates; each piece is either another string literal
/// or an arithmetic expression whose value is formatted into the string at
/// evaluation time. The chain is desugared into left-associated
/// [`BinaryOperator::Add`] nodes. `:` has no meaning anywhere else in the
/// expression grammar.
///
/// Grammar: `string_expr := STRING { ":" (STRING | arith_expr) }`.
///
/// # Errors
/// Returns a `ParseError` if the expression does not start with a string
/// literal or a piece after `:` fails to parse.
pub fn parse_string_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let mut node = match tokens.next() {
        Some((Token::Str(value), mark)) => Expr::StringLiteral { value: value.clone(),
                                                                 mark:  *mark, },
        Some((token, mark)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected string literal, found {token:?}"),
                                                     mark:  *mark, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { mark: Mark::default() }),
    };

    while let Some((Token::Colon, mark)) = tokens.peek() {
        let mark = *mark;
        tokens.next();

        let piece = if let Some((Token::Str(value), piece_mark)) = tokens.peek() {
            let piece = Expr::StringLiteral { value: value.clone(),
                                              mark:  *piece_mark, };
            tokens.next();
            piece
        } else {
            parse_arithmetic(tokens)?
        };

        node = Expr::Binary { left: Box::new(node),
                              op: BinaryOperator::Add,
                              right: Box::new(piece),
                              mark };
    }

    Ok(node)
}
