use std::iter::Peekable;

use crate::{
    ast::{Block, Mark},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, statement::parse_statement, utils::expect},
    },
};

/// Parses a block of statements delimited by braces.
///
/// Parsing continues until the matching `}`; an empty block is valid.
///
/// Grammar: `block := "{" { stmt } "}"`.
///
/// # Errors
/// Returns a `ParseError` if the opening brace is missing, a statement is
/// malformed, or the input ends before the closing brace.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Block>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let mark = expect(tokens, &Token::LBrace, "Expected '{'")?;

    let mut statements = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some(_) => statements.push(parse_statement(tokens)?),
            None => return Err(ParseError::UnexpectedEndOfInput { mark }),
        }
    }

    Ok(Block { statements })
}
