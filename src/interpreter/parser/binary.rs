use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, Mark, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for all tokens that are not binary operators. Assignment
/// operators and the string separator `:` are handled elsewhere and map to
/// `None` here.
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::DoubleAmpersand => Some(BinaryOperator::LogicalAnd),
        Token::DoublePipe => Some(BinaryOperator::LogicalOr),
        Token::Ampersand => Some(BinaryOperator::BitAnd),
        Token::Pipe => Some(BinaryOperator::BitOr),
        Token::Caret => Some(BinaryOperator::BitXor),
        Token::ShiftLeft => Some(BinaryOperator::ShiftLeft),
        Token::ShiftRight => Some(BinaryOperator::ShiftRight),
        Token::EqualEqual => Some(BinaryOperator::Eq),
        Token::BangEqual => Some(BinaryOperator::NotEq),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEq),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEq),
        _ => None,
    }
}

/// Determines whether an operator belongs to the comparison class.
#[must_use]
pub const fn is_comparison_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Eq
             | BinaryOperator::NotEq
             | BinaryOperator::Less
             | BinaryOperator::LessEq
             | BinaryOperator::Greater
             | BinaryOperator::GreaterEq)
}

/// Determines whether an operator belongs to the bitwise class.
#[must_use]
pub const fn is_bitwise_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::BitAnd
             | BinaryOperator::BitOr
             | BinaryOperator::BitXor
             | BinaryOperator::ShiftLeft
             | BinaryOperator::ShiftRight)
}

/// Parses a full logical expression, the lowest-precedence level.
///
/// Handles left-associative chains of `&&` and `||` over unary-logical
/// operands.
///
/// Grammar: `logical_expr := unary_logical { ("&&" | "||") unary_logical }`.
pub fn parse_logical_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let mut left = parse_unary_logical(tokens)?;

    loop {
        if let Some((token, mark)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::LogicalAnd | BinaryOperator::LogicalOr)
        {
            let mark = *mark;
            tokens.next();

            let right = parse_unary_logical(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  mark };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses an optionally negated comparison.
///
/// A leading `!` applies to the whole comparison that follows it: `!1 < 3`
/// parses as `!(1 < 3)`.
///
/// Grammar: `unary_logical := ["!"] comparison`.
pub fn parse_unary_logical<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    if let Some((Token::Bang, mark)) = tokens.peek() {
        let mark = *mark;
        tokens.next();

        let term = parse_comparison(tokens)?;
        return Ok(Expr::Unary { op: UnaryOperator::LogicalNot,
                                term: Box::new(term),
                                mark });
    }

    parse_comparison(tokens)
}

/// Parses relational and equality operators.
///
/// Grammar: `comparison := arith_expr { cmp_op arith_expr }` with
/// `cmp_op ∈ { == != < <= > >= }`.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let mut left = parse_arithmetic(tokens)?;

    while let Some((token, mark)) = tokens.peek() {
        let op = match token_to_binary_operator(token) {
            Some(op) if is_comparison_op(op) => op,
            _ => break,
        };
        let mark = *mark;
        tokens.next();

        let right = parse_arithmetic(tokens)?;
        left = Expr::Binary { left: Box::new(left),
                              op,
                              right: Box::new(right),
                              mark };
    }

    Ok(left)
}

/// Parses bitwise operators over additive operands.
///
/// Grammar: `arith_expr := add_expr { bit_op add_expr }` with
/// `bit_op ∈ { & | ^ << >> }`.
pub fn parse_arithmetic<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let mut left = parse_additive(tokens)?;

    while let Some((token, mark)) = tokens.peek() {
        let op = match token_to_binary_operator(token) {
            Some(op) if is_bitwise_op(op) => op,
            _ => break,
        };
        let mark = *mark;
        tokens.next();

        let right = parse_additive(tokens)?;
        left = Expr::Binary { left: Box::new(left),
                              op,
                              right: Box::new(right),
                              mark };
    }

    Ok(left)
}

/// Parses addition-level expressions.
///
/// Handles left-associative `+`, `-` and `%` over factors.
///
/// Grammar: `add_expr := factor { ("+" | "-" | "%") factor }`.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let mut left = parse_factor(tokens)?;
    loop {
        if let Some((token, mark)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mod)
        {
            let mark = *mark;
            tokens.next();

            let right = parse_factor(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  mark };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative `*` and `/` over unary operands.
///
/// Grammar: `factor := unary { ("*" | "/") unary }`.
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Mark)> + Clone
{
    let mut left = parse_unary(tokens)?;
    loop {
        if let Some((token, mark)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            let mark = *mark;
            tokens.next();

            let right = parse_unary(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  mark };
            continue;
        }
        break;
    }
    Ok(left)
}
