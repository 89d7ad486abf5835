use crate::{
    ast::{BinaryOperator, Mark, TypeName, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Executor},
        value::Value,
    },
};

/// Projects a number onto the unsigned 32-bit integers.
///
/// Rust's float-to-integer cast saturates, so negative inputs clamp to `0`
/// and overflowing inputs clamp to `u32::MAX`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_u32(value: f64) -> u32 {
    value as u32
}

/// Lifts a comparison or logical result back into the numeric domain.
const fn truth(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

#[allow(clippy::cast_possible_truncation)]
impl Executor {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Minus`: numeric negation.
    /// - `BitwiseNot`: complement of the u32 projection, lifted back to a
    ///   number.
    /// - `LogicalNot`: zero becomes one, anything else becomes zero.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `mark`: Source position for error reporting.
    ///
    /// # Errors
    /// Returns `RuntimeError::InvalidOperation` for strings and functions.
    ///
    /// # Example
    /// ```
    /// use lazuli::{
    ///     ast::{Mark, UnaryOperator},
    ///     interpreter::{evaluator::core::Executor, value::Value},
    /// };
    ///
    /// let v = Executor::eval_unary_op(UnaryOperator::BitwiseNot,
    ///                                 &Value::Number(2.0),
    ///                                 Mark::default()).unwrap();
    /// assert_eq!(v, Value::Number(4294967293.0));
    /// ```
    pub fn eval_unary_op(op: UnaryOperator, value: &Value, mark: Mark) -> EvalResult<Value> {
        let Value::Number(term) = value else {
            return Err(RuntimeError::InvalidOperation { type_name: value.type_name(),
                                                        mark });
        };

        let result = match op {
            UnaryOperator::Minus => -term,
            UnaryOperator::BitwiseNot => f64::from(!as_u32(*term)),
            UnaryOperator::LogicalNot => {
                if *term == 0.0 {
                    1.0
                } else {
                    0.0
                }
            },
        };

        Ok(Value::Number(result))
    }

    /// Evaluates a binary operation on two values.
    ///
    /// `Add` concatenates when the left operand is a string; a numeric
    /// right operand is formatted with six fractional digits first. A
    /// number on the left of a string is rejected. Every other operator
    /// requires two numbers. Bitwise operators work on the u32 projections
    /// of their operands and lift the result back to a number; shift
    /// counts are taken modulo 32. Comparisons and logical operators
    /// produce `1` or `0`. Division and `Mod` follow IEEE semantics, so
    /// dividing by zero produces an infinity or a NaN rather than an
    /// error.
    ///
    /// # Parameters
    /// - `op`: The binary operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `mark`: Source position for error reporting.
    ///
    /// # Errors
    /// Returns `RuntimeError::InvalidOperation` when an operand type does
    /// not fit the operator.
    ///
    /// # Example
    /// ```
    /// use lazuli::{
    ///     ast::{BinaryOperator, Mark},
    ///     interpreter::{evaluator::core::Executor, value::Value},
    /// };
    ///
    /// let v = Executor::eval_binary_op(BinaryOperator::Add,
    ///                                  &Value::Str("x = ".to_string()),
    ///                                  &Value::Number(1.0),
    ///                                  Mark::default()).unwrap();
    /// assert_eq!(v, Value::Str("x = 1.000000".to_string()));
    /// ```
    pub fn eval_binary_op(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          mark: Mark)
                          -> EvalResult<Value> {
        if let Value::Str(text) = left {
            if op != BinaryOperator::Add {
                return Err(RuntimeError::InvalidOperation { type_name: TypeName::String,
                                                            mark });
            }
            return match right {
                Value::Str(other) => Ok(Value::Str(format!("{text}{other}"))),
                Value::Number(n) => Ok(Value::Str(format!("{text}{n:.6}"))),
                Value::Func(_) => Err(RuntimeError::InvalidOperation { type_name:
                                                                           TypeName::Function,
                                                                       mark }),
            };
        }

        let left = left.as_number(mark)
                       .map_err(|_| RuntimeError::InvalidOperation { type_name:
                                                                         left.type_name(),
                                                                     mark })?;
        let right = right.as_number(mark)
                         .map_err(|_| RuntimeError::InvalidOperation { type_name:
                                                                           right.type_name(),
                                                                       mark })?;

        let result = match op {
            BinaryOperator::Add => left + right,
            BinaryOperator::Sub => left - right,
            BinaryOperator::Mul => left * right,
            BinaryOperator::Div => left / right,
            BinaryOperator::Mod => left % right,
            BinaryOperator::LogicalAnd => truth(left != 0.0 && right != 0.0),
            BinaryOperator::LogicalOr => truth(left != 0.0 || right != 0.0),
            BinaryOperator::BitAnd => f64::from(as_u32(left) & as_u32(right)),
            BinaryOperator::BitOr => f64::from(as_u32(left) | as_u32(right)),
            BinaryOperator::BitXor => f64::from(as_u32(left) ^ as_u32(right)),
            BinaryOperator::ShiftLeft => f64::from(as_u32(left).wrapping_shl(as_u32(right))),
            BinaryOperator::ShiftRight => f64::from(as_u32(left).wrapping_shr(as_u32(right))),
            BinaryOperator::Eq => truth(left == right),
            BinaryOperator::NotEq => truth(left != right),
            BinaryOperator::Less => truth(left < right),
            BinaryOperator::LessEq => truth(left <= right),
            BinaryOperator::Greater => truth(left > right),
            BinaryOperator::GreaterEq => truth(left >= right),
        };

        Ok(Value::Number(result))
    }
}
