use std::rc::Rc;

pub mod pretty;

/// A source position attached to tokens and AST nodes for diagnostics.
///
/// Lines are 1-based, columns are 0-based. Every error message produced by
/// the lexer, the parser, the analyzer and the executor carries the mark of
/// the offending construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    /// The 1-based source line.
    pub line:   usize,
    /// The 0-based column within the line.
    pub column: usize,
}

impl Mark {
    /// Creates a mark at the given line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Mark {
    fn default() -> Self {
        Self { line: 1, column: 0 }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ln {}, Col {}", self.line, self.column)
    }
}

/// The closed set of static types in the language.
///
/// `f32`, `function` and `void` are the only spellable type names; `string`
/// exists internally for literals and concatenation but cannot be written in
/// a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    /// A double-precision number. The name is historical.
    F32,
    /// A first-class callable value.
    Function,
    /// The absence of a value; legal only as a return type.
    Void,
    /// Immutable text. Not spellable in source.
    String,
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::F32 => "f32",
            Self::Function => "function",
            Self::Void => "void",
            Self::String => "string",
        };
        write!(f, "{name}")
    }
}

/// Represents a unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Minus,
    /// Bitwise complement on the u32 projection (`~x`).
    BitwiseNot,
    /// Logical negation (`!x`); zero becomes one, anything else zero.
    LogicalNot,
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            Self::Minus => "-",
            Self::BitwiseNot => "~",
            Self::LogicalNot => "!",
        };
        write!(f, "{op}")
    }
}

/// Represents a binary operator.
///
/// Covers arithmetic, logical, bitwise and comparison operators. String
/// concatenation (`:` in source) is desugared by the parser into `Add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`), also string concatenation.
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// Division (`/`).
    Div,
    /// Remainder (`%`), IEEE `fmod`.
    Mod,
    /// Logical and (`&&`).
    LogicalAnd,
    /// Logical or (`||`).
    LogicalOr,
    /// Bitwise and (`&`).
    BitAnd,
    /// Bitwise or (`|`).
    BitOr,
    /// Bitwise xor (`^`).
    BitXor,
    /// Left shift (`<<`).
    ShiftLeft,
    /// Right shift (`>>`).
    ShiftRight,
    /// Equality (`==`).
    Eq,
    /// Inequality (`!=`).
    NotEq,
    /// Less than (`<`).
    Less,
    /// Less than or equal (`<=`).
    LessEq,
    /// Greater than (`>`).
    Greater,
    /// Greater than or equal (`>=`).
    GreaterEq,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
        };
        write!(f, "{op}")
    }
}

/// Represents an assignment operator, plain or compound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    /// Plain assignment (`=`).
    Assign,
    /// `+=`
    PlusEq,
    /// `-=`
    MinusEq,
    /// `*=`
    MulEq,
    /// `/=`
    DivEq,
    /// `&=`
    AndEq,
    /// `|=`
    OrEq,
    /// `^=`
    XorEq,
    /// `<<=`
    ShiftLeftEq,
    /// `>>=`
    ShiftRightEq,
}

impl AssignmentOperator {
    /// Returns the binary operator a compound assignment combines with, or
    /// `None` for plain `=`.
    #[must_use]
    pub const fn binary_operator(self) -> Option<BinaryOperator> {
        match self {
            Self::Assign => None,
            Self::PlusEq => Some(BinaryOperator::Add),
            Self::MinusEq => Some(BinaryOperator::Sub),
            Self::MulEq => Some(BinaryOperator::Mul),
            Self::DivEq => Some(BinaryOperator::Div),
            Self::AndEq => Some(BinaryOperator::BitAnd),
            Self::OrEq => Some(BinaryOperator::BitOr),
            Self::XorEq => Some(BinaryOperator::BitXor),
            Self::ShiftLeftEq => Some(BinaryOperator::ShiftLeft),
            Self::ShiftRightEq => Some(BinaryOperator::ShiftRight),
        }
    }
}

impl std::fmt::Display for AssignmentOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            Self::Assign => "=",
            Self::PlusEq => "+=",
            Self::MinusEq => "-=",
            Self::MulEq => "*=",
            Self::DivEq => "/=",
            Self::AndEq => "&=",
            Self::OrEq => "|=",
            Self::XorEq => "^=",
            Self::ShiftLeftEq => "<<=",
            Self::ShiftRightEq => ">>=",
        };
        write!(f, "{op}")
    }
}

/// A parameter list: name and declared type, in source order.
pub type Parameters = Vec<(String, TypeName)>;

/// A lambda expression: return type, parameters and a shared body block.
///
/// The body is reference-counted because closure values keep it alive after
/// evaluation has unwound the site of the lambda expression.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpr {
    /// The declared return type of the lambda.
    pub return_type: TypeName,
    /// The parameter list.
    pub params:      Parameters,
    /// The shared body block.
    pub body:        Rc<Block>,
    /// Source position of the `\` introducing the lambda.
    pub mark:        Mark,
}

/// An abstract syntax tree node representing an expression.
///
/// Each variant models one syntactic construct and carries the source mark
/// of the token that introduced it. Call arguments are reference-counted
/// because the evaluator binds parameters to the argument ASTs themselves;
/// parameters are lazy, exactly like variables.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal such as `12` or `0.5`.
    NumericLiteral {
        /// The literal value.
        value: f64,
        /// Source position.
        mark:  Mark,
    },
    /// A double-quoted string literal with escapes already resolved.
    StringLiteral {
        /// The literal text.
        value: String,
        /// Source position.
        mark:  Mark,
    },
    /// A reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Source position.
        mark: Mark,
    },
    /// A unary operation.
    Unary {
        /// The operator.
        op:   UnaryOperator,
        /// The operand.
        term: Box<Expr>,
        /// Source position.
        mark: Mark,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left:  Box<Expr>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Expr>,
        /// Source position.
        mark:  Mark,
    },
    /// A call of a named function, e.g. `factorial(4)`.
    FunctionCall {
        /// Name of the callee.
        name:      String,
        /// Argument expressions.
        arguments: Vec<Rc<Expr>>,
        /// Source position.
        mark:      Mark,
    },
    /// A call of the value produced by another call, e.g. `f(1)(2)`.
    FunctionResultCall {
        /// The expression producing the callable.
        callee:    Box<Expr>,
        /// Argument expressions.
        arguments: Vec<Rc<Expr>>,
        /// Source position.
        mark:      Mark,
    },
    /// A lambda expression evaluated to a function value.
    Lambda(LambdaExpr),
    /// An immediately invoked lambda, e.g. `(\(x: f32): f32 = { ... })(3)`.
    LambdaCall {
        /// The lambda being invoked.
        lambda:    LambdaExpr,
        /// Argument expressions.
        arguments: Vec<Rc<Expr>>,
        /// Source position.
        mark:      Mark,
    },
}

impl Expr {
    /// Gets the source mark from `self`.
    ///
    /// ## Example
    /// ```
    /// use lazuli::ast::{Expr, Mark};
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             mark: Mark::new(5, 2), };
    ///
    /// assert_eq!(expr.mark(), Mark::new(5, 2));
    /// ```
    #[must_use]
    pub const fn mark(&self) -> Mark {
        match self {
            Self::NumericLiteral { mark, .. }
            | Self::StringLiteral { mark, .. }
            | Self::Variable { mark, .. }
            | Self::Unary { mark, .. }
            | Self::Binary { mark, .. }
            | Self::FunctionCall { mark, .. }
            | Self::FunctionResultCall { mark, .. }
            | Self::Lambda(LambdaExpr { mark, .. })
            | Self::LambdaCall { mark, .. } => *mark,
        }
    }
}

/// A variable declaration: `let name: type = value;`.
///
/// The initializer is reference-counted so the runtime can store it in a
/// variable cell and re-evaluate it on every read without cloning the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    /// The declared name.
    pub name:     String,
    /// The declared type.
    pub var_type: TypeName,
    /// The shared initializer expression.
    pub value:    Rc<Expr>,
    /// Source position of the `let`.
    pub mark:     Mark,
}

/// A function declaration: `fn name(params): type { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The declared name.
    pub name:        String,
    /// The declared return type.
    pub return_type: TypeName,
    /// The parameter list.
    pub params:      Parameters,
    /// The shared body block.
    pub body:        Rc<Block>,
    /// Source position of the `fn`.
    pub mark:        Mark,
}

/// Represents a statement inside a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A variable declaration.
    VariableDeclaration(VariableDecl),
    /// An assignment, plain or compound.
    Assignment {
        /// The target variable.
        name:  String,
        /// The assignment operator.
        op:    AssignmentOperator,
        /// The shared right-hand side expression.
        value: Rc<Expr>,
        /// Source position.
        mark:  Mark,
    },
    /// A return statement: `ret value;`.
    Return {
        /// The returned expression.
        value: Box<Expr>,
        /// Source position.
        mark:  Mark,
    },
    /// A call used for its effect: `f(...);` or `(\...)(...);`.
    FunctionCall {
        /// The call expression.
        call: Box<Expr>,
        /// Source position.
        mark: Mark,
    },
}

/// An ordered sequence of statements delimited by braces.
///
/// Blocks are shared by reference between declarations and the closure
/// values that retain them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// The statements in source order.
    pub statements: Vec<Statement>,
}

/// A parsed program: top-level variable and function declarations in the
/// order they appeared in the source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level variable declarations.
    pub variables: Vec<VariableDecl>,
    /// Top-level function declarations.
    pub functions: Vec<FunctionDecl>,
}
