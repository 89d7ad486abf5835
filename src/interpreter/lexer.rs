use logos::Logos;

use crate::{ast::Mark, error::ParseError};

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language; anything else is
/// a lex error.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexingError)]
pub enum Token {
    /// `f32`
    #[token("f32")]
    F32,
    /// `if`
    #[token("if")]
    If,
    /// `print`
    #[token("print")]
    Print,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `let`
    #[token("let")]
    Let,
    /// `ret`
    #[token("ret")]
    Ret,
    /// `void`
    #[token("void")]
    Void,
    /// `function`
    #[token("function")]
    Function,
    /// Numeric literal tokens such as `42`, `0.31` or `14.5`.
    ///
    /// A redundant leading zero is rejected: `01` and `00.5` are malformed,
    /// while `0` and `0.34` are fine.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(f64),
    /// Double-quoted string literal tokens with escapes resolved.
    ///
    /// The second pattern catches strings that run into a newline or the end
    /// of input before their closing quote.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, parse_string)]
    #[regex(r#""([^"\\\n]|\\[^\n])*"#, unterminated_string)]
    Str(String),
    /// Identifier tokens; variable or function names such as `x` or `main`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-`
    #[token("-")]
    Minus,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*`
    #[token("*")]
    Star,
    /// `*=`
    #[token("*=")]
    MulAssign,
    /// `/`
    #[token("/")]
    Slash,
    /// `/=`
    #[token("/=")]
    DivAssign,
    /// `%`
    #[token("%")]
    Percent,
    /// `~`
    #[token("~")]
    Tilde,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `^`
    #[token("^")]
    Caret,
    /// `^=`
    #[token("^=")]
    XorAssign,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `&=`
    #[token("&=")]
    AndAssign,
    /// `|`
    #[token("|")]
    Pipe,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `|=`
    #[token("|=")]
    OrAssign,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `<<=`
    #[token("<<=")]
    ShiftLeftAssign,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `>>=`
    #[token(">>=")]
    ShiftRightAssign,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `\`
    #[token("\\")]
    Backslash,

    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// Newlines advance the current mark and are otherwise skipped.
    #[token("\n", |lex| {
        lex.extras.line      += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\v\f\r]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset of the current line's
/// first character, so every token can be stamped with a [`Mark`].
pub struct LexerExtras {
    /// The current 1-based line number.
    pub line:       usize,
    /// Byte offset at which the current line starts.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1, line_start: 0 }
    }
}

/// The reasons a slice of source text can fail to lex.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LexingError {
    /// No token starts with the character at the current position.
    #[default]
    UnexpectedCharacter,
    /// A numeric literal carried a redundant leading zero.
    MalformedNumber,
    /// A string literal was not closed before a newline or end of input.
    UnterminatedString,
    /// A string literal used an escape outside the supported set.
    InvalidEscape,
}

impl LexingError {
    /// Converts the lexing failure into a positioned [`ParseError`].
    fn into_parse_error(self, slice: &str, mark: Mark) -> ParseError {
        match self {
            Self::UnexpectedCharacter => ParseError::UnexpectedCharacter { slice: slice.to_string(),
                                                                           mark },
            Self::MalformedNumber => ParseError::MalformedNumber { mark },
            Self::UnterminatedString => ParseError::UnterminatedString { mark },
            Self::InvalidEscape => ParseError::InvalidEscape { mark },
        }
    }
}

/// Parses a numeric literal from the current token slice.
///
/// A literal may not start with a redundant `0`: a leading zero is only
/// valid on its own or directly followed by the fraction dot.
fn parse_number(lex: &logos::Lexer<Token>) -> Result<f64, LexingError> {
    let slice = lex.slice();
    if slice.len() > 1 && slice.starts_with('0') && !slice[1..].starts_with('.') {
        return Err(LexingError::MalformedNumber);
    }

    slice.parse().map_err(|_| LexingError::MalformedNumber)
}

/// Resolves the escape sequences of a terminated string literal.
///
/// The supported escape set is `\" \' \\ \? \a \b \t \v \n \r \f`; anything
/// else after a backslash is an error.
fn parse_string(lex: &logos::Lexer<Token>) -> Result<String, LexingError> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some('\\') => result.push('\\'),
            Some('?') => result.push('?'),
            Some('a') => result.push('\x07'),
            Some('b') => result.push('\x08'),
            Some('t') => result.push('\t'),
            Some('v') => result.push('\x0B'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('f') => result.push('\x0C'),
            _ => return Err(LexingError::InvalidEscape),
        }
    }

    Ok(result)
}

fn unterminated_string(_: &logos::Lexer<Token>) -> Result<String, LexingError> {
    Err(LexingError::UnterminatedString)
}

/// Tokenizes a complete source text into `(token, mark)` pairs.
///
/// This is the stream contract between the lexer and the parser: tokens
/// arrive in source order, each stamped with the mark of its first
/// character, and the end of the vector is the end of the stream.
///
/// # Errors
/// Returns a positioned [`ParseError`] and stops at the first slice of text
/// that does not lex: an unexpected character, a malformed number, an
/// unterminated string or an invalid escape.
///
/// # Examples
/// ```
/// use lazuli::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("let x: f32 = 42;").unwrap();
/// let kinds: Vec<&Token> = tokens.iter().map(|(token, _)| token).collect();
///
/// assert_eq!(kinds,
///            vec![&Token::Let,
///                 &Token::Identifier("x".to_string()),
///                 &Token::Colon,
///                 &Token::F32,
///                 &Token::Equals,
///                 &Token::Number(42.0),
///                 &Token::Semicolon]);
///
/// // A redundant leading zero is a lex error.
/// assert!(tokenize("let x: f32 = 042;").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Mark)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());

    while let Some(token) = lexer.next() {
        let mark = Mark::new(lexer.extras.line, lexer.span().start - lexer.extras.line_start);
        match token {
            Ok(token) => tokens.push((token, mark)),
            Err(error) => return Err(error.into_parse_error(lexer.slice(), mark)),
        }
    }

    Ok(tokens)
}
