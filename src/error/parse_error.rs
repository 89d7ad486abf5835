use crate::ast::Mark;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The lexer hit a character no token starts with.
    UnexpectedCharacter {
        /// The offending slice of source text.
        slice: String,
        /// Where the character was found.
        mark:  Mark,
    },
    /// A numeric literal had a redundant leading zero.
    MalformedNumber {
        /// Where the literal starts.
        mark: Mark,
    },
    /// A string literal ran into a newline or the end of input.
    UnterminatedString {
        /// Where the string starts.
        mark: Mark,
    },
    /// A string literal used an escape outside the supported set.
    InvalidEscape {
        /// Where the string starts.
        mark: Mark,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// A description of what was expected and what was found.
        token: String,
        /// Where the token was found.
        mark:  Mark,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The last known source position.
        mark: Mark,
    },
    /// Found extra tokens after parsing should have completed.
    UnexpectedTrailingTokens {
        /// The first extra token.
        token: String,
        /// Where it was found.
        mark:  Mark,
    },
}

impl ParseError {
    /// Gets the source mark the error was reported at.
    #[must_use]
    pub const fn mark(&self) -> Mark {
        match self {
            Self::UnexpectedCharacter { mark, .. }
            | Self::MalformedNumber { mark }
            | Self::UnterminatedString { mark }
            | Self::InvalidEscape { mark }
            | Self::UnexpectedToken { mark, .. }
            | Self::UnexpectedEndOfInput { mark }
            | Self::UnexpectedTrailingTokens { mark, .. } => *mark,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { slice, mark } => {
                write!(f, "ERROR ({mark}): Unexpected character: {slice:?}.")
            },
            Self::MalformedNumber { mark } => {
                write!(f, "ERROR ({mark}): Malformed numeric literal.")
            },
            Self::UnterminatedString { mark } => {
                write!(f, "ERROR ({mark}): Unterminated string literal.")
            },
            Self::InvalidEscape { mark } => {
                write!(f, "ERROR ({mark}): Invalid escape sequence in string literal.")
            },
            Self::UnexpectedToken { token, mark } => {
                write!(f, "ERROR ({mark}): {token}")
            },
            Self::UnexpectedEndOfInput { mark } => {
                write!(f, "ERROR ({mark}): Unexpected end of input.")
            },
            Self::UnexpectedTrailingTokens { token, mark } => {
                write!(f, "ERROR ({mark}): Extra tokens after expression: {token}")
            },
        }
    }
}

impl std::error::Error for ParseError {}
