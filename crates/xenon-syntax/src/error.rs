//! Lexer and parser errors.
//!
//! Both stages stop at their first error. Each error carries the span the
//! diagnostic emitter points at.

use crate::span::{Span, Spanned};
use std::fmt;

/// Errors raised while turning source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    /// A character that starts no token.
    ///
    /// ```text
    /// var x: int = 4 @ 2;
    ///                ^
    /// error: unknown character '@'
    /// ```
    UnknownChar {
        /// The offending character
        ch: char,

        /// Location in source
        span: Span,
    },

    /// A string literal with no closing quote before the end of the line.
    UnterminatedString {
        /// Location of the opening quote up to where lexing stopped
        start: Span,
    },

    /// A backslash followed by a character with no escape meaning.
    InvalidEscape {
        /// The character after the backslash
        ch: char,

        /// Location of the escape sequence
        span: Span,
    },

    /// An integer literal that does not fit in 64 bits.
    IntegerOverflow {
        /// The literal as written
        literal: String,

        /// Location in source
        span: Span,
    },
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownChar { ch, .. } => write!(f, "unknown character '{}'", ch.escape_default()),
            Self::UnterminatedString { .. } => write!(f, "unterminated string literal"),
            Self::InvalidEscape { ch, .. } => {
                write!(f, "invalid escape sequence '\\{}'", ch.escape_default())
            }
            Self::IntegerOverflow { literal, .. } => {
                write!(f, "integer literal '{literal}' does not fit in 64 bits")
            }
        }
    }
}

impl std::error::Error for LexerError {}

impl Spanned for LexerError {
    fn span(&self) -> Span {
        match self {
            Self::UnknownChar { span, .. }
            | Self::InvalidEscape { span, .. }
            | Self::IntegerOverflow { span, .. } => *span,
            Self::UnterminatedString { start } => *start,
        }
    }
}

/// Errors raised while building the AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// The next token is not one the grammar allows here.
    ///
    /// ```text
    /// var id: int = 101
    /// }
    /// ^
    /// error: expected ';', found '}'
    /// ```
    UnexpectedToken {
        /// Descriptions of the tokens that would have been accepted
        expected: Vec<String>,

        /// Description of the token that was found
        found: String,

        /// Location in source
        span: Span,
    },

    /// `return` outside of a method body.
    ReturnOutsideMethod {
        /// Location of the `return` keyword
        span: Span,
    },

    /// The left side of `=` is not a variable or a field.
    InvalidAssignTarget {
        /// Location of the target expression
        span: Span,
    },

    /// A field or variable declared without `= expr`.
    MissingInitializer {
        /// Name of the declaration
        name: String,

        /// Location of the token where `=` was expected
        span: Span,
    },

    /// A class declaration after the first top-level statement.
    ClassAfterStatement {
        /// Location of the `class` keyword
        span: Span,
    },

    /// Expressions or blocks nested deeper than the parser allows.
    ///
    /// ```text
    /// print(((((((...1...)))))));
    ///                ^
    /// error: nesting exceeds the limit of 256 levels
    /// ```
    NestingTooDeep {
        /// Deepest allowed nesting
        limit: usize,

        /// Location of the token that went past the limit
        span: Span,
    },
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken {
                expected, found, ..
            } => {
                write!(f, "expected ")?;
                if expected.len() == 1 {
                    write!(f, "{}", expected[0])?;
                } else {
                    write!(f, "one of: {}", expected.join(", "))?;
                }
                write!(f, ", found {found}")
            }
            Self::ReturnOutsideMethod { .. } => {
                write!(f, "'return' is only allowed inside a method body")
            }
            Self::InvalidAssignTarget { .. } => {
                write!(f, "only variables and fields can be assigned to")
            }
            Self::MissingInitializer { name, .. } => {
                write!(f, "'{name}' must be initialized with '= <expression>'")
            }
            Self::ClassAfterStatement { .. } => {
                write!(f, "classes must be declared before the first top-level statement")
            }
            Self::NestingTooDeep { limit, .. } => {
                write!(f, "nesting exceeds the limit of {limit} levels")
            }
        }
    }
}

impl std::error::Error for ParserError {}

impl Spanned for ParserError {
    fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::ReturnOutsideMethod { span }
            | Self::InvalidAssignTarget { span }
            | Self::MissingInitializer { span, .. }
            | Self::ClassAfterStatement { span }
            | Self::NestingTooDeep { span, .. } => *span,
        }
    }
}

/// Either stage's error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Lexer error
    Lexer(LexerError),

    /// Parser error
    Parser(ParserError),
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexer(err) => write!(f, "{err}"),
            Self::Parser(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lexer(err) => Some(err),
            Self::Parser(err) => Some(err),
        }
    }
}

impl Spanned for SyntaxError {
    fn span(&self) -> Span {
        match self {
            Self::Lexer(err) => err.span(),
            Self::Parser(err) => err.span(),
        }
    }
}

impl From<LexerError> for SyntaxError {
    fn from(err: LexerError) -> Self {
        Self::Lexer(err)
    }
}

impl From<ParserError> for SyntaxError {
    fn from(err: ParserError) -> Self {
        Self::Parser(err)
    }
}

/// Result type for lexer operations.
pub type LexerResult<T> = Result<T, LexerError>;

/// Result type for parser operations.
pub type ParserResult<T> = Result<T, ParserError>;

/// Result type for lexing and parsing together.
pub type SyntaxResult<T> = Result<T, SyntaxError>;
