//! Tokens produced by the lexer.
//!
//! A [`Token`] pairs a [`TokenKind`] with the [`Span`] it was read from.
//! Identifiers and string literal contents are interned; integer literals
//! are already converted to `i64`.
//!
//! ```
//! use xenon_syntax::span::Span;
//! use xenon_syntax::token::{Token, TokenKind};
//!
//! let source = "class";
//! let token = Token::new(TokenKind::Class, Span::new(0, 5, 1, 1, 1, 6));
//! assert!(token.kind.is_keyword());
//! assert_eq!(token.lexeme(source), "class");
//! ```

use crate::span::{Span, Spanned};
use std::fmt;
use xenon_mem::Symbol;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ===== Keywords =====
    /// `class`
    Class,
    /// `var`
    Var,
    /// `fun`
    Fun,
    /// `return`
    Return,
    /// `new`
    New,
    /// `print`
    Print,
    /// `private`
    Private,
    /// `void`
    Void,
    /// `int`
    Int,
    /// `bool`
    Bool,
    /// `string`
    Str,
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `for`
    For,

    // ===== Literals =====
    /// Identifier
    Ident(Symbol),
    /// Decimal integer literal
    IntLiteral(i64),
    /// String literal, escapes already processed
    StringLiteral(Symbol),
    /// `true` or `false`
    BoolLiteral(bool),

    // ===== Operators =====
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `!`
    Bang,
    /// `=`
    Eq,

    // ===== Delimiters =====
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Returns `true` for reserved words (including `true`/`false`).
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Var
                | Self::Fun
                | Self::Return
                | Self::New
                | Self::Print
                | Self::Private
                | Self::Void
                | Self::Int
                | Self::Bool
                | Self::Str
                | Self::If
                | Self::Else
                | Self::While
                | Self::For
                | Self::BoolLiteral(_)
        )
    }

    /// Returns `true` for integer, string and boolean literals.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::IntLiteral(_) | Self::StringLiteral(_) | Self::BoolLiteral(_)
        )
    }

    /// Binding power of binary operators; `None` for everything else.
    ///
    /// ```
    /// use xenon_syntax::token::TokenKind;
    ///
    /// assert!(TokenKind::Star.precedence() > TokenKind::Plus.precedence());
    /// assert!(TokenKind::AmpAmp.precedence() > TokenKind::PipePipe.precedence());
    /// assert_eq!(TokenKind::Eq.precedence(), None);
    /// ```
    #[must_use]
    pub const fn precedence(&self) -> Option<u8> {
        match self {
            Self::PipePipe => Some(1),
            Self::AmpAmp => Some(2),
            Self::EqEq | Self::BangEq => Some(3),
            Self::Lt | Self::Gt | Self::LtEq | Self::GtEq => Some(4),
            Self::Plus | Self::Minus => Some(5),
            Self::Star | Self::Slash | Self::Percent => Some(6),
            _ => None,
        }
    }

    /// Returns `true` if this token can begin a type.
    #[must_use]
    pub const fn starts_type(&self) -> bool {
        matches!(
            self,
            Self::Int | Self::Bool | Self::Str | Self::Void | Self::Ident(_)
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Var => write!(f, "var"),
            Self::Fun => write!(f, "fun"),
            Self::Return => write!(f, "return"),
            Self::New => write!(f, "new"),
            Self::Print => write!(f, "print"),
            Self::Private => write!(f, "private"),
            Self::Void => write!(f, "void"),
            Self::Int => write!(f, "int"),
            Self::Bool => write!(f, "bool"),
            Self::Str => write!(f, "string"),
            Self::If => write!(f, "if"),
            Self::Else => write!(f, "else"),
            Self::While => write!(f, "while"),
            Self::For => write!(f, "for"),
            Self::Ident(_) => write!(f, "identifier"),
            Self::IntLiteral(value) => write!(f, "{value}"),
            Self::StringLiteral(_) => write!(f, "string literal"),
            Self::BoolLiteral(b) => write!(f, "{b}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::EqEq => write!(f, "=="),
            Self::BangEq => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::Gt => write!(f, ">"),
            Self::LtEq => write!(f, "<="),
            Self::GtEq => write!(f, ">="),
            Self::AmpAmp => write!(f, "&&"),
            Self::PipePipe => write!(f, "||"),
            Self::Bang => write!(f, "!"),
            Self::Eq => write!(f, "="),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::Dot => write!(f, "."),
            Self::Colon => write!(f, ":"),
            Self::Semicolon => write!(f, ";"),
            Self::Comma => write!(f, ","),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// A token kind and where it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    /// What was read
    pub kind: TokenKind,
    /// Where it was read from
    pub span: Span,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The exact source text of this token (empty for end of input).
    #[must_use]
    pub fn lexeme<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source).unwrap_or("")
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}
