//! Xenon Syntax: Lexer, Parser, and AST
//!
//! This crate provides the language frontend for Xenon:
//! - Lexical analysis (tokenization)
//! - Parsing (AST construction)
//! - AST node definitions
//! - Source location tracking and diagnostics
//!
//! # Modules
//!
//! - [`span`] - Source location tracking
//! - [`token`] - Token types and definitions
//! - [`keywords`] - Reserved words
//! - [`error`] - Lexer and parser error types
//! - [`lexer`] - Tokenizer
//! - [`parser`] - Recursive descent parser
//! - [`ast`] - Syntax tree
//! - [`diagnostic`] - Error rendering with source excerpts
//!
//! # Examples
//!
//! ```
//! use xenon_syntax::ast::Stmt;
//!
//! let (program, interner) = xenon_syntax::parse(
//!     "class Student { var id: int = 101; }\nprint(1);",
//! )
//! .unwrap();
//!
//! assert_eq!(program.classes.len(), 1);
//! assert_eq!(interner.resolve(program.classes[0].name), Some("Student"));
//! assert!(matches!(program.statements[0], Stmt::Print { .. }));
//! ```

#![warn(missing_docs)]

pub mod ast;
pub mod diagnostic;
pub mod error;
pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

pub use ast::Program;
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticLevel, Emitter};
pub use error::{
    LexerError, LexerResult, ParserError, ParserResult, SyntaxError, SyntaxResult,
};
pub use lexer::Lexer;
pub use parser::Parser;
pub use span::{Span, Spanned};
pub use token::{Token, TokenKind};

use xenon_mem::StringInterner;

/// Lexes and parses `source`.
///
/// The returned interner resolves every [`Symbol`](xenon_mem::Symbol) in the
/// program.
///
/// # Errors
///
/// The first [`LexerError`] or [`ParserError`], wrapped in [`SyntaxError`].
pub fn parse(source: &str) -> SyntaxResult<(Program, StringInterner)> {
    let (tokens, interner) = Lexer::new(source).lex_with_interner()?;
    let mut parser = Parser::new(tokens, source, interner);
    let program = parser.parse_program()?;
    Ok((program, parser.into_interner()))
}
