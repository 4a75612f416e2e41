//! Lexical analysis for Xenon source text.
//!
//! The lexer makes a single pass over the characters of the input and
//! produces a `Vec<Token>` that always ends in [`TokenKind::Eof`]. Whitespace
//! and comments (`#` or `//` to end of line) never reach the token stream.
//! The first malformed character stops lexing with a [`LexerError`].
//!
//! ```
//! use xenon_syntax::lexer::Lexer;
//! use xenon_syntax::token::TokenKind;
//!
//! let tokens = Lexer::new("var id: int = 101; # default id").lex().unwrap();
//!
//! assert_eq!(tokens.len(), 8); // var id : int = 101 ; EOF
//! assert_eq!(tokens[5].kind, TokenKind::IntLiteral(101));
//! assert_eq!(tokens[7].kind, TokenKind::Eof);
//! ```

use crate::error::{LexerError, LexerResult};
use crate::keywords;
use crate::span::Span;
use crate::token::{Token, TokenKind};
use std::iter::Peekable;
use std::str::Chars;
use xenon_log::debug;
use xenon_mem::{StringInterner, Symbol};

/// Lexical analyzer over one source string.
///
/// Identifiers and string literal contents are interned into the lexer's own
/// [`StringInterner`], which is pre-seeded with [`keywords::KEYWORDS`]. Use
/// [`Lexer::lex_with_interner`] to keep the interner for the parser.
pub struct Lexer<'input> {
    /// The source being tokenized
    input: &'input str,

    /// Remaining characters
    chars: Peekable<Chars<'input>>,

    /// Byte offset of the next character
    position: usize,

    /// Line of the next character (1-based)
    line: usize,

    /// Column of the next character (1-based, in characters)
    column: usize,

    /// Tokens produced so far
    tokens: Vec<Token>,

    /// Interned identifiers and string contents
    interner: StringInterner,
}

impl<'input> Lexer<'input> {
    /// Creates a lexer for `input`.
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            interner: StringInterner::with_pre_interned(keywords::words()),
        }
    }

    /// Tokenizes the whole input.
    ///
    /// # Errors
    ///
    /// Returns the first [`LexerError`] encountered.
    pub fn lex(self) -> LexerResult<Vec<Token>> {
        self.lex_with_interner().map(|(tokens, _)| tokens)
    }

    /// Tokenizes the whole input and hands back the interner that resolves
    /// the symbols inside the tokens.
    ///
    /// ```
    /// use xenon_syntax::Lexer;
    /// use xenon_syntax::token::TokenKind;
    ///
    /// let (tokens, interner) = Lexer::new("print(\"hi\");").lex_with_interner().unwrap();
    /// let TokenKind::StringLiteral(sym) = tokens[2].kind else { panic!() };
    /// assert_eq!(interner.resolve(sym), Some("hi"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the first [`LexerError`] encountered.
    pub fn lex_with_interner(mut self) -> LexerResult<(Vec<Token>, StringInterner)> {
        loop {
            self.skip_trivia();
            if self.peek().is_none() {
                break;
            }
            let token = self.next_token()?;
            self.tokens.push(token);
        }

        let eof_span = Span::point(self.position, self.line, self.column);
        self.tokens.push(Token::new(TokenKind::Eof, eof_span));

        debug!(
            "lexed {} tokens from {} bytes ({} lines)",
            self.tokens.len(),
            self.input.len(),
            self.line
        );

        Ok((self.tokens, self.interner))
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn peek2(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next()
    }

    /// Consumes one character, keeping offset, line and column in step.
    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '#' => self.skip_line_comment(),
                '/' if self.peek2() == Some('/') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(
            start,
            self.position,
            start_line,
            start_col,
            self.line,
            self.column,
        )
    }

    /// Consumes `second` if it is next, choosing between a two-character and
    /// a one-character token.
    fn either(&mut self, second: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek() == Some(second) {
            self.bump();
            double
        } else {
            single
        }
    }

    fn next_token(&mut self) -> LexerResult<Token> {
        let start = self.position;
        let start_line = self.line;
        let start_col = self.column;

        let Some(ch) = self.bump() else {
            return Ok(Token::new(
                TokenKind::Eof,
                Span::point(start, start_line, start_col),
            ));
        };

        let kind = match ch {
            'a'..='z' | 'A'..='Z' | '_' => self.read_identifier(start),
            '0'..='9' => self.read_number(start, start_line, start_col)?,
            '"' => self.read_string(start, start_line, start_col)?,

            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => self.either('=', TokenKind::EqEq, TokenKind::Eq),
            '!' => self.either('=', TokenKind::BangEq, TokenKind::Bang),
            '<' => self.either('=', TokenKind::LtEq, TokenKind::Lt),
            '>' => self.either('=', TokenKind::GtEq, TokenKind::Gt),
            '&' if self.peek() == Some('&') => {
                self.bump();
                TokenKind::AmpAmp
            }
            '|' if self.peek() == Some('|') => {
                self.bump();
                TokenKind::PipePipe
            }

            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,

            _ => {
                return Err(LexerError::UnknownChar {
                    ch,
                    span: self.span_from(start, start_line, start_col),
                });
            }
        };

        Ok(Token::new(kind, self.span_from(start, start_line, start_col)))
    }

    /// Reads the rest of an identifier or keyword whose first character is
    /// already consumed.
    fn read_identifier(&mut self, start: usize) -> TokenKind {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.bump();
            } else {
                break;
            }
        }

        let text = &self.input[start..self.position];
        keywords::lookup(text).unwrap_or_else(|| TokenKind::Ident(self.interner.intern(text)))
    }

    /// Reads the rest of a decimal integer literal.
    fn read_number(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> LexerResult<TokenKind> {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.bump();
            } else {
                break;
            }
        }

        let text = &self.input[start..self.position];
        text.parse::<i64>()
            .map(TokenKind::IntLiteral)
            .map_err(|_| LexerError::IntegerOverflow {
                literal: text.to_string(),
                span: self.span_from(start, start_line, start_col),
            })
    }

    /// Reads a string literal after its opening quote, processing escapes.
    fn read_string(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> LexerResult<TokenKind> {
        let mut value = String::new();

        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(LexerError::UnterminatedString {
                        start: self.span_from(start, start_line, start_col),
                    });
                }
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    let esc_pos = self.position;
                    let esc_line = self.line;
                    let esc_col = self.column;
                    self.bump();
                    let Some(escaped) = self.bump() else {
                        return Err(LexerError::UnterminatedString {
                            start: self.span_from(start, start_line, start_col),
                        });
                    };
                    value.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '0' => '\0',
                        '\\' => '\\',
                        '"' => '"',
                        other => {
                            return Err(LexerError::InvalidEscape {
                                ch: other,
                                span: self.span_from(esc_pos, esc_line, esc_col),
                            });
                        }
                    });
                }
                Some(ch) => {
                    self.bump();
                    value.push(ch);
                }
            }
        }

        let sym: Symbol = self.interner.intern(&value);
        Ok(TokenKind::StringLiteral(sym))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .lex()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn lex_with(source: &str) -> (Vec<Token>, StringInterner) {
        Lexer::new(source).lex_with_interner().unwrap()
    }

    #[test]
    fn test_lexer_empty() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   \n\t  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_lexer_keywords() {
        assert_eq!(
            kinds("class var fun return new print private void int bool string if else while for"),
            vec![
                TokenKind::Class,
                TokenKind::Var,
                TokenKind::Fun,
                TokenKind::Return,
                TokenKind::New,
                TokenKind::Print,
                TokenKind::Private,
                TokenKind::Void,
                TokenKind::Int,
                TokenKind::Bool,
                TokenKind::Str,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::For,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_keyword_prefixes_are_identifiers() {
        let (tokens, interner) = lex_with("format fork for_each");
        let names: Vec<&str> = tokens
            .iter()
            .filter_map(|t| match t.kind {
                TokenKind::Ident(sym) => interner.resolve(sym),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["format", "fork", "for_each"]);
    }

    #[test]
    fn test_lexer_bool_literals() {
        assert_eq!(
            kinds("true false"),
            vec![
                TokenKind::BoolLiteral(true),
                TokenKind::BoolLiteral(false),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lexer_identifiers_are_interned() {
        let (tokens, interner) = lex_with("getId _tmp newId getId");
        let names: Vec<&str> = tokens
            .iter()
            .filter_map(|t| match t.kind {
                TokenKind::Ident(sym) => interner.resolve(sym),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["getId", "_tmp", "newId", "getId"]);
        assert_eq!(tokens[0].kind, tokens[3].kind);
    }

    #[test]
    fn test_lexer_keyword_prefix_is_identifier() {
        let (tokens, interner) = lex_with("classy variable");
        let TokenKind::Ident(first) = tokens[0].kind else {
            panic!("expected identifier, got {:?}", tokens[0].kind);
        };
        assert_eq!(interner.resolve(first), Some("classy"));
        assert!(matches!(tokens[1].kind, TokenKind::Ident(_)));
    }

    #[test]
    fn test_lexer_integer_literals() {
        assert_eq!(
            kinds("0 101 9223372036854775807"),
            vec![
                TokenKind::IntLiteral(0),
                TokenKind::IntLiteral(101),
                TokenKind::IntLiteral(i64::MAX),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lexer_integer_overflow() {
        let err = Lexer::new("9223372036854775808").lex().unwrap_err();
        assert!(matches!(err, LexerError::IntegerOverflow { .. }));
    }

    #[test]
    fn test_lexer_punctuation() {
        assert_eq!(
            kinds("{ } ( ) : ; . = ,"),
            vec![
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Colon,
                TokenKind::Semicolon,
                TokenKind::Dot,
                TokenKind::Eq,
                TokenKind::Comma,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_operators() {
        assert_eq!(
            kinds("+ - * / % == != < > <= >= && || !"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::Bang,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_hash_comment() {
        assert_eq!(
            kinds("# private by default\nvar # trailing\n"),
            vec![TokenKind::Var, TokenKind::Eof]
        );
    }

    #[test]
    fn test_lexer_slash_comment() {
        assert_eq!(
            kinds("a / b // halve it\n"),
            vec![
                TokenKind::Ident(Symbol::new(keywords::KEYWORD_COUNT)),
                TokenKind::Slash,
                TokenKind::Ident(Symbol::new(keywords::KEYWORD_COUNT + 1)),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_string_literal_with_escapes() {
        let (tokens, interner) = lex_with(r#""a\tb\n\"q\"\\""#);
        let TokenKind::StringLiteral(sym) = tokens[0].kind else {
            panic!("expected string literal");
        };
        assert_eq!(interner.resolve(sym), Some("a\tb\n\"q\"\\"));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_lexer_empty_string() {
        let (tokens, interner) = lex_with(r#""""#);
        let TokenKind::StringLiteral(sym) = tokens[0].kind else {
            panic!("expected string literal");
        };
        assert_eq!(interner.resolve(sym), Some(""));
    }

    #[test]
    fn test_lexer_unterminated_string() {
        let err = Lexer::new("print(\"oops);\nprint(1);").lex().unwrap_err();
        match err {
            LexerError::UnterminatedString { start } => {
                assert_eq!(start.start_line, 1);
                assert_eq!(start.start_col, 7);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_lexer_invalid_escape() {
        let err = Lexer::new(r#""\q""#).lex().unwrap_err();
        assert_eq!(
            err,
            LexerError::InvalidEscape {
                ch: 'q',
                span: Span::new(1, 3, 1, 2, 1, 4),
            }
        );
    }

    #[test]
    fn test_lexer_unknown_char_position() {
        let err = Lexer::new("var x: int = 1;\n  x = 4 @ 2;").lex().unwrap_err();
        assert_eq!(
            err,
            LexerError::UnknownChar {
                ch: '@',
                span: Span::new(24, 25, 2, 9, 2, 10),
            }
        );
    }

    #[test]
    fn test_lexer_single_ampersand_is_unknown() {
        let err = Lexer::new("a & b").lex().unwrap_err();
        assert!(matches!(err, LexerError::UnknownChar { ch: '&', .. }));
    }

    #[test]
    fn test_lexer_spans_track_lines_and_columns() {
        let tokens = Lexer::new("class A {\n  var x: int = 1;\n}").lex().unwrap();
        let var = tokens[3];
        assert_eq!(var.kind, TokenKind::Var);
        assert_eq!((var.span.start_line, var.span.start_col), (2, 3));
        assert_eq!((var.span.end_line, var.span.end_col), (2, 6));

        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.span.start_line, 3);
        assert_eq!(eof.span.start_col, 2);
    }

    #[test]
    fn test_lexer_lexemes_slice_source() {
        let source = "s.setId(102);";
        let tokens = Lexer::new(source).lex().unwrap();
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme(source)).collect();
        assert_eq!(lexemes, vec!["s", ".", "setId", "(", "102", ")", ";", ""]);
    }

    #[test]
    fn test_lexer_is_restartable() {
        let source = "class Student { var id: int = 101; }";
        let first = Lexer::new(source).lex().unwrap();
        let second = Lexer::new(source).lex().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_lexer_sample_program() {
        let source = r#"
            # Fields are private by default
            class Student {
                var id: int = 101;
                fun getId(): int { return id; }
                fun setId(newId: int): void { id = newId; }
            }
            var s: Student = new Student();
            print(s.getId());
        "#;
        let tokens = Lexer::new(source).lex().unwrap();
        assert!(tokens.iter().any(|t| t.kind == TokenKind::New));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::IntLiteral(101)));
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }
}
