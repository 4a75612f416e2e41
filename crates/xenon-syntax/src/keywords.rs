//! Reserved words of the Xenon language.
//!
//! [`KEYWORDS`] is the one table of reserved words. The lexer maps words to
//! tokens through [`lookup`] and seeds its interner with the same words, so
//! they always get the same low symbol ids.

use crate::token::TokenKind;

/// All reserved words with their tokens, in symbol-id order.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("class", TokenKind::Class),
    ("var", TokenKind::Var),
    ("fun", TokenKind::Fun),
    ("return", TokenKind::Return),
    ("new", TokenKind::New),
    ("print", TokenKind::Print),
    ("private", TokenKind::Private),
    ("void", TokenKind::Void),
    ("int", TokenKind::Int),
    ("bool", TokenKind::Bool),
    ("string", TokenKind::Str),
    ("true", TokenKind::BoolLiteral(true)),
    ("false", TokenKind::BoolLiteral(false)),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
];

/// Number of reserved words.
pub const KEYWORD_COUNT: u32 = KEYWORDS.len() as u32;

/// The reserved words alone, in symbol-id order.
pub fn words() -> impl Iterator<Item = &'static str> {
    KEYWORDS.iter().map(|&(word, _)| word)
}

/// The token for a reserved word, or `None` for an identifier.
///
/// ```
/// use xenon_syntax::keywords::lookup;
/// use xenon_syntax::TokenKind;
///
/// assert_eq!(lookup("while"), Some(TokenKind::While));
/// assert_eq!(lookup("Student"), None);
/// ```
#[must_use]
pub fn lookup(word: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|&&(keyword, _)| keyword == word)
        .map(|&(_, kind)| kind)
}

/// Returns `true` if `word` is reserved.
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    lookup(word).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicates() {
        let unique: std::collections::HashSet<_> = words().collect();
        assert_eq!(unique.len(), KEYWORDS.len());
        assert_eq!(KEYWORD_COUNT as usize, KEYWORDS.len());
    }

    #[test]
    fn test_core_words_are_reserved() {
        for word in ["class", "var", "fun", "return", "new", "print", "void", "int", "private"] {
            assert!(is_keyword(word), "{word} should be reserved");
        }
        assert!(!is_keyword("Student"));
        assert!(!is_keyword("public"));
    }

    #[test]
    fn test_every_entry_is_a_keyword_token() {
        for &(word, kind) in KEYWORDS {
            assert!(kind.is_keyword(), "{word} maps to a non-keyword token");
            assert_eq!(lookup(word), Some(kind));
        }
    }

    #[test]
    fn test_literal_words() {
        assert_eq!(lookup("true"), Some(TokenKind::BoolLiteral(true)));
        assert_eq!(lookup("false"), Some(TokenKind::BoolLiteral(false)));
        assert_eq!(lookup("for"), Some(TokenKind::For));
    }
}
