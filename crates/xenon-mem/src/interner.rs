//! Deduplicating string storage.
//!
//! The lexer interns every identifier and string literal it sees. Later
//! stages hold [`Symbol`]s and resolve them back to text only when they need
//! to print something (diagnostics, `print` output, object names).
//!
//! Each string is stored once as an `Rc<str>`: the lookup table and the
//! index-ordered list share the allocation.
//!
//! ```
//! use xenon_mem::StringInterner;
//!
//! let mut interner = StringInterner::new();
//! let a = interner.intern("Student");
//! let b = interner.intern("Student");
//! let c = interner.intern("getId");
//!
//! assert_eq!(a, b);
//! assert_ne!(a, c);
//! assert_eq!(interner.resolve(c), Some("getId"));
//! ```

use crate::symbol::Symbol;
use std::rc::Rc;

#[cfg(feature = "symbols")]
use hashbrown::HashMap;

#[cfg(not(feature = "symbols"))]
use std::collections::HashMap;

/// Bidirectional map between strings and [`Symbol`]s.
///
/// Symbols are handed out densely from zero in first-seen order. Words passed
/// to [`StringInterner::with_pre_interned`] take the lowest ids, so two
/// interners seeded with the same list agree on those ids.
#[derive(Debug, Clone, Default)]
pub struct StringInterner {
    /// Strings in id order
    strings: Vec<Rc<str>>,

    /// Reverse lookup
    symbols: HashMap<Rc<str>, Symbol>,

    /// Number of leading ids taken by pre-interned words
    reserved: usize,
}

impl StringInterner {
    /// Creates an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an interner whose first ids are `words`, in order.
    ///
    /// ```
    /// use xenon_mem::StringInterner;
    ///
    /// let mut interner = StringInterner::with_pre_interned(["class", "var"]);
    /// assert_eq!(interner.intern("var").as_u32(), 1);
    /// assert!(interner.is_reserved(interner.get("class").unwrap()));
    /// ```
    #[must_use]
    pub fn with_pre_interned<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut interner = Self::new();
        for word in words {
            interner.intern(word.as_ref());
        }
        interner.reserved = interner.strings.len();
        interner
    }

    /// Interns `s` and returns its symbol, reusing the existing one if `s`
    /// was seen before.
    ///
    /// # Panics
    ///
    /// Panics if every `u32` id is already taken.
    pub fn intern(&mut self, s: &str) -> Symbol {
        self.try_intern(s)
            .unwrap_or_else(|| panic!("string interner is full ({} symbols)", u32::MAX))
    }

    /// Like [`StringInterner::intern`], but returns `None` instead of
    /// panicking once the id space is exhausted.
    pub fn try_intern(&mut self, s: &str) -> Option<Symbol> {
        if let Some(&sym) = self.symbols.get(s) {
            return Some(sym);
        }

        let sym = symbol_at(self.strings.len())?;
        let stored: Rc<str> = Rc::from(s);
        self.strings.push(Rc::clone(&stored));
        self.symbols.insert(stored, sym);
        Some(sym)
    }

    /// Looks up `s` without interning it.
    #[must_use]
    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.symbols.get(s).copied()
    }

    /// Resolves a symbol to its text, or `None` if this interner never
    /// produced it.
    ///
    /// ```
    /// use xenon_mem::{StringInterner, Symbol};
    ///
    /// let mut interner = StringInterner::new();
    /// let sym = interner.intern("id");
    /// assert_eq!(interner.resolve(sym), Some("id"));
    /// assert_eq!(interner.resolve(Symbol::new(99)), None);
    /// ```
    #[must_use]
    pub fn resolve(&self, sym: Symbol) -> Option<&str> {
        self.strings.get(sym.as_usize()).map(|s| &**s)
    }

    /// Resolves a symbol to a shared handle on its text.
    #[must_use]
    pub fn resolve_rc(&self, sym: Symbol) -> Option<Rc<str>> {
        self.strings.get(sym.as_usize()).cloned()
    }

    /// Returns `true` if `sym` is one of the pre-interned words.
    #[must_use]
    pub const fn is_reserved(&self, sym: Symbol) -> bool {
        sym.as_usize() < self.reserved
    }

    /// Number of distinct strings interned so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns `true` if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// The symbol for the string stored at `index`, if the id fits in a `u32`.
fn symbol_at(index: usize) -> Option<Symbol> {
    u32::try_from(index).ok().map(Symbol::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_ids_never_truncate() {
        assert_eq!(symbol_at(7), Some(Symbol::new(7)));
        assert_eq!(symbol_at(u32::MAX as usize), Some(Symbol::new(u32::MAX)));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_symbol_ids_past_u32_are_rejected() {
        assert_eq!(symbol_at(u32::MAX as usize + 1), None);
        assert_eq!(symbol_at(usize::MAX), None);
    }

    #[test]
    fn test_try_intern_matches_intern() {
        let mut interner = StringInterner::new();
        let a = interner.try_intern("a");
        assert_eq!(a, Some(interner.intern("a")));
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_interner_starts_empty() {
        let interner = StringInterner::new();
        assert!(interner.is_empty());
        assert_eq!(interner.len(), 0);
    }

    #[test]
    fn test_ids_are_dense_in_first_seen_order() {
        let mut interner = StringInterner::new();
        assert_eq!(interner.intern("a").as_u32(), 0);
        assert_eq!(interner.intern("b").as_u32(), 1);
        assert_eq!(interner.intern("a").as_u32(), 0);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_pre_interned_words_are_reserved() {
        let mut interner = StringInterner::with_pre_interned(&["class", "fun", "var"]);
        assert_eq!(interner.len(), 3);

        let fun = interner.intern("fun");
        assert_eq!(fun.as_u32(), 1);
        assert!(interner.is_reserved(fun));

        let ident = interner.intern("Student");
        assert_eq!(ident.as_u32(), 3);
        assert!(!interner.is_reserved(ident));
    }

    #[test]
    fn test_get_does_not_intern() {
        let mut interner = StringInterner::new();
        assert_eq!(interner.get("missing"), None);
        assert!(interner.is_empty());

        let sym = interner.intern("present");
        assert_eq!(interner.get("present"), Some(sym));
    }

    #[test]
    fn test_resolve_rc_shares_storage() {
        let mut interner = StringInterner::new();
        let sym = interner.intern("shared");
        let first = interner.resolve_rc(sym).unwrap();
        let second = interner.resolve_rc(sym).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_empty_string_is_internable() {
        let mut interner = StringInterner::new();
        let sym = interner.intern("");
        assert_eq!(interner.resolve(sym), Some(""));
    }

    #[test]
    fn test_clone_keeps_ids() {
        let mut interner = StringInterner::with_pre_interned(&["x"]);
        let y = interner.intern("y");
        let mut copy = interner.clone();
        assert_eq!(copy.intern("y"), y);
        assert_eq!(copy.intern("z").as_u32(), 2);
    }
}
