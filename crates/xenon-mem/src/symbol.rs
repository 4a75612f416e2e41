//! Compact handles for interned strings.
//!
//! A [`Symbol`] is a 32-bit index into a [`StringInterner`](crate::StringInterner).
//! Class, field, method and variable names travel through the front end,
//! checker and evaluator as symbols, so name comparison is an integer compare.
//!
//! ```
//! use xenon_mem::Symbol;
//!
//! let a = Symbol::new(7);
//! assert_eq!(a, Symbol::new(7));
//! assert_ne!(a, Symbol::new(8));
//! assert_eq!(a.as_usize(), 7);
//! ```

use std::fmt;

/// Index of a string inside the interner that produced it.
///
/// A symbol is only meaningful together with that interner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Wraps a raw interner index.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the raw index as `usize`, for slice indexing.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for Symbol {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
