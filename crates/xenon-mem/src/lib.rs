//! Symbols and string interning for the Xenon front end.
//!
//! - [`Symbol`]: a 32-bit handle to an interned string
//! - [`StringInterner`]: the table that hands symbols out and resolves them
//!
//! Enable the `symbols` feature to back the interner with `hashbrown`.

#![warn(missing_docs)]

pub mod interner;
pub mod symbol;

pub use interner::StringInterner;
pub use symbol::Symbol;
