//! Checked types.
//!
//! [`Ty`] is the checker's view of a type. It differs from
//! [`TypeExpr`](xenon_syntax::ast::TypeExpr), which is what the source wrote:
//! a `Ty` only exists once the class it names is known to be registered.

use std::fmt;
use xenon_mem::{StringInterner, Symbol};
use xenon_syntax::ast::TypeKind;

/// A Xenon type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ty {
    /// 64-bit signed integer
    Int,
    /// `true` / `false`
    Bool,
    /// Immutable string
    Str,
    /// Absence of a value; only produced by calls to `void` methods
    Void,
    /// Reference to an instance of the named class
    Class(Symbol),
}

impl Ty {
    /// Maps a written type kind to a `Ty` without checking class existence.
    #[must_use]
    pub const fn from_kind(kind: TypeKind) -> Self {
        match kind {
            TypeKind::Int => Self::Int,
            TypeKind::Bool => Self::Bool,
            TypeKind::Str => Self::Str,
            TypeKind::Void => Self::Void,
            TypeKind::Class(name) => Self::Class(name),
        }
    }

    /// Returns `true` for [`Ty::Void`].
    #[must_use]
    pub const fn is_void(self) -> bool {
        matches!(self, Self::Void)
    }

    /// The class name for object types.
    #[must_use]
    pub const fn class(self) -> Option<Symbol> {
        match self {
            Self::Class(name) => Some(name),
            _ => None,
        }
    }

    /// Wraps the type for display with class names resolved.
    ///
    /// ```
    /// use xenon_check::Ty;
    /// use xenon_mem::StringInterner;
    ///
    /// let mut interner = StringInterner::new();
    /// let student = interner.intern("Student");
    ///
    /// assert_eq!(Ty::Int.display(&interner).to_string(), "int");
    /// assert_eq!(Ty::Class(student).display(&interner).to_string(), "Student");
    /// ```
    #[must_use]
    pub const fn display<'a>(&'a self, interner: &'a StringInterner) -> DisplayTy<'a> {
        DisplayTy { ty: self, interner }
    }
}

/// Display wrapper that resolves class symbols.
pub struct DisplayTy<'a> {
    ty: &'a Ty,
    interner: &'a StringInterner,
}

impl fmt::Display for DisplayTy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty {
            Ty::Int => write!(f, "int"),
            Ty::Bool => write!(f, "bool"),
            Ty::Str => write!(f, "string"),
            Ty::Void => write!(f, "void"),
            Ty::Class(name) => {
                write!(f, "{}", self.interner.resolve(*name).unwrap_or("<unknown>"))
            }
        }
    }
}
