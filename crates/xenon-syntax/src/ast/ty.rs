//! Types as written in declarations.

use crate::span::{Span, Spanned};
use xenon_mem::Symbol;

/// The shape of a written type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `int`
    Int,
    /// `bool`
    Bool,
    /// `string`
    Str,
    /// `void`, only meaningful as a method return type
    Void,
    /// A class name
    Class(Symbol),
}

/// A type annotation with its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeExpr {
    /// What type was written
    pub kind: TypeKind,
    /// Where it was written
    pub span: Span,
}

impl TypeExpr {
    /// Creates a type annotation.
    #[must_use]
    pub const fn new(kind: TypeKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns `true` for `void`.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self.kind, TypeKind::Void)
    }
}

impl Spanned for TypeExpr {
    fn span(&self) -> Span {
        self.span
    }
}
