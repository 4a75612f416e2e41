//! Declarations: the program, its classes and their members.

use super::expr::Expr;
use super::stmt::{Block, Stmt};
use super::ty::TypeExpr;
use crate::span::{Span, Spanned};
use std::fmt;
use xenon_mem::Symbol;

/// Visibility of a class and, through it, of its fields.
///
/// `private` is the only modifier the grammar accepts, and it is also what
/// an omitted modifier means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Reachable only from methods of the declaring class
    #[default]
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Private => write!(f, "private"),
        }
    }
}

/// A whole source file: classes first, then top-level statements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// Class definitions in source order
    pub classes: Vec<ClassDef>,
    /// Top-level statements in source order
    pub statements: Vec<Stmt>,
}

/// `class Name { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    /// Class name
    pub name: Symbol,
    /// Location of the name
    pub name_span: Span,
    /// Written or default visibility
    pub visibility: Visibility,
    /// `true` if the modifier was written out
    pub explicit_visibility: bool,
    /// Fields in declaration order
    pub fields: Vec<FieldDef>,
    /// Methods in declaration order
    pub methods: Vec<MethodDef>,
    /// Source location of the whole class
    pub span: Span,
}

/// `var name: type = init;` inside a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name
    pub name: Symbol,
    /// Location of the name
    pub name_span: Span,
    /// Declared type
    pub ty: TypeExpr,
    /// Initializer, run once per instance
    pub init: Expr,
    /// Inherited from the class
    pub visibility: Visibility,
    /// Source location
    pub span: Span,
}

/// A parameter of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    /// Parameter name
    pub name: Symbol,
    /// Declared type
    pub ty: TypeExpr,
    /// Source location
    pub span: Span,
}

/// `fun name(params): type { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    /// Method name
    pub name: Symbol,
    /// Location of the name
    pub name_span: Span,
    /// Parameters in order
    pub params: Vec<Param>,
    /// Declared return type
    pub return_ty: TypeExpr,
    /// Body
    pub body: Block,
    /// Source location of the whole method
    pub span: Span,
}

impl Spanned for ClassDef {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for FieldDef {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for MethodDef {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for Param {
    fn span(&self) -> Span {
        self.span
    }
}

impl ClassDef {
    /// Finds a method by name.
    #[must_use]
    pub fn method(&self, name: Symbol) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }
}
