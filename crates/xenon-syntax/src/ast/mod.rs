//! Abstract syntax tree for Xenon programs.
//!
//! Nodes own their children through `Box` and `Vec`; a [`Program`] owns the
//! whole tree. Every node keeps its [`Span`](crate::span::Span).
//!
//! - [`decl`]: the program, classes, fields, methods
//! - [`stmt`]: statements and blocks
//! - [`expr`]: expressions and operators
//! - [`ty`]: written types

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod ty;

pub use decl::{ClassDef, FieldDef, MethodDef, Param, Program, Visibility};
pub use expr::{BinaryOp, Expr, UnaryOp};
pub use stmt::{AssignTarget, Block, Stmt};
pub use ty::{TypeExpr, TypeKind};
