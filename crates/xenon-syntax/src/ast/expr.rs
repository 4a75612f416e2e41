//! Expression nodes.

use crate::span::{Span, Spanned};
use std::fmt;
use xenon_mem::Symbol;

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Integer literal: `101`
    IntLiteral {
        /// Value
        value: i64,
        /// Source location
        span: Span,
    },

    /// String literal: `"hello"`
    StrLiteral {
        /// Interned contents
        value: Symbol,
        /// Source location
        span: Span,
    },

    /// `true` or `false`
    BoolLiteral {
        /// Value
        value: bool,
        /// Source location
        span: Span,
    },

    /// A bare name: a local, a parameter or a field of the implicit receiver.
    Identifier {
        /// The name
        name: Symbol,
        /// Source location
        span: Span,
    },

    /// Field read: `s.id`
    FieldAccess {
        /// Object whose field is read
        receiver: Box<Expr>,
        /// Field name
        field: Symbol,
        /// Source location
        span: Span,
    },

    /// Method call: `s.getId()`, or `getId()` on the implicit receiver.
    MethodCall {
        /// Explicit receiver, `None` for an implicit-receiver call
        receiver: Option<Box<Expr>>,
        /// Method name
        method: Symbol,
        /// Arguments, evaluated left to right
        args: Vec<Expr>,
        /// Source location
        span: Span,
    },

    /// Object creation: `new Student()`
    New {
        /// Class to instantiate
        class: Symbol,
        /// Source location
        span: Span,
    },

    /// Prefix operator: `-x`, `!done`
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expr>,
        /// Source location
        span: Span,
    },

    /// Infix operator: `a + b`
    Binary {
        /// Left operand
        left: Box<Expr>,
        /// Operator
        op: BinaryOp,
        /// Right operand
        right: Box<Expr>,
        /// Source location
        span: Span,
    },
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        match self {
            Self::IntLiteral { span, .. }
            | Self::StrLiteral { span, .. }
            | Self::BoolLiteral { span, .. }
            | Self::Identifier { span, .. }
            | Self::FieldAccess { span, .. }
            | Self::MethodCall { span, .. }
            | Self::New { span, .. }
            | Self::Unary { span, .. }
            | Self::Binary { span, .. } => *span,
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `!`
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neg => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinaryOp {
    /// `+ - * / %`
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod)
    }

    /// `< > <= >=`
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Lt | Self::Gt | Self::Le | Self::Ge)
    }

    /// `== !=`
    #[must_use]
    pub const fn is_equality(self) -> bool {
        matches!(self, Self::Eq | Self::Ne)
    }

    /// `&& ||`
    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
        };
        write!(f, "{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_groups_are_disjoint() {
        let all = [
            BinaryOp::Add,
            BinaryOp::Sub,
            BinaryOp::Mul,
            BinaryOp::Div,
            BinaryOp::Mod,
            BinaryOp::Eq,
            BinaryOp::Ne,
            BinaryOp::Lt,
            BinaryOp::Gt,
            BinaryOp::Le,
            BinaryOp::Ge,
            BinaryOp::And,
            BinaryOp::Or,
        ];
        for op in all {
            let groups = [
                op.is_arithmetic(),
                op.is_ordering(),
                op.is_equality(),
                op.is_logical(),
            ];
            assert_eq!(groups.iter().filter(|g| **g).count(), 1, "{op}");
        }
    }

    #[test]
    fn test_expr_span() {
        let span = Span::new(3, 6, 1, 4, 1, 7);
        let expr = Expr::New {
            class: Symbol::new(20),
            span,
        };
        assert_eq!(expr.span(), span);
    }
}
