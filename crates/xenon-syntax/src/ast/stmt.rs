//! Statement nodes.

use super::expr::Expr;
use super::ty::TypeExpr;
use crate::span::{Span, Spanned};
use xenon_mem::Symbol;

/// A `{ ... }` sequence of statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Statements in source order
    pub stmts: Vec<Stmt>,
    /// Location including the braces
    pub span: Span,
}

impl Block {
    /// The last statement, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Stmt> {
        self.stmts.last()
    }
}

/// What an assignment writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignTarget {
    /// A local, a parameter or a field of the implicit receiver
    Variable {
        /// The name
        name: Symbol,
        /// Source location
        span: Span,
    },

    /// A field of an explicit receiver: `s.id = 5`
    Field {
        /// Object whose field is written
        receiver: Expr,
        /// Field name
        field: Symbol,
        /// Source location
        span: Span,
    },
}

impl Spanned for AssignTarget {
    fn span(&self) -> Span {
        match self {
            Self::Variable { span, .. } | Self::Field { span, .. } => *span,
        }
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `var name: type = init;`
    VarDecl {
        /// Variable name
        name: Symbol,
        /// Declared type
        ty: TypeExpr,
        /// Initializer
        init: Expr,
        /// Source location
        span: Span,
    },

    /// `target = value;`
    Assign {
        /// Where the value goes
        target: AssignTarget,
        /// The value
        value: Expr,
        /// Source location
        span: Span,
    },

    /// `return;` or `return value;`
    Return {
        /// Returned value
        value: Option<Expr>,
        /// Source location
        span: Span,
    },

    /// An expression evaluated for its side effects: `s.setId(102);`
    Expr {
        /// The expression
        expr: Expr,
        /// Source location
        span: Span,
    },

    /// `print(value);`
    Print {
        /// What to print
        value: Expr,
        /// Source location
        span: Span,
    },

    /// `if (cond) { ... } else { ... }`
    ///
    /// `else if` is stored as an else block holding a single `If`.
    If {
        /// Condition
        cond: Expr,
        /// Taken when the condition holds
        then_block: Block,
        /// Taken otherwise
        else_block: Option<Block>,
        /// Source location
        span: Span,
    },

    /// `while (cond) { ... }`
    While {
        /// Condition, checked before every iteration
        cond: Expr,
        /// Loop body
        body: Block,
        /// Source location
        span: Span,
    },

    /// `for (init; cond; step) { ... }`
    ///
    /// `init` is a `var` declaration, an assignment or an expression and is
    /// scoped to the loop. `step` is an assignment or an expression.
    For {
        /// Runs once before the first condition check
        init: Box<Stmt>,
        /// Condition, checked before every iteration
        cond: Expr,
        /// Runs after every iteration of the body
        step: Box<Stmt>,
        /// Loop body
        body: Block,
        /// Source location
        span: Span,
    },
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        match self {
            Self::VarDecl { span, .. }
            | Self::Assign { span, .. }
            | Self::Return { span, .. }
            | Self::Expr { span, .. }
            | Self::Print { span, .. }
            | Self::If { span, .. }
            | Self::While { span, .. }
            | Self::For { span, .. } => *span,
        }
    }
}
