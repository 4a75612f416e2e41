//! Checking passes.
//!
//! - [`decl`]: class registration, signatures, field initializers and
//!   method bodies
//! - [`stmt`]: statements and the return rule
//! - [`expr`]: expression types, name resolution and encapsulation
//! - [`ty`]: written types to [`Ty`]

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod ty;

pub use decl::{check_bodies, collect_signatures, register_classes};
pub use expr::synth;
pub use stmt::{check_stmt, ends_with_return};
pub use ty::{ast_to_ty, value_ty};

use crate::error::{CheckError, CheckResult};
use crate::registry::{ClassInfo, ClassRegistry};
use crate::scope::Scopes;
use crate::types::Ty;
use xenon_mem::{StringInterner, Symbol};
use xenon_syntax::Span;

/// The method whose body is being checked.
#[derive(Debug, Clone, Copy)]
pub struct CurrentMethod {
    /// Method name
    pub name: Symbol,
    /// Declared return type
    pub return_ty: Ty,
}

/// Main checking context.
pub struct Context<'ctx> {
    /// String interner (shared with parser)
    pub interner: &'ctx StringInterner,

    /// Classes registered so far
    pub registry: ClassRegistry,

    /// Locals and parameters
    pub scopes: Scopes,

    /// Lexically enclosing class; `None` at top level
    pub current_class: Option<Symbol>,

    /// Method being checked; `None` at top level and in field initializers
    pub current_method: Option<CurrentMethod>,

    /// While checking field initializers: how many leading fields are
    /// visible
    pub visible_fields: Option<usize>,
}

impl<'ctx> Context<'ctx> {
    /// Create a new checking context.
    #[must_use]
    pub fn new(interner: &'ctx StringInterner) -> Self {
        Self {
            interner,
            registry: ClassRegistry::new(),
            scopes: Scopes::new(),
            current_class: None,
            current_method: None,
            visible_fields: None,
        }
    }

    /// Resolves a symbol for messages.
    #[must_use]
    pub fn name(&self, sym: Symbol) -> String {
        self.interner.resolve(sym).unwrap_or("<unknown>").to_string()
    }

    /// Renders a type for messages.
    #[must_use]
    pub fn ty_name(&self, ty: Ty) -> String {
        ty.display(self.interner).to_string()
    }

    /// Enter a new scope.
    pub fn new_scope(&mut self) {
        self.scopes.new_scope();
    }

    /// Exit the current scope.
    pub fn pop_scope(&mut self) {
        self.scopes.pop_scope();
    }

    /// Binds a local or parameter, rejecting duplicates in the same scope.
    ///
    /// # Errors
    ///
    /// [`CheckError::Duplicate`] if `name` is already bound in this scope.
    pub fn bind(
        &mut self,
        what: &'static str,
        name: Symbol,
        ty: Ty,
        span: Span,
    ) -> CheckResult<()> {
        self.scopes.bind(name, ty).map_err(|_| CheckError::Duplicate {
            what,
            name: self.name(name),
            span,
        })
    }

    /// Looks up a registered class.
    ///
    /// # Errors
    ///
    /// [`CheckError::UnknownClass`] if it is not registered.
    pub fn class(&self, name: Symbol, span: Span) -> CheckResult<&ClassInfo> {
        self.registry
            .lookup_class(name)
            .ok_or_else(|| CheckError::UnknownClass {
                name: self.name(name),
                span,
            })
    }

    /// Fails unless `found` equals `expected`.
    ///
    /// # Errors
    ///
    /// [`CheckError::Mismatch`] naming `context`.
    pub fn expect_ty(
        &self,
        context: impl FnOnce() -> String,
        expected: Ty,
        found: Ty,
        span: Span,
    ) -> CheckResult<()> {
        if expected == found {
            Ok(())
        } else {
            Err(CheckError::Mismatch {
                context: context(),
                expected: self.ty_name(expected),
                found: self.ty_name(found),
                span,
            })
        }
    }
}
