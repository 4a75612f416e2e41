//! Type annotation conversion.

use super::Context;
use crate::error::{CheckError, CheckResult};
use crate::types::Ty;
use xenon_syntax::ast::TypeExpr;

/// Converts a written type into a [`Ty`], checking that a named class exists.
///
/// # Errors
///
/// [`CheckError::UnknownClass`] for an unregistered class name.
pub fn ast_to_ty(ctx: &Context<'_>, ty: &TypeExpr) -> CheckResult<Ty> {
    let resolved = Ty::from_kind(ty.kind);
    if let Ty::Class(name) = resolved {
        ctx.class(name, ty.span)?;
    }
    Ok(resolved)
}

/// Like [`ast_to_ty`], for declarations that hold a value.
///
/// # Errors
///
/// [`CheckError::UnknownClass`], or [`CheckError::VoidNotAllowed`] naming
/// `what` when the type is `void`.
pub fn value_ty(
    ctx: &Context<'_>,
    ty: &TypeExpr,
    what: impl FnOnce() -> String,
) -> CheckResult<Ty> {
    let resolved = ast_to_ty(ctx, ty)?;
    if resolved.is_void() {
        return Err(CheckError::VoidNotAllowed {
            what: what(),
            span: ty.span,
        });
    }
    Ok(resolved)
}
