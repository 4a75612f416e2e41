//! Expression checking.
//!
//! [`synth`] computes the type of an expression bottom-up. Bare names resolve
//! to locals and parameters first, then to fields of the enclosing class.
//! Field accesses through an explicit receiver are subject to the private
//! field rule; accesses from inside the declaring class are always allowed,
//! including on other instances of it.

use super::Context;
use crate::error::{CheckError, CheckResult};
use crate::types::Ty;
use xenon_mem::Symbol;
use xenon_syntax::ast::{AssignTarget, BinaryOp, Expr, UnaryOp, Visibility};
use xenon_syntax::{Span, Spanned};

/// Synthesizes the type of an expression.
///
/// # Errors
///
/// The first name, type or access error inside `expr`.
pub fn synth(ctx: &Context<'_>, expr: &Expr) -> CheckResult<Ty> {
    match expr {
        Expr::IntLiteral { .. } => Ok(Ty::Int),
        Expr::StrLiteral { .. } => Ok(Ty::Str),
        Expr::BoolLiteral { .. } => Ok(Ty::Bool),

        Expr::Identifier { name, span } => resolve_name(ctx, *name, *span),

        Expr::FieldAccess {
            receiver,
            field,
            span,
        } => field_ty(ctx, receiver, *field, *span),

        Expr::MethodCall {
            receiver,
            method,
            args,
            span,
        } => synth_call(ctx, receiver.as_deref(), *method, args, *span),

        Expr::New { class, span } => {
            ctx.class(*class, *span)?;
            Ok(Ty::Class(*class))
        }

        Expr::Unary { op, operand, span } => {
            let operand_ty = synth(ctx, operand)?;
            match (op, operand_ty) {
                (UnaryOp::Neg, Ty::Int) => Ok(Ty::Int),
                (UnaryOp::Not, Ty::Bool) => Ok(Ty::Bool),
                _ => Err(CheckError::InvalidOperand {
                    op: op.to_string(),
                    operand: ctx.ty_name(operand_ty),
                    span: *span,
                }),
            }
        }

        Expr::Binary {
            left,
            op,
            right,
            span,
        } => {
            let left_ty = synth(ctx, left)?;
            let right_ty = synth(ctx, right)?;
            binary_result(*op, left_ty, right_ty).ok_or_else(|| {
                CheckError::InvalidOperands {
                    op: op.to_string(),
                    left: ctx.ty_name(left_ty),
                    right: ctx.ty_name(right_ty),
                    span: *span,
                }
            })
        }
    }
}

/// Result type of a binary operator, `None` if the operands are rejected.
fn binary_result(op: BinaryOp, left: Ty, right: Ty) -> Option<Ty> {
    let both = |ty: Ty| left == ty && right == ty;
    let concatenable = |ty: Ty| matches!(ty, Ty::Int | Ty::Bool | Ty::Str);

    match op {
        BinaryOp::Add if both(Ty::Int) => Some(Ty::Int),
        BinaryOp::Add
            if (left == Ty::Str || right == Ty::Str)
                && concatenable(left)
                && concatenable(right) =>
        {
            Some(Ty::Str)
        }
        _ if op.is_arithmetic() => both(Ty::Int).then_some(Ty::Int),
        _ if op.is_ordering() => both(Ty::Int).then_some(Ty::Bool),
        _ if op.is_equality() => (left == right && !left.is_void()).then_some(Ty::Bool),
        _ => both(Ty::Bool).then_some(Ty::Bool),
    }
}

/// Resolves a bare name: local or parameter, then implicit field.
///
/// # Errors
///
/// [`CheckError::UnresolvedIdentifier`] if neither exists.
pub fn resolve_name(ctx: &Context<'_>, name: Symbol, span: Span) -> CheckResult<Ty> {
    if let Some(ty) = ctx.scopes.lookup(name) {
        return Ok(ty);
    }

    let field = ctx
        .current_class
        .and_then(|class| ctx.registry.lookup_class(class))
        .and_then(|class| class.field(name))
        .filter(|field| ctx.visible_fields.is_none_or(|count| field.slot < count));

    field.map(|field| field.ty).ok_or_else(|| CheckError::UnresolvedIdentifier {
        name: ctx.name(name),
        span,
    })
}

/// Type of `receiver.field`, enforcing the private field rule.
fn field_ty(ctx: &Context<'_>, receiver: &Expr, field: Symbol, span: Span) -> CheckResult<Ty> {
    let receiver_ty = synth(ctx, receiver)?;
    let class_name = object_class(ctx, receiver_ty, receiver.span())?;
    let class = ctx.class(class_name, receiver.span())?;

    let Some(info) = class.field(field) else {
        return Err(CheckError::UnresolvedField {
            class: ctx.name(class_name),
            field: ctx.name(field),
            span,
        });
    };

    if info.visibility == Visibility::Private && ctx.current_class != Some(class_name) {
        return Err(CheckError::PrivateField {
            class: ctx.name(class_name),
            field: ctx.name(field),
            span,
        });
    }

    Ok(info.ty)
}

/// Type of a method call; `receiver` is `None` for an implicit-receiver call.
fn synth_call(
    ctx: &Context<'_>,
    receiver: Option<&Expr>,
    method: Symbol,
    args: &[Expr],
    span: Span,
) -> CheckResult<Ty> {
    let class_name = match receiver {
        Some(receiver) => {
            let receiver_ty = synth(ctx, receiver)?;
            object_class(ctx, receiver_ty, receiver.span())?
        }
        None => match (ctx.current_class, ctx.current_method) {
            (Some(class), Some(_)) => class,
            _ => {
                return Err(CheckError::NoImplicitReceiver {
                    method: ctx.name(method),
                    span,
                });
            }
        },
    };

    let class = ctx.class(class_name, span)?;
    let Some(info) = class.method(method) else {
        return Err(CheckError::UnresolvedMethod {
            class: ctx.name(class_name),
            method: ctx.name(method),
            span,
        });
    };

    let found = args
        .iter()
        .map(|arg| synth(ctx, arg))
        .collect::<CheckResult<Vec<Ty>>>()?;

    if !found.iter().copied().eq(info.param_types()) {
        return Err(CheckError::ArgumentMismatch {
            method: ctx.name(method),
            expected: info.param_types().map(|ty| ctx.ty_name(ty)).collect(),
            found: found.iter().map(|ty| ctx.ty_name(*ty)).collect(),
            span,
        });
    }

    Ok(info.return_ty)
}

/// Type of an assignment target and the name used in messages.
///
/// # Errors
///
/// Name resolution and access errors for the target.
pub fn assign_target_ty(ctx: &Context<'_>, target: &AssignTarget) -> CheckResult<(Ty, String)> {
    match target {
        AssignTarget::Variable { name, span } => {
            Ok((resolve_name(ctx, *name, *span)?, ctx.name(*name)))
        }
        AssignTarget::Field {
            receiver,
            field,
            span,
        } => Ok((field_ty(ctx, receiver, *field, *span)?, ctx.name(*field))),
    }
}

fn object_class(ctx: &Context<'_>, ty: Ty, span: Span) -> CheckResult<Symbol> {
    ty.class().ok_or_else(|| CheckError::NotAnObject {
        found: ctx.ty_name(ty),
        span,
    })
}
