//! Statement checking.
//!
//! This module implements checking for statements, including:
//! - Variable declarations and assignments
//! - Return statements against the enclosing method's return type
//! - `if` / `while` / `for` conditions and their block scopes
//! - `print` and expression statements

use super::expr::{assign_target_ty, synth};
use super::ty::value_ty;
use super::Context;
use crate::error::{CheckError, CheckResult};
use crate::types::Ty;
use xenon_syntax::Spanned;
use xenon_syntax::ast::{Block, Expr, Stmt};

/// Check a statement.
///
/// # Errors
///
/// The first error in the statement.
pub fn check_stmt(ctx: &mut Context<'_>, stmt: &Stmt) -> CheckResult<()> {
    match stmt {
        // Variable declaration: `var x: T = expr;`
        Stmt::VarDecl {
            name,
            ty,
            init,
            span,
        } => {
            let declared =
                value_ty(ctx, ty, || format!("variable '{}'", ctx.name(*name)))?;
            let found = synth(ctx, init)?;
            ctx.expect_ty(
                || format!("initializer of '{}'", ctx.name(*name)),
                declared,
                found,
                init.span(),
            )?;
            ctx.bind("variable", *name, declared, *span)
        }

        // Assignment: `x = expr;` or `obj.field = expr;`
        Stmt::Assign { target, value, .. } => {
            let (expected, target_name) = assign_target_ty(ctx, target)?;
            let found = synth(ctx, value)?;
            ctx.expect_ty(
                || format!("assignment to '{target_name}'"),
                expected,
                found,
                value.span(),
            )
        }

        // Return: `return;` or `return expr;`
        Stmt::Return { value, span } => {
            let Some(method) = ctx.current_method else {
                return Ok(());
            };

            match value {
                Some(expr) if method.return_ty.is_void() => {
                    synth(ctx, expr)?;
                    Err(CheckError::ReturnValueFromVoid {
                        method: ctx.name(method.name),
                        span: *span,
                    })
                }
                Some(expr) => {
                    let found = synth(ctx, expr)?;
                    ctx.expect_ty(
                        || format!("return value of '{}'", ctx.name(method.name)),
                        method.return_ty,
                        found,
                        expr.span(),
                    )
                }
                None if method.return_ty.is_void() => Ok(()),
                None => Err(CheckError::MissingReturnValue {
                    method: ctx.name(method.name),
                    expected: ctx.ty_name(method.return_ty),
                    span: *span,
                }),
            }
        }

        Stmt::Expr { expr, .. } => synth(ctx, expr).map(|_| ()),

        Stmt::Print { value, .. } => {
            if synth(ctx, value)?.is_void() {
                return Err(CheckError::PrintVoid { span: value.span() });
            }
            Ok(())
        }

        Stmt::If {
            cond,
            then_block,
            else_block,
            ..
        } => {
            expect_bool(ctx, cond, "if condition")?;
            check_block(ctx, then_block)?;
            if let Some(else_block) = else_block {
                check_block(ctx, else_block)?;
            }
            Ok(())
        }

        Stmt::While { cond, body, .. } => {
            expect_bool(ctx, cond, "while condition")?;
            check_block(ctx, body)
        }

        // The init variable lives in a scope around the whole loop.
        Stmt::For {
            init,
            cond,
            step,
            body,
            ..
        } => {
            ctx.new_scope();
            let result = check_stmt(ctx, init)
                .and_then(|()| expect_bool(ctx, cond, "for condition"))
                .and_then(|()| check_stmt(ctx, step))
                .and_then(|()| check_block(ctx, body));
            ctx.pop_scope();
            result
        }
    }
}

/// Checks a nested block in its own scope.
fn check_block(ctx: &mut Context<'_>, block: &Block) -> CheckResult<()> {
    ctx.new_scope();
    let result = block.stmts.iter().try_for_each(|stmt| check_stmt(ctx, stmt));
    ctx.pop_scope();
    result
}

fn expect_bool(ctx: &Context<'_>, cond: &Expr, context: &str) -> CheckResult<()> {
    let found = synth(ctx, cond)?;
    ctx.expect_ty(|| context.to_string(), Ty::Bool, found, cond.span())
}

/// Returns `true` if every path through `block` ends in `return`.
///
/// That holds when the last statement is a `return`, or an `if` with an
/// `else` whose branches both satisfy the rule.
#[must_use]
pub fn ends_with_return(block: &Block) -> bool {
    match block.last() {
        Some(Stmt::Return { .. }) => true,
        Some(Stmt::If {
            then_block,
            else_block: Some(else_block),
            ..
        }) => ends_with_return(then_block) && ends_with_return(else_block),
        _ => false,
    }
}
