//! Declaration checking.
//!
//! Classes are checked in three passes so that any class may refer to any
//! other regardless of order:
//! - Pass 1: register every class name
//! - Pass 2: collect field and method signatures
//! - Pass 3: check field initializers and method bodies

use super::stmt::{check_stmt, ends_with_return};
use super::ty::{ast_to_ty, value_ty};
use super::{Context, CurrentMethod, synth};
use crate::error::{CheckError, CheckResult};
use crate::registry::{ClassInfo, FieldInfo, MethodInfo};
use crate::scope::Scopes;
use xenon_log::trace;
use xenon_syntax::Spanned;
use xenon_syntax::ast::{ClassDef, MethodDef, Program};

/// Pass 1: registers every class name.
///
/// # Errors
///
/// [`CheckError::DuplicateClass`] for a repeated class name.
pub fn register_classes(ctx: &mut Context<'_>, program: &Program) -> CheckResult<()> {
    for class in &program.classes {
        let info = ClassInfo::new(class.name, class.visibility, class.span);
        if ctx.registry.register_class(info).is_some() {
            return Err(CheckError::DuplicateClass {
                name: ctx.name(class.name),
                span: class.name_span,
            });
        }
        trace!("registered class {}", ctx.name(class.name));
    }
    Ok(())
}

/// Pass 2: collects field and method signatures and assigns field slots.
///
/// # Errors
///
/// Duplicate members or parameters, unknown classes in types, and `void`
/// used for a field or parameter.
pub fn collect_signatures(ctx: &mut Context<'_>, program: &Program) -> CheckResult<()> {
    for class in &program.classes {
        let mut fields: Vec<FieldInfo> = Vec::with_capacity(class.fields.len());
        for (slot, field) in class.fields.iter().enumerate() {
            if fields.iter().any(|f| f.name == field.name) {
                return Err(CheckError::Duplicate {
                    what: "field",
                    name: ctx.name(field.name),
                    span: field.name_span,
                });
            }
            let ty = value_ty(ctx, &field.ty, || format!("field '{}'", ctx.name(field.name)))?;
            fields.push(FieldInfo {
                name: field.name,
                ty,
                slot,
                visibility: field.visibility,
            });
        }

        let mut methods: Vec<MethodInfo> = Vec::with_capacity(class.methods.len());
        for (index, method) in class.methods.iter().enumerate() {
            if methods.iter().any(|m| m.name == method.name) {
                return Err(CheckError::Duplicate {
                    what: "method",
                    name: ctx.name(method.name),
                    span: method.name_span,
                });
            }

            let mut params = Vec::with_capacity(method.params.len());
            for param in &method.params {
                if params.iter().any(|(name, _)| *name == param.name) {
                    return Err(CheckError::Duplicate {
                        what: "parameter",
                        name: ctx.name(param.name),
                        span: param.span,
                    });
                }
                let ty = value_ty(ctx, &param.ty, || {
                    format!("parameter '{}'", ctx.name(param.name))
                })?;
                params.push((param.name, ty));
            }

            methods.push(MethodInfo {
                name: method.name,
                params,
                return_ty: ast_to_ty(ctx, &method.return_ty)?,
                index,
            });
        }

        trace!(
            "class {}: {} field slots, {} methods",
            ctx.name(class.name),
            fields.len(),
            methods.len()
        );

        if let Some(info) = ctx.registry.lookup_class_mut(class.name) {
            info.fields = fields;
            info.methods = methods;
        }
    }
    Ok(())
}

/// Pass 3: checks field initializers and method bodies of every class.
///
/// # Errors
///
/// The first error found in declaration order.
pub fn check_bodies(ctx: &mut Context<'_>, program: &Program) -> CheckResult<()> {
    for class in &program.classes {
        ctx.current_class = Some(class.name);
        check_field_initializers(ctx, class)?;
        for method in &class.methods {
            check_method(ctx, method)?;
        }
    }
    ctx.current_class = None;
    Ok(())
}

/// Each initializer sees only the fields declared before it.
fn check_field_initializers(ctx: &mut Context<'_>, class: &ClassDef) -> CheckResult<()> {
    ctx.scopes = Scopes::new();
    ctx.current_method = None;

    for (slot, field) in class.fields.iter().enumerate() {
        ctx.visible_fields = Some(slot);
        let expected = ast_to_ty(ctx, &field.ty)?;
        let found = synth(ctx, &field.init)?;
        ctx.expect_ty(
            || format!("field initializer for '{}'", ctx.name(field.name)),
            expected,
            found,
            field.init.span(),
        )?;
    }

    ctx.visible_fields = None;
    Ok(())
}

/// Parameters and the outermost body statements share one scope.
fn check_method(ctx: &mut Context<'_>, method: &MethodDef) -> CheckResult<()> {
    let return_ty = ast_to_ty(ctx, &method.return_ty)?;

    ctx.scopes = Scopes::new();
    ctx.current_method = Some(CurrentMethod {
        name: method.name,
        return_ty,
    });

    for param in &method.params {
        let ty = ast_to_ty(ctx, &param.ty)?;
        ctx.bind("parameter", param.name, ty, param.span)?;
    }

    for stmt in &method.body.stmts {
        check_stmt(ctx, stmt)?;
    }

    if !return_ty.is_void() && !ends_with_return(&method.body) {
        return Err(CheckError::MissingReturn {
            method: ctx.name(method.name),
            expected: ctx.ty_name(return_ty),
            span: method.name_span,
        });
    }

    ctx.current_method = None;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckKind;
    use crate::types::Ty;
    use xenon_mem::StringInterner;

    fn signatures(source: &str) -> (CheckResult<()>, StringInterner, Program) {
        let (program, interner) = xenon_syntax::parse(source).unwrap();
        let result = {
            let mut ctx = Context::new(&interner);
            register_classes(&mut ctx, &program)
                .and_then(|()| collect_signatures(&mut ctx, &program))
        };
        (result, interner, program)
    }

    #[test]
    fn test_field_slots_follow_declaration_order() {
        let source = "class P { var x: int = 1; var name: string = \"p\"; var ok: bool = true; }";
        let (program, interner) = xenon_syntax::parse(source).unwrap();
        let mut ctx = Context::new(&interner);
        register_classes(&mut ctx, &program).unwrap();
        collect_signatures(&mut ctx, &program).unwrap();

        let class = ctx.registry.lookup_class(program.classes[0].name).unwrap();
        let slots: Vec<(String, usize, Ty)> = class
            .fields
            .iter()
            .map(|f| (ctx.name(f.name), f.slot, f.ty))
            .collect();
        assert_eq!(
            slots,
            [
                ("x".to_string(), 0, Ty::Int),
                ("name".to_string(), 1, Ty::Str),
                ("ok".to_string(), 2, Ty::Bool)
            ]
        );
    }

    #[test]
    fn test_duplicate_class() {
        let (result, _, _) = signatures("class A { }\nclass A { }");
        let err = result.unwrap_err();
        assert_eq!(err.kind(), CheckKind::Name);
        assert_eq!(err.to_string(), "duplicate class 'A'");
        assert_eq!(err.span().start_line, 2);
    }

    #[test]
    fn test_duplicate_field() {
        let (result, _, _) = signatures("class A { var x: int = 1; var x: int = 2; }");
        assert_eq!(result.unwrap_err().to_string(), "duplicate field 'x'");
    }

    #[test]
    fn test_duplicate_method() {
        let (result, _, _) =
            signatures("class A { fun f(): void { } fun f(): void { } }");
        assert_eq!(result.unwrap_err().to_string(), "duplicate method 'f'");
    }

    #[test]
    fn test_duplicate_parameter() {
        let (result, _, _) = signatures("class A { fun f(a: int, a: int): void { } }");
        assert_eq!(result.unwrap_err().to_string(), "duplicate parameter 'a'");
    }

    #[test]
    fn test_unknown_class_in_field_type() {
        let (result, _, _) = signatures("class A { var b: Missing = new A(); }");
        let err = result.unwrap_err();
        assert_eq!(err.kind(), CheckKind::Name);
        assert_eq!(err.to_string(), "unknown class 'Missing'");
    }

    #[test]
    fn test_void_field() {
        let (result, _, _) = signatures("class A { var v: void = 1; }");
        let err = result.unwrap_err();
        assert_eq!(err.kind(), CheckKind::Type);
        assert_eq!(err.to_string(), "field 'v' cannot have type void");
    }

    #[test]
    fn test_forward_class_reference() {
        let (result, _, _) = signatures("class A { var b: B = new B(); }\nclass B { }");
        assert!(result.is_ok());
    }

    #[test]
    fn test_method_signature_recorded() {
        let source = "class A { fun set(v: int, s: string): bool { return true; } }";
        let (result, interner, program) = signatures(source);
        result.unwrap();

        let mut ctx = Context::new(&interner);
        register_classes(&mut ctx, &program).unwrap();
        collect_signatures(&mut ctx, &program).unwrap();
        let class = ctx.registry.lookup_class(program.classes[0].name).unwrap();
        let set = &class.methods[0];
        assert_eq!(set.param_types().collect::<Vec<_>>(), [Ty::Int, Ty::Str]);
        assert_eq!(set.return_ty, Ty::Bool);
    }
}
