//! Xenon static checker.
//!
//! Runs once over a parsed [`Program`] before anything executes and stops
//! at the first problem:
//! - name resolution (classes, fields, methods, locals)
//! - type rules for declarations, assignments, calls, operators and returns
//! - encapsulation: private fields are reachable only from their own class
//!
//! On success it returns the [`ClassRegistry`] the evaluator runs against.
//!
//! ```
//! use xenon_check::{CheckKind, check};
//!
//! let source = "class Student { var id: int = \"hello\"; }";
//! let (program, interner) = xenon_syntax::parse(source).unwrap();
//!
//! let err = check(&program, &interner).unwrap_err();
//! assert_eq!(err.kind(), CheckKind::Type);
//! ```

#![warn(missing_docs)]

pub mod check;
pub mod error;
pub mod registry;
pub mod scope;
pub mod types;

pub use check::Context;
pub use error::{CheckError, CheckKind, CheckResult};
pub use registry::{ClassInfo, ClassRegistry, FieldInfo, MethodInfo};
pub use scope::Scopes;
pub use types::Ty;

use std::time::Instant;
use xenon_log::debug;
use xenon_mem::StringInterner;
use xenon_syntax::Program;

/// Checks a whole program and returns its class registry.
///
/// Passes run in order: class registration, member signatures, field
/// initializers and method bodies, then top-level statements.
///
/// # Errors
///
/// The first [`CheckError`] found.
pub fn check(program: &Program, interner: &StringInterner) -> CheckResult<ClassRegistry> {
    let start = Instant::now();
    let mut ctx = Context::new(interner);

    check::register_classes(&mut ctx, program)?;
    check::collect_signatures(&mut ctx, program)?;
    check::check_bodies(&mut ctx, program)?;

    ctx.scopes = Scopes::new();
    for stmt in &program.statements {
        check::check_stmt(&mut ctx, stmt)?;
    }

    debug!(
        "checked {} classes and {} statements in {:?}",
        ctx.registry.len(),
        program.statements.len(),
        start.elapsed()
    );

    Ok(ctx.registry)
}
