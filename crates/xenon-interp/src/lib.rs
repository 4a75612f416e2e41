//! Xenon evaluator.
//!
//! A tree-walking interpreter over checked programs, plus the pipeline that
//! takes source text to a [`Completion`]:
//! - [`value`]: runtime values and shared objects
//! - [`env`]: frames with an implicit receiver and nested scopes
//! - [`interp`]: statement execution and expression evaluation
//! - [`pipeline`]: lex, parse, check, run
//!
//! # Example
//!
//! ```
//! use xenon_interp::{Config, run_source};
//!
//! let source = r#"
//! class Student {
//!     var id: int = 101;
//!     fun getId(): int { return id; }
//!     fun setId(newId: int): void { id = newId; }
//! }
//! var s: Student = new Student();
//! print(s.getId());
//! s.setId(102);
//! print(s.getId());
//! "#;
//!
//! let mut out = Vec::new();
//! let completion = run_source(source, &mut out, &Config::default());
//!
//! assert_eq!(completion.exit_code(), 0);
//! assert_eq!(String::from_utf8(out).unwrap(), "101\n102\n");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod env;
pub mod error;
pub mod interp;
pub mod pipeline;
pub mod value;

pub use config::{Config, DEFAULT_MAX_CALL_DEPTH, MAX_CALL_DEPTH};
pub use env::{Binding, Environment, Frame};
pub use error::{RuntimeError, RuntimeResult};
pub use interp::Interpreter;
pub use pipeline::{Completion, ErrorKind, check_source, run_source};
pub use value::{Object, ObjectRef, Value, ValueKind};
