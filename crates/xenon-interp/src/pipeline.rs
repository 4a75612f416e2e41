//! Source-to-completion pipeline.
//!
//! Lex, parse, check, then evaluate. Static failures stop the run before any
//! statement executes, so they never produce output. Each call builds its own
//! interner and class registry.
//!
//! Every stage recurses on the host stack, so both entry points run on a
//! dedicated thread sized by [`Config::stack_size`]. The caller's stack is
//! never used for evaluation.

use crate::config::Config;
use crate::interp::Interpreter;
use std::fmt;
use std::io::Write;
use std::panic;
use std::thread;
use std::time::Instant;
use xenon_check::{CheckKind, ClassRegistry};
use xenon_log::debug;
use xenon_mem::StringInterner;
use xenon_syntax::{Program, Span, Spanned, SyntaxError};

/// Category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed token
    Lex,
    /// Grammar violation
    Parse,
    /// Unknown or duplicate name
    Name,
    /// Type rule violation
    Type,
    /// Private field accessed from outside its class
    Access,
    /// Failure during evaluation
    Runtime,
}

impl ErrorKind {
    /// Label used in diagnostics, e.g. `TypeError`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lex => "LexError",
            Self::Parse => "ParseError",
            Self::Name => "NameError",
            Self::Type => "TypeError",
            Self::Access => "AccessError",
            Self::Runtime => "RuntimeError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<CheckKind> for ErrorKind {
    fn from(kind: CheckKind) -> Self {
        match kind {
            CheckKind::Name => Self::Name,
            CheckKind::Type => Self::Type,
            CheckKind::Access => Self::Access,
        }
    }
}

/// Outcome of running a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Every statement ran.
    Success,

    /// Rejected before execution.
    StaticFailure {
        /// Lex, Parse, Name, Type or Access
        kind: ErrorKind,
        /// Error message
        message: String,
        /// Source location
        span: Span,
    },

    /// Aborted during execution; earlier output was written.
    RuntimeFailure {
        /// Always [`ErrorKind::Runtime`]
        kind: ErrorKind,
        /// Error message
        message: String,
        /// Source location, when the error has one
        span: Option<Span>,
    },
}

impl Completion {
    /// Process exit code: 0 on success, 1 for static failures, 2 for runtime
    /// failures.
    ///
    /// ```
    /// use xenon_interp::{Completion, check_source};
    ///
    /// assert_eq!(Completion::Success.exit_code(), 0);
    /// assert_eq!(check_source("print(missing);").exit_code(), 1);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::StaticFailure { .. } => 1,
            Self::RuntimeFailure { .. } => 2,
        }
    }

    /// Returns `true` for [`Completion::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The failure kind, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success => None,
            Self::StaticFailure { kind, .. } | Self::RuntimeFailure { kind, .. } => Some(*kind),
        }
    }

    /// The failure message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::StaticFailure { message, .. } | Self::RuntimeFailure { message, .. } => {
                Some(message)
            }
        }
    }

    /// The failure location, if known.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::Success => None,
            Self::StaticFailure { span, .. } => Some(*span),
            Self::RuntimeFailure { span, .. } => *span,
        }
    }

    fn from_syntax(err: &SyntaxError) -> Self {
        let kind = match err {
            SyntaxError::Lexer(_) => ErrorKind::Lex,
            SyntaxError::Parser(_) => ErrorKind::Parse,
        };
        Self::StaticFailure {
            kind,
            message: err.to_string(),
            span: err.span(),
        }
    }
}

/// A program that passed every static check.
struct Checked {
    program: Program,
    interner: StringInterner,
    registry: ClassRegistry,
}

fn analyze(source: &str) -> Result<Checked, Completion> {
    let start = Instant::now();
    let (program, interner) =
        xenon_syntax::parse(source).map_err(|err| Completion::from_syntax(&err))?;
    debug!(
        "parsed {} classes, {} statements in {:?}",
        program.classes.len(),
        program.statements.len(),
        start.elapsed()
    );

    let registry = xenon_check::check(&program, &interner).map_err(|err| {
        Completion::StaticFailure {
            kind: err.kind().into(),
            message: err.to_string(),
            span: err.span(),
        }
    })?;

    Ok(Checked {
        program,
        interner,
        registry,
    })
}

/// Runs `stage` on a thread with `stack_size` bytes of stack.
///
/// A panic on the stage thread resumes on the caller.
fn on_sized_stack<'env, F>(stack_size: usize, stage: F) -> Completion
where
    F: FnOnce() -> Completion + Send + 'env,
{
    thread::scope(|scope| {
        let spawned = thread::Builder::new()
            .name("xenon-eval".into())
            .stack_size(stack_size)
            .spawn_scoped(scope, stage);

        match spawned {
            Ok(handle) => handle
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload)),
            Err(err) => Completion::RuntimeFailure {
                kind: ErrorKind::Runtime,
                message: format!("cannot start evaluator thread: {err}"),
                span: None,
            },
        }
    })
}

/// Runs only the static stages.
#[must_use]
pub fn check_source(source: &str) -> Completion {
    on_sized_stack(Config::STATIC_STACK_SIZE, || match analyze(source) {
        Ok(_) => Completion::Success,
        Err(completion) => completion,
    })
}

/// Checks and runs `source`, writing `print` output to `out`.
///
/// Runaway recursion ends in a [`Completion::RuntimeFailure`] once
/// [`Config::call_limit`] is reached, whatever the caller's own stack size.
///
/// ```
/// use xenon_interp::{Config, run_source};
///
/// let mut out = Vec::new();
/// let completion = run_source("print(40 + 2);", &mut out, &Config::default());
///
/// assert!(completion.is_success());
/// assert_eq!(out, b"42\n");
/// ```
pub fn run_source<W: Write + Send>(source: &str, out: W, config: &Config) -> Completion {
    let config = *config;
    on_sized_stack(config.stack_size(), move || evaluate(source, out, config))
}

fn evaluate<W: Write>(source: &str, out: W, config: Config) -> Completion {
    let checked = match analyze(source) {
        Ok(checked) => checked,
        Err(completion) => return completion,
    };

    let start = Instant::now();
    let mut interpreter = Interpreter::new(
        &checked.program,
        &checked.registry,
        &checked.interner,
        out,
        config,
    );
    let result = interpreter.run();
    debug!("evaluated in {:?}", start.elapsed());

    match result {
        Ok(()) => Completion::Success,
        Err(err) => Completion::RuntimeFailure {
            kind: ErrorKind::Runtime,
            message: err.to_string(),
            span: err.span(),
        },
    }
}
