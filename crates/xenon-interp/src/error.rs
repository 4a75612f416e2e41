//! Runtime errors.
//!
//! Every runtime error aborts evaluation at once. Output written before the
//! error stays written.

use std::fmt;
use std::io;
use xenon_syntax::Span;

/// Errors raised while evaluating a checked program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// `/` with a zero divisor
    DivisionByZero {
        /// Location of the division
        span: Span,
    },

    /// `%` with a zero divisor
    ModuloByZero {
        /// Location of the operation
        span: Span,
    },

    /// Checked integer arithmetic overflowed.
    Overflow {
        /// Operator that overflowed
        op: String,
        /// Location of the operation
        span: Span,
    },

    /// Too many nested method calls or constructions.
    CallDepthExceeded {
        /// Configured limit
        limit: usize,
        /// Call or `new` that went over the limit
        span: Span,
    },

    /// A value's dynamic type differs from the declared one.
    TypeMismatch {
        /// Declared type
        expected: String,
        /// Dynamic type of the value
        found: String,
        /// Location of the value
        span: Span,
    },

    /// A field access or call on something that is not an object, or an
    /// implicit-receiver call with no receiver.
    NullReceiver {
        /// Location of the access
        span: Span,
    },

    /// A name bound neither locally nor as a receiver field.
    UnboundName {
        /// The name
        name: String,
        /// Location of the use
        span: Span,
    },

    /// A field read before its initializer ran.
    UninitializedField {
        /// Class name
        class: String,
        /// Field name
        field: String,
        /// Location of the read
        span: Span,
    },

    /// A class, field or method missing from the registry or the program.
    MissingDefinition {
        /// What was looked up (`"class"`, `"field"`, `"method"`)
        what: &'static str,
        /// The name
        name: String,
        /// Location of the use
        span: Span,
    },

    /// Writing program output failed.
    Io {
        /// The I/O error message
        message: String,
    },
}

impl RuntimeError {
    /// Source location, if the error has one.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::DivisionByZero { span }
            | Self::ModuloByZero { span }
            | Self::Overflow { span, .. }
            | Self::CallDepthExceeded { span, .. }
            | Self::TypeMismatch { span, .. }
            | Self::NullReceiver { span }
            | Self::UnboundName { span, .. }
            | Self::UninitializedField { span, .. }
            | Self::MissingDefinition { span, .. } => Some(*span),
            Self::Io { .. } => None,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero { .. } => write!(f, "division by zero"),
            Self::ModuloByZero { .. } => write!(f, "modulo by zero"),
            Self::Overflow { op, .. } => write!(f, "integer overflow in '{op}'"),
            Self::CallDepthExceeded { limit, .. } => {
                write!(f, "call depth exceeded (limit {limit})")
            }
            Self::TypeMismatch {
                expected, found, ..
            } => write!(f, "runtime type mismatch: expected {expected}, found {found}"),
            Self::NullReceiver { .. } => write!(f, "receiver is not an object"),
            Self::UnboundName { name, .. } => write!(f, "unbound name '{name}'"),
            Self::UninitializedField { class, field, .. } => {
                write!(f, "field '{field}' of class '{class}' read before initialization")
            }
            Self::MissingDefinition { what, name, .. } => {
                write!(f, "no definition for {what} '{name}'")
            }
            Self::Io { message } => write!(f, "output error: {message}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<io::Error> for RuntimeError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for evaluation.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
