//! Static checking errors.
//!
//! Every error carries the names and types it talks about already resolved to
//! text, so it can be displayed without the interner.

use std::fmt;
use xenon_syntax::{Span, Spanned};

/// The three static error categories reported after parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// Duplicate or unresolved names
    Name,
    /// Type rule violations
    Type,
    /// Private field reached from outside its class
    Access,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "NameError"),
            Self::Type => write!(f, "TypeError"),
            Self::Access => write!(f, "AccessError"),
        }
    }
}

/// Static checking errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// Two classes with the same name.
    DuplicateClass {
        /// Class name
        name: String,
        /// Location of the second declaration
        span: Span,
    },

    /// Two fields, methods, parameters or variables with the same name in
    /// one scope.
    Duplicate {
        /// "field", "method", "parameter" or "variable"
        what: &'static str,
        /// The repeated name
        name: String,
        /// Location of the second declaration
        span: Span,
    },

    /// A type names a class that does not exist.
    UnknownClass {
        /// Class name
        name: String,
        /// Location of the type or `new` expression
        span: Span,
    },

    /// A bare name that is neither a local, a parameter nor a visible field.
    UnresolvedIdentifier {
        /// The name
        name: String,
        /// Location
        span: Span,
    },

    /// A field that the receiver's class does not declare.
    UnresolvedField {
        /// Receiver class
        class: String,
        /// Field name
        field: String,
        /// Location
        span: Span,
    },

    /// A method that the receiver's class does not declare.
    UnresolvedMethod {
        /// Receiver class
        class: String,
        /// Method name
        method: String,
        /// Location
        span: Span,
    },

    /// `name(args)` where there is no implicit receiver (top level, field
    /// initializers).
    NoImplicitReceiver {
        /// Method name
        method: String,
        /// Location
        span: Span,
    },

    /// An expression's type differs from the type its context requires.
    Mismatch {
        /// Where the mismatch happened, e.g. "field initializer for 'id'"
        context: String,
        /// Required type
        expected: String,
        /// Actual type
        found: String,
        /// Location of the offending expression
        span: Span,
    },

    /// `void` used as the type of a field, parameter or variable.
    VoidNotAllowed {
        /// What was declared, e.g. "field 'x'"
        what: String,
        /// Location of the type
        span: Span,
    },

    /// A non-void method whose body can finish without `return`.
    MissingReturn {
        /// Method name
        method: String,
        /// Declared return type
        expected: String,
        /// Location of the method
        span: Span,
    },

    /// `return expr;` in a `void` method.
    ReturnValueFromVoid {
        /// Method name
        method: String,
        /// Location of the return statement
        span: Span,
    },

    /// `return;` in a non-void method.
    MissingReturnValue {
        /// Method name
        method: String,
        /// Declared return type
        expected: String,
        /// Location of the return statement
        span: Span,
    },

    /// Argument count or types differ from the method's parameters.
    ArgumentMismatch {
        /// Method name
        method: String,
        /// Parameter types
        expected: Vec<String>,
        /// Argument types
        found: Vec<String>,
        /// Location of the call
        span: Span,
    },

    /// Operand types a binary operator does not accept.
    InvalidOperands {
        /// Operator text
        op: String,
        /// Left operand type
        left: String,
        /// Right operand type
        right: String,
        /// Location of the expression
        span: Span,
    },

    /// Operand type a unary operator does not accept.
    InvalidOperand {
        /// Operator text
        op: String,
        /// Operand type
        operand: String,
        /// Location of the expression
        span: Span,
    },

    /// Field access or method call on something that is not an object.
    NotAnObject {
        /// The receiver's type
        found: String,
        /// Location of the receiver
        span: Span,
    },

    /// `print` of a void call.
    PrintVoid {
        /// Location of the argument
        span: Span,
    },

    /// A private field reached from outside its declaring class.
    PrivateField {
        /// Declaring class
        class: String,
        /// Field name
        field: String,
        /// Location of the access
        span: Span,
    },
}

impl CheckError {
    /// The error category.
    #[must_use]
    pub const fn kind(&self) -> CheckKind {
        match self {
            Self::DuplicateClass { .. }
            | Self::Duplicate { .. }
            | Self::UnknownClass { .. }
            | Self::UnresolvedIdentifier { .. }
            | Self::UnresolvedField { .. }
            | Self::UnresolvedMethod { .. }
            | Self::NoImplicitReceiver { .. } => CheckKind::Name,

            Self::Mismatch { .. }
            | Self::VoidNotAllowed { .. }
            | Self::MissingReturn { .. }
            | Self::ReturnValueFromVoid { .. }
            | Self::MissingReturnValue { .. }
            | Self::ArgumentMismatch { .. }
            | Self::InvalidOperands { .. }
            | Self::InvalidOperand { .. }
            | Self::NotAnObject { .. }
            | Self::PrintVoid { .. } => CheckKind::Type,

            Self::PrivateField { .. } => CheckKind::Access,
        }
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateClass { name, .. } => {
                write!(f, "duplicate class '{name}'")
            }
            Self::Duplicate { what, name, .. } => {
                write!(f, "duplicate {what} '{name}'")
            }
            Self::UnknownClass { name, .. } => {
                write!(f, "unknown class '{name}'")
            }
            Self::UnresolvedIdentifier { name, .. } => {
                write!(f, "unresolved identifier '{name}'")
            }
            Self::UnresolvedField { class, field, .. } => {
                write!(f, "class '{class}' has no field '{field}'")
            }
            Self::UnresolvedMethod { class, method, .. } => {
                write!(f, "unresolved method '{method}' on class '{class}'")
            }
            Self::NoImplicitReceiver { method, .. } => {
                write!(f, "call to '{method}' needs a receiver here")
            }
            Self::Mismatch {
                context,
                expected,
                found,
                ..
            } => write!(
                f,
                "type mismatch in {context}: expected {expected}, found {found}"
            ),
            Self::VoidNotAllowed { what, .. } => {
                write!(f, "{what} cannot have type void")
            }
            Self::MissingReturn {
                method, expected, ..
            } => write!(
                f,
                "missing return in method '{method}' returning {expected}"
            ),
            Self::ReturnValueFromVoid { method, .. } => {
                write!(f, "method '{method}' returns void but a value is returned")
            }
            Self::MissingReturnValue {
                method, expected, ..
            } => write!(f, "method '{method}' must return a value of type {expected}"),
            Self::ArgumentMismatch {
                method,
                expected,
                found,
                ..
            } => write!(
                f,
                "argument mismatch calling '{method}': expected ({}), found ({})",
                expected.join(", "),
                found.join(", ")
            ),
            Self::InvalidOperands {
                op, left, right, ..
            } => write!(
                f,
                "operator '{op}' cannot be applied to {left} and {right}"
            ),
            Self::InvalidOperand { op, operand, .. } => {
                write!(f, "operator '{op}' cannot be applied to {operand}")
            }
            Self::NotAnObject { found, .. } => {
                write!(f, "expected an object, found {found}")
            }
            Self::PrintVoid { .. } => write!(f, "cannot print a void value"),
            Self::PrivateField { class, field, .. } => {
                write!(f, "field '{field}' of class '{class}' is private")
            }
        }
    }
}

impl std::error::Error for CheckError {}

impl Spanned for CheckError {
    fn span(&self) -> Span {
        match self {
            Self::DuplicateClass { span, .. }
            | Self::Duplicate { span, .. }
            | Self::UnknownClass { span, .. }
            | Self::UnresolvedIdentifier { span, .. }
            | Self::UnresolvedField { span, .. }
            | Self::UnresolvedMethod { span, .. }
            | Self::NoImplicitReceiver { span, .. }
            | Self::Mismatch { span, .. }
            | Self::VoidNotAllowed { span, .. }
            | Self::MissingReturn { span, .. }
            | Self::ReturnValueFromVoid { span, .. }
            | Self::MissingReturnValue { span, .. }
            | Self::ArgumentMismatch { span, .. }
            | Self::InvalidOperands { span, .. }
            | Self::InvalidOperand { span, .. }
            | Self::NotAnObject { span, .. }
            | Self::PrintVoid { span }
            | Self::PrivateField { span, .. } => *span,
        }
    }
}

/// Result type for checking.
pub type CheckResult<T> = Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> Span {
        Span::new(0, 1, 1, 1, 1, 2)
    }

    #[test]
    fn test_kinds() {
        let name = CheckError::UnknownClass {
            name: "Foo".to_string(),
            span: span(),
        };
        let ty = CheckError::PrintVoid { span: span() };
        let access = CheckError::PrivateField {
            class: "Student".to_string(),
            field: "id".to_string(),
            span: span(),
        };

        assert_eq!(name.kind(), CheckKind::Name);
        assert_eq!(ty.kind(), CheckKind::Type);
        assert_eq!(access.kind(), CheckKind::Access);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(CheckKind::Name.to_string(), "NameError");
        assert_eq!(CheckKind::Type.to_string(), "TypeError");
        assert_eq!(CheckKind::Access.to_string(), "AccessError");
    }

    #[test]
    fn test_mismatch_display() {
        let err = CheckError::Mismatch {
            context: "field initializer for 'id'".to_string(),
            expected: "int".to_string(),
            found: "string".to_string(),
            span: span(),
        };
        assert_eq!(
            err.to_string(),
            "type mismatch in field initializer for 'id': expected int, found string"
        );
    }

    #[test]
    fn test_argument_mismatch_display() {
        let err = CheckError::ArgumentMismatch {
            method: "setId".to_string(),
            expected: vec!["int".to_string()],
            found: vec!["string".to_string(), "int".to_string()],
            span: span(),
        };
        assert_eq!(
            err.to_string(),
            "argument mismatch calling 'setId': expected (int), found (string, int)"
        );
    }
}
