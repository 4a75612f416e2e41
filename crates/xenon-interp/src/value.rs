//! Runtime values and objects.
//!
//! Objects are shared through [`ObjectRef`] (`Rc<RefCell<Object>>`): copying
//! a value copies the reference, so every holder sees field updates. An
//! object is freed when its last reference goes away.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use xenon_check::Ty;
use xenon_mem::Symbol;

/// Shared, mutable handle to an object.
pub type ObjectRef = Rc<RefCell<Object>>;

/// A class instance.
#[derive(Debug)]
pub struct Object {
    /// Class symbol
    pub class: Symbol,
    /// Class name, kept for printing
    pub class_name: Rc<str>,
    /// Field values indexed by registry slot; `None` until the initializer ran
    pub fields: Vec<Option<Value>>,
}

impl Object {
    /// Creates an object with all fields uninitialized.
    #[must_use]
    pub fn new(class: Symbol, class_name: Rc<str>, field_count: usize) -> Self {
        Self {
            class,
            class_name,
            fields: vec![None; field_count],
        }
    }

    /// Wraps the object in a shared reference.
    #[must_use]
    pub fn into_ref(self) -> ObjectRef {
        Rc::new(RefCell::new(self))
    }
}

/// A Xenon runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    /// 64-bit signed integer
    Int(i64),
    /// Boolean
    Bool(bool),
    /// Immutable string
    Str(Rc<str>),
    /// Result of a `void` call
    Void,
    /// Reference to an object
    Object(ObjectRef),
}

/// Coarse runtime tag of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// [`Value::Int`]
    Int,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Str`]
    Str,
    /// [`Value::Void`]
    Void,
    /// [`Value::Object`]
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Str => "string",
            Self::Void => "void",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Builds a string value.
    #[must_use]
    pub fn str(s: &str) -> Self {
        Self::Str(Rc::from(s))
    }

    /// The runtime tag.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::Bool(_) => ValueKind::Bool,
            Self::Str(_) => ValueKind::Str,
            Self::Void => ValueKind::Void,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Name used in runtime type errors: the class name for objects, the
    /// kind otherwise.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Object(obj) => obj.borrow().class_name.to_string(),
            other => other.kind().to_string(),
        }
    }

    /// Returns `true` if the value's dynamic type is `ty`.
    ///
    /// ```
    /// use xenon_check::Ty;
    /// use xenon_interp::Value;
    ///
    /// assert!(Value::Int(1).matches(Ty::Int));
    /// assert!(!Value::Bool(true).matches(Ty::Int));
    /// ```
    #[must_use]
    pub fn matches(&self, ty: Ty) -> bool {
        match (self, ty) {
            (Self::Int(_), Ty::Int)
            | (Self::Bool(_), Ty::Bool)
            | (Self::Str(_), Ty::Str)
            | (Self::Void, Ty::Void) => true,
            (Self::Object(obj), Ty::Class(class)) => obj.borrow().class == class,
            _ => false,
        }
    }

    /// The object behind the value, if any.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

/// Integers, booleans and strings compare by value; objects by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Void, Self::Void) => true,
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// The form `print` writes.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => f.write_str(s),
            Self::Void => Ok(()),
            Self::Object(obj) => write!(f, "<{} object>", obj.borrow().class_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(class: u32, name: &str) -> ObjectRef {
        Object::new(Symbol::new(class), Rc::from(name), 1).into_ref()
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-42).to_string(), "-42");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::str("hi there").to_string(), "hi there");
        assert_eq!(Value::Object(object(1, "Student")).to_string(), "<Student object>");
        assert_eq!(Value::Void.to_string(), "");
    }

    #[test]
    fn test_object_identity() {
        let a = object(1, "A");
        let b = object(1, "A");

        assert_eq!(Value::Object(a.clone()), Value::Object(a.clone()));
        assert_ne!(Value::Object(a), Value::Object(b));
    }

    #[test]
    fn test_shared_mutation() {
        let a = object(1, "A");
        let alias = Value::Object(a.clone());

        a.borrow_mut().fields[0] = Some(Value::Int(7));
        let seen = alias.as_object().unwrap().borrow().fields[0].clone();
        assert_eq!(seen, Some(Value::Int(7)));
    }

    #[test]
    fn test_matches() {
        let a = Value::Object(object(3, "A"));
        assert!(a.matches(Ty::Class(Symbol::new(3))));
        assert!(!a.matches(Ty::Class(Symbol::new(4))));
        assert!(Value::str("x").matches(Ty::Str));
        assert!(Value::Void.matches(Ty::Void));
        assert!(!Value::Int(0).matches(Ty::Bool));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Int(1).type_name(), "int");
        assert_eq!(Value::Object(object(3, "Point")).type_name(), "Point");
    }
}
