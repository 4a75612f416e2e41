//! Class registry.
//!
//! Built once per run by the checker and handed to the evaluator. Field
//! slots assigned here are the indices the evaluator uses for object storage.

use crate::types::Ty;
use fxhash::FxHashMap;
use xenon_mem::Symbol;
use xenon_syntax::Span;
use xenon_syntax::ast::Visibility;

/// Information about a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Field name
    pub name: Symbol,
    /// Declared type
    pub ty: Ty,
    /// Index into an object's field storage (declaration order)
    pub slot: usize,
    /// Inherited from the class
    pub visibility: Visibility,
}

/// Information about a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    /// Method name
    pub name: Symbol,
    /// Parameter names and types in order
    pub params: Vec<(Symbol, Ty)>,
    /// Return type
    pub return_ty: Ty,
    /// Index into the class's method list (declaration order)
    pub index: usize,
}

impl MethodInfo {
    /// Parameter types in order.
    pub fn param_types(&self) -> impl Iterator<Item = Ty> + '_ {
        self.params.iter().map(|(_, ty)| *ty)
    }
}

/// Information about a class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// Class name
    pub name: Symbol,
    /// Class visibility
    pub visibility: Visibility,
    /// Fields in slot order
    pub fields: Vec<FieldInfo>,
    /// Methods in declaration order
    pub methods: Vec<MethodInfo>,
    /// Location of the declaration
    pub span: Span,
}

impl ClassInfo {
    /// Creates a class entry with no members yet.
    #[must_use]
    pub const fn new(name: Symbol, visibility: Visibility, span: Span) -> Self {
        Self {
            name,
            visibility,
            fields: Vec::new(),
            methods: Vec::new(),
            span,
        }
    }

    /// Look up a field.
    #[must_use]
    pub fn field(&self, name: Symbol) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a method.
    #[must_use]
    pub fn method(&self, name: Symbol) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Number of field slots an instance needs.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// All classes of one program.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    /// Class definitions
    classes: FxHashMap<Symbol, ClassInfo>,
    /// Names in registration order
    order: Vec<Symbol>,
}

impl ClassRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class definition.
    ///
    /// Returns the previous entry if the name was already taken; the new
    /// entry is not stored in that case.
    pub fn register_class(&mut self, info: ClassInfo) -> Option<&ClassInfo> {
        if self.classes.contains_key(&info.name) {
            return self.classes.get(&info.name);
        }
        self.order.push(info.name);
        self.classes.insert(info.name, info);
        None
    }

    /// Look up a class definition.
    #[must_use]
    pub fn lookup_class(&self, name: Symbol) -> Option<&ClassInfo> {
        self.classes.get(&name)
    }

    /// Mutable access for filling in members.
    pub fn lookup_class_mut(&mut self, name: Symbol) -> Option<&mut ClassInfo> {
        self.classes.get_mut(&name)
    }

    /// Check if a class exists.
    #[must_use]
    pub fn has_class(&self, name: Symbol) -> bool {
        self.classes.contains_key(&name)
    }

    /// Classes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassInfo> {
        self.order.iter().filter_map(|name| self.classes.get(name))
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no class is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: u32) -> ClassInfo {
        ClassInfo::new(Symbol::new(name), Visibility::Private, Span::default())
    }

    #[test]
    fn test_registry_new() {
        let registry = ClassRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.has_class(Symbol::new(0)));
    }

    #[test]
    fn test_register_class() {
        let mut registry = ClassRegistry::new();
        let mut info = class(20);
        info.fields.push(FieldInfo {
            name: Symbol::new(21),
            ty: Ty::Int,
            slot: 0,
            visibility: Visibility::Private,
        });

        assert!(registry.register_class(info).is_none());
        assert!(registry.has_class(Symbol::new(20)));

        let lookup = registry.lookup_class(Symbol::new(20)).unwrap();
        assert_eq!(lookup.field_count(), 1);
        assert_eq!(lookup.field(Symbol::new(21)).map(|f| f.slot), Some(0));
        assert!(lookup.method(Symbol::new(21)).is_none());
    }

    #[test]
    fn test_register_duplicate_keeps_first() {
        let mut registry = ClassRegistry::new();
        let mut first = class(20);
        first.span = Span::new(0, 5, 1, 1, 1, 6);

        registry.register_class(first);
        let previous = registry.register_class(class(20)).map(|c| c.span);

        assert_eq!(previous, Some(Span::new(0, 5, 1, 1, 1, 6)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_iteration_follows_registration_order() {
        let mut registry = ClassRegistry::new();
        for name in [30, 20, 25] {
            registry.register_class(class(name));
        }

        let names: Vec<u32> = registry.iter().map(|c| c.name.as_u32()).collect();
        assert_eq!(names, [30, 20, 25]);
    }
}
