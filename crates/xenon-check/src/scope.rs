//! Lexical scopes for local variables and parameters.
//!
//! A stack of maps from names to declared types. Inner scopes shadow outer
//! ones; a name may only be bound once per scope.
//!
//! ```
//! use xenon_check::{Scopes, Ty};
//! use xenon_mem::Symbol;
//!
//! let x = Symbol::new(20);
//! let mut scopes = Scopes::new();
//! scopes.bind(x, Ty::Int).unwrap();
//!
//! scopes.new_scope();
//! scopes.bind(x, Ty::Bool).unwrap(); // shadows
//! assert_eq!(scopes.lookup(x), Some(Ty::Bool));
//!
//! scopes.pop_scope();
//! assert_eq!(scopes.lookup(x), Some(Ty::Int));
//! assert!(scopes.bind(x, Ty::Str).is_err());
//! ```

use crate::types::Ty;
use fxhash::FxHashMap;
use xenon_mem::Symbol;

/// Stack of scopes.
#[derive(Debug, Clone)]
pub struct Scopes {
    scopes: Vec<FxHashMap<Symbol, Ty>>,
}

impl Scopes {
    /// Creates a stack with one empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Enter a new scope.
    pub fn new_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Exit the current scope. The outermost scope is never removed.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Binds `name` in the innermost scope.
    ///
    /// # Errors
    ///
    /// Returns the existing type if `name` is already bound in that scope.
    pub fn bind(&mut self, name: Symbol, ty: Ty) -> Result<(), Ty> {
        let Some(scope) = self.scopes.last_mut() else {
            return Ok(());
        };
        if let Some(existing) = scope.get(&name) {
            return Err(*existing);
        }
        scope.insert(name, ty);
        Ok(())
    }

    /// Looks `name` up from the innermost scope outwards.
    #[must_use]
    pub fn lookup(&self, name: Symbol) -> Option<Ty> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&name).copied())
    }

    /// Number of scopes on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}
