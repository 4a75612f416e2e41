//! Runtime environment: a stack of frames.
//!
//! Each frame holds the current receiver (absent at top level) and a stack of
//! scopes. A method call or object construction pushes a frame, so top-level
//! variables are not visible inside method bodies.

use crate::value::{ObjectRef, Value};
use fxhash::FxHashMap;
use xenon_check::Ty;
use xenon_mem::Symbol;

/// A local variable or parameter with its declared type.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Declared type
    pub ty: Ty,
    /// Current value
    pub value: Value,
}

/// One activation: receiver plus nested scopes.
#[derive(Debug)]
pub struct Frame {
    receiver: Option<ObjectRef>,
    scopes: Vec<FxHashMap<Symbol, Binding>>,
}

impl Frame {
    /// Creates a frame with one empty scope.
    #[must_use]
    pub fn new(receiver: Option<ObjectRef>) -> Self {
        Self {
            receiver,
            scopes: vec![FxHashMap::default()],
        }
    }

    /// The implicit receiver.
    #[must_use]
    pub const fn receiver(&self) -> Option<&ObjectRef> {
        self.receiver.as_ref()
    }

    /// Innermost binding of `name`.
    #[must_use]
    pub fn lookup(&self, name: Symbol) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(&name))
    }

    /// Innermost binding of `name`, mutably.
    pub fn lookup_mut(&mut self, name: Symbol) -> Option<&mut Binding> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(&name))
    }

    /// Binds `name` in the innermost scope.
    pub fn define(&mut self, name: Symbol, ty: Ty, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, Binding { ty, value });
        }
    }

    fn new_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }
}

/// Stack of frames; the bottom frame is the top-level program.
#[derive(Debug)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    /// Creates an environment holding only the top-level frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new(None)],
        }
    }

    /// Number of frames above the top-level one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Pushes a frame for a call or construction.
    pub fn push_frame(&mut self, receiver: Option<ObjectRef>) {
        self.frames.push(Frame::new(receiver));
    }

    /// Pops the innermost frame; the top-level frame is never removed.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// The innermost frame.
    #[must_use]
    pub fn current(&self) -> &Frame {
        // `frames` is never empty.
        &self.frames[self.frames.len() - 1]
    }

    /// The innermost frame, mutably.
    pub fn current_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Enters a nested block scope in the current frame.
    pub fn new_scope(&mut self) {
        self.current_mut().new_scope();
    }

    /// Leaves the innermost block scope of the current frame.
    pub fn pop_scope(&mut self) {
        self.current_mut().pop_scope();
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
