//! Guaranteed release of lexical scopes.
//!
//! [`ScopedInterpreter`] pushes a scope on creation and pops it when
//! dropped, so the table stays balanced when a statement inside the scope
//! fails with `?` or panics.

use std::ops::{Deref, DerefMut};

use log::error;

use super::Interpreter;

pub struct ScopedInterpreter<'guard, R, W> {
    interpreter: &'guard mut Interpreter<R, W>,
}

impl<R, W> Drop for ScopedInterpreter<'_, R, W> {
    fn drop(&mut self) {
        if let Err(fault) = self.interpreter.table.drop_scope() {
            error!("unbalanced scope stack: {}", fault);
        }
    }
}

impl<R, W> Deref for ScopedInterpreter<'_, R, W> {
    type Target = Interpreter<R, W>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl<R, W> DerefMut for ScopedInterpreter<'_, R, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<R, W> Interpreter<R, W> {
    /// Enter a new lexical scope, left again when the guard is dropped.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_, R, W> {
        self.table.push_scope();
        ScopedInterpreter { interpreter: self }
    }
}
