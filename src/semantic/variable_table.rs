use std::collections::HashMap;

use log::debug;

use crate::errors::Fault;

/// Runtime bindings, one map per active lexical scope. Index 0 is the
/// global scope and is never popped.
#[derive(Debug, Clone)]
pub struct VariableTable {
    scopes: Vec<HashMap<String, i64>>,
}

impl Default for VariableTable {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
        debug!("entered scope, depth {}", self.scopes.len());
    }

    pub fn drop_scope(&mut self) -> Result<(), Fault> {
        if self.scopes.len() <= 1 {
            return Err(Fault::LeavingGlobalScope);
        }
        self.scopes.pop();
        debug!("left scope, depth {}", self.scopes.len());
        Ok(())
    }

    /// Bind `name` in the innermost scope. Outer bindings of the same name
    /// are shadowed, not touched.
    pub fn declare(&mut self, name: &str, value: i64) -> Result<(), Fault> {
        let scope = self.innermost_mut();
        if scope.contains_key(name) {
            return Err(Fault::DuplicateDeclaration(name.to_string()));
        }
        scope.insert(name.to_string(), value);
        Ok(())
    }

    // Search from innermost to outermost scope.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name).copied())
    }

    pub fn lookup(&self, name: &str) -> Result<i64, Fault> {
        self.get(name).ok_or_else(|| Fault::UndefinedVariable(name.to_string()))
    }

    /// Update the nearest binding of `name`, or create one in the innermost
    /// scope when there is none.
    pub fn assign_or_create(&mut self, name: &str, value: i64) {
        if let Some(slot) = self.scopes.iter_mut().rev().find_map(|scope| scope.get_mut(name)) {
            *slot = value;
            return;
        }
        self.innermost_mut().insert(name.to_string(), value);
    }

    pub fn is_declared_in_current(&self, name: &str) -> bool {
        self.scopes.last().is_some_and(|scope| scope.contains_key(name))
    }

    pub fn get_scopes_len(&self) -> usize {
        self.scopes.len()
    }

    fn innermost_mut(&mut self) -> &mut HashMap<String, i64> {
        if self.scopes.is_empty() {
            self.scopes.push(HashMap::new());
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}
