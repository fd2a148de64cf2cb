//! The variable-scope collaborator contract.

use std::collections::HashMap;

use serde_json::Value;

/// The active variable-binding scope of a render.
///
/// The engine consults the scope in two places: when a filter argument is a
/// variable reference rather than a literal, and as the object handed to a
/// scope-aware filter body (one registered with
/// [`with_scope`](crate::FilterBuilder::with_scope)).
pub trait VariableScope {
    /// Resolves a variable name (possibly a dotted path, depending on the
    /// implementation) to its value. `None` means the name is unbound.
    fn lookup(&self, name: &str) -> Option<Value>;
}

/// Plain maps act as scopes, which keeps the engine testable without a
/// rendering layer on top.
impl VariableScope for HashMap<String, Value> {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}
