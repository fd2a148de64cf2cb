//! Render contexts: the variable store and per-render filter scope.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use spigot_filters::{FilterLookup, FilterProvider, Snapshot, VariableScope};

use crate::error::{RenderError, Result};
use crate::template;

/// What happens when a filter fails to resolve or bind.
///
/// In `Strict` mode the error surfaces to the caller and aborts the render.
/// In `Permissive` mode the output node evaluates to the empty value and the
/// render continues. That substitution is behavior-affecting; reach for it
/// only when partial output beats no output. Faults raised *inside* a filter body abort the
/// render in both modes; the body may already have had side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    #[default]
    Strict,
    Permissive,
}

/// The state owned by one render: variable bindings, locally attached filter
/// providers, the global registry snapshot captured at creation, and the
/// error policy.
///
/// A context is exclusively owned by its render and discarded with it.
/// Because the snapshot is captured in [`Context::new`], global filter
/// registrations made afterwards are invisible to this render.
///
/// # Example
///
/// ```
/// use spigot::{Context, Variable};
///
/// let mut context = Context::new();
/// context.set("var", "blub");
///
/// let variable = Variable::parse("var | capitalize").unwrap();
/// assert_eq!(variable.render_str(&context).unwrap(), "Blub");
/// ```
#[derive(Debug)]
pub struct Context {
    vars: HashMap<String, Value>,
    locals: Vec<Arc<FilterProvider>>,
    global: Arc<Snapshot>,
    mode: ErrorMode,
}

impl Context {
    /// Creates a context with strict error handling, capturing the global
    /// filter snapshot active right now.
    pub fn new() -> Self {
        Self::with_mode(ErrorMode::Strict)
    }

    pub fn with_mode(mode: ErrorMode) -> Self {
        Self {
            vars: HashMap::new(),
            locals: Vec::new(),
            global: template::global_snapshot(),
            mode,
        }
    }

    /// Creates a context whose variables come from serializing `data`.
    ///
    /// `data` must serialize to an object; each top-level entry becomes a
    /// template variable.
    pub fn with_data<T: Serialize>(data: &T) -> Result<Self> {
        let mut context = Self::new();
        context.merge_data(data)?;
        Ok(context)
    }

    /// Serializes `data` and merges its top-level entries into the variable
    /// store, overwriting existing names.
    pub fn merge_data<T: Serialize>(&mut self, data: &T) -> Result<()> {
        let value =
            serde_json::to_value(data).map_err(|err| RenderError::Data(err.to_string()))?;
        match value {
            Value::Object(map) => {
                for (name, value) in map {
                    self.vars.insert(name, value);
                }
                Ok(())
            }
            other => Err(RenderError::Data(format!(
                "expected an object of variables, got {}",
                other
            ))),
        }
    }

    /// Binds a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Resolves a variable name or dotted path (`user.name`, `items.0`)
    /// against the store.
    pub fn get(&self, path: &str) -> Option<Value> {
        if let Some(value) = self.vars.get(path) {
            return Some(value.clone());
        }
        // Dotted paths walk objects by key and arrays by index.
        let (head, rest) = path.split_once('.')?;
        let mut current = self.vars.get(head)?;
        for part in rest.split('.') {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current.clone())
    }

    /// Attaches a filter provider to this render's local scope.
    ///
    /// Local definitions shadow global ones name-by-name, and a provider
    /// attached later shadows one attached earlier. The providers are
    /// discarded with the context; process-wide state is untouched.
    pub fn add_filters(&mut self, provider: FilterProvider) {
        self.locals.push(Arc::new(provider));
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.mode
    }

    pub fn set_error_mode(&mut self, mode: ErrorMode) {
        self.mode = mode;
    }

    /// The resolution view for this render: locals over the captured global
    /// snapshot.
    pub(crate) fn filter_lookup(&self) -> FilterLookup<'_> {
        FilterLookup::new(&self.locals, &self.global)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableScope for Context {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name)
    }
}
