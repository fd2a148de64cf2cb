//! Filter providers: cohesive sets of definitions registered atomically.

use std::collections::HashMap;
use std::sync::Arc;

use crate::definition::FilterDefinition;
use crate::error::RegistrationError;

/// A named set of filter definitions that registers as one unit.
///
/// Definitions sharing a name within one provider form an overload set and
/// must have pairwise-distinct total parameter counts: the arity alone
/// identifies the overload. Providers are assembled once and become
/// immutable when handed to a registry or a render scope.
///
/// # Example
///
/// ```
/// use spigot_filters::{FilterDefinition, FilterProvider, ParamKind};
/// use serde_json::json;
///
/// let mut provider = FilterProvider::new();
/// provider
///     .add(
///         FilterDefinition::builder("Money")
///             .build(|call| Ok(json!(format!(" {}$ ", call.input))))
///             .unwrap(),
///     )
///     .unwrap();
///
/// assert!(provider.defines("money"));
/// ```
#[derive(Debug, Default)]
pub struct FilterProvider {
    overloads: HashMap<String, Vec<Arc<FilterDefinition>>>,
}

impl FilterProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition to this provider's overload set for its name.
    pub fn add(&mut self, definition: FilterDefinition) -> Result<(), RegistrationError> {
        let set = self
            .overloads
            .entry(definition.name().to_string())
            .or_default();
        if set
            .iter()
            .any(|existing| existing.total_params() == definition.total_params())
        {
            return Err(RegistrationError::DuplicateArity {
                name: definition.name().to_string(),
                arity: definition.total_params(),
            });
        }
        set.push(Arc::new(definition));
        Ok(())
    }

    /// The overload set registered under `name`, if any.
    pub fn overloads(&self, name: &str) -> Option<&[Arc<FilterDefinition>]> {
        self.overloads.get(name).map(Vec::as_slice)
    }

    /// Whether this provider defines `name`.
    pub fn defines(&self, name: &str) -> bool {
        self.overloads.contains_key(name)
    }

    /// Names defined by this provider, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.overloads.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.overloads.is_empty()
    }
}
