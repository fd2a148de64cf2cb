//! Overload resolution by name and arity.
//!
//! Resolution is ordinary data plus comparison: each candidate overload
//! accepts a supplied argument count when it falls inside the candidate's
//! `required..=total` parameter range, and ties break toward the smallest
//! total parameter count at or above the supplied count. No host-language
//! overloading, no runtime type inspection.

use std::sync::Arc;

use crate::definition::FilterDefinition;
use crate::error::{FilterError, Result};
use crate::registry::FilterLookup;

impl<'a> FilterLookup<'a> {
    /// Selects the filter definition for `name` given the number of supplied
    /// pipe arguments (excluding the piped input and the scope handle).
    ///
    /// Fails with [`FilterError::NotFound`] when no visible scope defines the
    /// name, and with [`FilterError::ArgumentCount`] when no overload's
    /// parameter range covers `supplied`, including the case where the
    /// author passed more arguments than any overload declares. Extra
    /// arguments are an error, never silently dropped.
    pub fn resolve(&self, name: &str, supplied: usize) -> Result<&'a Arc<FilterDefinition>> {
        let candidates = self.overloads(name).ok_or_else(|| FilterError::NotFound {
            name: name.to_string(),
        })?;
        select_overload(name, candidates, supplied)
    }
}

fn select_overload<'a>(
    name: &str,
    candidates: &'a [Arc<FilterDefinition>],
    supplied: usize,
) -> Result<&'a Arc<FilterDefinition>> {
    candidates
        .iter()
        .filter(|definition| definition.accepts(supplied))
        .min_by_key(|definition| definition.total_params())
        .ok_or_else(|| FilterError::ArgumentCount {
            name: name.to_string(),
            supplied,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ParamKind;
    use crate::provider::FilterProvider;
    use crate::registry::{Registry, Snapshot};
    use serde_json::json;

    fn overload(name: &str, required: usize, optional: usize) -> FilterDefinition {
        let mut builder = FilterDefinition::builder(name);
        for _ in 0..required {
            builder = builder.param(ParamKind::Any);
        }
        for _ in 0..optional {
            builder = builder.param_default(ParamKind::Any, json!(0));
        }
        builder.build(|call| Ok(call.input.clone())).unwrap()
    }

    fn lookup_for(provider: FilterProvider) -> (Registry, Arc<Snapshot>) {
        let registry = Registry::new();
        registry.register(provider);
        let snapshot = registry.snapshot();
        (registry, snapshot)
    }

    #[test]
    fn unknown_name_is_not_found() {
        let (_registry, snapshot) = lookup_for(FilterProvider::new());
        let lookup = FilterLookup::new(&[], &snapshot);

        let err = lookup.resolve("syzzy", 0).unwrap_err();
        assert!(matches!(err, FilterError::NotFound { name } if name == "syzzy"));
    }

    #[test]
    fn selects_by_arity_among_overloads() {
        let mut provider = FilterProvider::new();
        provider.add(overload("concat", 1, 0)).unwrap();
        provider.add(overload("concat", 2, 0)).unwrap();
        let (_registry, snapshot) = lookup_for(provider);
        let lookup = FilterLookup::new(&[], &snapshot);

        assert_eq!(lookup.resolve("concat", 1).unwrap().total_params(), 1);
        assert_eq!(lookup.resolve("concat", 2).unwrap().total_params(), 2);
    }

    #[test]
    fn tie_breaks_to_smallest_covering_total() {
        // With defaults, both overloads accept one argument; the smaller
        // total wins.
        let mut provider = FilterProvider::new();
        provider.add(overload("pick", 1, 1)).unwrap();
        provider.add(overload("pick", 1, 2)).unwrap();
        let (_registry, snapshot) = lookup_for(provider);
        let lookup = FilterLookup::new(&[], &snapshot);

        assert_eq!(lookup.resolve("pick", 1).unwrap().total_params(), 2);
        assert_eq!(lookup.resolve("pick", 3).unwrap().total_params(), 3);
    }

    #[test]
    fn defaults_widen_the_accepted_range() {
        let mut provider = FilterProvider::new();
        provider.add(overload("adjust", 0, 1)).unwrap();
        let (_registry, snapshot) = lookup_for(provider);
        let lookup = FilterLookup::new(&[], &snapshot);

        assert!(lookup.resolve("adjust", 0).is_ok());
        assert!(lookup.resolve("adjust", 1).is_ok());
    }

    #[test]
    fn too_many_arguments_is_an_error() {
        let mut provider = FilterProvider::new();
        provider.add(overload("adjust", 0, 1)).unwrap();
        let (_registry, snapshot) = lookup_for(provider);
        let lookup = FilterLookup::new(&[], &snapshot);

        let err = lookup.resolve("adjust", 2).unwrap_err();
        assert!(
            matches!(err, FilterError::ArgumentCount { name, supplied } if name == "adjust" && supplied == 2)
        );
    }

    #[test]
    fn too_few_arguments_is_an_error() {
        let mut provider = FilterProvider::new();
        provider.add(overload("add_sub", 1, 1)).unwrap();
        let (_registry, snapshot) = lookup_for(provider);
        let lookup = FilterLookup::new(&[], &snapshot);

        let err = lookup.resolve("add_sub", 0).unwrap_err();
        assert!(matches!(err, FilterError::ArgumentCount { supplied: 0, .. }));
    }
}
