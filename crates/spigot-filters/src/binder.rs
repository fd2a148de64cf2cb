//! Argument binding: raw parsed arguments to coerced, default-filled values.

use serde_json::Value;

use crate::coerce;
use crate::definition::FilterDefinition;
use crate::error::{FilterError, Result};
use crate::scope::VariableScope;

/// A filter argument as delivered by the parser: a literal value, or a
/// variable reference resolved against the render scope at bind time.
#[derive(Debug, Clone, PartialEq)]
pub enum RawArgument {
    Literal(Value),
    Variable(String),
}

impl RawArgument {
    /// The argument's value in `scope`. Unbound variable references resolve
    /// to `Null`, matching the scope's treatment of unknown names elsewhere.
    pub fn resolve(&self, scope: &dyn VariableScope) -> Value {
        match self {
            RawArgument::Literal(value) => value.clone(),
            RawArgument::Variable(path) => scope.lookup(path).unwrap_or(Value::Null),
        }
    }
}

/// Binds `raw` positionally to `definition`'s parameter specs.
///
/// Parameters beyond the supplied count take their declared defaults;
/// supplied values are coerced to each parameter's semantic type. The arity
/// range is re-validated here even though the resolver already excludes
/// non-matching overloads, so the binder is safe to call directly.
pub fn bind(
    definition: &FilterDefinition,
    raw: &[RawArgument],
    scope: &dyn VariableScope,
) -> Result<Vec<Value>> {
    if !definition.accepts(raw.len()) {
        return Err(FilterError::ArgumentCount {
            name: definition.name().to_string(),
            supplied: raw.len(),
        });
    }

    let mut bound = Vec::with_capacity(definition.total_params());
    for (index, spec) in definition.params().iter().enumerate() {
        match raw.get(index) {
            Some(argument) => {
                let value = argument.resolve(scope);
                bound.push(coerce::to_kind(
                    definition.name(),
                    index + 1,
                    spec.kind,
                    value,
                )?);
            }
            // accepts() guarantees every spec past the supplied count has a
            // default.
            None => bound.push(spec.default.clone().unwrap_or(Value::Null)),
        }
    }
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ParamKind;
    use serde_json::json;
    use std::collections::HashMap;

    fn adjust() -> FilterDefinition {
        FilterDefinition::builder("adjust")
            .param_default(ParamKind::Int, json!(10))
            .build(|call| Ok(call.arg(0).clone()))
            .unwrap()
    }

    fn empty_scope() -> HashMap<String, Value> {
        HashMap::new()
    }

    #[test]
    fn literal_binds_with_coercion() {
        let bound = bind(
            &adjust(),
            &[RawArgument::Literal(json!("-5"))],
            &empty_scope(),
        )
        .unwrap();
        assert_eq!(bound, vec![json!(-5)]);
    }

    #[test]
    fn missing_argument_takes_default() {
        let bound = bind(&adjust(), &[], &empty_scope()).unwrap();
        assert_eq!(bound, vec![json!(10)]);
    }

    #[test]
    fn variable_reference_resolves_through_scope() {
        let mut scope = empty_scope();
        scope.insert("offset".to_string(), json!(5));

        let bound = bind(
            &adjust(),
            &[RawArgument::Variable("offset".to_string())],
            &scope,
        )
        .unwrap();
        assert_eq!(bound, vec![json!(5)]);
    }

    #[test]
    fn unbound_variable_resolves_to_null_and_fails_typed_coercion() {
        let err = bind(
            &adjust(),
            &[RawArgument::Variable("missing".to_string())],
            &empty_scope(),
        )
        .unwrap_err();
        assert!(matches!(err, FilterError::ArgumentType { position: 1, .. }));
    }

    #[test]
    fn uncoercible_literal_is_a_type_error() {
        let err = bind(
            &adjust(),
            &[RawArgument::Literal(json!("five"))],
            &empty_scope(),
        )
        .unwrap_err();
        assert!(
            matches!(err, FilterError::ArgumentType { name, position: 1, .. } if name == "adjust")
        );
    }

    #[test]
    fn arity_revalidated() {
        let err = bind(
            &adjust(),
            &[
                RawArgument::Literal(json!(1)),
                RawArgument::Literal(json!(2)),
            ],
            &empty_scope(),
        )
        .unwrap_err();
        assert!(matches!(err, FilterError::ArgumentCount { supplied: 2, .. }));
    }

    #[test]
    fn mixed_supplied_and_defaulted() {
        let def = FilterDefinition::builder("add_sub")
            .param(ParamKind::Int)
            .param_default(ParamKind::Int, json!(20))
            .build(|call| Ok(call.arg(0).clone()))
            .unwrap();

        let bound = bind(&def, &[RawArgument::Literal(json!(200))], &empty_scope()).unwrap();
        assert_eq!(bound, vec![json!(200), json!(20)]);
    }
}
