//! Filter invocation.

use serde_json::Value;

use crate::definition::{FilterCall, FilterDefinition};
use crate::error::{FilterError, Result};
use crate::scope::VariableScope;

/// Executes `definition`'s callable with the bound arguments.
///
/// The scope is injected ahead of the input exactly when the definition was
/// registered as scope-aware; it is never counted as an argument. Any error
/// from the body comes back as [`FilterError::Execution`] wrapping the
/// original cause. There is no retry.
pub fn invoke(
    definition: &FilterDefinition,
    input: &Value,
    args: &[Value],
    scope: &dyn VariableScope,
) -> Result<Value> {
    let call = FilterCall {
        input,
        args,
        scope: definition.needs_scope().then_some(scope),
    };
    (definition.callable())(call).map_err(|source| FilterError::Execution {
        name: definition.name().to_string(),
        source,
    })
}
