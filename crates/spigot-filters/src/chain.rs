//! Pipe-chain evaluation.

use serde_json::Value;

use crate::binder::{self, RawArgument};
use crate::error::Result;
use crate::invoker;
use crate::registry::FilterLookup;
use crate::scope::VariableScope;

/// One parsed stage of a pipe chain: the filter name as written and its raw
/// arguments, in order. This is the hand-off format the parser delivers per
/// output node.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterApplication {
    pub name: String,
    pub args: Vec<RawArgument>,
}

impl FilterApplication {
    pub fn new(name: impl Into<String>, args: Vec<RawArgument>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Applies a parsed pipe chain to `initial`, left to right.
///
/// Each stage goes through resolve, bind, and invoke, strictly in that
/// order, and its result becomes the next stage's input. The first failure aborts
/// the whole chain; there is no backtracking to a different overload after a
/// bind or invoke failure.
pub fn apply_chain(
    lookup: &FilterLookup<'_>,
    scope: &dyn VariableScope,
    initial: Value,
    chain: &[FilterApplication],
) -> Result<Value> {
    let mut current = initial;
    for stage in chain {
        let definition = lookup.resolve(&stage.name, stage.args.len())?;
        let args = binder::bind(definition, &stage.args, scope)?;
        current = invoker::invoke(definition, &current, &args, scope)?;
    }
    Ok(current)
}
