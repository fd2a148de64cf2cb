//! Output-node expressions: an entry term piped through a filter chain.

use serde_json::Value;
use spigot_filters::{apply_chain, FilterApplication, RawArgument};

use crate::context::{Context, ErrorMode};
use crate::error::{RenderError, Result};
use crate::markup;

/// A parsed `entry | filter: args` expression.
///
/// This is the unit of evaluation behind every `{{ ... }}` node, usable on
/// its own when there is no surrounding template text.
///
/// # Example
///
/// ```
/// use spigot::{Context, Variable};
/// use serde_json::json;
///
/// let mut context = Context::new();
/// context.set("var", "a~b");
///
/// let variable = Variable::parse("var | split: '~'").unwrap();
/// assert_eq!(variable.render(&context).unwrap(), json!(["a", "b"]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    entry: RawArgument,
    chain: Vec<FilterApplication>,
}

impl Variable {
    /// Parses pipe-expression markup.
    pub fn parse(markup: &str) -> Result<Self> {
        let parsed = markup::parse_expression(markup)?;
        Ok(Self {
            entry: parsed.entry,
            chain: parsed.chain,
        })
    }

    /// Evaluates the expression against `context`, honoring its error mode:
    /// in permissive mode a filter that fails to resolve or bind yields
    /// `Null` instead of an error. Execution faults propagate in both modes.
    pub fn render(&self, context: &Context) -> Result<Value> {
        match self.render_strict(context) {
            Err(RenderError::Filter(err))
                if context.error_mode() == ErrorMode::Permissive && err.is_recoverable() =>
            {
                Ok(Value::Null)
            }
            other => other,
        }
    }

    fn render_strict(&self, context: &Context) -> Result<Value> {
        let initial = self.entry.resolve(context);
        let lookup = context.filter_lookup();
        Ok(apply_chain(&lookup, context, initial, &self.chain)?)
    }

    /// Evaluates and converts the terminal value to output text.
    pub fn render_str(&self, context: &Context) -> Result<String> {
        Ok(to_output(&self.render(context)?))
    }
}

/// Converts a terminal value to output text: strings and scalars take their
/// display form, `Null` is empty, arrays concatenate element-wise, and
/// objects fall back to their JSON form.
pub(crate) fn to_output(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Array(items) => items.iter().map(to_output).collect(),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literal_entry_needs_no_variables() {
        let variable = Variable::parse("'A' | upcase").unwrap();
        assert_eq!(variable.render(&Context::new()).unwrap(), json!("A"));
    }

    #[test]
    fn variable_entry_resolves_through_context() {
        let mut context = Context::new();
        context.set("var", "abcd");

        let variable = Variable::parse("var | size").unwrap();
        assert_eq!(variable.render(&context).unwrap(), json!(4));
    }

    #[test]
    fn unbound_entry_is_null() {
        let variable = Variable::parse("missing").unwrap();
        assert_eq!(variable.render(&Context::new()).unwrap(), Value::Null);
        assert_eq!(variable.render_str(&Context::new()).unwrap(), "");
    }

    #[test]
    fn strict_mode_surfaces_unknown_filters() {
        let mut context = Context::new();
        context.set("var", 1000);

        let variable = Variable::parse("var | syzzy").unwrap();
        let err = variable.render(&context).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Filter(spigot_filters::FilterError::NotFound { .. })
        ));
    }

    #[test]
    fn permissive_mode_substitutes_empty() {
        let mut context = Context::with_mode(ErrorMode::Permissive);
        context.set("var", 1000);

        let variable = Variable::parse("var | syzzy").unwrap();
        assert_eq!(variable.render(&context).unwrap(), Value::Null);
        assert_eq!(variable.render_str(&context).unwrap(), "");
    }

    #[test]
    fn output_formatting() {
        assert_eq!(to_output(&Value::Null), "");
        assert_eq!(to_output(&json!("x")), "x");
        assert_eq!(to_output(&json!(1.5)), "1.5");
        assert_eq!(to_output(&json!(false)), "false");
        assert_eq!(to_output(&json!([1, 2, 3])), "123");
        assert_eq!(to_output(&json!({"a": 1})), "{\"a\":1}");
    }
}
