//! The built-in standard filters.
//!
//! These are registered through the same public builder API as user filters
//! and seed the process registry as its oldest provider, so any user
//! registration shadows them name-by-name.
//!
//! | Filter | Arguments | Behavior |
//! |--------|-----------|----------|
//! | `size` | | character/element/entry count |
//! | `upcase` / `downcase` | | case-map a string |
//! | `capitalize` | | uppercase the first character |
//! | `join` | glue = `" "` | join array elements into a string |
//! | `split` | pattern | split a string into an array |
//! | `sort` | | sort, flattening nested arrays, wrapping scalars |
//! | `strip_html` | | remove `<...>` tags |
//! | `slice` | start, len = 1 | substring/subarray; negative start counts from the end |
//!
//! Filters are lenient about input types in the Liquid tradition: a filter
//! applied to a value it does not handle passes the value through unchanged
//! rather than erroring.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};
use spigot_filters::{FilterDefinition, FilterProvider, ParamKind, RegistrationError};

use crate::variable::to_output;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static pattern compiles"));

/// Builds the standard filter provider.
pub fn provider() -> FilterProvider {
    build().expect("built-in filter definitions are valid")
}

fn build() -> Result<FilterProvider, RegistrationError> {
    let mut provider = FilterProvider::new();

    provider.add(FilterDefinition::builder("size").build(|call| {
        let size = match call.input {
            Value::String(text) => text.chars().count(),
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        };
        Ok(json!(size))
    })?)?;

    provider.add(FilterDefinition::builder("upcase").build(|call| {
        Ok(match call.input {
            Value::String(text) => json!(text.to_uppercase()),
            other => other.clone(),
        })
    })?)?;

    provider.add(FilterDefinition::builder("downcase").build(|call| {
        Ok(match call.input {
            Value::String(text) => json!(text.to_lowercase()),
            other => other.clone(),
        })
    })?)?;

    provider.add(FilterDefinition::builder("capitalize").build(|call| {
        Ok(match call.input {
            Value::String(text) => {
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => {
                        json!(first.to_uppercase().collect::<String>() + chars.as_str())
                    }
                    None => json!(""),
                }
            }
            other => other.clone(),
        })
    })?)?;

    provider.add(
        FilterDefinition::builder("join")
            .param_default(ParamKind::Str, json!(" "))
            .build(|call| {
                let glue = call.arg(0).as_str().unwrap_or(" ");
                Ok(match call.input {
                    Value::Array(items) => {
                        json!(items.iter().map(to_output).collect::<Vec<_>>().join(glue))
                    }
                    other => other.clone(),
                })
            })?,
    )?;

    provider.add(
        FilterDefinition::builder("split")
            .param(ParamKind::Str)
            .build(|call| {
                let pattern = call.arg(0).as_str().unwrap_or("");
                Ok(match call.input {
                    Value::String(text) if pattern.is_empty() => {
                        json!(text.chars().map(String::from).collect::<Vec<_>>())
                    }
                    Value::String(text) => {
                        json!(text.split(pattern).map(str::to_string).collect::<Vec<_>>())
                    }
                    other => other.clone(),
                })
            })?,
    )?;

    provider.add(FilterDefinition::builder("sort").build(|call| {
        let mut items: Vec<Value> = match call.input {
            Value::Array(values) => values
                .iter()
                .flat_map(|value| match value {
                    Value::Array(inner) => inner.clone(),
                    other => vec![other.clone()],
                })
                .collect(),
            Value::Null => Vec::new(),
            other => vec![other.clone()],
        };
        items.sort_by(compare_values);
        Ok(Value::Array(items))
    })?)?;

    provider.add(FilterDefinition::builder("StripHTML").build(|call| {
        Ok(match call.input {
            Value::String(text) => json!(HTML_TAG.replace_all(text, "").into_owned()),
            other => other.clone(),
        })
    })?)?;

    provider.add(
        FilterDefinition::builder("slice")
            .param(ParamKind::Int)
            .param_default(ParamKind::Int, json!(1))
            .build(|call| {
                let start = call.arg(0).as_i64().unwrap_or(0);
                let len = call.arg(1).as_i64().unwrap_or(1).max(0) as usize;
                Ok(match call.input {
                    Value::String(text) => {
                        let chars: Vec<char> = text.chars().collect();
                        match slice_range(start, len, chars.len()) {
                            Some((from, to)) => json!(chars[from..to].iter().collect::<String>()),
                            None => Value::Null,
                        }
                    }
                    Value::Array(items) => match slice_range(start, len, items.len()) {
                        Some((from, to)) => Value::Array(items[from..to].to_vec()),
                        None => Value::Null,
                    },
                    other => other.clone(),
                })
            })?,
    )?;

    Ok(provider)
}

fn compare_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Maps a signed start and length onto `0..total`. A negative start counts
/// from the end. A start past the end has no slice at all, distinct from an
/// empty slice exactly at the end.
fn slice_range(start: i64, len: usize, total: usize) -> Option<(usize, usize)> {
    let from = if start < 0 {
        start + total as i64
    } else {
        start
    };
    if from < 0 || from > total as i64 {
        return None;
    }
    let from = from as usize;
    Some((from, (from + len).min(total)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, Variable};

    fn eval(markup: &str, input: Value) -> Value {
        let mut context = Context::new();
        context.set("var", input);
        Variable::parse(markup).unwrap().render(&context).unwrap()
    }

    #[test]
    fn size_of_strings_and_arrays() {
        assert_eq!(eval("var | size", json!("abcd")), json!(4));
        assert_eq!(eval("var | size", json!([1, 2, 3])), json!(3));
        assert_eq!(eval("var | size", json!(9)), json!(0));
    }

    #[test]
    fn case_filters() {
        assert_eq!(eval("var | upcase", json!("blub")), json!("BLUB"));
        assert_eq!(eval("var | downcase", json!("BLUB")), json!("blub"));
        assert_eq!(eval("var | capitalize", json!("blub")), json!("Blub"));
    }

    #[test]
    fn join_defaults_to_space() {
        assert_eq!(eval("var | join", json!([1, 2, 3, 4])), json!("1 2 3 4"));
        assert_eq!(
            eval("var | join: ', '", json!(["a", "b"])),
            json!("a, b")
        );
    }

    #[test]
    fn split_on_pattern() {
        assert_eq!(eval("var | split: '~'", json!("a~b")), json!(["a", "b"]));
        assert_eq!(eval("var | split: ''", json!("ab")), json!(["a", "b"]));
    }

    #[test]
    fn sort_numbers_strings_scalars_and_nested() {
        assert_eq!(eval("var | sort", json!([2, 1, 4, 3])), json!([1, 2, 3, 4]));
        assert_eq!(
            eval("var | sort", json!(["expected", "as", "alphabetic"])),
            json!(["alphabetic", "as", "expected"])
        );
        assert_eq!(eval("var | sort", json!(3)), json!([3]));
        assert_eq!(
            eval("var | sort", json!([["flattened"], ["are"]])),
            json!(["are", "flattened"])
        );
    }

    #[test]
    fn strip_html_removes_tags() {
        assert_eq!(
            eval("var | strip_html", json!("<b>bla blub</a>")),
            json!("bla blub")
        );
    }

    #[test]
    fn slice_edge_cases() {
        assert_eq!(eval("var | slice: 0, 1", json!("blub")), json!("b"));
        assert_eq!(eval("var | slice: 0, 2", json!("blub")), json!("bl"));
        assert_eq!(eval("var | slice: 1", json!("blub")), json!("l"));
        assert_eq!(eval("var | slice: 4, 1", json!("blub")), json!(""));
        assert_eq!(eval("var | slice: -2, 2", json!("blub")), json!("ub"));
        assert_eq!(eval("var | slice: 5, 1", json!("blub")), Value::Null);
        assert_eq!(
            eval("var | slice: 1, 2", json!(["a", "b", "c", "d"])),
            json!(["b", "c"])
        );
    }

    #[test]
    fn slice_range_arithmetic() {
        assert_eq!(slice_range(0, 1, 4), Some((0, 1)));
        assert_eq!(slice_range(-2, 2, 4), Some((2, 4)));
        assert_eq!(slice_range(4, 1, 4), Some((4, 4)));
        assert_eq!(slice_range(5, 1, 4), None);
        assert_eq!(slice_range(-5, 1, 4), None);
    }
}
