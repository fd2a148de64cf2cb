//! Coercion of raw argument values to declared parameter types.

use serde_json::Value;

use crate::definition::ParamKind;
use crate::error::FilterError;

/// Coerces `value` to `kind`, or fails with [`FilterError::ArgumentType`]
/// naming the filter and the 1-based argument position.
pub(crate) fn to_kind(
    filter: &str,
    position: usize,
    kind: ParamKind,
    value: Value,
) -> Result<Value, FilterError> {
    match try_coerce(kind, &value) {
        Some(coerced) => Ok(coerced),
        None => Err(FilterError::ArgumentType {
            name: filter.to_string(),
            position,
            expected: kind.label(),
            value: value.to_string(),
        }),
    }
}

fn try_coerce(kind: ParamKind, value: &Value) -> Option<Value> {
    match kind {
        ParamKind::Any => Some(value.clone()),
        ParamKind::Int => match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::from(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Value::from(u))
                } else {
                    // Integral floats carry over; fractional ones do not.
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0)
                        .map(|f| Value::from(f as i64))
                }
            }
            Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
            _ => None,
        },
        ParamKind::Float => match value {
            Value::Number(n) => n.as_f64().map(Value::from),
            Value::String(s) => s.trim().parse::<f64>().ok().map(Value::from),
            _ => None,
        },
        ParamKind::Bool => match value {
            Value::Bool(b) => Some(Value::Bool(*b)),
            Value::String(s) => match s.as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
        ParamKind::Str => match value {
            Value::String(_) => Some(value.clone()),
            Value::Number(n) => Some(Value::String(n.to_string())),
            Value::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coerce(kind: ParamKind, value: Value) -> Result<Value, FilterError> {
        to_kind("test", 1, kind, value)
    }

    #[test]
    fn int_from_number_and_string() {
        assert_eq!(coerce(ParamKind::Int, json!(5)).unwrap(), json!(5));
        assert_eq!(coerce(ParamKind::Int, json!("-5")).unwrap(), json!(-5));
        assert_eq!(coerce(ParamKind::Int, json!(" 200 ")).unwrap(), json!(200));
        assert_eq!(coerce(ParamKind::Int, json!(3.0)).unwrap(), json!(3));
    }

    #[test]
    fn int_rejects_fractional_and_non_numeric() {
        assert!(coerce(ParamKind::Int, json!(3.5)).is_err());
        assert!(coerce(ParamKind::Int, json!("five")).is_err());
        assert!(coerce(ParamKind::Int, json!([1])).is_err());
    }

    #[test]
    fn float_from_number_and_string() {
        assert_eq!(coerce(ParamKind::Float, json!(2)).unwrap(), json!(2.0));
        assert_eq!(coerce(ParamKind::Float, json!("-1.5")).unwrap(), json!(-1.5));
        assert!(coerce(ParamKind::Float, json!("abc")).is_err());
    }

    #[test]
    fn bool_from_bool_and_string() {
        assert_eq!(coerce(ParamKind::Bool, json!(true)).unwrap(), json!(true));
        assert_eq!(coerce(ParamKind::Bool, json!("false")).unwrap(), json!(false));
        assert!(coerce(ParamKind::Bool, json!(1)).is_err());
    }

    #[test]
    fn str_takes_scalar_display_forms() {
        assert_eq!(coerce(ParamKind::Str, json!("x")).unwrap(), json!("x"));
        assert_eq!(coerce(ParamKind::Str, json!(42)).unwrap(), json!("42"));
        assert_eq!(coerce(ParamKind::Str, json!(true)).unwrap(), json!("true"));
        assert!(coerce(ParamKind::Str, json!({"a": 1})).is_err());
    }

    #[test]
    fn any_passes_through() {
        assert_eq!(
            coerce(ParamKind::Any, json!({"a": 1})).unwrap(),
            json!({"a": 1})
        );
        assert_eq!(coerce(ParamKind::Any, Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn error_names_filter_and_position() {
        let err = to_kind("adjust", 1, ParamKind::Int, json!("five")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("adjust"));
        assert!(message.contains("argument 1"));
        assert!(message.contains("integer"));
    }
}
