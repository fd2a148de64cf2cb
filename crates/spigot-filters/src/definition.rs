//! Filter definitions: the immutable metadata for one filter overload.
//!
//! A [`FilterDefinition`] pairs a canonical name and ordered parameter specs
//! with the callable that implements the filter. Definitions are built once,
//! at registration time, through [`FilterDefinition::builder`]; there is no
//! runtime introspection during resolution.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{BoxError, RegistrationError};
use crate::name::canonical;
use crate::scope::VariableScope;

/// Semantic type a declared parameter coerces its argument to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Accepts any scalar; numbers and booleans take their display form.
    Str,
    /// Signed integer; parses from integral numbers or `-?[0-9]+` strings.
    Int,
    /// Float; parses from any number or a numeric string.
    Float,
    /// Boolean; accepts `true`/`false` values or strings.
    Bool,
    /// No coercion; the value passes through untouched.
    Any,
}

impl ParamKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ParamKind::Str => "string",
            ParamKind::Int => "integer",
            ParamKind::Float => "float",
            ParamKind::Bool => "boolean",
            ParamKind::Any => "any",
        }
    }
}

/// One declared parameter: its semantic type and optional default value.
///
/// Specs are positional and exclude both the piped input and the scope
/// handle; the first spec describes the first argument written after the
/// filter name.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub kind: ParamKind,
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Call payload handed to a filter body.
pub struct FilterCall<'a> {
    /// The value being piped through this stage.
    pub input: &'a Value,
    /// Bound arguments in declaration order, already coerced, defaults filled.
    pub args: &'a [Value],
    /// The active variable scope. Present exactly when the definition was
    /// built with [`FilterBuilder::with_scope`].
    pub scope: Option<&'a dyn VariableScope>,
}

impl<'a> FilterCall<'a> {
    /// The bound argument at `index`, or `Null` past the end. Bound arguments
    /// always cover every declared parameter, so a well-typed body only falls
    /// into `Null` when it reads beyond its own declaration.
    pub fn arg(&self, index: usize) -> &Value {
        static NULL: Value = Value::Null;
        self.args.get(index).unwrap_or(&NULL)
    }
}

/// The callable backing a filter definition.
pub type FilterFn = Arc<dyn Fn(FilterCall<'_>) -> Result<Value, BoxError> + Send + Sync>;

/// Immutable metadata for one filter overload.
pub struct FilterDefinition {
    name: String,
    params: Vec<ParamSpec>,
    needs_scope: bool,
    callable: FilterFn,
}

impl FilterDefinition {
    /// Starts building a definition. `declared` is normalized to its
    /// canonical snake_case form, so `"MoneyWithUnderscore"` registers the
    /// filter reachable as `money_with_underscore`.
    pub fn builder(declared: &str) -> FilterBuilder {
        FilterBuilder {
            name: canonical(declared),
            params: Vec::new(),
            needs_scope: false,
            error: None,
        }
    }

    /// Canonical name this overload is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter specs, excluding the piped input and the scope.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Whether the callable receives the variable scope.
    pub fn needs_scope(&self) -> bool {
        self.needs_scope
    }

    /// Total declared parameter count. Identifies the overload within a
    /// provider's overload set.
    pub fn total_params(&self) -> usize {
        self.params.len()
    }

    /// Count of parameters without defaults.
    pub fn required_params(&self) -> usize {
        self.params.iter().filter(|p| !p.has_default()).count()
    }

    /// Whether this overload accepts `supplied` pipe arguments.
    pub fn accepts(&self, supplied: usize) -> bool {
        self.required_params() <= supplied && supplied <= self.total_params()
    }

    pub(crate) fn callable(&self) -> &FilterFn {
        &self.callable
    }
}

impl fmt::Debug for FilterDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterDefinition")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("needs_scope", &self.needs_scope)
            .finish_non_exhaustive()
    }
}

/// Fluent builder for [`FilterDefinition`].
///
/// # Example
///
/// ```
/// use spigot_filters::{FilterDefinition, ParamKind};
/// use serde_json::json;
///
/// let adjust = FilterDefinition::builder("Adjust")
///     .param_default(ParamKind::Int, json!(10))
///     .build(|call| {
///         let input = call.input.as_i64().unwrap_or(0);
///         let offset = call.arg(0).as_i64().unwrap_or(0);
///         Ok(json!(input + offset))
///     })
///     .unwrap();
///
/// assert_eq!(adjust.name(), "adjust");
/// assert_eq!(adjust.required_params(), 0);
/// assert_eq!(adjust.total_params(), 1);
/// ```
pub struct FilterBuilder {
    name: String,
    params: Vec<ParamSpec>,
    needs_scope: bool,
    error: Option<RegistrationError>,
}

impl FilterBuilder {
    /// Declares a required parameter.
    pub fn param(mut self, kind: ParamKind) -> Self {
        if self.params.iter().any(ParamSpec::has_default) && self.error.is_none() {
            self.error = Some(RegistrationError::RequiredAfterOptional {
                name: self.name.clone(),
            });
        }
        self.params.push(ParamSpec {
            kind,
            default: None,
        });
        self
    }

    /// Declares a parameter with a default value, making it optional.
    pub fn param_default(mut self, kind: ParamKind, default: impl Into<Value>) -> Self {
        self.params.push(ParamSpec {
            kind,
            default: Some(default.into()),
        });
        self
    }

    /// Marks the filter as scope-aware: the callable receives the active
    /// variable scope without the template author passing it as an argument.
    pub fn with_scope(mut self) -> Self {
        self.needs_scope = true;
        self
    }

    /// Finishes the definition with its callable.
    pub fn build<F>(self, callable: F) -> Result<FilterDefinition, RegistrationError>
    where
        F: Fn(FilterCall<'_>) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(FilterDefinition {
            name: self.name,
            params: self.params,
            needs_scope: self.needs_scope,
            callable: Arc::new(callable),
        })
    }
}
