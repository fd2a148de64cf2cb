//! Error types for the filter engine.

use thiserror::Error;

/// Boxed error raised inside a filter body.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while resolving, binding, or invoking a filter.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The filter name is not defined in any visible scope.
    #[error("unknown filter '{name}'")]
    NotFound {
        /// The name as it appeared in the pipe expression.
        name: String,
    },

    /// No overload's parameter-count range covers the supplied argument count.
    #[error("filter '{name}' cannot be called with {supplied} argument(s)")]
    ArgumentCount {
        name: String,
        /// Number of arguments supplied after the pipe, excluding the input.
        supplied: usize,
    },

    /// A supplied argument cannot be coerced to its parameter's semantic type.
    #[error("filter '{name}': argument {position} cannot be coerced to {expected} (got {value})")]
    ArgumentType {
        name: String,
        /// 1-based position among the pipe arguments.
        position: usize,
        expected: &'static str,
        value: String,
    },

    /// The filter body raised an error. Always fatal to the render.
    #[error("filter '{name}' failed: {source}")]
    Execution {
        name: String,
        #[source]
        source: BoxError,
    },
}

impl FilterError {
    /// Whether a permissive render driver may substitute an empty value and
    /// continue. Resolve and bind failures are recoverable; a fault raised by
    /// a filter body is not, since the body may have had side effects.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FilterError::Execution { .. })
    }
}

/// Errors detected while building definitions or assembling a provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Two overloads of one name in the same provider share a parameter count.
    #[error("filter '{name}' already has an overload with {arity} parameter(s)")]
    DuplicateArity { name: String, arity: usize },

    /// A required parameter was declared after a defaulted one, which would
    /// make the accepted arity range non-contiguous.
    #[error("filter '{name}' declares a required parameter after a defaulted one")]
    RequiredAfterOptional { name: String },
}

/// Result type for filter resolution, binding, and invocation.
pub type Result<T> = std::result::Result<T, FilterError>;
