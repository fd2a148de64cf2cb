//! Error types for parsing and rendering.

use spigot_filters::FilterError;
use thiserror::Error;

/// Errors surfaced by template parsing and rendering.
///
/// Filter-engine errors pass through transparently so callers can match on
/// [`FilterError`] variants; the error kind and the offending filter name
/// and argument are part of the message.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Malformed template or pipe-expression markup.
    #[error("syntax error at offset {position}: {message}")]
    Syntax { message: String, position: usize },

    /// A filter failed to resolve, bind, or execute.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Context data did not serialize into template variables.
    #[error("context data error: {0}")]
    Data(String),
}

/// Result type for parsing and rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
