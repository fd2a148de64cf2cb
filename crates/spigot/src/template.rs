//! Templates: text interleaved with `{{ expr }}` output nodes.

use std::sync::Arc;

use once_cell::sync::Lazy;
use spigot_filters::{FilterProvider, Registry, Snapshot};

use crate::builtins;
use crate::context::{Context, ErrorMode};
use crate::error::{RenderError, Result};
use crate::variable::Variable;

/// The process-wide filter registry, seeded with the standard filters.
static FILTERS: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    registry.register(builtins::provider());
    registry
});

/// The global snapshot active right now. Contexts capture this at creation.
pub(crate) fn global_snapshot() -> Arc<Snapshot> {
    FILTERS.snapshot()
}

#[derive(Debug)]
enum Node {
    Text(String),
    Output(Variable),
}

/// A parsed template.
///
/// Source text is split into literal runs and `{{ expr }}` output nodes;
/// rendering evaluates each node's pipe chain left to right and concatenates
/// the results. There are no control-flow tags.
///
/// # Example
///
/// ```
/// use spigot::{Context, Template};
///
/// let template = Template::parse("Hello, {{ name | upcase }}!").unwrap();
///
/// let mut context = Context::new();
/// context.set("name", "world");
/// assert_eq!(template.render_with(&context).unwrap(), "Hello, WORLD!");
/// ```
#[derive(Debug)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parses template source.
    pub fn parse(source: &str) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                nodes.push(Node::Text(rest[..start].to_string()));
            }
            let body = &rest[start + 2..];
            let end = body.find("}}").ok_or(RenderError::Syntax {
                message: "unclosed output tag".to_string(),
                position: offset + start,
            })?;

            let variable = Variable::parse(&body[..end]).map_err(|err| match err {
                // Reposition expression errors relative to the whole source.
                RenderError::Syntax { message, position } => RenderError::Syntax {
                    message,
                    position: offset + start + 2 + position,
                },
                other => other,
            })?;
            nodes.push(Node::Output(variable));

            let consumed = start + 2 + end + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            nodes.push(Node::Text(rest.to_string()));
        }

        Ok(Self { nodes })
    }

    /// Registers a filter provider process-wide.
    ///
    /// The registration persists for the application lifetime and supersedes
    /// earlier global definitions of every name the provider defines.
    /// Renders already in flight keep the snapshot they started with.
    pub fn register_filter(provider: FilterProvider) {
        FILTERS.register(provider);
    }

    /// Renders with a fresh strict-mode context holding no variables.
    pub fn render(&self) -> Result<String> {
        self.render_with(&Context::new())
    }

    /// Renders against an existing context.
    pub fn render_with(&self, context: &Context) -> Result<String> {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Output(variable) => out.push_str(&variable.render_str(context)?),
            }
        }
        Ok(out)
    }

    /// Renders with render-only options: override filter providers merged on
    /// top of the global scope for this render alone, and an error mode.
    /// Process-wide state is never touched.
    pub fn render_with_options(&self, options: RenderOptions) -> Result<String> {
        let mut context = Context::with_mode(options.error_mode);
        for provider in options.filters {
            context.add_filters(provider);
        }
        self.render_with(&context)
    }
}

/// Per-render settings for [`Template::render_with_options`].
#[derive(Default)]
pub struct RenderOptions {
    filters: Vec<FilterProvider>,
    error_mode: ErrorMode,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a render-only override provider. Later additions shadow earlier
    /// ones, and all of them shadow global registrations.
    pub fn filters(mut self, provider: FilterProvider) -> Self {
        self.filters.push(provider);
        self
    }

    pub fn error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }
}
