//! # Spigot - Pipe-Filter Template Rendering
//!
//! Spigot renders templates whose output nodes pipe values through named
//! filters, Liquid-style:
//!
//! ```text
//! {{ total | money }}
//! {{ title | capitalize | slice: 0, 40 }}
//! ```
//!
//! The heavy lifting (provider registration, scoped precedence, overload
//! resolution by arity, argument binding with defaults and coercion, and
//! invocation) lives in the [`spigot-filters`](spigot_filters) engine crate,
//! re-exported here as [`filters`]. This crate adds the template surface:
//! expression parsing, the render [`Context`], the process-wide registry,
//! and the built-in standard filters.
//!
//! ## Core Concepts
//!
//! - [`Template`]: parsed source with `{{ expr }}` output nodes
//! - [`Variable`]: a single pipe expression, renderable on its own
//! - [`Context`]: per-render variable store, local filters, and error policy
//! - [`FilterProvider`] / [`FilterDefinition`]: explicit filter registration
//! - [`ErrorMode`]: strict (fail the render) vs permissive (empty output)
//!
//! ## Quick Start
//!
//! ```rust
//! use spigot::{Context, Template};
//!
//! let template = Template::parse("Hello, {{ name | upcase }}!").unwrap();
//!
//! let mut context = Context::new();
//! context.set("name", "world");
//! assert_eq!(template.render_with(&context).unwrap(), "Hello, WORLD!");
//! ```
//!
//! ## Registering Filters
//!
//! Filters declare their parameters explicitly at registration; nothing is
//! inferred at call time. Providers attach globally
//! ([`Template::register_filter`]), to one render's context
//! ([`Context::add_filters`]), or as render-only overrides
//! ([`RenderOptions::filters`]); local scopes shadow global name-by-name.
//!
//! ```rust
//! use spigot::{Context, FilterDefinition, FilterProvider, ParamKind, Variable};
//! use serde_json::json;
//!
//! let mut provider = FilterProvider::new();
//! provider
//!     .add(
//!         FilterDefinition::builder("Adjust")
//!             .param_default(ParamKind::Int, json!(10))
//!             .build(|call| {
//!                 let input = call.input.as_i64().unwrap_or(0);
//!                 let offset = call.arg(0).as_i64().unwrap_or(0);
//!                 Ok(json!(input + offset))
//!             })
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! let mut context = Context::new();
//! context.set("var", 1000);
//! context.add_filters(provider);
//!
//! let variable = Variable::parse("var | adjust: -5").unwrap();
//! assert_eq!(variable.render(&context).unwrap(), json!(995));
//! ```
//!
//! Scope-aware filters (built with
//! [`with_scope`](spigot_filters::FilterBuilder::with_scope)) additionally
//! receive the active variable scope without the template author passing it.

pub mod builtins;
mod context;
mod error;
mod markup;
mod template;
mod variable;

pub use context::{Context, ErrorMode};
pub use error::{RenderError, Result};
pub use template::{RenderOptions, Template};
pub use variable::Variable;

// Re-export the engine crate and its registration surface so most users
// only depend on `spigot`.
pub use spigot_filters as filters;
pub use spigot_filters::{
    canonical, BoxError, FilterBuilder, FilterCall, FilterDefinition, FilterError,
    FilterProvider, ParamKind, RegistrationError, VariableScope,
};
