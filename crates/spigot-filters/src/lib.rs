//! Filter registry and invocation engine for pipe-style template filters.
//!
//! This crate is the core of spigot's rendering pipeline: it resolves a
//! named, pipe-applied transformation (`value | money`, `value | adjust: 5`)
//! to a concrete callable, binds arguments to it (defaults, semantic-type
//! coercion, optional injection of the active variable scope), and executes
//! it, feeding each stage's result into the next.
//!
//! It knows nothing about template syntax. The parsing of `{{ ... }}` nodes
//! into [`FilterApplication`] chains and the variable store live in the
//! `spigot` crate; this one takes the parsed chain and a
//! [`VariableScope`] and produces the next value.
//!
//! # Quick Start
//!
//! ```
//! use spigot_filters::{
//!     apply_chain, FilterApplication, FilterDefinition, FilterLookup, FilterProvider,
//!     ParamKind, RawArgument, Registry,
//! };
//! use serde_json::{json, Value};
//! use std::collections::HashMap;
//!
//! // Definitions carry their parameter specs; no reflection at call time.
//! let mut provider = FilterProvider::new();
//! provider.add(
//!     FilterDefinition::builder("Adjust")
//!         .param_default(ParamKind::Int, json!(10))
//!         .build(|call| {
//!             let input = call.input.as_i64().unwrap_or(0);
//!             let offset = call.arg(0).as_i64().unwrap_or(0);
//!             Ok(json!(input + offset))
//!         })
//!         .unwrap(),
//! ).unwrap();
//!
//! let registry = Registry::new();
//! registry.register(provider);
//! let snapshot = registry.snapshot();
//!
//! let scope: HashMap<String, Value> = HashMap::new();
//! let lookup = FilterLookup::new(&[], &snapshot);
//! let chain = [FilterApplication::new(
//!     "adjust",
//!     vec![RawArgument::Literal(json!(-5))],
//! )];
//!
//! let out = apply_chain(&lookup, &scope, json!(1000), &chain).unwrap();
//! assert_eq!(out, json!(995));
//! ```
//!
//! # Scopes and Precedence
//!
//! Providers register at two levels. A [`Registry`] holds the process-wide
//! set as copy-on-write [`Snapshot`]s: registering never disturbs renders
//! already in flight, and within a snapshot the most recently registered
//! provider fully replaces earlier definitions of any name it defines. A
//! [`FilterLookup`] layers a render's local providers (context-attached
//! filters and render-only overrides) over one snapshot; local definitions
//! shadow global ones name-by-name, whole overload set at a time.
//!
//! # Overloads
//!
//! Definitions sharing a name within one provider differ by declared
//! parameter count. Resolution accepts an overload when the supplied
//! argument count falls in its `required..=total` range and tie-breaks to
//! the smallest total at or above the supplied count. Supplying more
//! arguments than every overload declares is a hard error, never silent
//! truncation.

mod binder;
mod chain;
mod coerce;
mod definition;
mod error;
mod invoker;
mod name;
mod provider;
mod registry;
mod resolver;
mod scope;

pub use binder::{bind, RawArgument};
pub use chain::{apply_chain, FilterApplication};
pub use definition::{FilterBuilder, FilterCall, FilterDefinition, FilterFn, ParamKind, ParamSpec};
pub use error::{BoxError, FilterError, RegistrationError, Result};
pub use invoker::invoke;
pub use name::canonical;
pub use provider::FilterProvider;
pub use registry::{FilterLookup, Registry, Snapshot};
pub use scope::VariableScope;
