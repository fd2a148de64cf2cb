//! Provider registration with copy-on-write snapshots.
//!
//! The process-wide registry is shared mutable state: registrations may race
//! with renders already in flight. Rather than locking every lookup, each
//! [`Registry::register`] call produces a new immutable [`Snapshot`]; a
//! render captures the snapshot current at its start and is unaffected by
//! later registrations.
//!
//! Within a snapshot, a provider registered later fully replaces earlier
//! definitions of any name it defines; overload sets are never merged
//! across providers.

use std::sync::{Arc, RwLock};

use crate::definition::FilterDefinition;
use crate::provider::FilterProvider;

/// An immutable, versioned view of the registered providers.
#[derive(Debug, Default)]
pub struct Snapshot {
    providers: Vec<Arc<FilterProvider>>,
    version: u64,
}

impl Snapshot {
    /// Monotonic version, bumped on every registration.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The overload set for `name` from the most recently registered
    /// provider that defines it. Search stops at the first match.
    pub fn overloads(&self, name: &str) -> Option<&[Arc<FilterDefinition>]> {
        self.providers
            .iter()
            .rev()
            .find_map(|provider| provider.overloads(name))
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// A registry of filter providers handing out immutable snapshots.
///
/// `register` is safe to call from any thread while renders hold older
/// snapshots; they simply keep resolving against the view they started with.
#[derive(Debug, Default)]
pub struct Registry {
    current: RwLock<Arc<Snapshot>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `provider`, superseding prior definitions of every name it
    /// defines, and publishes a new snapshot.
    pub fn register(&self, provider: FilterProvider) {
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut providers = guard.providers.clone();
        providers.push(Arc::new(provider));
        *guard = Arc::new(Snapshot {
            providers,
            version: guard.version + 1,
        });
    }

    /// The snapshot active right now.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = match self.current.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(&guard)
    }
}

/// Per-render resolution view: local providers layered over a global snapshot.
///
/// `locals` holds the render's own providers in attachment order (filters
/// attached to the render context first, render-only overrides after) and
/// is scanned newest-first, so the most recently attached provider shadows
/// everything beneath it. Names not defined locally fall through to the
/// global snapshot. The first scope/provider defining a name wins and the
/// search stops; overload sets never merge across scopes.
#[derive(Debug, Clone, Copy)]
pub struct FilterLookup<'a> {
    locals: &'a [Arc<FilterProvider>],
    global: &'a Snapshot,
}

impl<'a> FilterLookup<'a> {
    pub fn new(locals: &'a [Arc<FilterProvider>], global: &'a Snapshot) -> Self {
        Self { locals, global }
    }

    /// The visible overload set for `name`, honoring scope precedence.
    pub fn overloads(&self, name: &str) -> Option<&'a [Arc<FilterDefinition>]> {
        self.locals
            .iter()
            .rev()
            .find_map(|provider| provider.overloads(name))
            .or_else(|| self.global.overloads(name))
    }
}
