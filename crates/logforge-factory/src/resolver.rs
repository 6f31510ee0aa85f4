//! Symbolic-name resolution against an external registry
//!
//! When configuration references a component by bare symbolic name
//! instead of a construction spec, [`ServiceResolver`] turns the name
//! into a concrete entry: an exact registry hit wins, then a registered
//! component factory invoked with the registry as its sole argument.
//! Everything else is a [`CannotResolveComponent`]; callers never see a
//! second error kind at this boundary, and unresolved names always
//! raise rather than yielding a silent absence.

use std::collections::HashMap;
use std::sync::Arc;

use logforge_core::{Formatter, Handler, SharedProcessor};

use crate::error::CannotResolveComponent;
use crate::value::ConfigValue;

/// An entry a registry can hand out
#[derive(Clone)]
pub enum RegistryEntry {
    /// A built handler
    Handler(Arc<dyn Handler>),
    /// A built formatter
    Formatter(Arc<dyn Formatter>),
    /// A built processor
    Processor(SharedProcessor),
    /// Plain configuration data
    Config(ConfigValue),
}

impl RegistryEntry {
    /// Human-readable name of this entry's kind, as used in errors
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryEntry::Handler(_) => "handler",
            RegistryEntry::Formatter(_) => "formatter",
            RegistryEntry::Processor(_) => "processor",
            RegistryEntry::Config(_) => "configuration",
        }
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RegistryEntry::{}", self.kind())
    }
}

/// Named-lookup capability of an external service registry
pub trait ServiceRegistry: Send + Sync {
    /// Whether an entry exists under `id`
    fn has(&self, id: &str) -> bool;

    /// Fetch the entry under `id`, if any
    fn get(&self, id: &str) -> Option<RegistryEntry>;
}

/// A plain map-backed registry
///
/// Sufficient for embedding and for tests; any richer container can
/// implement [`ServiceRegistry`] instead.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl InMemoryRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry under `id`, replacing any previous one
    pub fn insert(&mut self, id: impl Into<String>, entry: RegistryEntry) {
        self.entries.insert(id.into(), entry);
    }
}

impl ServiceRegistry for InMemoryRegistry {
    fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    fn get(&self, id: &str) -> Option<RegistryEntry> {
        self.entries.get(id).cloned()
    }
}

/// Factory invoked with the registry as its sole argument
pub type ComponentFactoryFn = Arc<
    dyn Fn(&dyn ServiceRegistry) -> Result<RegistryEntry, Box<dyn std::error::Error + Send + Sync>>
        + Send
        + Sync,
>;

/// Resolves symbolic component names against a registry, with a
/// factory-table fallback
#[derive(Clone, Default)]
pub struct ServiceResolver {
    factories: HashMap<String, ComponentFactoryFn>,
}

impl ServiceResolver {
    /// Create a resolver with no registered factories
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fallback component factory under `name`
    pub fn register_factory<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&dyn ServiceRegistry) -> Result<RegistryEntry, Box<dyn std::error::Error + Send + Sync>>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Resolve `name` to a registry entry
    ///
    /// Resolution order, first match wins: (1) an exact entry in the
    /// registry; (2) a factory registered under `name`, invoked with
    /// the registry.
    ///
    /// # Errors
    /// [`CannotResolveComponent::UnknownService`] when neither path
    /// matches; [`CannotResolveComponent::ResolutionFailed`] wrapping
    /// the original failure when a factory fails.
    pub fn resolve(
        &self,
        registry: &dyn ServiceRegistry,
        name: &str,
    ) -> Result<RegistryEntry, CannotResolveComponent> {
        if let Some(entry) = registry.get(name) {
            return Ok(entry);
        }

        if let Some(factory) = self.factories.get(name) {
            return factory(registry).map_err(|source| CannotResolveComponent::ResolutionFailed {
                name: name.to_string(),
                source,
            });
        }

        Err(CannotResolveComponent::UnknownService(name.to_string()))
    }
}

impl std::fmt::Debug for ServiceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceResolver")
            .field("factories", &self.factories.len())
            .finish()
    }
}
