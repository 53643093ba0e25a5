//! Lookups injected into [`BackendComposer`](crate::BackendComposer).
//!
//! - [`BackendRegistry`] maps a database alias to its settings
//! - [`EngineResolver`] maps an `ENGINE` locator to an implementation

use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use std::sync::Arc;

use dbindexer_core::Settings;
use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::Engine;

/// Registry of configured databases, keyed by alias.
pub trait BackendRegistry {
    /// Settings of the database registered as `alias`.
    fn descriptor(&self, alias: &str) -> Option<&Settings>;
}

impl<S: BuildHasher> BackendRegistry for HashMap<String, Settings, S> {
    fn descriptor(&self, alias: &str) -> Option<&Settings> {
        self.get(alias)
    }
}

impl<S: BuildHasher> BackendRegistry for IndexMap<String, Settings, S> {
    fn descriptor(&self, alias: &str) -> Option<&Settings> {
        self.get(alias)
    }
}

impl<T: BackendRegistry + ?Sized> BackendRegistry for &T {
    fn descriptor(&self, alias: &str) -> Option<&Settings> {
        (**self).descriptor(alias)
    }
}

impl<T: BackendRegistry + ?Sized> BackendRegistry for Arc<T> {
    fn descriptor(&self, alias: &str) -> Option<&Settings> {
        (**self).descriptor(alias)
    }
}

/// Resolves `ENGINE` locators to backend implementations.
pub trait EngineResolver {
    /// Implementation behind `locator`, if known.
    fn resolve(&self, locator: &str) -> Option<Arc<dyn Engine>>;
}

impl<T: EngineResolver + ?Sized> EngineResolver for &T {
    fn resolve(&self, locator: &str) -> Option<Arc<dyn Engine>> {
        (**self).resolve(locator)
    }
}

impl<T: EngineResolver + ?Sized> EngineResolver for Arc<T> {
    fn resolve(&self, locator: &str) -> Option<Arc<dyn Engine>> {
        (**self).resolve(locator)
    }
}

/// Locator-keyed catalog of engines.
///
/// # Example
/// ```ignore
/// use dbindexer_backend::EngineCatalog;
///
/// let engines = EngineCatalog::new()
///     .engine("django.db.backends.sqlite3", sqlite)
///     .engine("djangoappengine.db", appengine);
/// ```
#[derive(Clone, Default)]
pub struct EngineCatalog {
    engines: IndexMap<SmolStr, Arc<dyn Engine>>,
}

impl EngineCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `engine` under `locator` (builder pattern).
    pub fn engine(mut self, locator: impl Into<SmolStr>, engine: impl Engine + 'static) -> Self {
        self.register(locator, Arc::new(engine));
        self
    }

    /// Registers `engine` under `locator`, returning the engine it replaced.
    pub fn register(
        &mut self,
        locator: impl Into<SmolStr>,
        engine: Arc<dyn Engine>,
    ) -> Option<Arc<dyn Engine>> {
        self.engines.insert(locator.into(), engine)
    }

    /// Registered locators, in registration order.
    pub fn locators(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(SmolStr::as_str)
    }
}

impl EngineResolver for EngineCatalog {
    fn resolve(&self, locator: &str) -> Option<Arc<dyn Engine>> {
        self.engines.get(locator).cloned()
    }
}

impl fmt::Debug for EngineCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.engines.iter().map(|(k, v)| (k, v.label())))
            .finish()
    }
}
