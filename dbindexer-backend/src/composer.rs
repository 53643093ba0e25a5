//! Entry point: build a composite backend from database settings.

use std::sync::Arc;

use dbindexer_core::Settings;
use smol_str::SmolStr;

use crate::composition::CompositeBackend;
use crate::metrics;
use crate::{BackendError, BackendRegistry, BackendResult, EngineResolver, Extension};

/// Builds [`CompositeBackend`]s for settings that name a `TARGET`.
///
/// The registry of databases and the engine resolver are injected, so the
/// composer never reads global state.
///
/// # Example
/// ```ignore
/// use dbindexer_backend::{BackendComposer, EngineCatalog, Extension};
///
/// let composer = BackendComposer::new(databases, engines).extension(extension);
/// let backend = composer.build(&databases["default"])?;
/// ```
#[derive(Debug, Clone)]
pub struct BackendComposer<R, E> {
    registry: R,
    resolver: E,
    extension: Arc<Extension>,
}

impl<R, E> BackendComposer<R, E>
where
    R: BackendRegistry,
    E: EngineResolver,
{
    /// Creates a composer with an extension that overrides nothing.
    pub fn new(registry: R, resolver: E) -> Self {
        Self {
            registry,
            resolver,
            extension: Arc::new(Extension::default()),
        }
    }

    /// Sets the extension layered over every built backend.
    pub fn extension(mut self, extension: Extension) -> Self {
        self.extension = Arc::new(extension);
        self
    }

    /// Builds the composite backend for `settings`.
    ///
    /// `settings["TARGET"]` names the target database in the registry. The
    /// target's `ENGINE` is resolved, `settings` and the target's settings
    /// are merged with the target's values winning, and the engine is
    /// connected with the merged settings.
    #[tracing::instrument(skip_all, fields(alias = settings.target()))]
    pub fn build(&self, settings: &Settings) -> BackendResult<CompositeBackend> {
        let alias = settings.target().ok_or(BackendError::MissingTarget)?;
        let descriptor = self
            .registry
            .descriptor(alias)
            .ok_or_else(|| BackendError::UnregisteredTarget(SmolStr::new(alias)))?;

        let locator = descriptor
            .engine()
            .ok_or_else(|| BackendError::MissingEngine {
                alias: SmolStr::new(alias),
            })?;
        let engine = self
            .resolver
            .resolve(locator)
            .ok_or_else(|| BackendError::UnresolvedEngine {
                engine: SmolStr::new(locator),
            })?;

        let merged = Settings::merge([settings, descriptor]);
        tracing::debug!(engine = locator, keys = merged.len(), "connecting target backend");

        let backend = CompositeBackend::connect(Arc::clone(&self.extension), &*engine, merged)?;
        metrics::record_backend_built(locator);
        Ok(backend)
    }
}
