use std::fmt;
use std::sync::Arc;

use dbindexer_core::{BehaviorLabel, Settings};

use crate::{BackendResult, Dispatch};

/// A backend implementation, found by its `ENGINE` locator.
pub trait Engine: Send + Sync + fmt::Debug {
    /// Label of the implementation.
    fn label(&self) -> &BehaviorLabel;

    /// Builds a backend from fully merged settings.
    fn connect(&self, settings: Settings) -> BackendResult<Box<dyn DatabaseBackend>>;
}

/// A connected database backend.
///
/// Backend-level operations are dispatched by name through [`Dispatch`].
/// Per-query work goes through the operations object returned by
/// [`ops`](DatabaseBackend::ops).
pub trait DatabaseBackend: Dispatch {
    /// Settings the backend was built with.
    fn settings(&self) -> &Settings;

    /// The operations object owned by this backend.
    fn ops(&self) -> Arc<dyn DatabaseOperations>;
}

/// Operations object of a backend.
pub trait DatabaseOperations: Dispatch {
    /// Returns the compiler registered under a logical name
    /// (e.g. `SQLCompiler`, `SQLInsertCompiler`).
    fn compiler(&self, name: &str) -> BackendResult<Arc<dyn Dispatch>>;
}
