//! Composite backend.

use std::sync::Arc;

use dbindexer_core::{BehaviorLabel, Settings};
use serde_json::Value;

use super::CompositeOperations;
use crate::{BackendResult, DatabaseBackend, DatabaseOperations, Dispatch, Engine, Extension};

/// A target backend with the extension layered over it.
///
/// Backend-level operations dispatch to the extension's backend behavior
/// first and fall back to the native backend. The operations object is a
/// [`CompositeOperations`] wrapping the one the native backend built.
#[derive(Debug)]
pub struct CompositeBackend {
    label: BehaviorLabel,
    extension: Arc<Extension>,
    native: Box<dyn DatabaseBackend>,
    ops: Arc<CompositeOperations>,
}

impl CompositeBackend {
    /// Connects `engine` with `settings` and layers `extension` over the result.
    pub fn connect(
        extension: Arc<Extension>,
        engine: &dyn Engine,
        settings: Settings,
    ) -> BackendResult<Self> {
        let native = engine.connect(settings)?;
        Ok(Self::wrap(extension, native))
    }

    /// Layers `extension` over an already connected backend.
    pub fn wrap(extension: Arc<Extension>, native: Box<dyn DatabaseBackend>) -> Self {
        let label = extension.backend().label().compose(native.label());
        let ops = Arc::new(CompositeOperations::new(Arc::clone(&extension), native.ops()));
        tracing::debug!(backend = %label, ops = %ops.label(), "wrapped backend operations");
        Self {
            label,
            extension,
            native,
            ops,
        }
    }

    /// The wrapped native backend.
    pub fn native(&self) -> &dyn DatabaseBackend {
        &*self.native
    }

    /// The composite operations object.
    pub fn operations(&self) -> &Arc<CompositeOperations> {
        &self.ops
    }
}

impl Dispatch for CompositeBackend {
    fn label(&self) -> &BehaviorLabel {
        &self.label
    }

    fn defines(&self, operation: &str) -> bool {
        self.extension.backend().defines(operation) || self.native.defines(operation)
    }

    fn call(&self, operation: &str, args: &Value) -> BackendResult<Value> {
        let native: &dyn Dispatch = &*self.native;
        self.extension
            .backend()
            .call_with(operation, args, native)
            .unwrap_or_else(|| native.call(operation, args))
    }
}

impl DatabaseBackend for CompositeBackend {
    fn settings(&self) -> &Settings {
        self.native.settings()
    }

    fn ops(&self) -> Arc<dyn DatabaseOperations> {
        self.ops.clone()
    }
}
