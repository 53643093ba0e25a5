//! Composite operations object.

use std::sync::Arc;

use dbindexer_core::BehaviorLabel;
use serde_json::Value;

use super::ComponentComposer;
use crate::{BackendResult, Composite, DatabaseOperations, Dispatch, Extension};

/// The native operations object of a backend with the extension layered
/// over it.
///
/// Built in two stages: the target backend constructs its own operations
/// object, then this wrapper takes it over. Operations dispatch extension
/// first; [`compiler`](DatabaseOperations::compiler) composes the extension's
/// compiler with the native one and caches the result per name.
#[derive(Debug)]
pub struct CompositeOperations {
    label: BehaviorLabel,
    extension: Arc<Extension>,
    native: Arc<dyn DatabaseOperations>,
    composer: ComponentComposer,
}

impl CompositeOperations {
    /// Wraps `native` with the operations behavior of `extension`.
    pub fn new(extension: Arc<Extension>, native: Arc<dyn DatabaseOperations>) -> Self {
        let label = extension.operations().label().compose(native.label());
        Self {
            label,
            extension,
            native,
            composer: ComponentComposer::new(),
        }
    }

    /// The wrapped native operations object.
    pub fn native(&self) -> &Arc<dyn DatabaseOperations> {
        &self.native
    }

    /// The compiler composition cache.
    pub fn composer(&self) -> &ComponentComposer {
        &self.composer
    }

    /// Typed variant of [`compiler`](DatabaseOperations::compiler).
    #[tracing::instrument(skip(self), fields(operations = %self.label), level = "trace")]
    pub fn composite_compiler(&self, name: &str) -> BackendResult<Arc<Composite>> {
        self.composer.compose(
            name,
            |name| self.extension.compiler(name),
            |name| self.native.compiler(name),
        )
    }
}

impl Dispatch for CompositeOperations {
    fn label(&self) -> &BehaviorLabel {
        &self.label
    }

    fn defines(&self, operation: &str) -> bool {
        self.extension.operations().defines(operation) || self.native.defines(operation)
    }

    fn call(&self, operation: &str, args: &Value) -> BackendResult<Value> {
        let native: &dyn Dispatch = &*self.native;
        self.extension
            .operations()
            .call_with(operation, args, native)
            .unwrap_or_else(|| native.call(operation, args))
    }
}

impl DatabaseOperations for CompositeOperations {
    fn compiler(&self, name: &str) -> BackendResult<Arc<dyn Dispatch>> {
        let composite: Arc<dyn Dispatch> = self.composite_compiler(name)?;
        Ok(composite)
    }
}
