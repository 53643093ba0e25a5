//! The extension layered over every target backend.
//!
//! An [`Extension`] is fixed for a [`BackendComposer`](crate::BackendComposer):
//! one behavior set for the backend itself, one for its operations object, and
//! one per compiler name. Compiler sets are looked up by their label, so the
//! set registered as `SQLInsertCompiler` overrides the target's
//! `SQLInsertCompiler`.

use std::sync::Arc;

use dbindexer_core::BehaviorLabel;
use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::{BackendError, BackendResult, BehaviorSet, Dispatch};

/// Label used by the default extension behavior sets.
pub const EXTENSION_LABEL: BehaviorLabel = BehaviorLabel::new_static("dbindexer");

/// Fixed extension behavior.
#[derive(Debug, Clone)]
pub struct Extension {
    backend: Arc<BehaviorSet>,
    operations: Arc<BehaviorSet>,
    compilers: IndexMap<SmolStr, Arc<BehaviorSet>>,
}

impl Extension {
    /// Starts building an extension.
    pub fn builder() -> ExtensionBuilder {
        ExtensionBuilder {
            extension: Extension::default(),
        }
    }

    /// Behavior layered over the target backend.
    pub fn backend(&self) -> &Arc<BehaviorSet> {
        &self.backend
    }

    /// Behavior layered over the target backend's operations object.
    pub fn operations(&self) -> &Arc<BehaviorSet> {
        &self.operations
    }

    /// Compiler behavior registered under `name`.
    pub fn compiler(&self, name: &str) -> BackendResult<Arc<BehaviorSet>> {
        self.compilers
            .get(name)
            .cloned()
            .ok_or_else(|| BackendError::ExtensionNotFound {
                name: SmolStr::new(name),
            })
    }

    /// Names of the registered compilers.
    pub fn compiler_names(&self) -> impl Iterator<Item = &str> {
        self.compilers.keys().map(SmolStr::as_str)
    }
}

impl Default for Extension {
    /// An extension that overrides nothing.
    fn default() -> Self {
        Self {
            backend: Arc::new(BehaviorSet::empty(EXTENSION_LABEL)),
            operations: Arc::new(BehaviorSet::empty(EXTENSION_LABEL)),
            compilers: IndexMap::new(),
        }
    }
}

/// Builder for [`Extension`].
pub struct ExtensionBuilder {
    extension: Extension,
}

impl ExtensionBuilder {
    /// Sets the backend behavior.
    pub fn backend(mut self, behavior: BehaviorSet) -> Self {
        self.extension.backend = Arc::new(behavior);
        self
    }

    /// Sets the operations behavior.
    pub fn operations(mut self, behavior: BehaviorSet) -> Self {
        self.extension.operations = Arc::new(behavior);
        self
    }

    /// Registers a compiler behavior under its label.
    pub fn compiler(mut self, behavior: BehaviorSet) -> Self {
        let name = SmolStr::new(behavior.label().as_str());
        self.extension.compilers.insert(name, Arc::new(behavior));
        self
    }

    /// Finishes the extension.
    pub fn build(self) -> Extension {
        self.extension
    }
}
