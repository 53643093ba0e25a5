//! Backends assembled from behavior tables.
//!
//! [`NativeEngine`] describes a target backend the way the composer sees it:
//! a behavior set for the backend, one for its operations object, and one per
//! compiler. It is how engines are plugged into an [`EngineCatalog`] without
//! writing trait impls by hand.
//!
//! [`EngineCatalog`]: crate::EngineCatalog

use std::sync::Arc;

use dbindexer_core::{BehaviorLabel, Settings};
use indexmap::IndexMap;
use serde_json::Value;
use smol_str::SmolStr;

use crate::{
    BackendError, BackendResult, BehaviorSet, DatabaseBackend, DatabaseOperations, Dispatch, Engine,
};

/// An engine built from behavior tables.
#[derive(Debug, Clone)]
pub struct NativeEngine {
    label: BehaviorLabel,
    backend: Arc<BehaviorSet>,
    operations: Arc<BehaviorSet>,
    compilers: Arc<IndexMap<SmolStr, Arc<BehaviorSet>>>,
    required: Vec<SmolStr>,
}

impl NativeEngine {
    /// Starts building an engine labelled `label`.
    pub fn builder(label: impl Into<BehaviorLabel>) -> NativeEngineBuilder {
        let label = label.into();
        NativeEngineBuilder {
            backend: BehaviorSet::empty(label.clone()),
            operations: BehaviorSet::empty(label.clone()),
            compilers: IndexMap::new(),
            required: Vec::new(),
            label,
        }
    }
}

impl Engine for NativeEngine {
    fn label(&self) -> &BehaviorLabel {
        &self.label
    }

    fn connect(&self, settings: Settings) -> BackendResult<Box<dyn DatabaseBackend>> {
        let missing = self
            .required
            .iter()
            .find(|key| !settings.contains_key(key.as_str()));
        if let Some(missing) = missing {
            return Err(BackendError::InvalidArguments {
                operation: SmolStr::new_static("connect"),
                reason: format!("`{}` requires setting `{}`", self.label, missing),
            });
        }

        let ops = NativeOperations {
            behavior: Arc::clone(&self.operations),
            compilers: Arc::clone(&self.compilers),
        };
        Ok(Box::new(NativeBackend {
            behavior: Arc::clone(&self.backend),
            settings,
            ops: Arc::new(ops),
        }))
    }
}

/// Builder for [`NativeEngine`].
pub struct NativeEngineBuilder {
    label: BehaviorLabel,
    backend: BehaviorSet,
    operations: BehaviorSet,
    compilers: IndexMap<SmolStr, Arc<BehaviorSet>>,
    required: Vec<SmolStr>,
}

impl NativeEngineBuilder {
    /// Sets the backend behavior.
    pub fn backend(mut self, behavior: BehaviorSet) -> Self {
        self.backend = behavior;
        self
    }

    /// Sets the operations behavior.
    pub fn operations(mut self, behavior: BehaviorSet) -> Self {
        self.operations = behavior;
        self
    }

    /// Registers a compiler under its label.
    pub fn compiler(mut self, behavior: BehaviorSet) -> Self {
        let name = SmolStr::new(behavior.label().as_str());
        self.compilers.insert(name, Arc::new(behavior));
        self
    }

    /// Makes `connect` fail unless the merged settings contain `key`.
    pub fn require(mut self, key: impl Into<SmolStr>) -> Self {
        self.required.push(key.into());
        self
    }

    /// Finishes the engine.
    pub fn build(self) -> NativeEngine {
        NativeEngine {
            label: self.label,
            backend: Arc::new(self.backend),
            operations: Arc::new(self.operations),
            compilers: Arc::new(self.compilers),
            required: self.required,
        }
    }
}

#[derive(Debug)]
struct NativeBackend {
    behavior: Arc<BehaviorSet>,
    settings: Settings,
    ops: Arc<NativeOperations>,
}

impl Dispatch for NativeBackend {
    fn label(&self) -> &BehaviorLabel {
        self.behavior.label()
    }

    fn defines(&self, operation: &str) -> bool {
        self.behavior.defines(operation)
    }

    fn call(&self, operation: &str, args: &Value) -> BackendResult<Value> {
        self.behavior.call(operation, args)
    }
}

impl DatabaseBackend for NativeBackend {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn ops(&self) -> Arc<dyn DatabaseOperations> {
        self.ops.clone()
    }
}

#[derive(Debug)]
struct NativeOperations {
    behavior: Arc<BehaviorSet>,
    compilers: Arc<IndexMap<SmolStr, Arc<BehaviorSet>>>,
}

impl Dispatch for NativeOperations {
    fn label(&self) -> &BehaviorLabel {
        self.behavior.label()
    }

    fn defines(&self, operation: &str) -> bool {
        self.behavior.defines(operation)
    }

    fn call(&self, operation: &str, args: &Value) -> BackendResult<Value> {
        self.behavior.call(operation, args)
    }
}

impl DatabaseOperations for NativeOperations {
    fn compiler(&self, name: &str) -> BackendResult<Arc<dyn Dispatch>> {
        match self.compilers.get(name) {
            Some(compiler) => Ok(compiler.clone()),
            None => Err(BackendError::CompilerNotFound {
                backend: self.behavior.label().clone(),
                name: SmolStr::new(name),
            }),
        }
    }
}
