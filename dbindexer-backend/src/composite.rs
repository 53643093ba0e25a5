//! Extension-first dispatch over two behaviors.
//!
//! A [`Composite`] holds an extension [`BehaviorSet`] and a target
//! dispatcher. Operations defined by the extension run the extension's
//! handler, with the target passed as `next`. Everything else goes straight
//! to the target, unmodified.

use std::sync::Arc;

use dbindexer_core::BehaviorLabel;
use serde_json::Value;

use crate::{BackendResult, BehaviorSet, Dispatch};

/// An extension behavior layered over a target behavior.
#[derive(Debug, Clone)]
pub struct Composite {
    label: BehaviorLabel,
    extension: Arc<BehaviorSet>,
    target: Arc<dyn Dispatch>,
}

impl Composite {
    /// Layers `extension` over `target`.
    pub fn new(extension: Arc<BehaviorSet>, target: Arc<dyn Dispatch>) -> Self {
        let label = extension.label().compose(target.label());
        Self {
            label,
            extension,
            target,
        }
    }
}

impl Dispatch for Composite {
    fn label(&self) -> &BehaviorLabel {
        &self.label
    }

    fn defines(&self, operation: &str) -> bool {
        self.extension.defines(operation) || self.target.defines(operation)
    }

    fn call(&self, operation: &str, args: &Value) -> BackendResult<Value> {
        match self.extension.call_with(operation, args, &*self.target) {
            Some(result) => {
                tracing::trace!(composite = %self.label, operation, "dispatched to extension");
                result
            }
            None => self.target.call(operation, args),
        }
    }
}
