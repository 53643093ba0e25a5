//! Behavior sets and the dispatch trait.
//!
//! A [`BehaviorSet`] is a named table of operations. Every handler receives
//! the call arguments and a `next` dispatcher: the behavior that sits behind
//! it in a composite. Calling `next` is how an extension handler reaches the
//! target's own implementation of the same operation.
//!
//! # Example
//! ```
//! use dbindexer_backend::{BehaviorSet, Dispatch};
//! use serde_json::json;
//!
//! let ops = BehaviorSet::builder("sqlite.ops")
//!     .operation("max_name_length", |_args, _next| Ok(json!(64)))
//!     .build();
//!
//! assert!(ops.defines("max_name_length"));
//! assert_eq!(ops.call("max_name_length", &json!(null)).unwrap(), json!(64));
//! ```

use std::fmt;
use std::sync::Arc;

use dbindexer_core::BehaviorLabel;
use indexmap::IndexMap;
use serde_json::Value;
use smol_str::SmolStr;

use crate::{BackendError, BackendResult};

/// Handler of a single operation.
///
/// Receives the call arguments and the dispatcher the handler overrides.
///
/// `next` only reaches the layers below the handler. A handler never sees
/// the composite it is part of, so it cannot re-enter the chain to call a
/// sibling operation with extension-first resolution; such a call resolves
/// against the target instead.
pub type Handler = Arc<dyn Fn(&Value, &dyn Dispatch) -> BackendResult<Value> + Send + Sync>;

/// Something operations can be dispatched to by name.
pub trait Dispatch: Send + Sync + fmt::Debug {
    /// Label used in logs and errors.
    fn label(&self) -> &BehaviorLabel;

    /// Returns `true` if `operation` resolves somewhere in this dispatcher.
    fn defines(&self, operation: &str) -> bool;

    /// Dispatches `operation`.
    fn call(&self, operation: &str, args: &Value) -> BackendResult<Value>;
}

impl<T: Dispatch + ?Sized> Dispatch for Arc<T> {
    fn label(&self) -> &BehaviorLabel {
        (**self).label()
    }

    fn defines(&self, operation: &str) -> bool {
        (**self).defines(operation)
    }

    fn call(&self, operation: &str, args: &Value) -> BackendResult<Value> {
        (**self).call(operation, args)
    }
}

impl<T: Dispatch + ?Sized> Dispatch for Box<T> {
    fn label(&self) -> &BehaviorLabel {
        (**self).label()
    }

    fn defines(&self, operation: &str) -> bool {
        (**self).defines(operation)
    }

    fn call(&self, operation: &str, args: &Value) -> BackendResult<Value> {
        (**self).call(operation, args)
    }
}

/// The end of a dispatch chain.
///
/// Handed as `next` to handlers that are not layered over anything.
#[derive(Debug, Clone)]
pub struct Unbound {
    label: BehaviorLabel,
}

impl Unbound {
    /// Creates the chain end for the behavior labelled `label`.
    pub fn new(label: BehaviorLabel) -> Self {
        Self { label }
    }
}

impl Dispatch for Unbound {
    fn label(&self) -> &BehaviorLabel {
        &self.label
    }

    fn defines(&self, _operation: &str) -> bool {
        false
    }

    fn call(&self, operation: &str, _args: &Value) -> BackendResult<Value> {
        Err(BackendError::UnknownOperation {
            behavior: self.label.clone(),
            operation: SmolStr::new(operation),
        })
    }
}

/// A named table of operations.
#[derive(Clone)]
pub struct BehaviorSet {
    label: BehaviorLabel,
    handlers: IndexMap<SmolStr, Handler>,
}

impl BehaviorSet {
    /// Starts building a behavior set.
    pub fn builder(label: impl Into<BehaviorLabel>) -> BehaviorSetBuilder {
        BehaviorSetBuilder {
            label: label.into(),
            handlers: IndexMap::new(),
        }
    }

    /// A behavior set that defines nothing.
    pub fn empty(label: impl Into<BehaviorLabel>) -> Self {
        Self::builder(label).build()
    }

    /// Names of the operations this set defines, in definition order.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(SmolStr::as_str)
    }

    /// Returns the handler for `operation`, if defined here.
    pub fn handler(&self, operation: &str) -> Option<&Handler> {
        self.handlers.get(operation)
    }

    /// Calls `operation` with `next` as the behavior it overrides.
    ///
    /// Returns `None` when this set does not define the operation.
    pub fn call_with(
        &self,
        operation: &str,
        args: &Value,
        next: &dyn Dispatch,
    ) -> Option<BackendResult<Value>> {
        self.handler(operation).map(|handler| handler(args, next))
    }
}

impl Dispatch for BehaviorSet {
    fn label(&self) -> &BehaviorLabel {
        &self.label
    }

    fn defines(&self, operation: &str) -> bool {
        self.handlers.contains_key(operation)
    }

    fn call(&self, operation: &str, args: &Value) -> BackendResult<Value> {
        let next = Unbound::new(self.label.clone());
        self.call_with(operation, args, &next)
            .unwrap_or_else(|| next.call(operation, args))
    }
}

impl fmt::Debug for BehaviorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorSet")
            .field("label", &self.label)
            .field("operations", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`BehaviorSet`].
pub struct BehaviorSetBuilder {
    label: BehaviorLabel,
    handlers: IndexMap<SmolStr, Handler>,
}

impl BehaviorSetBuilder {
    /// Defines `name`. A later definition of the same name replaces the earlier one.
    pub fn operation<F>(mut self, name: impl Into<SmolStr>, handler: F) -> Self
    where
        F: Fn(&Value, &dyn Dispatch) -> BackendResult<Value> + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), Arc::new(handler));
        self
    }

    /// Defines `name` as a constant.
    pub fn constant(self, name: impl Into<SmolStr>, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.operation(name, move |_args, _next| Ok(value.clone()))
    }

    /// Finishes the behavior set.
    pub fn build(self) -> BehaviorSet {
        BehaviorSet {
            label: self.label,
            handlers: self.handlers,
        }
    }
}
