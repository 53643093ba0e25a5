//! Layers extension behavior over existing database backends.
//!
//! A caller hands [`BackendComposer::build`] the settings of a database that
//! names a `TARGET`. The composer looks the target up, resolves its `ENGINE`,
//! merges both settings and connects the engine. What comes back is a
//! [`CompositeBackend`](composition::CompositeBackend): the target backend
//! with the [`Extension`]'s behavior in front of it, on the backend itself,
//! on its operations object and on every compiler the operations hand out.
//!
//! Behavior is expressed as [`BehaviorSet`]s, named tables of operations
//! dispatched through the [`Dispatch`] trait.
mod backend;
pub mod behavior;
pub mod composer;
pub mod composite;
pub mod composition;
mod error;
pub mod extension;
pub mod metrics;
pub mod native;
pub mod registry;

pub use backend::{DatabaseBackend, DatabaseOperations, Engine};
pub use behavior::{BehaviorSet, BehaviorSetBuilder, Dispatch, Handler, Unbound};
pub use composer::BackendComposer;
pub use composite::Composite;
pub use composition::{ComponentComposer, CompositeBackend, CompositeOperations};
pub use error::{BackendError, BackendResult, ErrorKind};
pub use extension::{EXTENSION_LABEL, Extension, ExtensionBuilder};
pub use native::{NativeEngine, NativeEngineBuilder};
pub use registry::{BackendRegistry, EngineCatalog, EngineResolver};

pub use dbindexer_core::{BehaviorLabel, Settings};
