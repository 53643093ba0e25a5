//! Layering of extension behavior over a target backend.
//!
//! Three pieces, from the outside in:
//! - [`CompositeBackend`] - the target backend with the extension's backend
//!   behavior in front of it
//! - [`CompositeOperations`] - the target's operations object, taken over
//!   after the target built it, with the extension's operations behavior in
//!   front of it
//! - [`ComponentComposer`] - per-name cache of compiler composites owned by
//!   the operations object
//!
//! # Example
//! ```ignore
//! use dbindexer_backend::composition::CompositeBackend;
//!
//! let backend = CompositeBackend::connect(extension, &*engine, settings)?;
//! let compiler = backend.operations().composite_compiler("SQLCompiler")?;
//! ```

mod backend;
mod cache;
mod operations;

pub use backend::CompositeBackend;
pub use cache::ComponentComposer;
pub use operations::CompositeOperations;
