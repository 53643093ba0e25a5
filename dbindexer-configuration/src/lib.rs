//! Loading of dbindexer database registries.
//!
//! [`Databases`] is the registry [`BackendComposer`](dbindexer_backend::BackendComposer)
//! reads target descriptors from. It can be parsed from YAML or JSON and
//! builds composite backends by alias.
pub mod databases;
pub mod error;

pub use databases::Databases;
pub use error::ConfigError;
