use dbindexer_backend::BackendError;
use dbindexer_core::SettingsError;
use thiserror::Error;

/// Errors raised while loading database configuration or building from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be parsed.
    #[error("failed to parse database configuration: {0}")]
    Yaml(#[from] serde_saphyr::Error),

    /// The JSON document could not be parsed.
    #[error("failed to parse database configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// No database is configured under the requested alias.
    #[error("database `{0}` is not configured")]
    UnknownDatabase(String),

    /// A database entry is not a mapping.
    #[error("database `{alias}`: {source}")]
    InvalidSettings {
        /// Alias of the offending entry.
        alias: String,
        /// Underlying error.
        source: SettingsError,
    },

    /// Building the backend failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
