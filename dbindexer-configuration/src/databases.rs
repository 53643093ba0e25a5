use dbindexer_backend::{BackendComposer, BackendRegistry, CompositeBackend, EngineResolver, Extension};
use dbindexer_core::Settings;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// Configured databases, keyed by alias.
///
/// A database that extends another one names it with `TARGET`; the target
/// names its implementation with `ENGINE`:
///
/// ```yaml
/// default:
///   ENGINE: dbindexer
///   TARGET: gae
/// gae:
///   ENGINE: djangoappengine.db
///   OPTIONS:
///     timeout: 20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Databases(IndexMap<String, Settings>);

impl Databases {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses databases from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let raw: IndexMap<String, Value> = serde_saphyr::from_str(yaml)?;
        Self::from_entries(raw)
    }

    /// Parses databases from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: IndexMap<String, Value> = serde_json::from_str(json)?;
        Self::from_entries(raw)
    }

    fn from_entries(raw: IndexMap<String, Value>) -> Result<Self, ConfigError> {
        let databases = raw
            .into_iter()
            .map(|(alias, value)| match Settings::try_from(value) {
                Ok(settings) => Ok((alias, settings)),
                Err(source) => Err(ConfigError::InvalidSettings { alias, source }),
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;
        tracing::debug!(count = databases.len(), "loaded databases");
        Ok(Self(databases))
    }

    /// Settings of the database registered as `alias`.
    pub fn get(&self, alias: &str) -> Option<&Settings> {
        self.0.get(alias)
    }

    /// Registers `settings` under `alias`, returning the settings it replaced.
    pub fn insert(&mut self, alias: impl Into<String>, settings: Settings) -> Option<Settings> {
        self.0.insert(alias.into(), settings)
    }

    /// Configured aliases, in document order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Aliases whose settings name a `TARGET`, i.e. databases to be built as
    /// composites.
    pub fn extended(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, settings)| settings.target().is_some())
            .map(|(alias, _)| alias.as_str())
    }

    /// Number of configured databases.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no database is configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds the composite backend for the database registered as `alias`.
    ///
    /// The database's own settings are the caller settings; its `TARGET` is
    /// looked up in this registry.
    pub fn connect<E>(
        &self,
        alias: &str,
        resolver: E,
        extension: Extension,
    ) -> Result<CompositeBackend, ConfigError>
    where
        E: EngineResolver,
    {
        let settings = self
            .get(alias)
            .ok_or_else(|| ConfigError::UnknownDatabase(alias.to_owned()))?;
        let backend = BackendComposer::new(self, resolver)
            .extension(extension)
            .build(settings)?;
        Ok(backend)
    }
}

impl BackendRegistry for Databases {
    fn descriptor(&self, alias: &str) -> Option<&Settings> {
        self.get(alias)
    }
}

impl FromIterator<(String, Settings)> for Databases {
    fn from_iter<T: IntoIterator<Item = (String, Settings)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
