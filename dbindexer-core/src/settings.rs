//! Nested database settings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::merge::merge_maps;

/// Key naming the alias of the target backend in a database's settings.
pub const TARGET: &str = "TARGET";

/// Key naming the implementation locator of a backend.
pub const ENGINE: &str = "ENGINE";

/// Error raised when converting an arbitrary value into [`Settings`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// Settings must be a mapping at the top level.
    #[error("settings must be a mapping, got {0}")]
    NotAMapping(&'static str),
}

/// Settings of a single database.
///
/// A mapping from string keys to JSON values. Values that are objects are
/// nested settings and take part in the recursive [`merge`](Settings::merge);
/// every other value is treated as a scalar. Key order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Map<String, Value>);

impl Settings {
    /// Creates empty settings.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Merges settings together into a freshly built value.
    ///
    /// On conflicts later arguments take precedence over earlier ones. When
    /// any of the values collected for a key is a mapping, only the mappings
    /// are merged (recursively) and scalar values for that key are dropped.
    /// No input is modified.
    pub fn merge<'a, I>(configs: I) -> Settings
    where
        I: IntoIterator<Item = &'a Settings>,
    {
        let maps: Vec<&Map<String, Value>> = configs.into_iter().map(|s| &s.0).collect();
        Settings(merge_maps(&maps))
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the string value stored under `key`, if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Settings::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Alias of the target backend (`TARGET`), if it is a string.
    pub fn target(&self) -> Option<&str> {
        self.get_str(TARGET)
    }

    /// Implementation locator (`ENGINE`), if it is a string.
    pub fn engine(&self) -> Option<&str> {
        self.get_str(ENGINE)
    }

    /// Iterates over the top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the settings, returning the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Settings {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Settings> for Value {
    fn from(settings: Settings) -> Self {
        Value::Object(settings.0)
    }
}

impl TryFrom<Value> for Settings {
    type Error = SettingsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(SettingsError::NotAMapping("null")),
            Value::Bool(_) => Err(SettingsError::NotAMapping("a boolean")),
            Value::Number(_) => Err(SettingsError::NotAMapping("a number")),
            Value::String(_) => Err(SettingsError::NotAMapping("a string")),
            Value::Array(_) => Err(SettingsError::NotAMapping("an array")),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Settings {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'a> IntoIterator for &'a Settings {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
