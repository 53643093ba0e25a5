//! Names of behavior sets.

use serde::{Deserialize, Serialize};
use smol_str::{SmolStr, format_smolstr};
use std::fmt;

/// Name of a behavior set: an engine, an operations table, a compiler or a
/// composite of those.
///
/// Composites are named `"<extension>.<target>"`, so the name of a nested
/// composite lists every layer in the order operations are resolved:
///
/// ```
/// use dbindexer_core::BehaviorLabel;
///
/// let ops = BehaviorLabel::from("dbindexer").compose(&"sqlite.ops".into());
/// assert_eq!(ops.to_string(), "dbindexer.sqlite.ops");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BehaviorLabel(SmolStr);

impl BehaviorLabel {
    /// Label for a compile-time name, usable in constants.
    pub const fn new_static(name: &'static str) -> Self {
        Self(SmolStr::new_static(name))
    }

    /// The label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Label of `self` layered over `target`.
    pub fn compose(&self, target: &BehaviorLabel) -> Self {
        Self(format_smolstr!("{}.{}", self.0, target.0))
    }
}

impl fmt::Display for BehaviorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BehaviorLabel {
    fn from(name: &str) -> Self {
        Self(SmolStr::new(name))
    }
}
