#![warn(missing_docs)]
//! # dbindexer-core
//!
//! Core types shared by the dbindexer crates.
//!
//! dbindexer layers extension behavior on top of an existing database
//! backend without touching the backend itself. This crate holds the pieces
//! that do not depend on any backend:
//!
//! - [`Settings`] - the nested key/value configuration of a database
//! - [`Settings::merge`] - the recursive merge used to combine caller
//!   settings with the settings of the target backend
//! - [`BehaviorLabel`] - the name of a behavior set, composed hierarchically
//!   when behavior sets are layered
//!
//! ## Merge rules
//!
//! ```
//! use dbindexer_core::Settings;
//! use serde_json::json;
//!
//! let caller = Settings::try_from(json!({"a": 1, "b": {"x": 1}})).unwrap();
//! let target = Settings::try_from(json!({"b": {"y": 2}, "c": 3})).unwrap();
//!
//! let merged = Settings::merge([&caller, &target]);
//! assert_eq!(merged, Settings::try_from(json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3})).unwrap());
//! ```

pub mod label;
pub mod merge;
pub mod settings;

pub use label::BehaviorLabel;
pub use merge::merge_maps;
pub use settings::{ENGINE, Settings, SettingsError, TARGET};

#[doc(hidden)]
pub use smol_str::SmolStr;
