//! Recursive merge of nested settings.
//!
//! For every key found in any input:
//! 1. The values of that key are collected in input order
//! 2. If any of them is a mapping, the result is the recursive merge of the
//!    mappings alone; scalar values under that key are discarded
//! 3. Otherwise the last collected value wins
//!
//! Keys appear in the result in order of first appearance across the inputs.

use indexmap::IndexSet;
use serde_json::{Map, Value};

/// Merges `maps` into a newly allocated map.
///
/// Later maps take precedence over earlier maps on scalar conflicts. The
/// result shares no structure with the inputs.
pub fn merge_maps(maps: &[&Map<String, Value>]) -> Map<String, Value> {
    let keys: IndexSet<&str> = maps
        .iter()
        .flat_map(|map| map.keys().map(String::as_str))
        .collect();

    let mut merged = Map::with_capacity(keys.len());
    for key in keys {
        let values: Vec<&Value> = maps.iter().filter_map(|map| map.get(key)).collect();
        let nested: Vec<&Map<String, Value>> =
            values.iter().filter_map(|value| value.as_object()).collect();

        let value = if !nested.is_empty() {
            Value::Object(merge_maps(&nested))
        } else {
            match values.last() {
                Some(&value) => value.clone(),
                None => continue,
            }
        };
        merged.insert(key.to_owned(), value);
    }
    merged
}
