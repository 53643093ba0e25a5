//! Per-name memoization of composites.

use std::sync::Arc;

use dashmap::DashMap;
use smol_str::SmolStr;

use crate::metrics;
use crate::{BackendResult, BehaviorSet, Composite, Dispatch};

/// Builds and caches one [`Composite`] per logical name.
///
/// The cache belongs to a single composite operations object and lives as
/// long as it does. Entries are never evicted.
///
/// Composition is pure, so two callers racing on the same name may both
/// build a composite. Only the first insert is kept and both callers get that
/// one back, so each name has exactly one identity per cache.
#[derive(Debug, Default)]
pub struct ComponentComposer {
    cache: DashMap<SmolStr, Arc<Composite>>,
}

impl ComponentComposer {
    /// Creates an empty composer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the composite for `name`, building it on first request.
    ///
    /// `target` is asked first for the target's own behavior; `extension`
    /// then provides the behavior layered over it. Errors from either lookup
    /// are returned as is and leave the cache untouched.
    pub fn compose<E, T>(&self, name: &str, extension: E, target: T) -> BackendResult<Arc<Composite>>
    where
        E: FnOnce(&str) -> BackendResult<Arc<BehaviorSet>>,
        T: FnOnce(&str) -> BackendResult<Arc<dyn Dispatch>>,
    {
        if let Some(cached) = self.cache.get(name) {
            metrics::record_compiler_cache_hit(name);
            return Ok(Arc::clone(cached.value()));
        }

        let target = target(name)?;
        let extension = extension(name)?;
        let composite = Arc::new(Composite::new(extension, target));
        tracing::debug!(name, composite = %composite.label(), "composed");
        metrics::record_compiler_composed(name);

        let stored = self
            .cache
            .entry(SmolStr::new(name))
            .or_insert(composite)
            .value()
            .clone();
        Ok(stored)
    }

    /// Returns `true` if `name` has been composed.
    pub fn contains(&self, name: &str) -> bool {
        self.cache.contains_key(name)
    }

    /// Number of cached composites.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing has been composed yet.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BackendError, ErrorKind};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn extension(name: &str) -> BackendResult<Arc<BehaviorSet>> {
        Ok(Arc::new(BehaviorSet::builder(name).constant("execute_sql", "extension").build()))
    }

    fn target(name: &str) -> BackendResult<Arc<dyn Dispatch>> {
        Ok(Arc::new(
            BehaviorSet::builder(name)
                .constant("execute_sql", "target")
                .constant("has_results", true)
                .build(),
        ))
    }

    #[test]
    fn second_request_returns_same_composite() {
        let composer = ComponentComposer::new();
        let first = composer.compose("SQLCompiler", extension, target).unwrap();
        let second = composer.compose("SQLCompiler", extension, target).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(composer.len(), 1);
        assert_eq!(first.call("execute_sql", &json!(null)).unwrap(), json!("extension"));
        assert_eq!(first.call("has_results", &json!(null)).unwrap(), json!(true));
    }

    #[test]
    fn cache_hit_skips_lookups() {
        let composer = ComponentComposer::new();
        let lookups = AtomicUsize::new(0);
        let counting_target = |name: &str| {
            lookups.fetch_add(1, Ordering::SeqCst);
            target(name)
        };

        composer.compose("SQLCompiler", extension, counting_target).unwrap();
        composer.compose("SQLCompiler", extension, counting_target).unwrap();

        assert_eq!(lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_lookup_is_not_cached() {
        let composer = ComponentComposer::new();
        let err = composer
            .compose(
                "SQLDateCompiler",
                |name| {
                    Err(BackendError::ExtensionNotFound {
                        name: SmolStr::new(name),
                    })
                },
                target,
            )
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ExtensionLookup);
        assert!(!composer.contains("SQLDateCompiler"));
        assert!(composer.compose("SQLDateCompiler", extension, target).is_ok());
    }

    #[test]
    fn racing_composers_agree_on_identity() {
        let composer = Arc::new(ComponentComposer::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let composer = Arc::clone(&composer);
                std::thread::spawn(move || composer.compose("SQLCompiler", extension, target).unwrap())
            })
            .collect();
        let composites: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(composites.iter().all(|c| Arc::ptr_eq(c, &composites[0])));
    }
}
