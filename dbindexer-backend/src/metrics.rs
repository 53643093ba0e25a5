//! Composition metrics.
//!
//! Enable the `metrics` feature to record these metrics.
//!
//! ## Naming Pattern
//!
//! All metrics follow the pattern: `dbindexer_{subject}_{event}_total`
//!
//! - `dbindexer_backend_built_total` - composite backends built, by target engine
//! - `dbindexer_compiler_composed_total` - compiler composites built, by name
//! - `dbindexer_compiler_cache_hit_total` - compiler requests served from cache, by name

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Metric name for composite backends built.
    pub static ref BACKEND_BUILT_TOTAL: &'static str = {
        metrics::describe_counter!(
            "dbindexer_backend_built_total",
            "Total number of composite backends built per target engine."
        );
        "dbindexer_backend_built_total"
    };

    /// Metric name for compiler composites built.
    pub static ref COMPILER_COMPOSED_TOTAL: &'static str = {
        metrics::describe_counter!(
            "dbindexer_compiler_composed_total",
            "Total number of compiler composites built per compiler name."
        );
        "dbindexer_compiler_composed_total"
    };

    /// Metric name for compiler cache hits.
    pub static ref COMPILER_CACHE_HIT_TOTAL: &'static str = {
        metrics::describe_counter!(
            "dbindexer_compiler_cache_hit_total",
            "Total number of compiler requests served from the composition cache."
        );
        "dbindexer_compiler_cache_hit_total"
    };
}

/// Record a composite backend built over `engine`.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_backend_built(engine: &str) {
    metrics::counter!(*BACKEND_BUILT_TOTAL, "engine" => engine.to_string()).increment(1);
}

/// Record a composite backend built (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_backend_built(_engine: &str) {}

/// Record a freshly composed compiler.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_compiler_composed(name: &str) {
    metrics::counter!(*COMPILER_COMPOSED_TOTAL, "compiler" => name.to_string()).increment(1);
}

/// Record a freshly composed compiler (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_compiler_composed(_name: &str) {}

/// Record a compiler served from the composition cache.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_compiler_cache_hit(name: &str) {
    metrics::counter!(*COMPILER_CACHE_HIT_TOTAL, "compiler" => name.to_string()).increment(1);
}

/// Record a compiler cache hit (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_compiler_cache_hit(_name: &str) {}
