//! Engines, extensions and registries shared by the integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dbindexer_backend::{BehaviorSet, Engine, EngineCatalog, EngineResolver, Extension, NativeEngine};
use dbindexer_core::Settings;
use indexmap::IndexMap;
use serde_json::{Value, json};

pub const SQLITE: &str = "django.db.backends.sqlite3";

/// A target engine with a couple of operations and two compilers.
pub fn sqlite_engine() -> NativeEngine {
    NativeEngine::builder("sqlite")
        .backend(
            BehaviorSet::builder("sqlite")
                .constant("vendor", "sqlite")
                .constant("supports_transactions", true)
                .build(),
        )
        .operations(
            BehaviorSet::builder("sqlite.ops")
                .constant("max_name_length", 64)
                .operation("quote_name", |args, _next| {
                    let name = args.as_str().unwrap_or_default();
                    Ok(json!(format!("\"{name}\"")))
                })
                .build(),
        )
        .compiler(
            BehaviorSet::builder("SQLCompiler")
                .operation("execute_sql", |args, _next| Ok(json!({"sql": args})))
                .constant("has_results", true)
                .build(),
        )
        .compiler(
            BehaviorSet::builder("SQLInsertCompiler")
                .constant("execute_sql", "insert")
                .build(),
        )
        .build()
}

/// Extension overriding part of every layer of [`sqlite_engine`].
pub fn indexing_extension() -> Extension {
    Extension::builder()
        .backend(
            BehaviorSet::builder("dbindexer")
                .operation("vendor", |args, next| {
                    let vendor = next.call("vendor", args)?;
                    Ok(json!(format!("dbindexer+{}", vendor.as_str().unwrap_or_default())))
                })
                .build(),
        )
        .operations(
            BehaviorSet::builder("dbindexer")
                .operation("quote_name", |args, next| {
                    let quoted = next.call("quote_name", args)?;
                    Ok(json!({"indexed": quoted}))
                })
                .build(),
        )
        .compiler(
            BehaviorSet::builder("SQLCompiler")
                .operation("execute_sql", |args, next| {
                    let result = next.call("execute_sql", args)?;
                    Ok(json!({"indexed": result}))
                })
                .build(),
        )
        .compiler(
            BehaviorSet::builder("SQLInsertCompiler")
                .constant("execute_sql", "indexed insert")
                .build(),
        )
        .compiler(BehaviorSet::empty("SQLDateCompiler"))
        .build()
}

pub fn settings(value: Value) -> Settings {
    Settings::try_from(value).expect("test settings must be a mapping")
}

/// Registry with a `default` database on sqlite.
pub fn databases() -> IndexMap<String, Settings> {
    let mut databases = IndexMap::new();
    databases.insert(
        "default".to_owned(),
        settings(json!({"ENGINE": SQLITE, "NAME": ":memory:", "OPTION": "fromtarget"})),
    );
    databases
}

pub fn engines() -> EngineCatalog {
    EngineCatalog::new().engine(SQLITE, sqlite_engine())
}

/// Resolver that counts lookups before delegating.
#[derive(Default)]
pub struct CountingResolver {
    pub catalog: EngineCatalog,
    pub lookups: AtomicUsize,
}

impl CountingResolver {
    pub fn new(catalog: EngineCatalog) -> Self {
        Self {
            catalog,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl EngineResolver for CountingResolver {
    fn resolve(&self, locator: &str) -> Option<Arc<dyn Engine>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.catalog.resolve(locator)
    }
}
