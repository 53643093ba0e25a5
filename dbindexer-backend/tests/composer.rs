//! Integration tests for BackendComposer.

mod common;

use std::collections::HashMap;

use common::test_engine::{
    CountingResolver, SQLITE, databases, engines, indexing_extension, settings, sqlite_engine,
};
use dbindexer_backend::{
    BackendComposer, BehaviorSet, DatabaseBackend, DatabaseOperations, Dispatch, EngineCatalog,
    ErrorKind, Extension, NativeEngine,
};
use dbindexer_core::Settings;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_missing_target_fails_before_engine_resolution() {
    let resolver = CountingResolver::new(engines());
    let composer = BackendComposer::new(databases(), &resolver);

    let err = composer.build(&Settings::new()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingTarget);
    assert_eq!(resolver.lookups(), 0);
}

#[test]
fn test_non_string_target_is_missing() {
    let composer = BackendComposer::new(databases(), engines());

    let err = composer.build(&settings(json!({"TARGET": 1}))).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingTarget);
}

#[test]
fn test_unregistered_target() {
    let resolver = CountingResolver::new(engines());
    let composer = BackendComposer::new(databases(), &resolver);

    let err = composer
        .build(&settings(json!({"TARGET": "replica"})))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingTarget);
    assert_eq!(err.to_string(), "TARGET backend `replica` is not registered");
    assert_eq!(resolver.lookups(), 0);
}

#[test]
fn test_unresolvable_engine() {
    let mut registry = HashMap::new();
    registry.insert("t".to_owned(), settings(json!({"ENGINE": "no.such.backend"})));
    let composer = BackendComposer::new(registry, engines());

    let err = composer.build(&settings(json!({"TARGET": "t"}))).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BackendResolution);
    assert_eq!(err.to_string(), "backend engine `no.such.backend` could not be resolved");
}

#[test]
fn test_descriptor_without_engine() {
    let mut registry = HashMap::new();
    registry.insert("t".to_owned(), settings(json!({"NAME": "db"})));
    let composer = BackendComposer::new(registry, engines());

    let err = composer.build(&settings(json!({"TARGET": "t"}))).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BackendResolution);
}

#[test]
fn test_target_settings_win_on_conflict() {
    let composer = BackendComposer::new(databases(), engines());

    let backend = composer
        .build(&settings(json!({"TARGET": "default", "OPTION": "fromcaller", "EXTRA": 1})))
        .unwrap();

    assert_eq!(
        backend.settings(),
        &settings(json!({
            "TARGET": "default",
            "OPTION": "fromtarget",
            "EXTRA": 1,
            "ENGINE": SQLITE,
            "NAME": ":memory:",
        }))
    );
}

#[test]
fn test_nested_settings_are_merged() {
    let mut registry = HashMap::new();
    registry.insert(
        "default".to_owned(),
        settings(json!({"ENGINE": SQLITE, "OPTIONS": {"timeout": 20}})),
    );
    let composer = BackendComposer::new(registry, engines());
    let caller = settings(json!({
        "TARGET": "default",
        "OPTIONS": {"timeout": 5, "indexes": {"user": ["username"]}},
    }));

    let backend = composer.build(&caller).unwrap();

    assert_eq!(
        backend.settings().get("OPTIONS"),
        Some(&json!({"timeout": 20, "indexes": {"user": ["username"]}}))
    );
    assert_eq!(
        caller.get("OPTIONS"),
        Some(&json!({"timeout": 5, "indexes": {"user": ["username"]}}))
    );
}

#[test]
fn test_connect_failure_produces_no_backend() {
    let engine = NativeEngine::builder("sqlite").require("USER").build();
    let engines = EngineCatalog::new().engine(SQLITE, engine);
    let composer = BackendComposer::new(databases(), engines);

    let err = composer.build(&settings(json!({"TARGET": "default"}))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Operation);

    let backend = composer
        .build(&settings(json!({"TARGET": "default", "USER": "app"})))
        .unwrap();
    assert_eq!(backend.settings().get_str("USER"), Some("app"));
}

#[test]
fn test_backend_dispatch_prefers_extension() {
    let composer = BackendComposer::new(databases(), engines()).extension(indexing_extension());

    let backend = composer.build(&settings(json!({"TARGET": "default"}))).unwrap();

    assert_eq!(backend.label().as_str(), "dbindexer.sqlite");
    assert_eq!(backend.call("vendor", &json!(null)).unwrap(), json!("dbindexer+sqlite"));
    assert_eq!(backend.call("supports_transactions", &json!(null)).unwrap(), json!(true));
    assert_eq!(
        backend.call("cursor", &json!(null)).unwrap_err().kind(),
        ErrorKind::Operation
    );
}

#[test]
fn test_operations_are_composed_at_construction() {
    let composer = BackendComposer::new(databases(), engines()).extension(indexing_extension());

    let backend = composer.build(&settings(json!({"TARGET": "default"}))).unwrap();
    let ops = backend.ops();

    assert_eq!(ops.label().as_str(), "dbindexer.sqlite.ops");
    assert_eq!(
        ops.call("quote_name", &json!("auth_user")).unwrap(),
        json!({"indexed": "\"auth_user\""})
    );
    assert_eq!(ops.call("max_name_length", &json!(null)).unwrap(), json!(64));
    assert!(backend.operations().composer().is_empty());
}

#[test]
fn test_native_backend_is_untouched() {
    let composer = BackendComposer::new(databases(), engines()).extension(indexing_extension());

    let backend = composer.build(&settings(json!({"TARGET": "default"}))).unwrap();

    assert_eq!(backend.native().call("vendor", &json!(null)).unwrap(), json!("sqlite"));
    assert_eq!(
        backend.native().ops().call("quote_name", &json!("t")).unwrap(),
        json!("\"t\"")
    );
}

#[test]
fn test_default_extension_is_transparent() {
    let composer = BackendComposer::new(databases(), engines());

    let backend = composer.build(&settings(json!({"TARGET": "default"}))).unwrap();
    let compiler = backend.ops().compiler("SQLCompiler");

    assert_eq!(backend.call("vendor", &json!(null)).unwrap(), json!("sqlite"));
    assert_eq!(compiler.unwrap_err().kind(), ErrorKind::ExtensionLookup);
}

#[test]
fn test_extension_applies_to_any_target() {
    let engines = engines().engine(
        "djangoappengine.db",
        NativeEngine::builder("appengine")
            .backend(
                BehaviorSet::builder("appengine")
                    .constant("vendor", "appengine")
                    .build(),
            )
            .build(),
    );
    let mut registry = databases();
    registry.insert("gae".to_owned(), settings(json!({"ENGINE": "djangoappengine.db"})));
    let composer = BackendComposer::new(registry, engines).extension(indexing_extension());

    let sqlite = composer.build(&settings(json!({"TARGET": "default"}))).unwrap();
    let gae = composer.build(&settings(json!({"TARGET": "gae"}))).unwrap();

    assert_eq!(sqlite.call("vendor", &json!(null)).unwrap(), json!("dbindexer+sqlite"));
    assert_eq!(gae.call("vendor", &json!(null)).unwrap(), json!("dbindexer+appengine"));
}

#[test]
fn test_composite_backend_wraps_existing_backend() {
    use dbindexer_backend::{CompositeBackend, Engine};
    use std::sync::Arc;

    let native = sqlite_engine().connect(Settings::new()).unwrap();
    let backend = CompositeBackend::wrap(Arc::new(Extension::default()), native);

    assert_eq!(backend.label().as_str(), "dbindexer.sqlite");
    assert!(backend.defines("supports_transactions"));
}
