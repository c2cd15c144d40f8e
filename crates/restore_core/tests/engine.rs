use std::fs;
use std::path::{Path, PathBuf};

use restore_core::catalog::SpellBook;
use restore_core::core_api::{
    Engine, FailureKind, LoadOutcome, RestoreConfig, RestoreMode, RestoreOutcome,
    UnavailableReason,
};
use restore_core::profile::Profile;
use restore_core::store::DocumentStore;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn fixture_path(name: &str) -> PathBuf {
    workspace_root().join(format!("tests/fixtures/players/{name}.json"))
}

/// Copies fixtures into a fresh store, renaming each to `as_id`.
fn store_with(fixtures: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp store");
    for (name, as_id) in fixtures {
        copy_fixture(name, &dir.path().join(format!("{as_id}.json")));
    }
    dir
}

fn copy_fixture(name: &str, dest: &Path) {
    let src = fixture_path(name);
    fs::copy(&src, dest).unwrap_or_else(|e| panic!("failed to copy {:?}: {}", src, e));
}

fn engine(root: &Path, mode: RestoreMode) -> Engine {
    let config = RestoreConfig {
        store_root: root.to_path_buf(),
        mode,
        ..RestoreConfig::default()
    };
    Engine::new(&config).expect("standard engine")
}

#[test]
fn store_reports_missing_document_as_not_found() {
    let dir = store_with(&[]);
    let store = DocumentStore::new(dir.path());

    match store.load("nobody") {
        LoadOutcome::Unavailable(u) => assert_eq!(u.reason, UnavailableReason::NotFound),
        LoadOutcome::Ready(_) => panic!("empty store returned a document"),
    }
}

#[test]
fn store_reports_unparseable_document_as_corrupt() {
    let dir = store_with(&[("corrupt", "zezima")]);
    let store = DocumentStore::new(dir.path());

    match store.load("zezima") {
        LoadOutcome::Unavailable(u) => {
            assert_eq!(u.reason, UnavailableReason::Corrupt);
            assert!(u.detail.contains("zezima.json"), "{}", u.detail);
        }
        LoadOutcome::Ready(_) => panic!("truncated document parsed"),
    }
}

#[test]
fn store_rejects_non_mapping_root() {
    let dir = store_with(&[("listing", "zezima")]);
    let store = DocumentStore::new(dir.path());

    match store.load("zezima") {
        LoadOutcome::Unavailable(u) => {
            assert_eq!(u.reason, UnavailableReason::Corrupt);
            assert!(u.detail.contains("sequence"), "{}", u.detail);
        }
        LoadOutcome::Ready(_) => panic!("sequence root accepted as a document"),
    }
}

#[test]
fn store_resolves_identifiers_case_insensitively() {
    let dir = store_with(&[("minimal", "zezima")]);
    let store = DocumentStore::new(dir.path());

    assert!(store.load("Zezima").is_ready());
    assert!(store.load("  ZEZIMA ").is_ready());
}

#[test]
fn store_honours_configured_extension() {
    let dir = tempfile::tempdir().expect("failed to create temp store");
    copy_fixture("minimal", &dir.path().join("zezima.sav"));

    assert!(!DocumentStore::new(dir.path()).load("zezima").is_ready());
    assert!(
        DocumentStore::with_extension(dir.path(), "sav")
            .load("zezima")
            .is_ready()
    );
}

#[test]
fn store_treats_unreadable_path_as_corrupt() {
    let dir = tempfile::tempdir().expect("failed to create temp store");
    fs::create_dir(dir.path().join("zezima.json")).expect("failed to create directory");

    match DocumentStore::new(dir.path()).load("zezima") {
        LoadOutcome::Unavailable(u) => assert_eq!(u.reason, UnavailableReason::Corrupt),
        LoadOutcome::Ready(_) => panic!("directory read as a document"),
    }
}

#[test]
fn engine_restores_subject_from_store() {
    let dir = store_with(&[("zezima", "zezima")]);
    let engine = engine(dir.path(), RestoreMode::Partial);
    let mut profile = Profile::new("Zezima");

    let outcome = engine.restore_subject("Zezima", &mut profile);
    assert!(outcome.is_complete());
    assert_eq!(outcome.report().map(|r| r.applied_count()), Some(27));
    assert_eq!(profile.spellbook, SpellBook::Ancient);
}

#[test]
fn engine_leaves_subject_untouched_when_unavailable() {
    let dir = store_with(&[]);
    let engine = engine(dir.path(), RestoreMode::Partial);
    let mut profile = Profile::new("ghost");

    let outcome = engine.restore_subject("ghost", &mut profile);
    match outcome {
        RestoreOutcome::Unavailable(u) => assert_eq!(u.reason, UnavailableReason::NotFound),
        RestoreOutcome::Restored(report) => panic!("restored from nothing: {report:?}"),
    }
    assert_eq!(profile, Profile::new("ghost"));
}

#[test]
fn engine_mode_selects_partial_or_staged() {
    let dir = store_with(&[("broken_configs", "zezima")]);

    let mut partial = Profile::new("zezima");
    let outcome = engine(dir.path(), RestoreMode::Partial).restore_subject("zezima", &mut partial);
    let failure = outcome
        .report()
        .and_then(|r| r.failure.as_ref())
        .expect("configs fail");
    assert_eq!(failure.kind(), FailureKind::MalformedNumber);
    assert_eq!(partial.spellbook, SpellBook::Ancient);

    let mut staged = Profile::new("zezima");
    let outcome = engine(dir.path(), RestoreMode::Staged).restore_subject("zezima", &mut staged);
    assert!(!outcome.is_complete());
    assert_eq!(staged, Profile::new("zezima"));
}

#[test]
fn config_deserializes_with_defaults() {
    let config: RestoreConfig =
        serde_json::from_str(r#"{ "mode": "staged" }"#).expect("valid config");
    assert_eq!(config.mode, RestoreMode::Staged);
    assert_eq!(config.store_root, PathBuf::from("data/players"));
    assert_eq!(config.extension, "json");

    assert!(serde_json::from_str::<RestoreConfig>(r#"{ "root": "x" }"#).is_err());
}
