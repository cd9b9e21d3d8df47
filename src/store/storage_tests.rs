use super::*;
use serde_json::json;
use tempfile::tempdir;

fn read_json(path: &Path) -> Value {
    let content = std::fs::read_to_string(path).expect("read config file");
    serde_json::from_str(&content).expect("parse config file")
}

#[test]
fn test_open_seeds_default_when_file_absent() {
    let dir = tempdir().expect("tempdir");
    let default = json!({"A": 1, "B": "two"});

    let store = ConfigStore::open(dir.path(), "config.json", default.clone()).unwrap();

    assert_eq!(store.document(), &default);
    assert!(store.path().exists());
    assert_eq!(read_json(store.path()), default);
}

#[test]
fn test_open_adopts_existing_file_over_default() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"B": 2}"#).unwrap();

    let store = ConfigStore::open(dir.path(), "config.json", json!({"A": 1})).unwrap();

    assert_eq!(store.get("B"), Some(&json!(2)));
    assert_eq!(store.get("A"), None);
}

#[test]
fn test_open_propagates_malformed_json() {
    let dir = tempdir().expect("tempdir");
    std::fs::write(dir.path().join("config.json"), "not json {{").unwrap();

    let result = ConfigStore::open(dir.path(), "config.json", json!({}));
    assert!(matches!(result, Err(StoreError::JsonError(_))));
}

#[test]
fn test_set_persists_and_round_trips() {
    let dir = tempdir().expect("tempdir");

    let mut store = ConfigStore::open(dir.path(), "config.json", json!({})).unwrap();
    assert!(store.set("KEY", json!("value")));
    assert!(store.set("COUNT", json!(3)));

    let reloaded = ConfigStore::open(dir.path(), "config.json", json!({})).unwrap();
    assert_eq!(reloaded.document(), store.document());
    assert_eq!(reloaded.get("KEY"), Some(&json!("value")));
    assert_eq!(reloaded.get("COUNT"), Some(&json!(3)));
}

#[test]
fn test_get_is_idempotent_and_does_not_write() {
    let dir = tempdir().expect("tempdir");
    let store = ConfigStore::open(dir.path(), "config.json", json!({"A": 1})).unwrap();

    let before = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(store.get("A"), store.get("A"));
    let after = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_remove_deletes_key_and_persists() {
    let dir = tempdir().expect("tempdir");
    let mut store =
        ConfigStore::open(dir.path(), "config.json", json!({"A": 1, "B": 2})).unwrap();

    assert!(store.remove("A").unwrap());

    assert_eq!(store.get("A"), None);
    let on_disk = read_json(store.path());
    assert!(on_disk.get("A").is_none());
    assert_eq!(on_disk.get("B"), Some(&json!(2)));
}

#[test]
fn test_remove_absent_key_fails() {
    let dir = tempdir().expect("tempdir");
    let mut store = ConfigStore::open(dir.path(), "config.json", json!({"A": 1})).unwrap();

    store.remove("A").unwrap();
    let result = store.remove("A");
    assert!(matches!(result, Err(StoreError::KeyNotFound(ref k)) if k == "A"));
}

#[test]
fn test_open_survives_unwritable_base_dir() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("does-not-exist");

    // The first persist fails (parent directory is absent) but the store
    // still opens on the in-memory default.
    let mut store = ConfigStore::open(&missing, "config.json", json!({"A": 1})).unwrap();
    assert!(!store.path().exists());
    assert_eq!(store.get("A"), Some(&json!(1)));

    // Mutations keep updating memory and report the failed persist.
    assert!(!store.set("B", json!(2)));
    assert_eq!(store.get("B"), Some(&json!(2)));
}

#[test]
fn test_persisted_file_uses_four_space_indent() {
    let dir = tempdir().expect("tempdir");
    let store = ConfigStore::open(dir.path(), "config.json", json!({"A": 1})).unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    assert!(content.contains("\n    \"A\""), "expected 4-space indent, got:\n{content}");
}

#[test]
fn test_save_default_restores_default_document() {
    let dir = tempdir().expect("tempdir");
    let default = json!({"A": 1});
    let mut store = ConfigStore::open(dir.path(), "config.json", default.clone()).unwrap();

    assert!(store.set("A", json!(99)));
    assert!(store.save_default());

    // Disk holds the default again; memory keeps the mutated document.
    assert_eq!(read_json(store.path()), default);
    assert_eq!(store.get("A"), Some(&json!(99)));
}

#[test]
fn test_non_object_document_rejects_mutation() {
    let dir = tempdir().expect("tempdir");
    std::fs::write(dir.path().join("config.json"), "[1, 2, 3]").unwrap();

    let mut store = ConfigStore::open(dir.path(), "config.json", json!({})).unwrap();
    assert_eq!(store.get("A"), None);
    assert!(!store.set("A", json!(1)));
    assert!(matches!(store.remove("A"), Err(StoreError::KeyNotFound(_))));
}
