use super::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn load_without_file_yields_empty_catalog() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::load(dir.path().join("songs.json")).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.names().count(), 0);
}

#[test]
fn add_persists_and_reload_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.json");

    let mut store = CatalogStore::load(&path).unwrap();
    store.add("Song A", "/music/a.mp3").unwrap();
    store.add("Song B", "/music/b.mp3").unwrap();

    let reloaded = CatalogStore::load(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.resolve("Song A").unwrap(), Path::new("/music/a.mp3"));
    assert_eq!(reloaded.resolve("Song B").unwrap(), Path::new("/music/b.mp3"));
}

#[test]
fn add_duplicate_name_is_rejected_and_catalog_unchanged() {
    let dir = tempdir().unwrap();
    let mut store = CatalogStore::load(dir.path().join("songs.json")).unwrap();

    store.add("Song A", "/a.mp3").unwrap();
    let err = store.add("Song A", "/b.mp3").unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateName(_)));

    assert_eq!(store.len(), 1);
    assert_eq!(store.resolve("Song A").unwrap(), Path::new("/a.mp3"));
}

#[test]
fn names_are_case_sensitive_keys() {
    let dir = tempdir().unwrap();
    let mut store = CatalogStore::load(dir.path().join("songs.json")).unwrap();

    store.add("alpha", "/a.mp3").unwrap();
    store.add("Alpha", "/A.mp3").unwrap();
    assert_eq!(store.len(), 2);
}

#[test]
fn delete_unknown_name_errors() {
    let dir = tempdir().unwrap();
    let mut store = CatalogStore::load(dir.path().join("songs.json")).unwrap();

    let err = store.delete("Ghost").unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[test]
fn delete_removes_and_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.json");

    let mut store = CatalogStore::load(&path).unwrap();
    store.add("Song A", "/a.mp3").unwrap();
    store.add("Song B", "/b.mp3").unwrap();
    store.delete("Song A").unwrap();

    assert!(!store.contains("Song A"));
    let reloaded = CatalogStore::load(&path).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded.contains("Song B"));
}

#[test]
fn resolve_reports_not_found_for_absent_names() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::load(dir.path().join("songs.json")).unwrap();
    assert!(matches!(
        store.resolve("Ghost").unwrap_err(),
        CatalogError::NotFound(_)
    ));
}

#[test]
fn corrupt_document_reports_corrupt_storage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.json");
    fs::write(&path, "{ not json").unwrap();

    let err = CatalogStore::load(&path).unwrap_err();
    assert!(matches!(err, CatalogError::CorruptStorage(_)));
}

#[test]
fn wrong_document_shape_reports_corrupt_storage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.json");
    fs::write(&path, r#"["a", "b"]"#).unwrap();

    let err = CatalogStore::load(&path).unwrap_err();
    assert!(matches!(err, CatalogError::CorruptStorage(_)));
}

#[test]
fn persisted_document_is_a_flat_name_to_path_mapping() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.json");

    let mut store = CatalogStore::load(&path).unwrap();
    store.add("Song A", "/a.mp3").unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["Song A"], "/a.mp3");
    assert!(doc.as_object().unwrap().len() == 1);
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.json");

    let mut store = CatalogStore::load(&path).unwrap();
    store.add("Song A", "/a.mp3").unwrap();

    let entries: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["songs.json".to_string()]);
}

#[test]
fn song_name_from_path_strips_extension() {
    assert_eq!(
        song_name_from_path(Path::new("/music/My Song.mp3")),
        Some("My Song".to_string())
    );
    assert_eq!(
        song_name_from_path(Path::new("plain-name")),
        Some("plain-name".to_string())
    );
    assert_eq!(song_name_from_path(Path::new("/")), None);
}
