//! Tests for DirectoryTreeSource

use serde_json::json;
use tempfile::TempDir;

use rsprune::infrastructure::{DirectoryTreeSource, SourceError, TreeSource};

fn write_tree(dir: &TempDir, name: &str, content: &str) {
    let path = dir.path().join(format!("{name}.json"));
    std::fs::write(path, content).expect("write tree document");
}

#[test]
fn given_existing_document_when_fetching_then_json_is_parsed() {
    // Arrange
    let dir = TempDir::new().expect("tempdir");
    write_tree(&dir, "input", r#"[{ "id": 1, "tags": [{ "id": 10 }] }]"#);
    let source = DirectoryTreeSource::new(dir.path());

    // Act
    let document = source.fetch("input").expect("fetch succeeds");

    // Assert
    assert_eq!(document, json!([{ "id": 1, "tags": [{ "id": 10 }] }]));
}

#[test]
fn given_missing_document_when_fetching_then_not_found() {
    // Arrange
    let dir = TempDir::new().expect("tempdir");
    let source = DirectoryTreeSource::new(dir.path());

    // Act
    let err = source.fetch("absent").expect_err("missing tree must fail");

    // Assert
    assert!(matches!(err, SourceError::NotFound { name } if name == "absent"));
}

#[test]
fn given_invalid_json_when_fetching_then_unavailable() {
    // Arrange
    let dir = TempDir::new().expect("tempdir");
    write_tree(&dir, "broken", "{ not json");
    let source = DirectoryTreeSource::new(dir.path());

    // Act
    let err = source.fetch("broken").expect_err("broken json must fail");

    // Assert
    assert!(matches!(err, SourceError::Unavailable { .. }));
}

#[test]
fn given_escaping_names_when_fetching_then_not_found() {
    // Arrange
    let dir = TempDir::new().expect("tempdir");
    write_tree(&dir, "input", "[]");
    let source = DirectoryTreeSource::new(dir.path());

    // Act & Assert - names that would leave the base directory never resolve
    for name in ["../input", "/etc/passwd", "a/b", ".hidden", ""] {
        let err = source.fetch(name).expect_err("escaping name must fail");
        assert!(
            matches!(err, SourceError::NotFound { .. }),
            "expected NotFound for {name:?}"
        );
    }
}

#[test]
fn given_mixed_directory_when_listing_then_only_json_stems_come_back_sorted() {
    // Arrange
    let dir = TempDir::new().expect("tempdir");
    write_tree(&dir, "themes", "[]");
    write_tree(&dir, "accounts", "[]");
    std::fs::write(dir.path().join("notes.txt"), "ignore me").expect("write notes");
    std::fs::create_dir(dir.path().join("nested")).expect("create dir");
    let source = DirectoryTreeSource::new(dir.path());

    // Act
    let names = source.list_names().expect("list succeeds");

    // Assert
    assert_eq!(names, vec!["accounts".to_string(), "themes".to_string()]);
}

#[test]
fn given_missing_directory_when_listing_then_unavailable() {
    // Arrange
    let source = DirectoryTreeSource::new("/definitely/not/here");

    // Act
    let err = source.list_names().expect_err("missing dir must fail");

    // Assert
    assert!(matches!(err, SourceError::Unavailable { .. }));
}
