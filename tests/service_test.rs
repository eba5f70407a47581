//! Tests for FilterService

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use tempfile::TempDir;

use rsprune::application::error::{
    MALFORMED_CLIENT_MESSAGE, NOT_FOUND_CLIENT_MESSAGE, SOURCE_CLIENT_MESSAGE,
};
use rsprune::application::{ApplicationError, FilterQuery, FilterService};
use rsprune::cli::CliError;
use rsprune::config::Settings;
use rsprune::exitcode;
use rsprune::infrastructure::{
    ErrorReporter, NullReporter, ServiceContainer, SourceError, TreeSource,
};

/// In-memory tree source for exercising the service without a filesystem.
struct InMemoryTreeSource {
    trees: HashMap<String, Value>,
}

impl InMemoryTreeSource {
    fn with_tree(name: &str, document: Value) -> Self {
        let mut trees = HashMap::new();
        trees.insert(name.to_string(), document);
        Self { trees }
    }
}

impl TreeSource for InMemoryTreeSource {
    fn fetch(&self, name: &str) -> Result<Value, SourceError> {
        self.trees
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                name: name.to_string(),
            })
    }
}

/// Source that always fails, for the unavailable path.
struct BrokenTreeSource;

impl TreeSource for BrokenTreeSource {
    fn fetch(&self, _name: &str) -> Result<Value, SourceError> {
        Err(SourceError::Unavailable {
            context: "backend exploded".to_string(),
            source: None,
        })
    }
}

/// Reporter that records what it saw.
#[derive(Default)]
struct RecordingReporter {
    seen: Mutex<Vec<String>>,
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, error: &ApplicationError) {
        self.seen
            .lock()
            .expect("reporter lock")
            .push(error.to_string());
    }
}

fn query(ancestor_label: &str, field_key: &str, target_values: Vec<Value>) -> FilterQuery {
    FilterQuery {
        ancestor_label: ancestor_label.to_string(),
        field_key: field_key.to_string(),
        target_values,
    }
}

#[test]
fn given_known_tree_when_filtering_then_returns_pruned_documents() {
    // Arrange
    let document = json!([
        { "id": 1, "indicators": [{ "id": 1 }, { "id": 2 }] },
        { "id": 2, "indicators": [{ "id": 3 }] }
    ]);
    let source = Arc::new(InMemoryTreeSource::with_tree("input", document));
    let service = FilterService::new(source);

    // Act
    let results = service
        .filter_named("input", &query("indicators", "id", vec![json!(1), json!(2)]))
        .expect("filter succeeds");

    // Assert
    assert_eq!(
        results,
        vec![json!({ "id": 1, "indicators": [{ "id": 1 }, { "id": 2 }] })]
    );
}

#[test]
fn given_raw_document_when_filtering_then_no_source_fetch_is_needed() {
    // Arrange - the source knows nothing; the document comes from the caller
    let service = FilterService::new(Arc::new(InMemoryTreeSource {
        trees: HashMap::new(),
    }));
    let document = json!([{ "id": 1, "tags": [{ "id": 10 }, { "id": 11 }] }]);

    // Act
    let results = service
        .filter_structure(&document, &query("tags", "id", vec![json!(11)]))
        .expect("filter succeeds");

    // Assert
    assert_eq!(results, vec![json!({ "id": 1, "tags": [{ "id": 11 }] })]);
}

#[test]
fn given_known_tree_when_fetching_then_tree_has_hierarchy() {
    // Arrange
    let document = json!([{ "id": 1, "tags": [{ "id": 10 }] }]);
    let source = Arc::new(InMemoryTreeSource::with_tree("input", document));
    let service = FilterService::new(source);

    // Act
    let tree = service.fetch_tree("input").expect("fetch succeeds");

    // Assert
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.depth(), 4);
}

#[test]
fn given_unknown_tree_when_filtering_then_not_found_with_opaque_client_message() {
    // Arrange
    let source = Arc::new(InMemoryTreeSource {
        trees: HashMap::new(),
    });
    let service = FilterService::new(source);

    // Act
    let err = service
        .filter_named("missing", &query("tags", "id", vec![json!(1)]))
        .expect_err("unknown tree must fail");

    // Assert
    assert!(matches!(err, ApplicationError::TreeNotFound { .. }));
    assert!(err.to_string().contains("missing"));
    assert_eq!(err.client_message(), NOT_FOUND_CLIENT_MESSAGE);
    assert!(!err.client_message().contains("missing"));
}

#[test]
fn given_broken_source_when_filtering_then_unavailable_without_detail_leak() {
    // Arrange
    let service = FilterService::new(Arc::new(BrokenTreeSource));

    // Act
    let err = service
        .filter_named("any", &query("tags", "id", vec![json!(1)]))
        .expect_err("broken source must fail");

    // Assert
    assert!(matches!(err, ApplicationError::SourceUnavailable { .. }));
    assert!(err.to_string().contains("backend exploded"));
    assert_eq!(err.client_message(), SOURCE_CLIENT_MESSAGE);
    assert!(!err.client_message().contains("exploded"));
}

#[test]
fn given_scalar_document_when_filtering_then_malformed_keeps_detail() {
    // Arrange
    let source = Arc::new(InMemoryTreeSource::with_tree("weird", json!("just a string")));
    let service = FilterService::new(source);

    // Act
    let err = service
        .filter_named("weird", &query("tags", "id", vec![json!(1)]))
        .expect_err("scalar document must fail");

    // Assert - the caller sent the document shape, so detail comes back
    assert!(matches!(err, ApplicationError::Malformed(_)));
    assert!(err.client_message().starts_with(MALFORMED_CLIENT_MESSAGE));
    assert!(err.client_message().contains("string"));
}

#[test]
fn given_application_failures_when_mapped_then_exit_codes_follow_sysexits() {
    // Arrange
    let not_found = ApplicationError::TreeNotFound {
        name: "x".to_string(),
    };
    let unavailable = ApplicationError::SourceUnavailable {
        context: "down".to_string(),
        source: None,
    };
    let config = ApplicationError::Config {
        message: "bad value".to_string(),
    };

    // Act & Assert
    assert_eq!(CliError::from(not_found).exit_code(), exitcode::NOINPUT);
    assert_eq!(CliError::from(unavailable).exit_code(), exitcode::UNAVAILABLE);
    assert_eq!(CliError::from(config).exit_code(), exitcode::CONFIG);
    assert_eq!(
        CliError::InvalidArgs("no values".to_string()).exit_code(),
        exitcode::USAGE
    );
}

#[test]
fn given_container_when_wired_then_all_services_share_the_source() {
    // Arrange
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("input.json"),
        r#"[{ "id": 1, "tags": [{ "id": 10 }] }]"#,
    )
    .expect("write tree document");
    let settings = Settings {
        source_dir: dir.path().to_path_buf(),
    };

    // Act
    let container = ServiceContainer::with_reporter(settings, Arc::new(NullReporter));

    // Assert
    assert_eq!(container.settings.source_dir, dir.path());
    assert_eq!(
        container.source.list_names().expect("list"),
        vec!["input".to_string()]
    );
    let results = container
        .filter
        .filter_named("input", &query("tags", "id", vec![json!(10)]))
        .expect("filter through container");
    assert_eq!(results.len(), 1);
}

#[test]
fn given_failure_when_reported_then_reporter_sees_the_detail() {
    // Arrange
    let reporter = RecordingReporter::default();
    let err = ApplicationError::TreeNotFound {
        name: "vanished".to_string(),
    };

    // Act
    reporter.report(&err);
    NullReporter.report(&err);

    // Assert
    let seen = reporter.seen.lock().expect("reporter lock");
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("vanished"));
}
