//! I/O boundary traits for testability
//!
//! These traits abstract where trees come from and where failures get
//! reported, allowing services to be tested with in-memory implementations.

use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::application::ApplicationError;
use crate::util::path::is_valid_tree_name;

/// Failures a tree source can produce.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("tree not found: {name}")]
    NotFound { name: String },

    #[error("tree source unavailable: {context}")]
    Unavailable {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Provider of named tree documents.
pub trait TreeSource: Send + Sync {
    /// Fetch the raw document for a tree name.
    fn fetch(&self, name: &str) -> Result<Value, SourceError>;
}

/// Sink for failures that cross the application boundary.
pub trait ErrorReporter: Send + Sync {
    /// Record a failure with its full internal detail.
    fn report(&self, error: &ApplicationError);
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Tree source backed by a directory of `<name>.json` documents.
#[derive(Debug)]
pub struct DirectoryTreeSource {
    base_dir: PathBuf,
}

impl DirectoryTreeSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn tree_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{name}.json"))
    }

    /// Names of all trees the directory offers, sorted.
    pub fn list_names(&self) -> Result<Vec<String>, SourceError> {
        let entries = std::fs::read_dir(&self.base_dir).map_err(|e| SourceError::Unavailable {
            context: format!("reading tree directory {}", self.base_dir.display()),
            source: Some(Box::new(e)),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SourceError::Unavailable {
                context: format!("reading tree directory {}", self.base_dir.display()),
                source: Some(Box::new(e)),
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

impl TreeSource for DirectoryTreeSource {
    fn fetch(&self, name: &str) -> Result<Value, SourceError> {
        // Names that would escape the base directory cannot exist in it.
        if !is_valid_tree_name(name) {
            return Err(SourceError::NotFound {
                name: name.to_string(),
            });
        }

        let path = self.tree_path(name);
        debug!("fetching tree from {}", path.display());

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound {
                    name: name.to_string(),
                })
            }
            Err(e) => {
                return Err(SourceError::Unavailable {
                    context: format!("reading {}", path.display()),
                    source: Some(Box::new(e)),
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| SourceError::Unavailable {
            context: format!("parsing {}", path.display()),
            source: Some(Box::new(e)),
        })
    }
}

/// Reporter that writes the full error chain to the log.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, report: &ApplicationError) {
        let mut detail = report.to_string();
        let mut cause = std::error::Error::source(report);
        while let Some(err) = cause {
            detail.push_str(": ");
            detail.push_str(&err.to_string());
            cause = err.source();
        }
        error!("{detail}");
    }
}

/// Reporter that swallows failures, for tests and quiet embedding.
#[derive(Debug, Default)]
pub struct NullReporter;

impl ErrorReporter for NullReporter {
    fn report(&self, _report: &ApplicationError) {}
}
