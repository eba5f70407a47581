//! Application-level errors (wraps domain and source errors)
//!
//! Every variant carries a full internal description for the logs and maps
//! to a client-safe message that leaks nothing about the failure internals.

use thiserror::Error;

use crate::domain::DomainError;
use crate::infrastructure::traits::SourceError;

/// Client-safe message for a tree the source does not know.
pub const NOT_FOUND_CLIENT_MESSAGE: &str = "tree not found";
/// Client-safe message for a failing tree source; details stay in the logs.
pub const SOURCE_CLIENT_MESSAGE: &str =
    "the tree source did not behave well; the failure has been reported";
/// Client-safe prefix for documents that violate the tree data contract.
pub const MALFORMED_CLIENT_MESSAGE: &str = "malformed tree document";
/// Client-safe catch-all; details stay in the logs.
pub const INTERNAL_CLIENT_MESSAGE: &str = "internal error; the failure has been reported";

/// Application errors wrap domain errors and add orchestration context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("tree not found on the source: {name}")]
    TreeNotFound { name: String },

    #[error("tree source failed: {context}")]
    SourceUnavailable {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{0}")]
    Malformed(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("internal error: {context}")]
    Internal {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// The message shown to the caller. Data-contract and configuration
    /// problems are the caller's to fix and keep their detail; everything
    /// else stays opaque.
    pub fn client_message(&self) -> String {
        match self {
            ApplicationError::TreeNotFound { .. } => NOT_FOUND_CLIENT_MESSAGE.to_string(),
            ApplicationError::SourceUnavailable { .. } => SOURCE_CLIENT_MESSAGE.to_string(),
            ApplicationError::Malformed(source) => format!("{MALFORMED_CLIENT_MESSAGE}: {source}"),
            ApplicationError::Config { message } => format!("config error: {message}"),
            ApplicationError::Internal { .. } => INTERNAL_CLIENT_MESSAGE.to_string(),
        }
    }
}

impl From<SourceError> for ApplicationError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound { name } => ApplicationError::TreeNotFound { name },
            SourceError::Unavailable { context, source } => {
                ApplicationError::SourceUnavailable { context, source }
            }
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
