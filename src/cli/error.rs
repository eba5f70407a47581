//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    App(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::App(e) => match e {
                ApplicationError::TreeNotFound { .. } => crate::exitcode::NOINPUT,
                ApplicationError::SourceUnavailable { .. } => crate::exitcode::UNAVAILABLE,
                ApplicationError::Malformed(_) => crate::exitcode::DATAERR,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::Internal { .. } => crate::exitcode::SOFTWARE,
            },
        }
    }

    /// The message safe to show the user; failure internals stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            CliError::App(e) => e.client_message(),
            CliError::InvalidArgs(_) => self.to_string(),
        }
    }
}
