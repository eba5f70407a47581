//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the labeled-tree data contract.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("cannot build a tree from {found} at the document root: expected a list or a map")]
    InvalidRoot { found: &'static str },

    #[error("unexpected {found} in {context}: structural positions must hold lists or maps")]
    InvalidElement { found: &'static str, context: String },
}

pub type DomainResult<T> = Result<T, DomainError>;
