//! rsprune: selective pruning of labeled JSON trees
//!
//! Ingests nested list/map documents, builds an arena-backed labeled tree,
//! and answers pruning queries: keep only the nodes whose parent carries a
//! given label and whose field matches one of a set of target values, plus
//! their ancestor paths, with shared ancestors merged.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{ApplicationError, ApplicationResult, FilterQuery, FilterService};
pub use domain::{DomainError, DomainResult, NodeData, TreeArena, TreeBuilder, TreeNode};
pub use infrastructure::{DirectoryTreeSource, ServiceContainer, TreeSource};
