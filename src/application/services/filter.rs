//! Tree filtering service
//!
//! Fetches named trees from a source, builds their hierarchies, and runs
//! selective pruning queries against them.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{TreeArena, TreeBuilder};
use crate::infrastructure::traits::TreeSource;

/// One pruning query: how to recognize the nodes to keep.
#[derive(Debug, Clone)]
pub struct FilterQuery {
    /// Label the matched nodes' parent must carry
    pub ancestor_label: String,
    /// Field key compared inside candidate nodes
    pub field_key: String,
    /// Values that make a candidate a match
    pub target_values: Vec<Value>,
}

/// Service for answering selective pruning queries over named trees.
pub struct FilterService {
    source: Arc<dyn TreeSource>,
}

impl FilterService {
    /// Create a new filter service backed by the given tree source.
    pub fn new(source: Arc<dyn TreeSource>) -> Self {
        Self { source }
    }

    /// Fetch a named tree from the source and build its hierarchy.
    pub fn fetch_tree(&self, name: &str) -> ApplicationResult<TreeArena> {
        let document = self.source.fetch(name).map_err(ApplicationError::from)?;
        let tree = TreeBuilder::new().build(&document)?;
        debug!("fetched tree {:?}: {} nodes", name, tree.len());
        Ok(tree)
    }

    /// Run a pruning query against an already-fetched document.
    ///
    /// Returns the serialized pruned trees, one document per kept branch, in
    /// the order their first match was found.
    pub fn filter_structure(
        &self,
        document: &Value,
        query: &FilterQuery,
    ) -> ApplicationResult<Vec<Value>> {
        let tree = TreeBuilder::new().build(document)?;
        let pruned = tree.filter(
            &query.ancestor_label,
            &query.field_key,
            &query.target_values,
        );
        debug!("query kept {} trees", pruned.len());
        Ok(pruned.iter().map(|tree| tree.to_value()).collect())
    }

    /// Run a pruning query against a named tree from the source.
    pub fn filter_named(&self, name: &str, query: &FilterQuery) -> ApplicationResult<Vec<Value>> {
        let document = self.source.fetch(name).map_err(ApplicationError::from)?;
        self.filter_structure(&document, query)
    }
}
