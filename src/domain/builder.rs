//! Tree builder for turning nested list/map documents into labeled hierarchies.

use generational_arena::Index;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::error::{DomainError, DomainResult};

/// Human-readable name of a JSON value's type, for error messages.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

/// Constructs labeled trees from parsed documents.
///
/// Lists become structural nodes whose children are the list elements, each
/// element inheriting the label of the list. Maps become record nodes:
/// list-valued entries turn into labeled child subtrees, everything else is
/// merged into the node's fields in source order.
pub struct TreeBuilder;

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a tree from a parsed document. The root must be a list or a map;
    /// scalars anywhere in a structural position are rejected outright.
    #[instrument(level = "debug", skip(self, document))]
    pub fn build(&self, document: &Value) -> DomainResult<TreeArena> {
        match document {
            Value::Array(_) | Value::Object(_) => {
                let mut tree = TreeArena::new();
                self.build_value(&mut tree, document, None, None)?;
                debug!(
                    "built tree with {} nodes, depth {}",
                    tree.len(),
                    tree.depth()
                );
                Ok(tree)
            }
            other => Err(DomainError::InvalidRoot {
                found: value_type_name(other),
            }),
        }
    }

    fn build_value(
        &self,
        tree: &mut TreeArena,
        value: &Value,
        label: Option<&str>,
        parent: Option<Index>,
    ) -> DomainResult<Index> {
        match value {
            Value::Array(elements) => {
                let node_idx =
                    tree.insert_node(NodeData::structural(label.map(String::from)), parent);
                for element in elements {
                    self.build_value(tree, element, label, Some(node_idx))?;
                }
                Ok(node_idx)
            }
            Value::Object(entries) => {
                let node_idx = tree.insert_node(NodeData::record(), parent);
                for (key, entry_value) in entries {
                    if entry_value.is_array() {
                        self.build_value(tree, entry_value, Some(key.as_str()), Some(node_idx))?;
                    } else if let Some(node) = tree.get_node_mut(node_idx) {
                        if let Some(fields) = node.data.fields.as_mut() {
                            fields.insert(key.clone(), entry_value.clone());
                        }
                    }
                }
                Ok(node_idx)
            }
            // Only list elements recurse unchecked, so a scalar here sits
            // directly inside a list.
            other => Err(DomainError::InvalidElement {
                found: value_type_name(other),
                context: match label {
                    Some(name) => format!("list {name:?}"),
                    None => String::from("an unlabeled list"),
                },
            }),
        }
    }
}
