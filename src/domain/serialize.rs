//! Serialization of labeled trees back into nested list/map documents.
//!
//! The inverse of the builder up to structural flattening: single-element
//! list nesting collapses, everything else round-trips.

use generational_arena::Index;
use serde_json::Value;

use crate::domain::arena::TreeArena;

impl TreeArena {
    /// Re-emits the tree as a nested document.
    ///
    /// Leaves yield their fields (or an empty list when fieldless, so an
    /// empty labeled list re-emits as an empty list under its label).
    /// Interior nodes collect their children, splicing list-shaped child
    /// results one level; the first child's label decides whether the
    /// collection is wrapped in a map under that label or stays a bare list.
    pub fn to_value(&self) -> Value {
        match self.root() {
            Some(root) => self.node_to_value(root),
            None => Value::Array(Vec::new()),
        }
    }

    /// Serializes the subtree rooted at `idx`. Missing indices yield an
    /// empty structural marker.
    pub fn node_to_value(&self, idx: Index) -> Value {
        let node = match self.get_node(idx) {
            Some(node) => node,
            None => return Value::Array(Vec::new()),
        };

        if node.children.is_empty() {
            return match &node.data.fields {
                Some(fields) => Value::Object(fields.clone()),
                None => Value::Array(Vec::new()),
            };
        }

        let mut items = Vec::new();
        for &child in &node.children {
            match self.node_to_value(child) {
                Value::Array(nested) => items.extend(nested),
                value => items.push(value),
            }
        }

        let first_child_label = node
            .children
            .first()
            .and_then(|&child| self.get_node(child))
            .and_then(|child| child.data.label.clone());

        match first_child_label {
            Some(label) => {
                let mut object = node.data.fields.clone().unwrap_or_default();
                object.insert(label, Value::Array(items));
                Value::Object(object)
            }
            None => Value::Array(items),
        }
    }
}
