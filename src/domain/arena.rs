//! Arena-backed labeled tree built from nested JSON-like documents

use generational_arena::{Arena, Index};
use serde_json::{Map, Value};
use std::fmt;
use termtree::Tree;
use tracing::instrument;
use uuid::Uuid;

/// Data payload for one tree node.
///
/// Structural nodes come from source lists and may carry a label inherited
/// from the map key that held the list. Record nodes come from source maps
/// and carry the map's scalar entries as fields.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Stable identity, preserved across pruning copies
    pub id: Uuid,
    /// Label inherited from the enclosing map key, None for record nodes
    /// and unlabeled lists
    pub label: Option<String>,
    /// Scalar entries of the originating map, None for structural nodes
    pub fields: Option<Map<String, Value>>,
}

impl NodeData {
    /// A structural node introduced by a source list.
    pub fn structural(label: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label,
            fields: None,
        }
    }

    /// A record node introduced by a source map. Starts with an empty field
    /// set; the builder merges scalar entries in source order.
    pub fn record() -> Self {
        Self {
            id: Uuid::new_v4(),
            label: None,
            fields: Some(Map::new()),
        }
    }

    /// Looks up a field value by key, None for structural nodes and
    /// absent keys alike.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.as_ref().and_then(|fields| fields.get(key))
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{label}")
        } else if let Some(fields) = &self.fields {
            write!(f, "{}", Value::Object(fields.clone()))
        } else {
            write!(f, "[]")
        }
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Payload for this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes, in source order
    pub children: Vec<Index>,
}

/// Arena-based tree structure for efficient hierarchy management.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Each tree represents one complete document hierarchy; pruned results are
/// separate arenas.
#[derive(Debug)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    #[instrument(level = "trace", skip(self, data))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Renders the hierarchy for terminal display. Labels show as-is,
    /// record nodes show their fields as compact JSON.
    pub fn display_tree(&self) -> Tree<String> {
        fn build(arena: &TreeArena, idx: Index) -> Tree<String> {
            let text = arena
                .get_node(idx)
                .map(|node| node.data.to_string())
                .unwrap_or_default();
            let mut tree = Tree::new(text);
            if let Some(node) = arena.get_node(idx) {
                for &child in &node.children {
                    tree.push(build(arena, child));
                }
            }
            tree
        }

        match self.root {
            Some(root) => build(self, root),
            None => Tree::new(String::from("(empty)")),
        }
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
