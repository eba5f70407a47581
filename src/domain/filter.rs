//! Selective pruning: find matching nodes, keep only their ancestor paths.

use std::collections::{HashMap, HashSet, VecDeque};

use generational_arena::Index;
use serde_json::Value;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::arena::{TreeArena, TreeNode};

impl TreeArena {
    /// Returns the minimal sub-forest around nodes whose parent carries
    /// `ancestor_label` and whose `field_key` field equals one of the
    /// `target_values`.
    ///
    /// Each returned tree is rooted one level below this tree's root, in the
    /// order their first match was found. Matched nodes keep their whole
    /// subtree; ancestors shared between matches are emitted once. The
    /// search stops as soon as one node per target value has been found.
    /// The original tree is left untouched.
    #[instrument(level = "debug", skip(self, target_values))]
    pub fn filter(
        &self,
        ancestor_label: &str,
        field_key: &str,
        target_values: &[Value],
    ) -> Vec<TreeArena> {
        let matches = self.search(ancestor_label, field_key, target_values);
        debug!("search found {} matching nodes", matches.len());
        self.prune(&matches)
    }

    /// Breadth-first scan for matching nodes, document order within each
    /// level. Stops once the number of matches reaches the number of target
    /// values.
    fn search(&self, ancestor_label: &str, field_key: &str, target_values: &[Value]) -> Vec<Index> {
        let mut found = Vec::new();
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();

        if let Some(root) = self.root() {
            queue.push_back(root);
            visited.insert(root);
        }

        while let Some(idx) = queue.pop_front() {
            let node = match self.get_node(idx) {
                Some(node) => node,
                None => continue,
            };

            if self.is_match(node, ancestor_label, field_key, target_values) {
                found.push(idx);
                if found.len() == target_values.len() {
                    return found;
                }
            }

            for &child in &node.children {
                if visited.insert(child) {
                    queue.push_back(child);
                }
            }
        }

        found
    }

    fn is_match(
        &self,
        node: &TreeNode,
        ancestor_label: &str,
        field_key: &str,
        target_values: &[Value],
    ) -> bool {
        let parent_label = node
            .parent
            .and_then(|parent| self.get_node(parent))
            .and_then(|parent| parent.data.label.as_deref());
        if parent_label != Some(ancestor_label) {
            return false;
        }
        match node.data.field(field_key) {
            Some(value) => target_values.contains(value),
            None => false,
        }
    }

    /// Builds the pruned forest for a set of matched nodes.
    ///
    /// Every match is deep-copied with its subtree, then its ancestor chain
    /// is copied upward until either an ancestor that already has a copy is
    /// reached (the chains merge there) or the root is hit. The root itself
    /// is never copied: the nodes directly below it become the roots of the
    /// returned trees.
    fn prune(&self, matches: &[Index]) -> Vec<TreeArena> {
        let mut pruned: Vec<TreeArena> = Vec::new();
        // Original node id -> (slot in `pruned`, copy within that tree)
        let mut copies: HashMap<Uuid, (usize, Index)> = HashMap::new();

        for &match_idx in matches {
            let match_node = match self.get_node(match_idx) {
                Some(node) => node,
                None => continue,
            };

            // Walk up collecting ancestors that have no copy yet, stopping
            // at the first copied ancestor or just below the root.
            let mut chain = Vec::new();
            let mut tree_slot = None;
            let mut attach_to = None;
            let mut current = match_node.parent;
            while let Some(ancestor_idx) = current {
                let ancestor = match self.get_node(ancestor_idx) {
                    Some(node) => node,
                    None => break,
                };
                if let Some(&(slot, copy_idx)) = copies.get(&ancestor.data.id) {
                    tree_slot = Some(slot);
                    attach_to = Some(copy_idx);
                    break;
                }
                if ancestor.parent.is_none() {
                    break;
                }
                chain.push(ancestor_idx);
                current = ancestor.parent;
            }

            let slot = match tree_slot {
                Some(slot) => slot,
                None => {
                    pruned.push(TreeArena::new());
                    pruned.len() - 1
                }
            };

            // Materialize the chain top-down, registering each copy so that
            // later matches can merge into it.
            let mut parent_copy = attach_to;
            for &ancestor_idx in chain.iter().rev() {
                if let Some(ancestor) = self.get_node(ancestor_idx) {
                    let copy_idx = pruned[slot].insert_node(ancestor.data.clone(), parent_copy);
                    copies.insert(ancestor.data.id, (slot, copy_idx));
                    parent_copy = Some(copy_idx);
                }
            }

            self.copy_subtree(match_idx, &mut pruned[slot], parent_copy);
        }

        debug!("pruned into {} trees", pruned.len());
        pruned
    }

    /// Deep-copies the subtree at `src_idx` into `dest` under `dest_parent`,
    /// preserving node identities.
    fn copy_subtree(&self, src_idx: Index, dest: &mut TreeArena, dest_parent: Option<Index>) {
        if let Some(node) = self.get_node(src_idx) {
            let copy_idx = dest.insert_node(node.data.clone(), dest_parent);
            for &child in &node.children {
                self.copy_subtree(child, dest, Some(copy_idx));
            }
        }
    }
}
