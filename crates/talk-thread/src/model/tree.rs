//! Thread tree: an ordered forest of replies plus their expand state.

use super::{ExpandState, FlatThreadItem};
use log::debug;
use std::collections::HashSet;
use std::slice;
use std::sync::Arc;
use talk_client::ThreadItem;

/// Ordered forest of thread items with id-keyed expand flags.
///
/// The payload is never mutated after construction. [`ThreadTree::toggle`]
/// is the only mutator and it touches the expand state alone.
#[derive(Debug, Clone, Default)]
pub struct ThreadTree {
    roots: Vec<Arc<ThreadItem>>,
    expanded: ExpandState,
    ids: HashSet<String>,
}

impl ThreadTree {
    /// Build a tree over the given roots with every node collapsed.
    pub fn new(roots: Vec<Arc<ThreadItem>>) -> Self {
        let mut ids = HashSet::new();
        for (_, item) in PreOrder::all(&roots) {
            let unique = ids.insert(item.id.clone());
            debug_assert!(unique, "duplicate thread item id {:?}", item.id);
        }

        Self {
            roots,
            expanded: ExpandState::new(),
            ids,
        }
    }

    /// Re-associate expand flags by id, dropping ids this tree doesn't have.
    pub fn with_expand_state(mut self, mut state: ExpandState) -> Self {
        let before = state.len();
        state.retain(|id| self.ids.contains(id));
        if state.len() != before {
            debug!(
                "Dropped {} expand flags for items no longer in the tree",
                before - state.len()
            );
        }
        self.expanded = state;
        self
    }

    pub fn roots(&self) -> &[Arc<ThreadItem>] {
        &self.roots
    }

    pub fn expand_state(&self) -> &ExpandState {
        &self.expanded
    }

    /// Total number of nodes, visible or not.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.is_expanded(id)
    }

    /// Depth-first pre-order traversal over every node, ignoring expand state.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder::all(&self.roots)
    }

    /// Find a node by id.
    pub fn find(&self, id: &str) -> Option<&Arc<ThreadItem>> {
        if !self.contains(id) {
            return None;
        }
        self.iter().map(|(_, item)| item).find(|item| item.id == id)
    }

    /// Flip the expand flag of the node with this id.
    ///
    /// Returns the new flag, or `None` if no such node exists.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        if !self.contains(id) {
            return None;
        }
        Some(self.expanded.toggle(id))
    }

    /// Visible rows under the current expand state.
    pub fn flatten(&self) -> Vec<FlatThreadItem> {
        crate::flatten::flatten(&self.roots, &self.expanded)
    }
}

/// Depth-first pre-order iterator yielding `(depth, item)`.
///
/// Uses an explicit stack of sibling iterators so arbitrarily deep threads
/// don't grow the call stack. When built with [`PreOrder::visible`] it only
/// descends into expanded nodes and never looks inside collapsed subtrees.
pub struct PreOrder<'a> {
    stack: Vec<(usize, slice::Iter<'a, Arc<ThreadItem>>)>,
    expanded: Option<&'a ExpandState>,
}

impl<'a> PreOrder<'a> {
    /// Walk every node.
    pub fn all(roots: &'a [Arc<ThreadItem>]) -> Self {
        Self {
            stack: vec![(0, roots.iter())],
            expanded: None,
        }
    }

    /// Walk only the nodes visible under `expanded`.
    pub fn visible(roots: &'a [Arc<ThreadItem>], expanded: &'a ExpandState) -> Self {
        Self {
            stack: vec![(0, roots.iter())],
            expanded: Some(expanded),
        }
    }

    fn descends_into(&self, item: &ThreadItem) -> bool {
        !item.replies.is_empty()
            && self
                .expanded
                .is_none_or(|expanded| expanded.is_expanded(&item.id))
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (usize, &'a Arc<ThreadItem>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (depth, siblings) = self.stack.last_mut()?;
            let depth = *depth;
            match siblings.next() {
                Some(item) => {
                    if self.descends_into(item) {
                        self.stack.push((depth + 1, item.replies.iter()));
                    }
                    return Some((depth, item));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{leaf, node, roots};
    use pretty_assertions::assert_eq;

    fn sample_tree() -> ThreadTree {
        ThreadTree::new(roots(vec![
            node("a", vec![leaf("b"), node("c", vec![leaf("d")])]),
            leaf("e"),
        ]))
    }

    #[test]
    fn test_pre_order_visits_every_node() {
        let tree = sample_tree();
        let visited: Vec<_> = tree
            .iter()
            .map(|(depth, item)| (depth, item.id.as_str()))
            .collect();
        assert_eq!(
            visited,
            vec![(0, "a"), (1, "b"), (1, "c"), (2, "d"), (0, "e")]
        );
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_find_and_contains() {
        let tree = sample_tree();
        assert!(tree.contains("d"));
        assert_eq!(tree.find("d").map(|item| item.id.as_str()), Some("d"));
        assert!(tree.find("zzz").is_none());
    }

    #[test]
    fn test_toggle_unknown_id() {
        let mut tree = sample_tree();
        assert_eq!(tree.toggle("zzz"), None);
        assert!(tree.expand_state().is_empty());
    }

    #[test]
    fn test_toggle_flips_flag() {
        let mut tree = sample_tree();
        assert_eq!(tree.toggle("c"), Some(true));
        assert!(tree.is_expanded("c"));
        assert_eq!(tree.toggle("c"), Some(false));
        assert!(!tree.is_expanded("c"));
    }

    #[test]
    fn test_with_expand_state_drops_unknown_ids() {
        let state: ExpandState = ["a", "gone"].into_iter().collect();
        let tree = sample_tree().with_expand_state(state);
        assert!(tree.is_expanded("a"));
        assert!(!tree.expand_state().is_expanded("gone"));
        assert_eq!(tree.expand_state().len(), 1);
    }

    #[test]
    fn test_visible_walk_skips_collapsed_subtrees() {
        let tree = sample_tree();
        let expanded: ExpandState = ["c"].into_iter().collect();
        let visited: Vec<_> = PreOrder::visible(tree.roots(), &expanded)
            .map(|(_, item)| item.id.as_str())
            .collect();
        // "c" is expanded but hidden under collapsed "a"
        assert_eq!(visited, vec!["a", "e"]);
    }
}
