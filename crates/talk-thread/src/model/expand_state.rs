//! Expand/collapse flags keyed by item id.

use std::collections::HashSet;

/// Set of expanded item ids.
///
/// Items are collapsed unless listed here. Keeping the flags outside the
/// payload lets the tree be shared freely while only this set is mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandState {
    expanded: HashSet<String>,
}

impl ExpandState {
    /// Create an all-collapsed state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the item with this id is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Set the expand flag of an item.
    pub fn set(&mut self, id: impl Into<String>, expanded: bool) {
        let id = id.into();
        if expanded {
            self.expanded.insert(id);
        } else {
            self.expanded.remove(&id);
        }
    }

    /// Flip the expand flag of an item and return the new value.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    /// Number of expanded items.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Keep only the ids for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.expanded.retain(|id| keep(id));
    }

    /// Iterate over expanded ids in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExpandState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            expanded: iter.into_iter().map(Into::into).collect(),
        }
    }
}
