//! Flattening engine: tree + expand state → visible rows.

use crate::model::{ExpandState, FlatThreadItem, PreOrder};
use std::sync::Arc;
use talk_client::ThreadItem;

/// Flatten the tree into a list for rendering (respecting expanded state).
///
/// Every node in `roots` yields one row. A node's replies follow it, in
/// order, only when that node is expanded. Collapsed subtrees contribute
/// their root alone, whatever the flags of their descendants, and their
/// internals are never visited.
pub fn flatten(roots: &[Arc<ThreadItem>], expanded: &ExpandState) -> Vec<FlatThreadItem> {
    let mut rows = Vec::with_capacity(roots.len());
    for (depth, item) in PreOrder::visible(roots, expanded) {
        rows.push(FlatThreadItem {
            item: Arc::clone(item),
            depth,
            is_expanded: expanded.is_expanded(&item.id),
        });
    }
    rows
}
