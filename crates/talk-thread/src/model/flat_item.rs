//! A visible row of the flattened thread.

use super::Identified;
use std::sync::Arc;
use talk_client::ThreadItem;

/// A flattened thread entry for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatThreadItem {
    /// The node shown on this row (shared, not copied).
    pub item: Arc<ThreadItem>,
    /// Nesting depth (0 = direct reply to the topic).
    pub depth: usize,
    /// Whether this node's replies are shown below it.
    pub is_expanded: bool,
}

impl FlatThreadItem {
    pub fn id(&self) -> &str {
        &self.item.id
    }

    pub fn has_replies(&self) -> bool {
        !self.item.replies.is_empty()
    }

    /// Number of direct replies.
    pub fn reply_count(&self) -> usize {
        self.item.replies.len()
    }

    /// Get the expand indicator for this row.
    pub fn indicator(&self) -> &'static str {
        if self.has_replies() {
            if self.is_expanded {
                "▼ "
            } else {
                "▶ "
            }
        } else {
            "  "
        }
    }

    /// Get indent string based on depth.
    pub fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }
}

impl Identified for FlatThreadItem {
    fn item_id(&self) -> &str {
        self.id()
    }
}
