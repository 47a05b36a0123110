//! DiscussionTools data transfer objects
//!
//! These types mirror the JSON returned by `action=discussiontoolspageinfo`.
//! Every field is optional on the wire and falls back to its default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A single node of a discussion thread: a topic heading or a comment
///
/// The payload is immutable once decoded. Replies are shared through `Arc`
/// so flattened views can hold rows without copying subtrees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThreadItem {
    /// Node role, e.g. "heading" or "comment"
    #[serde(rename = "type")]
    pub item_type: String,

    /// Indentation depth as reported by the source
    pub level: u32,

    /// Identifier, unique within one page's threads
    pub id: String,

    pub name: String,

    /// Rendered HTML body
    pub html: String,

    pub author: String,

    pub timestamp: String,

    /// Heading level for heading nodes, 0 otherwise
    pub heading_level: u32,

    /// Synthetic heading without real content
    pub placeholder_heading: bool,

    /// Direct replies, in display order
    pub replies: Vec<Arc<ThreadItem>>,
}

impl ThreadItem {
    /// Check if this node is a heading
    pub fn is_heading(&self) -> bool {
        self.item_type == "heading"
    }
}

/// Top-level response of `action=discussiontoolspageinfo`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscussionToolsInfoResponse {
    #[serde(rename = "discussiontoolspageinfo")]
    pub page_info: Option<PageInfo>,

    /// Present when the API rejected the request
    pub error: Option<MwError>,
}

impl DiscussionToolsInfoResponse {
    /// Take the topics out of the response, empty if the page has none
    pub fn into_threads(self) -> Vec<ThreadItem> {
        self.page_info.map(|info| info.threads).unwrap_or_default()
    }
}

/// Thread listing of a page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageInfo {
    #[serde(rename = "threaditemshtml")]
    pub threads: Vec<ThreadItem>,
}

/// MediaWiki API error object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MwError {
    pub code: String,
    pub info: String,
}

impl fmt::Display for MwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.info)
    }
}

impl std::error::Error for MwError {}
