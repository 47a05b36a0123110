//! Talk client trait
//!
//! This module defines the `TalkClient` trait that all client
//! implementations must satisfy.

use crate::types::ThreadItem;
use async_trait::async_trait;

/// Talk page client trait
///
/// Defines the interface for retrieving the discussion threads of a page.
/// Implementations can hit the live API or serve canned data in tests.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use talk_client::{TalkClient, ThreadItem};
///
/// async fn headings(client: &dyn TalkClient) -> anyhow::Result<Vec<String>> {
///     let topics = client.fetch_topics("Talk:Main Page").await?;
///     Ok(topics.iter().map(|t| t.html.clone()).collect())
/// }
/// ```
#[async_trait]
pub trait TalkClient: Send + Sync {
    /// Fetch the top-level topics of a talk page
    ///
    /// # Arguments
    ///
    /// * `page_title` - Prefixed page title (e.g., "Talk:Main Page")
    ///
    /// # Returns
    ///
    /// The page's topics, each owning its reply tree. A page without any
    /// discussion yields an empty list rather than an error.
    async fn fetch_topics(&self, page_title: &str) -> anyhow::Result<Vec<ThreadItem>>;
}
