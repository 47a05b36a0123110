//! Talk page client for the MediaWiki DiscussionTools API
//!
//! This crate provides a trait-based client for fetching the threads of a
//! talk page, plus the payload types those threads are decoded into.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               TalkClient trait                   │
//! │  - fetch_topics()                                │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!              ┌─────────────────┐
//!              │ HttpTalkClient  │
//!              │ (reqwest)       │
//!              └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use talk_client::{HttpClientOptions, HttpTalkClient, TalkClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = HttpTalkClient::new(HttpClientOptions::default())?;
//! let topics = client.fetch_topics("Talk:Rust (programming language)").await?;
//! println!("{} topics", topics.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod http_client;
pub mod types;

/// Default wiki host
pub const DEFAULT_HOST: &str = "en.wikipedia.org";

pub use client::TalkClient;
pub use http_client::{HttpClientOptions, HttpTalkClient};
pub use types::{DiscussionToolsInfoResponse, MwError, PageInfo, ThreadItem};
