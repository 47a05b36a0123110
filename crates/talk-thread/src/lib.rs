//! # talk-thread
//!
//! Thread tree model for talk page topics, with an incremental flattening
//! and diffing engine for driving list renderers.
//!
//! ## Design Principles
//!
//! The payload tree is immutable and shared through `Arc`. The only mutable
//! piece, which nodes are expanded, lives in a separate id-keyed
//! [`ExpandState`]. This lets flat views and snapshots hold rows without
//! aliasing the state being mutated.
//!
//! A renderer never redraws the whole list. Each toggle returns an
//! [`EditScript`] describing which rows to insert or remove.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use talk_thread::{TopicSession, ReloadPolicy};
//!
//! let mut session = TopicSession::new("Talk:Main Page")
//!     .with_reload_policy(ReloadPolicy::PreserveExpanded);
//! session.load(&client, "h-Some_topic").await;
//!
//! for row in session.flat_view().unwrap_or_default() {
//!     println!("{}{}{}", row.indent(), row.indicator(), row.item.author);
//! }
//!
//! let script = session.toggle_expand("c-Alice-2022-01-01");
//! for range in script.ranges() {
//!     // notify the list widget about inserted / removed rows
//! }
//! ```

pub mod diff;
pub mod flatten;
pub mod model;
pub mod session;

// Re-export commonly used types
pub use diff::{diff, EditOp, EditScript, RangeOp};
pub use flatten::flatten;
pub use model::{ExpandState, FlatThreadItem, Identified, PreOrder, ThreadTree};
pub use session::{
    LoadError, LoadOutcome, LoadTicket, LoadedTopic, ReloadPolicy, SessionPhase, SessionState,
    TopicSession,
};
pub use talk_client::ThreadItem;

#[cfg(test)]
mod test_support;
