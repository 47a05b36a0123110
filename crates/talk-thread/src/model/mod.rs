//! Data models for the thread tree.

mod expand_state;
mod flat_item;
mod identity;
mod tree;

pub use expand_state::ExpandState;
pub use flat_item::FlatThreadItem;
pub use identity::Identified;
pub use tree::{PreOrder, ThreadTree};
