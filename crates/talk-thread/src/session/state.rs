//! Session state machine types.

use crate::diff::{diff, EditScript};
use crate::model::{FlatThreadItem, ThreadTree};
use log::debug;
use std::sync::Arc;
use talk_client::ThreadItem;
use thiserror::Error;

/// Errors that end a load in the `Error` state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Fetching or decoding the topics failed.
    #[error("Failed to load topics: {0}")]
    Fetch(String),

    /// The page has no topic with the requested id.
    #[error("Topic not found: {topic_id}")]
    TopicNotFound { topic_id: String },
}

/// What happens to expand flags when the same topic is loaded again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReloadPolicy {
    /// Start over with every reply collapsed.
    #[default]
    Reset,
    /// Carry expand flags over by id; ids gone from the new tree are dropped.
    PreserveExpanded,
}

/// A successfully loaded topic with its current flat view.
#[derive(Debug, Clone)]
pub struct LoadedTopic {
    topic: Arc<ThreadItem>,
    section_index: usize,
    tree: ThreadTree,
    flat: Vec<FlatThreadItem>,
}

impl LoadedTopic {
    pub(crate) fn new(topic: Arc<ThreadItem>, section_index: usize, tree: ThreadTree) -> Self {
        let flat = tree.flatten();
        Self {
            topic,
            section_index,
            tree,
            flat,
        }
    }

    /// The topic heading whose replies form the tree.
    pub fn topic(&self) -> &Arc<ThreadItem> {
        &self.topic
    }

    pub fn topic_id(&self) -> &str {
        &self.topic.id
    }

    /// Position of the topic among the page's topics.
    pub fn section_index(&self) -> usize {
        self.section_index
    }

    pub fn tree(&self) -> &ThreadTree {
        &self.tree
    }

    pub fn flat_view(&self) -> &[FlatThreadItem] {
        &self.flat
    }

    /// Flip one node, re-flatten and diff against the previous view.
    pub(crate) fn toggle(&mut self, item_id: &str) -> EditScript<FlatThreadItem> {
        let Some(expanded) = self.tree.toggle(item_id) else {
            debug!("Ignoring toggle for unknown item {}", item_id);
            return EditScript::empty();
        };

        let previous = std::mem::replace(&mut self.flat, self.tree.flatten());
        let script = diff(&previous, &self.flat);
        debug!(
            "Toggled {} (expanded: {}): +{} -{} rows",
            item_id,
            expanded,
            script.inserted(),
            script.removed()
        );
        script
    }
}

/// Topic session state.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// Nothing requested yet
    #[default]
    Empty,
    /// First load in flight
    Loading,
    /// Topic available
    Loaded(LoadedTopic),
    /// Last load failed
    Error(LoadError),
}

impl SessionState {
    /// Notification payload for this state.
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Empty => SessionPhase::Empty,
            SessionState::Loading => SessionPhase::Loading,
            SessionState::Loaded(_) => SessionPhase::Loaded,
            SessionState::Error(err) => SessionPhase::Error(err.to_string()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, SessionState::Loaded(_))
    }
}

/// State change notification sent to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Empty,
    Loading,
    Loaded,
    Error(String),
}
