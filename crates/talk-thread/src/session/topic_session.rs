//! Topic session orchestration.
//!
//! The session owns the loaded tree and its flat view and serializes every
//! mutation through `&mut self`. Fetching is the only step that awaits;
//! tree updates, flattening and diffing run synchronously once the fetch
//! has resolved.

use super::state::{LoadError, LoadedTopic, ReloadPolicy, SessionPhase, SessionState};
use crate::diff::EditScript;
use crate::model::{FlatThreadItem, ThreadTree};
use log::{debug, info, warn};
use std::sync::Arc;
use talk_client::{TalkClient, ThreadItem};
use tokio::sync::watch;

/// Identity of one load request.
///
/// Only the ticket of the most recent [`TopicSession::begin_load`] is
/// accepted by [`TopicSession::complete_load`]; older ones are stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    topic_id: String,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }
}

/// Result of handing a fetch result to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The topic is now loaded.
    Applied,
    /// The session moved to the error state.
    Failed,
    /// A newer load superseded this one; nothing changed.
    Discarded,
}

/// One open talk page topic.
#[derive(Debug)]
pub struct TopicSession {
    page_title: String,
    state: SessionState,
    reload_policy: ReloadPolicy,
    generation: u64,
    pending: Option<LoadTicket>,
    requested_topic: Option<String>,
    phase_tx: watch::Sender<SessionPhase>,
}

impl TopicSession {
    /// Create an empty session for a talk page.
    pub fn new(page_title: impl Into<String>) -> Self {
        let (phase_tx, _) = watch::channel(SessionPhase::Empty);
        Self {
            page_title: page_title.into(),
            state: SessionState::Empty,
            reload_policy: ReloadPolicy::default(),
            generation: 0,
            pending: None,
            requested_topic: None,
            phase_tx,
        }
    }

    pub fn with_reload_policy(mut self, reload_policy: ReloadPolicy) -> Self {
        self.reload_policy = reload_policy;
        self
    }

    pub fn page_title(&self) -> &str {
        &self.page_title
    }

    pub fn reload_policy(&self) -> ReloadPolicy {
        self.reload_policy
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Receive a notification on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.phase_tx.subscribe()
    }

    /// Whether a load was started and has not completed yet.
    pub fn is_load_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a load, superseding any load still in flight.
    ///
    /// Reloading the loaded topic keeps it visible until the new result
    /// arrives. Any other load moves the session to `Loading`.
    pub fn begin_load(&mut self, topic_id: impl Into<String>) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket {
            generation: self.generation,
            topic_id: topic_id.into(),
        };

        if let Some(previous) = self.pending.replace(ticket.clone()) {
            debug!(
                "Load #{} for {} superseded by #{}",
                previous.generation, previous.topic_id, ticket.generation
            );
        }
        debug!(
            "Load #{}: topic {} on {}",
            ticket.generation, ticket.topic_id, self.page_title
        );

        self.requested_topic = Some(ticket.topic_id.clone());

        let reloading = self
            .loaded()
            .is_some_and(|topic| topic.topic_id() == ticket.topic_id);
        if !reloading {
            self.transition(SessionState::Loading);
        }
        ticket
    }

    /// Apply the fetch result for `ticket`, unless a newer load superseded it.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: anyhow::Result<Vec<ThreadItem>>,
    ) -> LoadOutcome {
        if self.pending.as_ref() != Some(&ticket) {
            debug!(
                "Discarding stale result of load #{} for {}",
                ticket.generation, ticket.topic_id
            );
            return LoadOutcome::Discarded;
        }
        self.pending = None;

        let loaded = result
            .map_err(|err| LoadError::Fetch(format!("{err:#}")))
            .and_then(|topics| self.build_topic(&ticket.topic_id, topics));

        match loaded {
            Ok(topic) => {
                info!(
                    "Loaded topic {} with {} replies ({} visible)",
                    topic.topic_id(),
                    topic.tree().len(),
                    topic.flat_view().len()
                );
                self.transition(SessionState::Loaded(topic));
                LoadOutcome::Applied
            }
            Err(err) => {
                warn!("Load #{} failed: {}", ticket.generation, err);
                self.transition(SessionState::Error(err));
                LoadOutcome::Failed
            }
        }
    }

    /// Fetch the page's topics and load `topic_id` from them.
    pub async fn load(
        &mut self,
        client: &dyn TalkClient,
        topic_id: impl Into<String>,
    ) -> LoadOutcome {
        let ticket = self.begin_load(topic_id);
        let result = client.fetch_topics(&self.page_title).await;
        self.complete_load(ticket, result)
    }

    /// Load the most recently requested topic again, including after a
    /// failed load.
    ///
    /// Returns `None` when no topic has been requested yet.
    pub async fn reload(&mut self, client: &dyn TalkClient) -> Option<LoadOutcome> {
        let topic_id = self.topic_id()?.to_string();
        Some(self.load(client, topic_id).await)
    }

    /// Flip the expand flag of a row and return the edits for the list.
    ///
    /// Unknown ids and sessions without a loaded topic yield an empty
    /// script. The toggled row itself keeps its position; renderers rebind
    /// it from [`TopicSession::flat_view`] to refresh its indicator.
    pub fn toggle_expand(&mut self, item_id: &str) -> EditScript<FlatThreadItem> {
        match &mut self.state {
            SessionState::Loaded(topic) => topic.toggle(item_id),
            _ => {
                debug!("Ignoring toggle for {}: no topic loaded", item_id);
                EditScript::empty()
            }
        }
    }

    /// Currently visible rows, if a topic is loaded.
    pub fn flat_view(&self) -> Option<&[FlatThreadItem]> {
        self.loaded().map(LoadedTopic::flat_view)
    }

    /// The loaded topic heading.
    pub fn topic(&self) -> Option<&Arc<ThreadItem>> {
        self.loaded().map(LoadedTopic::topic)
    }

    pub fn tree(&self) -> Option<&ThreadTree> {
        self.loaded().map(LoadedTopic::tree)
    }

    /// Id of the most recently requested topic, whether it is pending,
    /// loaded or failed.
    pub fn topic_id(&self) -> Option<&str> {
        self.requested_topic.as_deref()
    }

    fn loaded(&self) -> Option<&LoadedTopic> {
        match &self.state {
            SessionState::Loaded(topic) => Some(topic),
            _ => None,
        }
    }

    fn build_topic(&self, topic_id: &str, topics: Vec<ThreadItem>) -> Result<LoadedTopic, LoadError> {
        let (section_index, topic) = topics
            .into_iter()
            .enumerate()
            .find(|(_, topic)| topic.id == topic_id)
            .ok_or_else(|| LoadError::TopicNotFound {
                topic_id: topic_id.to_string(),
            })?;

        let topic = Arc::new(topic);
        let mut tree = ThreadTree::new(topic.replies.clone());

        if self.reload_policy == ReloadPolicy::PreserveExpanded {
            if let Some(previous) = self.loaded().filter(|prev| prev.topic_id() == topic_id) {
                tree = tree.with_expand_state(previous.tree().expand_state().clone());
            }
        }

        Ok(LoadedTopic::new(topic, section_index, tree))
    }

    fn transition(&mut self, state: SessionState) {
        self.state = state;
        self.phase_tx.send_replace(self.state.phase());
    }
}
