//! Topic session: load a topic, keep its flat view, toggle rows.

mod state;
mod topic_session;

pub use state::{LoadError, LoadedTopic, ReloadPolicy, SessionPhase, SessionState};
pub use topic_session::{LoadOutcome, LoadTicket, TopicSession};
