//! Stable identity of rows across flattenings.

use std::sync::Arc;
use talk_client::ThreadItem;

/// Anything that can be matched by id between two flat views.
///
/// Positions shift whenever a subtree above a row opens or closes, so the
/// diff engine compares rows by this id and nothing else.
pub trait Identified {
    /// Identifier, unique within one sequence.
    fn item_id(&self) -> &str;
}

impl Identified for ThreadItem {
    fn item_id(&self) -> &str {
        &self.id
    }
}

impl<T: Identified + ?Sized> Identified for Arc<T> {
    fn item_id(&self) -> &str {
        (**self).item_id()
    }
}

impl<T: Identified + ?Sized> Identified for &T {
    fn item_id(&self) -> &str {
        (**self).item_id()
    }
}
