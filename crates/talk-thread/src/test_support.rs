//! Tree builders shared by the unit tests.

use crate::model::Identified;
use proptest::prelude::*;
use proptest::sample::Index;
use std::sync::Arc;
use talk_client::ThreadItem;

pub(crate) fn leaf(id: &str) -> ThreadItem {
    node(id, Vec::new())
}

pub(crate) fn node(id: &str, replies: Vec<ThreadItem>) -> ThreadItem {
    ThreadItem {
        item_type: "comment".to_string(),
        id: id.to_string(),
        author: format!("author-{id}"),
        replies: replies.into_iter().map(Arc::new).collect(),
        ..ThreadItem::default()
    }
}

pub(crate) fn roots(items: Vec<ThreadItem>) -> Vec<Arc<ThreadItem>> {
    items.into_iter().map(Arc::new).collect()
}

pub(crate) fn ids<T: Identified>(rows: &[T]) -> Vec<&str> {
    rows.iter().map(Identified::item_id).collect()
}

/// Random forest with unique ids `n0`, `n1`, ...
///
/// Node `i` either starts a new root or hangs under some earlier node.
pub(crate) fn arb_forest() -> impl Strategy<Value = Vec<Arc<ThreadItem>>> {
    proptest::collection::vec((prop::bool::weighted(0.2), any::<Index>()), 0..40)
        .prop_map(|shape| build_forest(&shape))
}

fn build_forest(shape: &[(bool, Index)]) -> Vec<Arc<ThreadItem>> {
    let parents: Vec<Option<usize>> = shape
        .iter()
        .enumerate()
        .map(|(i, (new_root, pick))| {
            if i == 0 || *new_root {
                None
            } else {
                Some(pick.index(i))
            }
        })
        .collect();

    let mut children = vec![Vec::new(); shape.len()];
    for (i, parent) in parents.iter().enumerate() {
        if let Some(parent) = parent {
            children[*parent].push(i);
        }
    }

    // Children always have a higher index than their parent
    let mut built: Vec<Option<Arc<ThreadItem>>> = vec![None; shape.len()];
    for i in (0..shape.len()).rev() {
        let replies = children[i]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[i] = Some(Arc::new(ThreadItem {
            id: format!("n{i}"),
            replies,
            ..ThreadItem::default()
        }));
    }

    parents
        .iter()
        .enumerate()
        .filter(|(_, parent)| parent.is_none())
        .filter_map(|(i, _)| built[i].take())
        .collect()
}
