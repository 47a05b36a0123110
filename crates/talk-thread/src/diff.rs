//! Diff engine: minimal row edits between two flat views.
//!
//! Rows are matched by id only. Matched rows are never reported as changed
//! because the payload behind an id is immutable for the life of a tree.
//!
//! The common prefix and suffix are skipped first. A single expand or
//! collapse therefore costs one linear scan and produces one contiguous
//! run. Whatever remains is solved generally: the longest run of surviving
//! rows that keep their relative order stays put, every other row of the
//! old window is removed and every other row of the new window inserted.

use crate::model::Identified;
use std::collections::HashMap;

/// A single row edit.
///
/// Positions refer to the sequence as it stands when the op is applied,
/// i.e. after all earlier ops of the same script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp<T> {
    /// Remove the row at `position`.
    Remove { position: usize, id: String },
    /// Insert `item` so that it ends up at `position`.
    Insert { position: usize, item: T },
}

impl<T> EditOp<T> {
    pub fn position(&self) -> usize {
        match self {
            EditOp::Remove { position, .. } | EditOp::Insert { position, .. } => *position,
        }
    }
}

/// Consecutive edits coalesced for renderers that update rows in bulk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    /// Rows `start..start + count` were removed.
    Removed { start: usize, count: usize },
    /// Rows `start..start + count` were inserted.
    Inserted { start: usize, count: usize },
}

/// Ordered list of edits turning one flat view into another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditScript<T> {
    ops: Vec<EditOp<T>>,
}

impl<T> Default for EditScript<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> EditScript<T> {
    /// A script that changes nothing.
    pub fn empty() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn ops(&self) -> &[EditOp<T>] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<EditOp<T>> {
        self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Number of inserted rows.
    pub fn inserted(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, EditOp::Insert { .. }))
            .count()
    }

    /// Number of removed rows.
    pub fn removed(&self) -> usize {
        self.ops.len() - self.inserted()
    }

    /// Coalesce consecutive ops into ranges, preserving application order.
    ///
    /// Removes at descending positions (or repeatedly at the same position)
    /// merge into one `Removed` range; inserts at ascending positions merge
    /// into one `Inserted` range.
    pub fn ranges(&self) -> Vec<RangeOp> {
        let mut ranges: Vec<RangeOp> = Vec::new();
        for op in &self.ops {
            let merged = match (ranges.last_mut(), op) {
                (
                    Some(RangeOp::Removed { start, count }),
                    EditOp::Remove { position, .. },
                ) if *position + 1 == *start => {
                    *start = *position;
                    *count += 1;
                    true
                }
                (
                    Some(RangeOp::Removed { start, count }),
                    EditOp::Remove { position, .. },
                ) if *position == *start => {
                    *count += 1;
                    true
                }
                (
                    Some(RangeOp::Inserted { start, count }),
                    EditOp::Insert { position, .. },
                ) if *position == *start + *count => {
                    *count += 1;
                    true
                }
                _ => false,
            };

            if !merged {
                ranges.push(match op {
                    EditOp::Remove { position, .. } => RangeOp::Removed {
                        start: *position,
                        count: 1,
                    },
                    EditOp::Insert { position, .. } => RangeOp::Inserted {
                        start: *position,
                        count: 1,
                    },
                });
            }
        }
        ranges
    }
}

impl<T: Clone> EditScript<T> {
    /// Apply the ops, in order, to the sequence the script was computed from.
    ///
    /// # Panics
    ///
    /// Panics if a position is out of bounds, which only happens when the
    /// script is applied to a different sequence than its `previous`.
    pub fn apply(&self, rows: &mut Vec<T>) {
        for op in &self.ops {
            match op {
                EditOp::Remove { position, .. } => {
                    rows.remove(*position);
                }
                EditOp::Insert { position, item } => rows.insert(*position, item.clone()),
            }
        }
    }
}

/// Compute the edits that turn `previous` into `current`.
///
/// Removes come first, at descending positions, so each position is still
/// the row's index in `previous`. Inserts follow at ascending positions,
/// so each position is the row's final index in `current`.
pub fn diff<T: Identified + Clone>(previous: &[T], current: &[T]) -> EditScript<T> {
    let same = |a: &T, b: &T| a.item_id() == b.item_id();

    let prefix = previous
        .iter()
        .zip(current)
        .take_while(|(a, b)| same(a, b))
        .count();
    let suffix = previous[prefix..]
        .iter()
        .rev()
        .zip(current[prefix..].iter().rev())
        .take_while(|(a, b)| same(a, b))
        .count();

    let old = &previous[prefix..previous.len() - suffix];
    let new = &current[prefix..current.len() - suffix];
    if old.is_empty() && new.is_empty() {
        return EditScript::empty();
    }

    let new_positions: HashMap<&str, usize> = new
        .iter()
        .enumerate()
        .map(|(index, row)| (row.item_id(), index))
        .collect();
    let matched: Vec<(usize, usize)> = old
        .iter()
        .enumerate()
        .filter_map(|(old_index, row)| {
            new_positions
                .get(row.item_id())
                .map(|&new_index| (old_index, new_index))
        })
        .collect();

    let mut keep_old = vec![false; old.len()];
    let mut keep_new = vec![false; new.len()];
    for (old_index, new_index) in longest_ordered_run(&matched) {
        keep_old[old_index] = true;
        keep_new[new_index] = true;
    }

    let mut ops = Vec::new();
    for (index, row) in old.iter().enumerate().rev() {
        if !keep_old[index] {
            ops.push(EditOp::Remove {
                position: prefix + index,
                id: row.item_id().to_string(),
            });
        }
    }
    for (index, row) in new.iter().enumerate() {
        if !keep_new[index] {
            ops.push(EditOp::Insert {
                position: prefix + index,
                item: row.clone(),
            });
        }
    }

    EditScript { ops }
}

/// Longest subsequence of `pairs` (ordered by old index) whose new indices
/// are strictly increasing.
fn longest_ordered_run(pairs: &[(usize, usize)]) -> Vec<(usize, usize)> {
    // tails[k]: index into `pairs` of the smallest tail of a run of length k + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessor: Vec<Option<usize>> = vec![None; pairs.len()];

    for (i, &(_, new_index)) in pairs.iter().enumerate() {
        let slot = tails.partition_point(|&t| pairs[t].1 < new_index);
        if slot > 0 {
            predecessor[i] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(i);
        } else {
            tails[slot] = i;
        }
    }

    let mut run = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        run.push(pairs[i]);
        cursor = predecessor[i];
    }
    run.reverse();
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ids, leaf};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use talk_client::ThreadItem;

    fn seq(names: &[&str]) -> Vec<ThreadItem> {
        names.iter().map(|name| leaf(name)).collect()
    }

    fn applied(previous: &[ThreadItem], current: &[ThreadItem]) -> Vec<ThreadItem> {
        let mut rows = previous.to_vec();
        diff(previous, current).apply(&mut rows);
        rows
    }

    #[test]
    fn test_identical_sequences() {
        let rows = seq(&["a", "b", "c"]);
        assert!(diff(&rows, &rows).is_empty());
    }

    #[test]
    fn test_expand_inserts_run() {
        let script = diff(&seq(&["A"]), &seq(&["A", "B", "C"]));
        let positions: Vec<_> = script.ops().iter().map(EditOp::position).collect();
        assert_eq!(positions, vec![1, 2]);
        assert_eq!(script.inserted(), 2);
        assert_eq!(
            script.ranges(),
            vec![RangeOp::Inserted { start: 1, count: 2 }]
        );
    }

    #[test]
    fn test_collapse_removes_run() {
        let script = diff(&seq(&["A", "B", "C", "D"]), &seq(&["A"]));
        let removed: HashSet<_> = script.ops().iter().map(EditOp::position).collect();
        assert_eq!(removed, HashSet::from([1, 2, 3]));
        assert_eq!(script.removed(), 3);
        assert_eq!(
            script.ranges(),
            vec![RangeOp::Removed { start: 1, count: 3 }]
        );
    }

    #[test]
    fn test_run_in_middle() {
        let previous = seq(&["a", "b", "e"]);
        let current = seq(&["a", "b", "c", "d", "e"]);
        let script = diff(&previous, &current);
        assert_eq!(
            script.ranges(),
            vec![RangeOp::Inserted { start: 2, count: 2 }]
        );
        assert_eq!(applied(&previous, &current), current);
    }

    #[test]
    fn test_moved_item_is_removed_and_reinserted() {
        let previous = seq(&["a", "b", "c"]);
        let current = seq(&["c", "a", "b"]);
        let script = diff(&previous, &current);
        assert_eq!(script.removed(), 1);
        assert_eq!(script.inserted(), 1);
        assert_eq!(ids(&applied(&previous, &current)), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_disjoint_sequences() {
        let previous = seq(&["a", "b"]);
        let current = seq(&["x", "y", "z"]);
        assert_eq!(
            diff(&previous, &current).ranges(),
            vec![
                RangeOp::Removed { start: 0, count: 2 },
                RangeOp::Inserted { start: 0, count: 3 },
            ]
        );
        assert_eq!(applied(&previous, &current), current);
    }

    #[test]
    fn test_from_and_to_empty() {
        let rows = seq(&["a", "b"]);
        assert_eq!(applied(&[], &rows), rows);
        assert!(applied(&rows, &[]).is_empty());
    }

    #[test]
    fn test_ranges_merge_repeated_remove_position() {
        let script: EditScript<ThreadItem> = EditScript {
            ops: vec![
                EditOp::Remove {
                    position: 4,
                    id: "x".to_string(),
                },
                EditOp::Remove {
                    position: 4,
                    id: "y".to_string(),
                },
            ],
        };
        assert_eq!(
            script.ranges(),
            vec![RangeOp::Removed { start: 4, count: 2 }]
        );
    }

    #[test]
    fn test_longest_ordered_run() {
        let pairs = [(0, 3), (1, 0), (2, 1), (3, 4), (4, 2)];
        assert_eq!(longest_ordered_run(&pairs), vec![(1, 0), (2, 1), (4, 2)]);
        assert!(longest_ordered_run(&[]).is_empty());
    }

    /// Two id sequences drawn from a shared pool, each without duplicates.
    fn arb_pair() -> impl Strategy<Value = (Vec<ThreadItem>, Vec<ThreadItem>)> {
        let side = || {
            proptest::sample::subsequence((0..30).collect::<Vec<u32>>(), 0..30)
                .prop_shuffle()
                .prop_map(|picked| {
                    picked
                        .into_iter()
                        .map(|n| leaf(&format!("n{n}")))
                        .collect::<Vec<_>>()
                })
        };
        (side(), side())
    }

    proptest! {
        #[test]
        fn prop_apply_yields_current((previous, current) in arb_pair()) {
            let rows = applied(&previous, &current);
            prop_assert_eq!(ids(&rows), ids(&current));
        }

        #[test]
        fn prop_never_touches_common_rows_in_place((previous, current) in arb_pair()) {
            let script = diff(&previous, &current);
            let in_previous: HashSet<&str> = ids(&previous).into_iter().collect();
            for op in script.ops() {
                if let EditOp::Insert { item, .. } = op {
                    // Re-inserted rows must have been removed first
                    if in_previous.contains(item.item_id()) {
                        let removed = script.ops().iter().any(|other| {
                            matches!(other, EditOp::Remove { id, .. } if id == item.item_id())
                        });
                        prop_assert!(removed);
                    }
                }
            }
        }
    }
}
