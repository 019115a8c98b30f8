//! Symmetric difference of sorted edge lists.

use std::cmp::Ordering;

use crate::generator::Edge;

/// Edges that disappeared and appeared between two rounds, both ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct EdgeDiff {
    pub(super) removed: Vec<Edge>,
    pub(super) added: Vec<Edge>,
}

/// Merges two ascending, duplicate-free edge lists.
pub(super) fn diff_sorted(previous: &[Edge], current: &[Edge]) -> EdgeDiff {
    let mut diff = EdgeDiff::default();
    let (mut old, mut new) = (0, 0);
    loop {
        match (previous.get(old), current.get(new)) {
            (Some(&before), Some(&after)) => match before.cmp(&after) {
                Ordering::Less => {
                    diff.removed.push(before);
                    old += 1;
                }
                Ordering::Greater => {
                    diff.added.push(after);
                    new += 1;
                }
                Ordering::Equal => {
                    old += 1;
                    new += 1;
                }
            },
            (Some(&before), None) => {
                diff.removed.push(before);
                old += 1;
            }
            (None, Some(&after)) => {
                diff.added.push(after);
                new += 1;
            }
            (None, None) => return diff,
        }
    }
}
