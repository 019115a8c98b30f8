//! Structural invariant checks for the quadtree.

use thiserror::Error;

use super::{
    Quadtree,
    node::{NodeId, NodeKind, ROOT, is_degenerate},
    region::Region,
};
use crate::PointId;

/// Reports a broken structural invariant found by [`Quadtree::validate`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum QuadtreeViolation {
    /// A child link points outside the arena or backwards.
    #[error("node {node} links to invalid child {child}")]
    DanglingChild {
        /// Parent node.
        node: NodeId,
        /// Offending child index.
        child: NodeId,
    },
    /// A child region is not nested within its parent's region.
    #[error("region of node {child} escapes its parent {node}")]
    RegionNotNested {
        /// Parent node.
        node: NodeId,
        /// Child node.
        child: NodeId,
    },
    /// A leaf stores a point its region does not contain.
    #[error("point {point} lies outside the region of leaf {node}")]
    PointOutsideRegion {
        /// Offending point.
        point: PointId,
        /// Leaf holding it.
        node: NodeId,
    },
    /// A point appears more than once across the leaves.
    #[error("point {point} is stored more than once")]
    DuplicateEntry {
        /// Offending point.
        point: PointId,
    },
    /// Leaf coordinates disagree with the side table, or the side table lacks
    /// the point.
    #[error("stored coordinates of point {point} disagree with the side table")]
    StaleCoordinates {
        /// Offending point.
        point: PointId,
    },
    /// The side table lists a point no leaf stores.
    #[error("point {point} is missing from the leaves")]
    MissingPoint {
        /// Offending point.
        point: PointId,
    },
    /// A recorded subtree size disagrees with its contents.
    #[error("node {node} records {recorded} point(s) but holds {actual}")]
    SizeMismatch {
        /// Offending node.
        node: NodeId,
        /// Recorded size.
        recorded: usize,
        /// Counted size.
        actual: usize,
    },
    /// A splittable leaf holds more points than the capacity.
    #[error("leaf {node} holds {size} point(s), exceeding capacity {capacity}")]
    OverfullLeaf {
        /// Offending leaf.
        node: NodeId,
        /// Points held.
        size: usize,
        /// Configured capacity.
        capacity: usize,
    },
    /// The cached point count disagrees with the side table.
    #[error("index reports {recorded} point(s) but the side table holds {actual}")]
    LengthMismatch {
        /// Cached count.
        recorded: usize,
        /// Side-table count.
        actual: usize,
    },
}

impl Quadtree {
    /// Checks every structural invariant, returning the first violation.
    ///
    /// # Errors
    /// Returns the [`QuadtreeViolation`] describing the broken invariant.
    pub fn validate(&self) -> Result<(), QuadtreeViolation> {
        let nodes = &self.arena.nodes;
        let mut seen = vec![false; self.points.len()];
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let node = &nodes[id];
            let actual = match &node.kind {
                NodeKind::Leaf(entries) => {
                    if entries.len() > self.params.capacity()
                        && !is_degenerate(&node.region, entries, self.params.dispersion())
                    {
                        return Err(QuadtreeViolation::OverfullLeaf {
                            node: id,
                            size: entries.len(),
                            capacity: self.params.capacity(),
                        });
                    }
                    for entry in entries {
                        if !node.region.contains(entry.point) {
                            return Err(QuadtreeViolation::PointOutsideRegion {
                                point: entry.id,
                                node: id,
                            });
                        }
                        if self.point(entry.id) != Some(entry.point) {
                            return Err(QuadtreeViolation::StaleCoordinates { point: entry.id });
                        }
                        let slot = &mut seen[entry.id];
                        if *slot {
                            return Err(QuadtreeViolation::DuplicateEntry { point: entry.id });
                        }
                        *slot = true;
                    }
                    entries.len()
                }
                NodeKind::Internal(children) => {
                    let mut total = 0;
                    for &child in children {
                        if child <= id || child >= nodes.len() {
                            return Err(QuadtreeViolation::DanglingChild { node: id, child });
                        }
                        if !nested(&nodes[child].region, &node.region) {
                            return Err(QuadtreeViolation::RegionNotNested { node: id, child });
                        }
                        total += nodes[child].size;
                        stack.push(child);
                    }
                    total
                }
            };
            if actual != node.size {
                return Err(QuadtreeViolation::SizeMismatch {
                    node: id,
                    recorded: node.size,
                    actual,
                });
            }
        }

        if let Some(point) = self
            .points
            .iter()
            .zip(&seen)
            .position(|(stored, &found)| stored.is_some() && !found)
        {
            return Err(QuadtreeViolation::MissingPoint { point });
        }
        let actual = self.points.iter().flatten().count();
        if actual != self.len {
            return Err(QuadtreeViolation::LengthMismatch {
                recorded: self.len,
                actual,
            });
        }
        Ok(())
    }
}

fn nested(child: &Region, parent: &Region) -> bool {
    parent.min_angle <= child.min_angle
        && child.max_angle <= parent.max_angle
        && parent.min_radius <= child.min_radius
        && child.max_radius <= parent.max_radius
        && (parent.outer_closed || !child.outer_closed)
}
