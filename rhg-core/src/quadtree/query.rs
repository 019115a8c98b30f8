//! Lazy range queries with geometric pruning.

use std::slice;

use super::node::{Arena, LeafEntry, NodeId, NodeKind, ROOT};
use crate::{
    PointId,
    coordinates::PolarPoint,
    error::{GeneratorError, Result},
    geometry::{euclidean_circle, hyperbolic_distance, normalize_angle},
};

const RELATIVE_SLACK: f64 = 1.0e-6;
const ABSOLUTE_SLACK: f64 = 1.0e-12;

/// Whether points at exactly the threshold distance match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Bound {
    Inclusive,
    Exclusive,
}

#[derive(Clone, Copy, Debug)]
struct Probe {
    angle: f64,
    radius: f64,
    threshold: f64,
    bound: Bound,
    /// Distance of the bounding Euclidean circle's centre from the origin,
    /// along the query's ray.
    centre: f64,
    reach: f64,
}

impl Probe {
    fn accepts(&self, point: PolarPoint) -> bool {
        let distance = hyperbolic_distance(self.angle, self.radius, point.angle, point.radius);
        match self.bound {
            Bound::Inclusive => distance <= self.threshold,
            Bound::Exclusive => distance < self.threshold,
        }
    }
}

/// Iterator over the identities of indexed points within a hyperbolic
/// distance of a query point.
///
/// Subtrees whose region cannot intersect the Euclidean image of the query
/// ball are skipped; every surviving candidate is confirmed against the exact
/// distance.
#[derive(Clone, Debug)]
pub struct RangeQuery<'a> {
    arena: &'a Arena,
    probe: Probe,
    stack: Vec<NodeId>,
    leaf: slice::Iter<'a, LeafEntry>,
    visited_leaves: usize,
}

impl<'a> RangeQuery<'a> {
    pub(crate) fn new(
        arena: &'a Arena,
        angle: f64,
        radius: f64,
        threshold: f64,
        bound: Bound,
    ) -> Result<Self> {
        if !(threshold >= 0.0) {
            return Err(GeneratorError::NegativeThreshold { threshold });
        }
        if !angle.is_finite() || !(0.0..1.0).contains(&radius) {
            return Err(GeneratorError::InvalidQueryPoint { angle, radius });
        }
        let angle = normalize_angle(angle);
        let circle = euclidean_circle(angle, radius, threshold);
        let centre = circle.x.hypot(circle.y);
        record_query();
        Ok(Self {
            arena,
            probe: Probe {
                angle,
                radius,
                threshold,
                bound,
                centre,
                reach: circle.radius * (1.0 + RELATIVE_SLACK) + ABSOLUTE_SLACK,
            },
            stack: vec![ROOT],
            leaf: [].iter(),
            visited_leaves: 0,
        })
    }

    /// Number of leaves whose points were inspected so far.
    #[must_use]
    pub fn visited_leaves(&self) -> usize {
        self.visited_leaves
    }
}

impl Iterator for RangeQuery<'_> {
    type Item = PointId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for entry in self.leaf.by_ref() {
                if self.probe.accepts(entry.point) {
                    return Some(entry.id);
                }
            }
            let node = self.arena.node(self.stack.pop()?);
            if node.size == 0 {
                continue;
            }
            let gap = node
                .region
                .min_distance(self.probe.angle, self.probe.centre);
            if gap > self.probe.reach {
                continue;
            }
            match &node.kind {
                NodeKind::Leaf(entries) => {
                    self.visited_leaves += 1;
                    self.leaf = entries.iter();
                }
                NodeKind::Internal(children) => self.stack.extend(children.iter().rev()),
            }
        }
    }
}

#[cfg(feature = "metrics")]
fn record_query() {
    metrics::counter!("quadtree_range_queries").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_query() {}
