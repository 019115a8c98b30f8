//! Unit tests for the polar quadtree.

mod build;
mod insert;

use rand::{SeedableRng, rngs::SmallRng};

use super::{Quadtree, QuadtreeParams};
use crate::{
    PointId,
    coordinates::Coordinates,
    geometry::{area_to_radius, hyperbolic_distance, radius_to_euclidean, sample_points},
};

/// Samples `nodes` points in the disk of stretch one and returns them with
/// the disk's Euclidean radius.
pub(super) fn sampled(nodes: usize, alpha: f64, seed: u64) -> (Coordinates, f64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let points = sample_points(nodes, alpha, 1.0, &mut rng).expect("sampling must succeed");
    let bound = radius_to_euclidean(area_to_radius(nodes as f64));
    (points, bound)
}

pub(super) fn params(bound: f64, capacity: usize) -> QuadtreeParams {
    QuadtreeParams::new(bound)
        .expect("bound must be valid")
        .with_capacity(capacity)
}

/// Inserts the points one at a time.
pub(super) fn inserted(points: &Coordinates, params: QuadtreeParams) -> Quadtree {
    let mut tree = Quadtree::new(params);
    for (id, point) in points.iter().enumerate() {
        tree.insert(id, point.angle, point.radius)
            .expect("sampled point must be insertable");
    }
    tree
}

pub(super) fn brute_force(
    points: &Coordinates,
    angle: f64,
    radius: f64,
    threshold: f64,
    strict: bool,
) -> Vec<PointId> {
    points
        .iter()
        .enumerate()
        .filter(|(_, point)| {
            let distance = hyperbolic_distance(angle, radius, point.angle, point.radius);
            if strict {
                distance < threshold
            } else {
                distance <= threshold
            }
        })
        .map(|(id, _)| id)
        .collect()
}

pub(super) fn sorted(ids: impl Iterator<Item = PointId>) -> Vec<PointId> {
    let mut ids: Vec<_> = ids.collect();
    ids.sort_unstable();
    ids
}
