//! Unit-disk edge enumeration over a built index.

use rayon::prelude::*;
use tracing::{debug, instrument};

use super::Edge;
use crate::{
    PointId, Quadtree,
    coordinates::PolarPoint,
    error::{GeneratorError, Result},
};

/// Every pair of indexed points closer than `threshold`, as edges sorted in
/// ascending order.
///
/// Each point queries the index for its neighbours and keeps those with a
/// greater identity, so every undirected edge is produced exactly once.
/// Queries run in parallel; the result does not depend on scheduling.
///
/// # Errors
/// Returns [`GeneratorError::NegativeThreshold`] for negative or NaN
/// thresholds.
///
/// # Examples
/// ```
/// use rhg_core::{Coordinates, Edge, Quadtree, QuadtreeParams, unit_disk_edges};
///
/// let points = Coordinates::new(vec![0.0, 0.05, 3.0], vec![0.5, 0.5, 0.5])?;
/// let tree = Quadtree::bulk_build(QuadtreeParams::new(0.9)?, &points)?;
/// assert_eq!(unit_disk_edges(&tree, 1.0)?, vec![Edge::new(0, 1)]);
/// # Ok::<(), rhg_core::GeneratorError>(())
/// ```
#[instrument(
    name = "generator.unit_disk_edges",
    err,
    skip(tree),
    fields(points = tree.len()),
)]
pub fn unit_disk_edges(tree: &Quadtree, threshold: f64) -> Result<Vec<Edge>> {
    if !(threshold >= 0.0) {
        return Err(GeneratorError::NegativeThreshold { threshold });
    }
    let points: Vec<(PointId, PolarPoint)> = tree.points().collect();
    let per_point = points
        .par_iter()
        .map(|&(u, point)| {
            let mut higher: Vec<PointId> = tree
                .neighbours_below(point.angle, point.radius, threshold)?
                .filter(|&v| v > u)
                .collect();
            higher.sort_unstable();
            Ok(higher.into_iter().map(move |v| Edge { u, v }).collect())
        })
        .collect::<Result<Vec<Vec<Edge>>>>()?;
    let edges: Vec<Edge> = per_point.into_iter().flatten().collect();
    debug!(edges = edges.len(), "unit-disk edges enumerated");
    Ok(edges)
}
