//! Polar quadtree over the Poincaré disk.
//!
//! Nodes live in a flat arena and cover annular sectors; a leaf splits into
//! four children (angle halved, rings of equal hyperbolic area) once it holds
//! more than the configured capacity. A side table maps every point identity
//! to its current coordinates so points can be removed, reindexed and
//! extracted without scanning the tree. Read-only queries borrow the tree
//! immutably and may run from many threads at once; mutation needs `&mut`.

mod bulk;
mod maintenance;
mod node;
mod params;
mod query;
mod region;
mod validate;

use self::{
    node::{Arena, LeafEntry},
    query::Bound,
    region::Region,
};
use crate::{
    PointId,
    coordinates::{PolarPoint, validate_point},
    error::{GeneratorError, Result},
};

pub use self::{params::QuadtreeParams, query::RangeQuery, validate::QuadtreeViolation};

/// Spatial index answering hyperbolic range queries.
///
/// # Examples
/// ```
/// use rhg_core::{Quadtree, QuadtreeParams};
///
/// let mut tree = Quadtree::new(QuadtreeParams::new(0.9)?.with_capacity(4));
/// tree.insert(0, 0.1, 0.5)?;
/// tree.insert(1, 0.2, 0.5)?;
/// tree.insert(2, 3.0, 0.8)?;
/// let mut near: Vec<_> = tree.range_query(0.1, 0.5, 1.0)?.collect();
/// near.sort_unstable();
/// assert_eq!(near, vec![0, 1]);
/// # Ok::<(), rhg_core::GeneratorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Quadtree {
    params: QuadtreeParams,
    arena: Arena,
    points: Vec<Option<PolarPoint>>,
    len: usize,
}

impl Quadtree {
    /// Creates an empty index.
    #[must_use]
    pub fn new(params: QuadtreeParams) -> Self {
        Self {
            arena: Arena::new(Region::disk(params.max_radius())),
            params,
            points: Vec::new(),
            len: 0,
        }
    }

    /// Parameters the index was built with.
    #[must_use]
    pub fn params(&self) -> &QuadtreeParams {
        &self.params
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current coordinates of `id`.
    #[must_use]
    pub fn point(&self, id: PointId) -> Option<PolarPoint> {
        self.points.get(id).copied().flatten()
    }

    /// Indexed points in increasing identity order.
    pub fn points(&self) -> impl Iterator<Item = (PointId, PolarPoint)> + '_ {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(id, point)| point.map(|point| (id, point)))
    }

    /// One past the largest identity the side table has room for; equals
    /// [`Quadtree::len`] when identities are dense.
    #[must_use]
    pub fn id_limit(&self) -> usize {
        self.points.len()
    }

    /// Whether `id` is indexed.
    #[must_use]
    pub fn contains(&self, id: PointId) -> bool {
        self.point(id).is_some()
    }

    /// Adds point `id` at `(angle, radius)`. The leaf receiving the point is
    /// split if it overflows; no other point moves between leaves.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidAngle`] or
    /// [`GeneratorError::OutsideDisk`] for coordinates outside the indexed
    /// disk, [`GeneratorError::DuplicatePoint`] when `id` is present, and
    /// [`GeneratorError::InvalidParameter`] when the side table cannot grow
    /// to hold `id`.
    pub fn insert(&mut self, id: PointId, angle: f64, radius: f64) -> Result<()> {
        let point = PolarPoint::new(angle, radius);
        validate_point(id, point, self.params.max_radius())?;
        if self.contains(id) {
            return Err(GeneratorError::DuplicatePoint { point: id });
        }
        let needed = id
            .checked_add(1)
            .ok_or_else(|| GeneratorError::InvalidParameter {
                name: "id",
                reason: "point identity exceeds the addressable range".to_owned(),
            })?;
        if self.points.len() < needed {
            self.points
                .try_reserve(needed - self.points.len())
                .map_err(|err| GeneratorError::InvalidParameter {
                    name: "id",
                    reason: format!("no room to index point {id}: {err}"),
                })?;
            self.points.resize(needed, None);
        }
        self.points[id] = Some(point);
        self.arena.insert(
            LeafEntry { id, point },
            self.params.capacity(),
            self.params.dispersion(),
        );
        self.len += 1;
        Ok(())
    }

    /// Moves indexed point `id` to `(angle, radius)`. The tree is unchanged
    /// on error.
    ///
    /// # Errors
    /// Returns [`GeneratorError::UnknownPoint`] when `id` is not indexed, and
    /// [`GeneratorError::InvalidAngle`] or [`GeneratorError::OutsideDisk`]
    /// for a target outside the indexed disk.
    pub fn relocate(&mut self, id: PointId, angle: f64, radius: f64) -> Result<()> {
        validate_point(id, PolarPoint::new(angle, radius), self.params.max_radius())?;
        if !self.remove(id) {
            return Err(GeneratorError::UnknownPoint { point: id });
        }
        self.insert(id, angle, radius)
    }

    /// Removes `id`, returning whether it was present. Emptied regions stay
    /// until [`Quadtree::trim`].
    pub fn remove(&mut self, id: PointId) -> bool {
        let Some(point) = self.points.get_mut(id).and_then(Option::take) else {
            return false;
        };
        let removed = self.arena.remove(id, point);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Lazily yields every indexed point whose hyperbolic distance to the
    /// query point is at most `threshold`.
    ///
    /// # Errors
    /// Returns [`GeneratorError::NegativeThreshold`] for negative or NaN
    /// thresholds and [`GeneratorError::InvalidQueryPoint`] when the query is
    /// not a finite point of the open unit disk.
    pub fn range_query(&self, angle: f64, radius: f64, threshold: f64) -> Result<RangeQuery<'_>> {
        RangeQuery::new(&self.arena, angle, radius, threshold, Bound::Inclusive)
    }

    /// Like [`Quadtree::range_query`], but keeps only points strictly closer
    /// than `threshold`.
    ///
    /// # Errors
    /// Same as [`Quadtree::range_query`].
    pub fn neighbours_below(
        &self,
        angle: f64,
        radius: f64,
        threshold: f64,
    ) -> Result<RangeQuery<'_>> {
        RangeQuery::new(&self.arena, angle, radius, threshold, Bound::Exclusive)
    }

    /// Number of levels, counting the root.
    #[must_use]
    pub fn height(&self) -> usize {
        self.arena.height()
    }

    /// Number of leaves, empty ones included.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.arena.leaves().count()
    }

    /// Number of allocated nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.arena.nodes.len()
    }
}

#[cfg(test)]
mod tests;
