//! Sector-parallel bulk construction.
//!
//! The disk is first cut into `4^d` angular sectors. Each sector's subtree is
//! built by its own rayon task in a private arena, so workers share no mutable
//! state; the arenas are then grafted into the main arena by shifting their
//! child indices.

use rand::Rng;
use rayon::prelude::*;
use tracing::{Span, debug, instrument};

use super::{
    Quadtree, QuadtreeParams,
    node::{Arena, LeafEntry, NodeId, NodeKind, QuadNode, ROOT},
    region::Region,
};
use crate::{
    coordinates::Coordinates,
    error::Result,
    geometry::{area_to_radius, radius_to_euclidean, sample_points},
};

const MAX_SECTOR_DEPTH: u32 = 3;

impl Quadtree {
    /// Builds an index over `coordinates`, using each point's position as its
    /// identity. Query results match those of inserting the points one by one.
    ///
    /// # Errors
    /// Returns [`crate::GeneratorError::InvalidAngle`] or
    /// [`crate::GeneratorError::OutsideDisk`] for the first point outside the
    /// disk described by `params`.
    ///
    /// # Examples
    /// ```
    /// use rhg_core::{Coordinates, Quadtree, QuadtreeParams};
    ///
    /// let coordinates = Coordinates::new(vec![0.0, 1.0, 2.0], vec![0.1, 0.2, 0.3])?;
    /// let tree = Quadtree::bulk_build(QuadtreeParams::new(0.5)?, &coordinates)?;
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.extract_coordinates(), coordinates);
    /// # Ok::<(), rhg_core::GeneratorError>(())
    /// ```
    #[instrument(
        name = "quadtree.bulk_build",
        err,
        skip(params, coordinates),
        fields(points = coordinates.len(), sectors = tracing::field::Empty),
    )]
    pub fn bulk_build(params: QuadtreeParams, coordinates: &Coordinates) -> Result<Self> {
        coordinates.validate(params.max_radius())?;
        let depth = sector_depth(
            rayon::current_num_threads(),
            coordinates.len(),
            params.capacity(),
        );
        let mut arena = Arena::new(Region::disk(params.max_radius()));
        let slots = carve_sectors(&mut arena, depth);
        Span::current().record("sectors", slots.len());

        let regions: Vec<Region> = slots.iter().map(|&slot| arena.node(slot).region).collect();
        let mut buckets: Vec<Vec<LeafEntry>> = vec![Vec::new(); regions.len()];
        for (id, point) in coordinates.iter().enumerate() {
            let sector = regions
                .partition_point(|region| region.max_angle <= point.angle)
                .min(regions.len() - 1);
            buckets[sector].push(LeafEntry { id, point });
        }

        let (capacity, dispersion) = (params.capacity(), params.dispersion());
        let subtrees: Vec<Arena> = regions
            .into_par_iter()
            .zip(buckets)
            .map(|(region, entries)| {
                let mut subtree = Arena {
                    nodes: vec![QuadNode::leaf(region, entries)],
                };
                subtree.split(ROOT, capacity, dispersion);
                subtree
            })
            .collect();
        for (slot, subtree) in slots.into_iter().zip(subtrees) {
            arena.graft(slot, subtree);
        }
        arena.refresh_sizes();

        let tree = Self {
            params,
            arena,
            points: coordinates.iter().map(Some).collect(),
            len: coordinates.len(),
        };
        debug!(
            nodes = tree.node_count(),
            height = tree.height(),
            "quadtree built"
        );
        Ok(tree)
    }

    /// Samples `nodes` points in the disk of native radius
    /// `stretch · area_to_radius(nodes)` and bulk-builds an index over them.
    ///
    /// # Errors
    /// Returns [`crate::GeneratorError::InvalidParameter`] for invalid
    /// sampling parameters or a disk too large to represent.
    pub fn random<R: Rng + ?Sized>(
        nodes: usize,
        stretch: f64,
        dispersion: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let coordinates = sample_points(nodes, dispersion, stretch, rng)?;
        let bound = radius_to_euclidean(stretch * area_to_radius(nodes as f64));
        let params = QuadtreeParams::new(bound)?.with_dispersion(dispersion);
        Self::bulk_build(params, &coordinates)
    }
}

/// Number of angular sector levels: enough sectors to occupy every worker,
/// none when the input fits a single leaf or only one worker exists.
fn sector_depth(workers: usize, points: usize, capacity: usize) -> u32 {
    if workers <= 1 || points <= capacity {
        return 0;
    }
    let mut depth = 1;
    while depth < MAX_SECTOR_DEPTH && 4_usize.pow(depth) < workers {
        depth += 1;
    }
    depth
}

/// Splits the root of an empty arena into `4^depth` angular wedges and
/// returns the wedge leaves in angular order.
fn carve_sectors(arena: &mut Arena, depth: u32) -> Vec<NodeId> {
    let mut frontier = vec![ROOT];
    for _ in 0..depth {
        let mut next = Vec::with_capacity(frontier.len() * 4);
        for node in frontier {
            let first = arena.nodes.len();
            let sectors = arena.node(node).region.sectors();
            arena
                .nodes
                .extend(sectors.into_iter().map(|region| QuadNode::leaf(region, Vec::new())));
            arena.nodes[node].kind = NodeKind::Internal([first, first + 1, first + 2, first + 3]);
            next.extend(first..first + 4);
        }
        frontier = next;
    }
    frontier
}
