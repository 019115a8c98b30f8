//! The threshold hyperbolic random graph model.

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{Span, field::Empty, info, instrument};

use super::{GeneratedGraph, GraphGenerator, HyperbolicParams, unit_disk_edges};
use crate::{
    Quadtree, QuadtreeParams,
    coordinates::Coordinates,
    error::{GeneratorError, Result},
    geometry::{radius_to_euclidean, sample_points_within, target_radius},
};

#[derive(Clone, Debug)]
enum Source<'a> {
    Model(HyperbolicParams),
    Points {
        coordinates: Coordinates,
        max_radius: f64,
        threshold: f64,
    },
    Index {
        tree: &'a Quadtree,
        threshold: f64,
    },
}

/// Generates threshold hyperbolic random graphs: two points are adjacent iff
/// their hyperbolic distance is strictly below the threshold.
///
/// The generator is built either from model parameters (node count, average
/// degree, exponent), from explicit coordinates, or from an existing index.
///
/// # Examples
/// ```
/// use rhg_core::{GraphGenerator, HyperbolicGenerator, HyperbolicParams};
///
/// let params = HyperbolicParams::new(2_000, 10.0, 3.0)?.with_seed(1);
/// let graph = HyperbolicGenerator::new(params).generate()?;
/// assert_eq!(graph.node_count(), 2_000);
/// assert!((graph.average_degree() - 10.0).abs() < 2.0);
/// # Ok::<(), rhg_core::GeneratorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct HyperbolicGenerator<'a> {
    source: Source<'a>,
}

impl HyperbolicGenerator<'static> {
    /// Generator sampling its points from the model parameters. The disk
    /// radius, which is also the threshold, is chosen so that the expected
    /// average degree matches the request.
    #[must_use]
    pub fn new(params: HyperbolicParams) -> Self {
        Self {
            source: Source::Model(params),
        }
    }

    /// Generator over caller-supplied points in the disk of Euclidean radius
    /// `max_radius`, connected below the hyperbolic distance `threshold`.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] for a disk radius outside
    /// `[0, 1)`, [`GeneratorError::NegativeThreshold`] for a negative or NaN
    /// threshold, and [`GeneratorError::InvalidAngle`] or
    /// [`GeneratorError::OutsideDisk`] for the first invalid point.
    pub fn from_coordinates(
        coordinates: Coordinates,
        max_radius: f64,
        threshold: f64,
    ) -> Result<Self> {
        QuadtreeParams::new(max_radius)?;
        check_threshold(threshold)?;
        coordinates.validate(max_radius)?;
        Ok(Self {
            source: Source::Points {
                coordinates,
                max_radius,
                threshold,
            },
        })
    }

    /// Samples the points the model form uses for `params`, returning them
    /// with the native disk radius (the model's threshold).
    ///
    /// # Errors
    /// Returns [`GeneratorError::UnreachableDegree`] when no disk radius
    /// yields the requested degree.
    pub fn model_points(params: &HyperbolicParams) -> Result<(Coordinates, f64)> {
        let alpha = params.dispersion();
        let radius = target_radius(params.nodes(), params.average_degree(), alpha)?;
        let mut rng = SmallRng::seed_from_u64(params.seed());
        let coordinates = sample_points_within(params.nodes(), alpha, radius, &mut rng)?;
        Ok((coordinates, radius))
    }
}

impl<'a> HyperbolicGenerator<'a> {
    /// Generator reusing a built index, for example one that was trimmed and
    /// reindexed. Node identities are those of the index.
    ///
    /// # Errors
    /// Returns [`GeneratorError::NegativeThreshold`] for a negative or NaN
    /// threshold.
    pub fn from_quadtree(tree: &'a Quadtree, threshold: f64) -> Result<Self> {
        check_threshold(threshold)?;
        Ok(Self {
            source: Source::Index { tree, threshold },
        })
    }
}

impl GraphGenerator for HyperbolicGenerator<'_> {
    #[instrument(
        name = "generator.generate",
        err,
        skip(self),
        fields(nodes = Empty, threshold = Empty),
    )]
    fn generate(&self) -> Result<GeneratedGraph> {
        let graph = match &self.source {
            Source::Model(params) => generate_model(params)?,
            Source::Points {
                coordinates,
                max_radius,
                threshold,
            } => {
                let tree = Quadtree::bulk_build(QuadtreeParams::new(*max_radius)?, coordinates)?;
                connect(&tree, coordinates.len(), *threshold)?
            }
            Source::Index { tree, threshold } => connect(tree, tree.id_limit(), *threshold)?,
        };
        let span = Span::current();
        span.record("nodes", graph.node_count());
        span.record("threshold", graph.threshold());
        info!(
            edges = graph.edge_count(),
            average_degree = graph.average_degree(),
            "hyperbolic graph generated"
        );
        Ok(graph)
    }
}

fn generate_model(params: &HyperbolicParams) -> Result<GeneratedGraph> {
    if params.nodes() == 0 {
        return Ok(GeneratedGraph::new(0, Vec::new(), 0.0));
    }
    let (coordinates, radius) = HyperbolicGenerator::model_points(params)?;
    let tree_params = QuadtreeParams::new(radius_to_euclidean(radius))?
        .with_capacity(params.capacity())
        .with_dispersion(params.dispersion());
    let tree = Quadtree::bulk_build(tree_params, &coordinates)?;
    connect(&tree, params.nodes(), radius)
}

fn connect(tree: &Quadtree, node_count: usize, threshold: f64) -> Result<GeneratedGraph> {
    let edges = unit_disk_edges(tree, threshold)?;
    Ok(GeneratedGraph::new(node_count, edges, threshold))
}

fn check_threshold(threshold: f64) -> Result<()> {
    if threshold >= 0.0 {
        Ok(())
    } else {
        Err(GeneratorError::NegativeThreshold { threshold })
    }
}
