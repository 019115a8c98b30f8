//! Evolving hyperbolic random graphs expressed as event streams.
//!
//! A [`DynamicHyperbolicGenerator`] owns a point configuration, its quadtree
//! and the edge set of the last round. Each round displaces a random subset
//! of the points, advances the threshold, re-inserts the moved points and
//! emits the sorted difference between the previous and the new edge set.

mod diff;
mod movement;
mod params;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{Span, debug, field::Empty, info, instrument, trace};

use self::{diff::diff_sorted, movement::Mover};
pub use self::params::DynamicParams;
use crate::{
    Quadtree, QuadtreeParams,
    coordinates::{Coordinates, PolarPoint},
    error::Result,
    event::{GraphEvent, GraphEventKind},
    generator::{Edge, GeneratedGraph, unit_disk_edges},
    geometry::{euclidean_to_radius, radius_to_euclidean, sample_points_within},
};

/// A graph model that evolves in rounds, reporting each round as events.
pub trait DynamicGraphSource {
    /// Advances `rounds` rounds and returns their events, each round closed
    /// by one [`GraphEvent::TimeStep`]. Calling it once with `k` rounds
    /// yields the same events as calling it `k` times with one round.
    ///
    /// # Errors
    /// Returns a [`crate::GeneratorError`] when the index rejects an update.
    fn generate(&mut self, rounds: usize) -> Result<Vec<GraphEvent>>;
}

/// Dynamic threshold hyperbolic random graph.
///
/// The random source is owned and advanced by every round, so two generators
/// built from the same inputs and seed produce identical streams.
///
/// # Examples
/// ```
/// use rhg_core::{
///     AdjacencyGraph, DynamicGraphSource, DynamicHyperbolicGenerator, DynamicParams,
///     GraphUpdater,
/// };
///
/// let params = DynamicParams::for_nodes(500, 1.0)?
///     .with_initial_factor(0.5)
///     .with_factor_growth(0.1);
/// let mut generator = DynamicHyperbolicGenerator::random(500, params, 7)?;
/// let mut graph = AdjacencyGraph::default();
/// let mut updater = GraphUpdater::new(&mut graph);
/// updater.update(&generator.initial_events()).expect("initial stream replays");
/// updater.update(&generator.generate(5)?).expect("rounds replay");
/// assert_eq!(graph.number_of_edges(), generator.current_graph().edge_count());
/// # Ok::<(), rhg_core::GeneratorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DynamicHyperbolicGenerator<R: Rng = SmallRng> {
    params: DynamicParams,
    angles: Vec<f64>,
    radii: Vec<f64>,
    native_radii: Vec<f64>,
    factor: f64,
    tree: Quadtree,
    initial: GeneratedGraph,
    edges: Vec<Edge>,
    rounds: usize,
    rng: R,
}

impl DynamicHyperbolicGenerator<SmallRng> {
    /// Samples `nodes` points with the dispersion of `params` and drives
    /// every later round from the same seeded source.
    ///
    /// # Errors
    /// Returns [`crate::GeneratorError::InvalidParameter`] for invalid
    /// parameters or a disk too large to index.
    pub fn random(nodes: usize, params: DynamicParams, seed: u64) -> Result<Self> {
        params.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let coordinates =
            sample_points_within(nodes, params.dispersion(), params.disk_radius(), &mut rng)?;
        Self::new(coordinates, params, rng)
    }
}

impl<R: Rng> DynamicHyperbolicGenerator<R> {
    /// Starts from explicit coordinates, which must lie in the disk of
    /// Euclidean radius `tanh(R / 2)`.
    ///
    /// # Errors
    /// Returns [`crate::GeneratorError::InvalidParameter`] for invalid
    /// parameters, and [`crate::GeneratorError::InvalidAngle`] or
    /// [`crate::GeneratorError::OutsideDisk`] for the first invalid point.
    pub fn new(coordinates: Coordinates, params: DynamicParams, rng: R) -> Result<Self> {
        params.validate()?;
        let tree_params = QuadtreeParams::new(radius_to_euclidean(params.disk_radius()))?
            .with_capacity(params.capacity())
            .with_dispersion(params.dispersion());
        let tree = Quadtree::bulk_build(tree_params, &coordinates)?;
        let factor = params.initial_factor();
        let threshold = factor * params.disk_radius();
        let edges = unit_disk_edges(&tree, threshold)?;
        let (angles, radii) = coordinates.into_parts();
        let native_radii = radii
            .iter()
            .map(|&radius| euclidean_to_radius(radius).min(params.disk_radius()))
            .collect();
        let initial = GeneratedGraph::new(angles.len(), edges.clone(), threshold);
        debug!(
            nodes = angles.len(),
            edges = edges.len(),
            threshold,
            "dynamic generator initialised"
        );
        Ok(Self {
            params,
            angles,
            radii,
            native_radii,
            factor,
            tree,
            initial,
            edges,
            rounds: 0,
            rng,
        })
    }

    /// Parameters the generator was built with.
    #[must_use]
    pub fn params(&self) -> &DynamicParams {
        &self.params
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// Whether the generator holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Graph at the initial threshold and coordinates.
    #[must_use]
    pub fn initial_graph(&self) -> &GeneratedGraph {
        &self.initial
    }

    /// Events that build the initial graph in an empty store.
    #[must_use]
    pub fn initial_events(&self) -> Vec<GraphEvent> {
        self.initial.to_events()
    }

    /// Graph implied by the current coordinates and threshold.
    #[must_use]
    pub fn current_graph(&self) -> GeneratedGraph {
        GeneratedGraph::new(self.angles.len(), self.edges.clone(), self.threshold())
    }

    /// Current coordinates in identity order.
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        self.angles
            .iter()
            .zip(&self.radii)
            .map(|(&angle, &radius)| PolarPoint::new(angle, radius))
            .collect()
    }

    /// Current angles in identity order.
    #[must_use]
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Current Euclidean radii in identity order.
    #[must_use]
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Current threshold factor.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Current hyperbolic distance threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.factor * self.params.disk_radius()
    }

    /// Rounds generated so far.
    #[must_use]
    pub fn rounds_completed(&self) -> usize {
        self.rounds
    }

    fn round(&mut self, events: &mut Vec<GraphEvent>) -> Result<()> {
        let moved = self.displace()?;
        self.factor = (self.factor + self.params.factor_growth()).max(0.0);

        let current = unit_disk_edges(&self.tree, self.threshold())?;
        let diff = diff_sorted(&self.edges, &current);
        events.extend(
            diff.removed
                .iter()
                .map(|edge| GraphEvent::EdgeRemoval { u: edge.u(), v: edge.v() }),
        );
        events.extend(
            diff.added
                .iter()
                .map(|edge| GraphEvent::EdgeAddition { u: edge.u(), v: edge.v() }),
        );
        events.push(GraphEvent::TimeStep);
        self.edges = current;
        self.rounds += 1;

        record_round(diff.added.len(), diff.removed.len());
        debug!(
            round = self.rounds,
            moved,
            additions = diff.added.len(),
            removals = diff.removed.len(),
            threshold = self.threshold(),
            "dynamic round completed"
        );
        Ok(())
    }

    fn displace(&mut self) -> Result<usize> {
        let share = self.params.moved_share();
        if share <= 0.0 {
            return Ok(0);
        }
        let mover = Mover {
            dispersion: self.params.dispersion(),
            disk_radius: self.params.disk_radius(),
            distance: self.params.move_distance(),
        };
        let mut moved = 0;
        for id in 0..self.angles.len() {
            if !self.rng.gen_bool(share) {
                continue;
            }
            let step = mover.displace(self.angles[id], self.native_radii[id], &mut self.rng);
            if step.clamped {
                trace!(point = id, "movement clamped to the disk");
            }
            let radius =
                radius_to_euclidean(step.native_radius).min(self.tree.params().max_radius());
            self.tree.relocate(id, step.angle, radius)?;
            self.angles[id] = step.angle;
            self.radii[id] = radius;
            self.native_radii[id] = step.native_radius;
            moved += 1;
        }
        Ok(moved)
    }
}

impl<R: Rng> DynamicGraphSource for DynamicHyperbolicGenerator<R> {
    #[instrument(
        name = "dynamic.generate",
        err,
        skip(self),
        fields(nodes = self.angles.len(), additions = Empty, removals = Empty),
    )]
    fn generate(&mut self, rounds: usize) -> Result<Vec<GraphEvent>> {
        let mut events = Vec::new();
        for _ in 0..rounds {
            self.round(&mut events)?;
        }
        let additions = count_kind(&events, GraphEventKind::EdgeAddition);
        let removals = count_kind(&events, GraphEventKind::EdgeRemoval);
        let span = Span::current();
        span.record("additions", additions);
        span.record("removals", removals);
        info!(
            rounds,
            additions,
            removals,
            edges = self.edges.len(),
            "dynamic rounds generated"
        );
        Ok(events)
    }
}

fn count_kind(events: &[GraphEvent], kind: GraphEventKind) -> usize {
    events.iter().filter(|event| event.kind() == kind).count()
}

#[cfg(feature = "metrics")]
fn record_round(additions: usize, removals: usize) {
    metrics::counter!("dynamic_rounds").increment(1);
    metrics::counter!("dynamic_edge_additions").increment(additions as u64);
    metrics::counter!("dynamic_edge_removals").increment(removals as u64);
}

#[cfg(not(feature = "metrics"))]
fn record_round(_additions: usize, _removals: usize) {}
