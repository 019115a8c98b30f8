use rand::{SeedableRng, rngs::SmallRng};
use rhg_core::{
    AdjacencyGraph, Coordinates, GraphEvent, GraphUpdater,
    geometry::{area_to_radius, radius_to_euclidean, sample_points},
};

/// Points sampled in the disk of native radius `stretch · area_to_radius(n)`,
/// with that radius and its Euclidean counterpart.
pub struct Disk {
    pub points: Coordinates,
    pub radius: f64,
    pub bound: f64,
}

#[must_use]
pub fn disk(nodes: usize, stretch: f64, seed: u64) -> Disk {
    let mut rng = SmallRng::seed_from_u64(seed);
    let points = sample_points(nodes, 1.0, stretch, &mut rng).expect("sampling must succeed");
    let radius = stretch * area_to_radius(nodes as f64);
    Disk {
        points,
        radius,
        bound: radius_to_euclidean(radius),
    }
}

/// Replays `streams` in order into a fresh store.
#[must_use]
pub fn replayed<'a>(streams: impl IntoIterator<Item = &'a [GraphEvent]>) -> AdjacencyGraph {
    let mut store = AdjacencyGraph::default();
    let mut updater = GraphUpdater::new(&mut store);
    for stream in streams {
        updater.update(stream).expect("stream must replay cleanly");
    }
    store
}

/// Whether `actual` lies within `share` of `expected`.
#[must_use]
pub fn within(actual: usize, expected: f64, share: f64) -> bool {
    (actual as f64 - expected).abs() <= expected * share
}
