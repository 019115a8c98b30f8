//! Bulk construction.

use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use super::{inserted, params, sampled, sorted};
use crate::{
    GeneratorError, Quadtree,
    coordinates::Coordinates,
    geometry::{area_to_radius, radius_to_euclidean},
};

fn pool(threads: usize) -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("thread pool must build")
}

fn neighbourhoods(tree: &Quadtree, points: &Coordinates, threshold: f64) -> Vec<Vec<usize>> {
    points
        .iter()
        .map(|point| {
            sorted(
                tree.range_query(point.angle, point.radius, threshold)
                    .expect("query must succeed"),
            )
        })
        .collect()
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(4)]
#[case(16)]
#[case(64)]
fn bulk_build_answers_like_sequential_insertion(#[case] threads: usize) {
    let (points, bound) = sampled(1_500, 1.0, 21);
    let threshold = area_to_radius(1_500.0);
    let sequential = inserted(&points, params(bound, 12));
    let bulk = pool(threads)
        .install(|| Quadtree::bulk_build(params(bound, 12), &points))
        .expect("build must succeed");

    bulk.validate().expect("bulk tree must be valid");
    assert_eq!(bulk.len(), sequential.len());
    assert_eq!(sorted(bulk.elements().into_iter()), sorted(sequential.elements().into_iter()));
    assert_eq!(
        neighbourhoods(&bulk, &points, threshold),
        neighbourhoods(&sequential, &points, threshold)
    );
}

#[test]
fn bulk_build_rejects_points_outside_the_disk() {
    let points = Coordinates::new(vec![0.0, 1.0, 2.0], vec![0.1, 0.95, 0.2]).expect("lengths match");
    let err = Quadtree::bulk_build(params(0.9, 4), &points).expect_err("point must be rejected");
    assert!(matches!(err, GeneratorError::OutsideDisk { point: 1, .. }));
}

#[test]
fn bulk_build_of_nothing_is_empty() {
    let tree = pool(8)
        .install(|| Quadtree::bulk_build(params(0.5, 4), &Coordinates::default()))
        .expect("build must succeed");
    assert!(tree.is_empty());
    assert_eq!(tree.leaf_count(), 1);
    tree.validate().expect("tree must be valid");
}

#[test]
fn bulk_build_keeps_points_on_sector_boundaries() {
    let angles: Vec<f64> = (0..64)
        .map(|k| f64::from(k) * std::f64::consts::TAU / 64.0)
        .collect();
    let radii = vec![0.5; angles.len()];
    let points = Coordinates::new(angles, radii).expect("lengths match");
    let tree = pool(64)
        .install(|| Quadtree::bulk_build(params(0.9, 1), &points))
        .expect("build must succeed");
    tree.validate().expect("tree must be valid");
    assert_eq!(tree.extract_coordinates(), points);
}

#[test]
fn random_tree_holds_the_requested_points() {
    let mut rng = SmallRng::seed_from_u64(99);
    let tree = Quadtree::random(2_000, 1.2, 1.0, &mut rng).expect("random tree must build");
    assert_eq!(tree.len(), 2_000);
    tree.validate().expect("tree must be valid");
    let bound = radius_to_euclidean(1.2 * area_to_radius(2_000.0));
    assert!((tree.params().max_radius() - bound).abs() < 1e-15);
    assert!(tree.extract_coordinates().radii().iter().all(|&r| r <= bound));
}

#[test]
fn random_tree_rejects_unrepresentable_disks() {
    let mut rng = SmallRng::seed_from_u64(1);
    assert!(matches!(
        Quadtree::random(100, 40.0, 1.0, &mut rng),
        Err(GeneratorError::InvalidParameter { .. })
    ));
}
