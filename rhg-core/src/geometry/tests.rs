//! Unit tests for the geometry kernel.

use std::f64::consts::{PI, TAU};

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use super::*;
use crate::{GeneratorError, test_utils::suite_proptest_config};

const EPS: f64 = 1e-9;

#[rstest]
#[case(0.0, 0.0, 0.0, 0.0)]
#[case(1.0, 0.5, 1.0, 0.5)]
#[case(5.5, 0.9, 5.5, 0.9)]
fn distance_to_self_is_zero(
    #[case] a1: f64,
    #[case] r1: f64,
    #[case] a2: f64,
    #[case] r2: f64,
) {
    assert_eq!(hyperbolic_distance(a1, r1, a2, r2), 0.0);
}

#[rstest]
#[case(0.0, 0.3, 2.0, 0.8)]
#[case(6.2, 0.99, 0.1, 0.99)]
#[case(PI, 0.0, 0.0, 0.7)]
fn distance_is_symmetric(#[case] a1: f64, #[case] r1: f64, #[case] a2: f64, #[case] r2: f64) {
    let forward = hyperbolic_distance(a1, r1, a2, r2);
    let backward = hyperbolic_distance(a2, r2, a1, r1);
    assert!((forward - backward).abs() < EPS);
}

#[test]
fn radial_distance_from_origin_matches_native_radius() {
    for native in [0.1, 1.0, 4.0, 12.0] {
        let r = radius_to_euclidean(native);
        let d = hyperbolic_distance(0.0, 0.0, 1.3, r);
        assert!((d - native).abs() < 1e-7 * native.max(1.0), "{d} vs {native}");
    }
}

#[rstest]
#[case(0.0, 2.0, PI, 3.0)]
#[case(0.4, 1.5, 1.1, 2.5)]
#[case(3.0, 0.2, 5.9, 0.7)]
fn poincare_distance_agrees_with_native_distance(
    #[case] a1: f64,
    #[case] rho1: f64,
    #[case] a2: f64,
    #[case] rho2: f64,
) {
    let native = native_distance(a1, rho1, a2, rho2);
    let poincare = hyperbolic_distance(
        a1,
        radius_to_euclidean(rho1),
        a2,
        radius_to_euclidean(rho2),
    );
    assert!((native - poincare).abs() < 1e-7, "{native} vs {poincare}");
}

#[test]
fn opposite_points_sum_their_radii() {
    let d = native_distance(0.0, 2.0, PI, 3.0);
    assert!((d - 5.0).abs() < 1e-9);
}

#[rstest]
#[case(1.0)]
#[case(1.5)]
#[case(f64::INFINITY)]
fn points_on_or_beyond_the_boundary_are_infinitely_far(#[case] radius: f64) {
    assert_eq!(hyperbolic_distance(0.0, 0.2, 1.0, radius), f64::INFINITY);
}

proptest! {
    #![proptest_config(suite_proptest_config(512))]

    #[test]
    fn hyperbolic_distance_is_never_nan(
        a1 in -20.0_f64..20.0,
        r1 in 0.0_f64..1.2,
        a2 in -20.0_f64..20.0,
        r2 in 0.0_f64..1.2,
    ) {
        let d = hyperbolic_distance(a1, r1, a2, r2);
        prop_assert!(!d.is_nan());
        prop_assert!(d >= 0.0);
    }

    #[test]
    fn native_distance_is_never_nan(
        a1 in -20.0_f64..20.0,
        rho1 in 0.0_f64..40.0,
        a2 in -20.0_f64..20.0,
        rho2 in 0.0_f64..40.0,
    ) {
        let d = native_distance(a1, rho1, a2, rho2);
        prop_assert!(!d.is_nan());
        prop_assert!(d >= 0.0);
    }

    #[test]
    fn euclidean_radius_round_trips(native in 0.0_f64..15.0) {
        let back = euclidean_to_radius(radius_to_euclidean(native));
        prop_assert!((back - native).abs() < 1e-6 * native.max(1.0));
    }
}

#[rstest]
#[case(0.3, 0.5, 1.0)]
#[case(4.0, 0.95, 2.5)]
#[case(1.0, 0.1, 3.0)]
fn euclidean_circle_passes_through_points_at_threshold(
    #[case] angle: f64,
    #[case] radius: f64,
    #[case] threshold: f64,
) {
    let circle = euclidean_circle(angle, radius, threshold);
    let centre = circle.x.hypot(circle.y);
    let far = centre + circle.radius;
    let near = centre - circle.radius;
    let near_angle = if near < 0.0 {
        normalize_angle(angle + PI)
    } else {
        angle
    };
    let far_distance = hyperbolic_distance(angle, radius, angle, far);
    let near_distance = hyperbolic_distance(angle, radius, near_angle, near.abs());
    assert!((far_distance - threshold).abs() < 1e-6, "{far_distance}");
    assert!((near_distance - threshold).abs() < 1e-6, "{near_distance}");
}

#[rstest]
#[case(-PI / 2.0, 1.5 * PI)]
#[case(TAU, 0.0)]
#[case(3.0 * TAU + 1.0, 1.0)]
#[case(-1e-18, 0.0)]
fn normalize_angle_wraps_into_range(#[case] input: f64, #[case] expected: f64) {
    let wrapped = normalize_angle(input);
    assert!((0.0..TAU).contains(&wrapped));
    assert!((wrapped - expected).abs() < 1e-9);
}

#[test]
fn area_to_radius_grows_logarithmically() {
    let small = area_to_radius(1_000.0);
    let large = area_to_radius(1_000_000.0);
    assert!((large - small - 3.0 * 10.0_f64.ln()).abs() < 0.02);
}

#[test]
fn exponent_three_gives_unit_dispersion() {
    assert_eq!(exponent_to_dispersion(3.0), 1.0);
}

#[rstest]
#[case(10_000, 6.0, 3.0)]
#[case(100_000, 32.0, 7.0)]
#[case(5_000, 10.0, 2.5)]
fn target_radius_reaches_requested_degree(
    #[case] nodes: usize,
    #[case] degree: f64,
    #[case] exponent: f64,
) {
    let alpha = exponent_to_dispersion(exponent);
    let radius = target_radius(nodes, degree, alpha).expect("degree must be reachable");
    let reached = expected_degree(nodes as f64, alpha, radius);
    assert!((reached - degree).abs() < 1e-3, "{reached} vs {degree}");
}

#[rstest]
#[case(0.5)]
#[case(0.2)]
#[case(f64::NAN)]
fn target_radius_rejects_small_dispersion(#[case] alpha: f64) {
    let err = target_radius(1_000, 8.0, alpha).expect_err("dispersion must be rejected");
    assert!(matches!(
        err,
        GeneratorError::InvalidParameter {
            name: "dispersion",
            ..
        }
    ));
}

#[test]
fn target_radius_rejects_degrees_beyond_the_node_count() {
    let err = target_radius(100, 150.0, 1.0).expect_err("degree must be unreachable");
    assert!(matches!(err, GeneratorError::UnreachableDegree { nodes: 100, .. }));
}

#[test]
fn expected_edges_shrink_as_the_disk_stretches() {
    let tight = expected_number_of_edges(2_000, 1.0);
    let loose = expected_number_of_edges(2_000, 1.2);
    assert!(tight > loose);
    assert!(loose > 0.0);
}

#[test]
fn sampling_is_deterministic_per_seed() {
    let first = sample_points(256, 1.0, 1.0, &mut SmallRng::seed_from_u64(11))
        .expect("sampling must succeed");
    let second = sample_points(256, 1.0, 1.0, &mut SmallRng::seed_from_u64(11))
        .expect("sampling must succeed");
    let other = sample_points(256, 1.0, 1.0, &mut SmallRng::seed_from_u64(12))
        .expect("sampling must succeed");
    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[rstest]
#[case(1.0, 1.0)]
#[case(3.0, 1.2)]
#[case(0.6, 0.8)]
fn sampled_points_stay_inside_the_disk(#[case] alpha: f64, #[case] stretch: f64) {
    let nodes = 2_000;
    let mut rng = SmallRng::seed_from_u64(3);
    let points = sample_points(nodes, alpha, stretch, &mut rng).expect("sampling must succeed");
    let bound = radius_to_euclidean(stretch * area_to_radius(nodes as f64));
    assert_eq!(points.len(), nodes);
    points.validate(bound).expect("sampled points must be valid");
}

#[test]
fn high_dispersion_pushes_points_outwards() {
    let mut rng = SmallRng::seed_from_u64(5);
    let radius = 12.0;
    let low = sample_points_within(2_000, 0.6, radius, &mut rng).expect("sampling must succeed");
    let high = sample_points_within(2_000, 3.0, radius, &mut rng).expect("sampling must succeed");
    let mean = |r: &[f64]| r.iter().sum::<f64>() / r.len() as f64;
    assert!(mean(high.radii()) > mean(low.radii()));
}

#[rstest]
#[case(0.0, 1.0)]
#[case(-1.0, 1.0)]
#[case(1.0, 0.0)]
fn sampling_rejects_invalid_parameters(#[case] alpha: f64, #[case] stretch: f64) {
    let mut rng = SmallRng::seed_from_u64(0);
    assert!(matches!(
        sample_points(10, alpha, stretch, &mut rng),
        Err(GeneratorError::InvalidParameter { .. })
    ));
}

#[test]
fn sampling_zero_points_yields_empty_coordinates() {
    let mut rng = SmallRng::seed_from_u64(0);
    let points = sample_points(0, 1.0, 1.0, &mut rng).expect("sampling must succeed");
    assert!(points.is_empty());
}
