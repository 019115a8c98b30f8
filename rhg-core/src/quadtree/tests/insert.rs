//! Insertion and removal.

use std::f64::consts::TAU;

use rstest::rstest;

use super::{inserted, params, sampled, sorted};
use crate::{GeneratorErrorCode, Quadtree};

#[rstest]
#[case::beyond_bound(0.5, 0.95, GeneratorErrorCode::OutsideDisk)]
#[case::negative_radius(0.5, -0.1, GeneratorErrorCode::OutsideDisk)]
#[case::nan_radius(0.5, f64::NAN, GeneratorErrorCode::OutsideDisk)]
#[case::full_turn(TAU, 0.5, GeneratorErrorCode::InvalidAngle)]
#[case::negative_angle(-0.1, 0.5, GeneratorErrorCode::InvalidAngle)]
#[case::infinite_angle(f64::INFINITY, 0.5, GeneratorErrorCode::InvalidAngle)]
fn insert_rejects_points_outside_the_disk(
    #[case] angle: f64,
    #[case] radius: f64,
    #[case] code: GeneratorErrorCode,
) {
    let mut tree = Quadtree::new(params(0.9, 4));
    let err = tree
        .insert(3, angle, radius)
        .expect_err("point must be rejected");
    assert_eq!(err.code(), code);
    assert!(tree.is_empty());
}

#[test]
fn insert_accepts_points_on_the_rim() {
    let mut tree = Quadtree::new(params(0.9, 4));
    tree.insert(0, 0.0, 0.9).expect("rim point must be accepted");
    tree.insert(1, 0.0, 0.0).expect("centre must be accepted");
    tree.validate().expect("tree must be valid");
}

#[test]
fn duplicate_identity_is_rejected() {
    let mut tree = Quadtree::new(params(0.9, 4));
    tree.insert(7, 1.0, 0.5).expect("first insert must succeed");
    let err = tree
        .insert(7, 2.0, 0.5)
        .expect_err("duplicate must be rejected");
    assert_eq!(err.code(), GeneratorErrorCode::DuplicatePoint);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.point(7).map(|p| p.angle), Some(1.0));
}

#[test]
fn overflowing_leaves_split() {
    let (points, bound) = sampled(500, 1.0, 1);
    let tree = inserted(&points, params(bound, 8));
    tree.validate().expect("tree must be valid");
    assert_eq!(tree.len(), 500);
    assert!(tree.leaf_count() >= 500 / 8);
    assert!(tree.height() > 2);
}

#[test]
fn insertion_leaves_existing_points_in_place() {
    let (points, bound) = sampled(200, 1.0, 2);
    let mut tree = Quadtree::new(params(bound, 4));
    for (id, point) in points.iter().enumerate() {
        tree.insert(id, point.angle, point.radius)
            .expect("insert must succeed");
        for earlier in 0..=id {
            assert_eq!(tree.point(earlier), points.point(earlier));
        }
    }
    tree.validate().expect("tree must be valid");
    assert_eq!(sorted(tree.elements().into_iter()), (0..200).collect::<Vec<_>>());
}

#[test]
fn coincident_points_stay_in_one_leaf() {
    let mut tree = Quadtree::new(params(0.9, 4));
    for id in 0..20 {
        tree.insert(id, 1.25, 0.4).expect("insert must succeed");
    }
    assert_eq!(tree.leaf_count(), 1);
    tree.validate().expect("degenerate leaf is valid");
}

#[test]
fn points_at_the_origin_count_as_coincident() {
    let mut tree = Quadtree::new(params(0.9, 2));
    for id in 0..10 {
        tree.insert(id, id as f64 * 0.5, 0.0)
            .expect("insert must succeed");
    }
    assert_eq!(tree.leaf_count(), 1);
    tree.validate().expect("degenerate leaf is valid");
}

#[test]
fn remove_drops_a_point_once() {
    let (points, bound) = sampled(300, 1.0, 3);
    let mut tree = inserted(&points, params(bound, 8));
    let target = points.point(42).expect("point exists");

    assert!(tree.remove(42));
    assert!(!tree.remove(42));
    assert!(!tree.remove(10_000));
    assert_eq!(tree.len(), 299);
    assert!(!tree.contains(42));
    tree.validate().expect("tree must be valid");

    let near: Vec<_> = tree
        .range_query(target.angle, target.radius, 0.0)
        .expect("query must succeed")
        .collect();
    assert!(!near.contains(&42));
}

#[test]
fn removed_identity_can_be_reused() {
    let mut tree = Quadtree::new(params(0.9, 4));
    tree.insert(0, 1.0, 0.5).expect("insert must succeed");
    assert!(tree.remove(0));
    tree.insert(0, 4.0, 0.1).expect("reinsertion must succeed");
    assert_eq!(tree.point(0).map(|p| p.angle), Some(4.0));
    tree.validate().expect("tree must be valid");
}

#[rstest]
#[case::half_range(usize::MAX / 2)]
#[case::top_of_range(usize::MAX)]
fn unaddressable_identity_is_rejected(#[case] id: usize) {
    let mut tree = Quadtree::new(params(0.9, 4));
    let err = tree
        .insert(id, 1.0, 0.5)
        .expect_err("identity must be rejected");
    assert_eq!(err.code(), GeneratorErrorCode::InvalidParameter);
    assert!(tree.is_empty());
    assert_eq!(tree.id_limit(), 0);
}

#[test]
fn relocate_moves_a_point_between_leaves() {
    let (points, bound) = sampled(300, 1.0, 4);
    let mut tree = inserted(&points, params(bound, 8));
    let before = points.point(17).expect("point exists");
    let angle = (before.angle + 3.0) % TAU;

    tree.relocate(17, angle, 0.1).expect("relocation must succeed");

    assert_eq!(tree.len(), 300);
    assert_eq!(tree.point(17).map(|p| (p.angle, p.radius)), Some((angle, 0.1)));
    tree.validate().expect("tree must be valid");
}

#[rstest]
#[case::absent(99, 1.0, 0.5, GeneratorErrorCode::UnknownPoint)]
#[case::beyond_bound(3, 1.0, 0.95, GeneratorErrorCode::OutsideDisk)]
#[case::bad_angle(3, -1.0, 0.5, GeneratorErrorCode::InvalidAngle)]
fn failed_relocation_leaves_the_tree_unchanged(
    #[case] id: usize,
    #[case] angle: f64,
    #[case] radius: f64,
    #[case] code: GeneratorErrorCode,
) {
    let mut tree = Quadtree::new(params(0.9, 4));
    for id in 0..6 {
        tree.insert(id, id as f64, 0.5).expect("insert must succeed");
    }

    let err = tree
        .relocate(id, angle, radius)
        .expect_err("relocation must fail");

    assert_eq!(err.code(), code);
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.point(3).map(|p| p.angle), Some(3.0));
    tree.validate().expect("tree must be valid");
}
