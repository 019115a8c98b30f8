//! Tests for event replay and the reference store.

use proptest::prelude::*;
use rstest::{fixture, rstest};

use super::*;
use crate::{ReplayErrorCode, test_utils::suite_proptest_config};

#[fixture]
fn triangle() -> AdjacencyGraph {
    let graph = GeneratedGraph::new(
        3,
        vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(0, 2)],
        1.0,
    );
    AdjacencyGraph::from_generated(&graph)
}

#[rstest]
fn generated_graphs_are_materialised(triangle: AdjacencyGraph) {
    assert_eq!(triangle.number_of_nodes(), 3);
    assert_eq!(triangle.number_of_edges(), 3);
    assert_eq!(triangle.degree(1), Some(2));
    assert_eq!(triangle.degree(3), None);
    assert_eq!(triangle.neighbours(0).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(
        triangle.edges().collect::<Vec<_>>(),
        vec![Edge::new(0, 1), Edge::new(0, 2), Edge::new(1, 2)]
    );
    assert!(triangle.check_consistency());
}

#[rstest]
fn replaying_generated_events_rebuilds_the_graph(triangle: AdjacencyGraph) {
    let graph = GeneratedGraph::new(3, triangle.edges().collect(), 1.0);
    let mut store = AdjacencyGraph::default();
    GraphUpdater::new(&mut store)
        .update(&graph.to_events())
        .expect("stream must replay");
    assert_eq!(store.edges().collect::<Vec<_>>(), graph.edges());
    assert_eq!(store.time_steps(), 1);
    assert!(store.check_consistency());
}

#[rstest]
#[case::double_add(GraphEvent::EdgeAddition { u: 0, v: 1 }, ReplayErrorCode::DuplicateEdge)]
#[case::unknown_node(GraphEvent::EdgeRemoval { u: 0, v: 3 }, ReplayErrorCode::UnknownNode)]
#[case::self_loop(GraphEvent::EdgeAddition { u: 2, v: 2 }, ReplayErrorCode::SelfLoop)]
#[case::skipped_id(GraphEvent::NodeAddition { u: 5 }, ReplayErrorCode::NodeIdMismatch)]
fn contradictions_are_surfaced(
    mut triangle: AdjacencyGraph,
    #[case] event: GraphEvent,
    #[case] expected: ReplayErrorCode,
) {
    let before = triangle.clone();
    let err = GraphUpdater::new(&mut triangle)
        .apply(event)
        .expect_err("event must be rejected");
    assert_eq!(err.code(), expected);
    assert_eq!(triangle, before);
}

#[test]
fn removing_an_absent_edge_is_a_violation() {
    let mut store = AdjacencyGraph::with_nodes(2);
    let err = GraphUpdater::new(&mut store)
        .apply(GraphEvent::EdgeRemoval { u: 0, v: 1 })
        .expect_err("edge is absent");
    assert_eq!(err, ReplayError::MissingEdge { u: 0, v: 1 });
}

#[test]
fn updates_stop_at_the_first_failure() {
    let mut store = AdjacencyGraph::with_nodes(3);
    let events = [
        GraphEvent::EdgeAddition { u: 0, v: 1 },
        GraphEvent::EdgeAddition { u: 0, v: 1 },
        GraphEvent::EdgeAddition { u: 1, v: 2 },
    ];
    let mut updater = GraphUpdater::new(&mut store);
    assert!(updater.update(&events).is_err());
    assert_eq!(store.number_of_edges(), 1);
    assert!(!store.has_edge(1, 2));
}

#[test]
fn inconsistent_adjacency_is_detected() {
    let mut store = AdjacencyGraph::with_nodes(2);
    store.add_edge(0, 1);
    if let Some(neighbours) = store.adjacency.get_mut(1) {
        neighbours.clear();
    }
    assert!(!store.check_consistency());
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn random_edge_toggles_keep_the_store_consistent(
        nodes in 2_usize..12,
        toggles in prop::collection::vec((0_usize..12, 0_usize..12), 0..64),
    ) {
        let mut store = AdjacencyGraph::with_nodes(nodes);
        let mut expected = BTreeSet::new();
        for (a, b) in toggles {
            let (a, b) = (a % nodes, b % nodes);
            if a == b {
                continue;
            }
            let edge = Edge::new(a, b);
            let event = if expected.remove(&edge) {
                GraphEvent::EdgeRemoval { u: edge.u(), v: edge.v() }
            } else {
                expected.insert(edge);
                GraphEvent::EdgeAddition { u: edge.u(), v: edge.v() }
            };
            GraphUpdater::new(&mut store)
                .apply(event)
                .map_err(|err| TestCaseError::fail(err.to_string()))?;
        }
        prop_assert!(store.check_consistency());
        prop_assert_eq!(store.edges().collect::<BTreeSet<_>>(), expected);
    }
}
