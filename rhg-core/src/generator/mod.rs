//! Static threshold graphs over hyperbolic point sets.

mod edges;
mod hyperbolic;
mod params;

pub use self::{
    edges::unit_disk_edges, hyperbolic::HyperbolicGenerator, params::HyperbolicParams,
};

use crate::{PointId, error::Result, event::GraphEvent};

/// Undirected edge with endpoints ordered `u < v`.
///
/// # Examples
/// ```
/// use rhg_core::Edge;
///
/// let edge = Edge::new(7, 3);
/// assert_eq!((edge.u(), edge.v()), (3, 7));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Edge {
    u: PointId,
    v: PointId,
}

impl Edge {
    /// Creates the edge joining `a` and `b`, ordering the endpoints.
    #[must_use]
    pub fn new(a: PointId, b: PointId) -> Self {
        Self {
            u: a.min(b),
            v: a.max(b),
        }
    }

    /// Smaller endpoint.
    #[must_use]
    pub fn u(&self) -> PointId {
        self.u
    }

    /// Larger endpoint.
    #[must_use]
    pub fn v(&self) -> PointId {
        self.v
    }
}

/// Graph produced by a [`GraphGenerator`]: node identities `0..node_count`
/// and a sorted, duplicate-free edge list.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedGraph {
    node_count: usize,
    edges: Vec<Edge>,
    threshold: f64,
}

impl GeneratedGraph {
    /// Wraps an edge list, sorting it and dropping duplicates.
    #[must_use]
    pub fn new(node_count: usize, mut edges: Vec<Edge>, threshold: f64) -> Self {
        edges.sort_unstable();
        edges.dedup();
        Self {
            node_count,
            edges,
            threshold,
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Edges in ascending order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Consumes the graph, returning its edges.
    #[must_use]
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Distance threshold the edges were drawn with.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Mean degree, zero for an empty graph.
    #[must_use]
    pub fn average_degree(&self) -> f64 {
        if self.node_count == 0 {
            return 0.0;
        }
        2.0 * self.edges.len() as f64 / self.node_count as f64
    }

    /// Degree of every node.
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.node_count];
        for edge in &self.edges {
            for end in [edge.u, edge.v] {
                if let Some(degree) = degrees.get_mut(end) {
                    *degree += 1;
                }
            }
        }
        degrees
    }

    /// Events that build this graph in an empty store: one node addition per
    /// node, one edge addition per edge, then a single time step.
    #[must_use]
    pub fn to_events(&self) -> Vec<GraphEvent> {
        let mut events = Vec::with_capacity(self.node_count + self.edges.len() + 1);
        events.extend((0..self.node_count).map(|u| GraphEvent::NodeAddition { u }));
        events.extend(
            self.edges
                .iter()
                .map(|edge| GraphEvent::EdgeAddition { u: edge.u, v: edge.v }),
        );
        events.push(GraphEvent::TimeStep);
        events
    }
}

/// A graph model that can produce a complete graph in one call.
pub trait GraphGenerator {
    /// Generates the graph.
    ///
    /// # Errors
    /// Returns a [`crate::GeneratorError`] when the model's inputs are invalid.
    fn generate(&self) -> Result<GeneratedGraph>;
}
