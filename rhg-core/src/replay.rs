//! Replaying event streams into mutable graph stores.
//!
//! [`GraphStore`] is the contract an external graph representation fulfils;
//! [`GraphUpdater`] applies a [`GraphEvent`] stream to one and surfaces every
//! contradiction as a [`ReplayError`]. [`AdjacencyGraph`] is a small reference
//! store used by tests and the command line.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::{
    PointId,
    error::ReplayError,
    event::GraphEvent,
    generator::{Edge, GeneratedGraph},
};

/// Mutable undirected graph that can consume a [`GraphEvent`] stream.
pub trait GraphStore {
    /// Adds a node and returns its identity.
    fn add_node(&mut self) -> PointId;

    /// Identity the next [`GraphStore::add_node`] call will assign.
    fn upper_node_id_bound(&self) -> PointId;

    /// Whether `u` is a node of the graph.
    fn has_node(&self, u: PointId) -> bool;

    /// Whether edge `{u, v}` is present.
    fn has_edge(&self, u: PointId, v: PointId) -> bool;

    /// Adds edge `{u, v}`; callers guarantee it is absent.
    fn add_edge(&mut self, u: PointId, v: PointId);

    /// Removes edge `{u, v}`; callers guarantee it is present.
    fn remove_edge(&mut self, u: PointId, v: PointId);

    /// Notified at the end of every round.
    fn time_step(&mut self) {}
}

/// Applies events to a borrowed [`GraphStore`] in stream order.
///
/// # Examples
/// ```
/// use rhg_core::{AdjacencyGraph, GraphEvent, GraphUpdater, ReplayError};
///
/// let mut graph = AdjacencyGraph::default();
/// let mut updater = GraphUpdater::new(&mut graph);
/// updater.update(&[
///     GraphEvent::NodeAddition { u: 0 },
///     GraphEvent::NodeAddition { u: 1 },
///     GraphEvent::EdgeAddition { u: 0, v: 1 },
///     GraphEvent::TimeStep,
/// ])?;
/// assert_eq!(updater.time_steps(), 1);
/// assert_eq!(graph.number_of_edges(), 1);
/// # Ok::<(), ReplayError>(())
/// ```
#[derive(Debug)]
pub struct GraphUpdater<'g, G: GraphStore + ?Sized> {
    graph: &'g mut G,
    time_steps: usize,
}

impl<'g, G: GraphStore + ?Sized> GraphUpdater<'g, G> {
    /// Wraps `graph`.
    pub fn new(graph: &'g mut G) -> Self {
        Self {
            graph,
            time_steps: 0,
        }
    }

    /// Number of [`GraphEvent::TimeStep`] events applied so far.
    #[must_use]
    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// Applies every event of `events` in order, stopping at the first
    /// contradiction. Events before the failing one stay applied.
    ///
    /// # Errors
    /// Returns the [`ReplayError`] of the first event the store rejects.
    pub fn update<'e, I>(&mut self, events: I) -> Result<(), ReplayError>
    where
        I: IntoIterator<Item = &'e GraphEvent>,
    {
        let mut applied = 0_usize;
        for event in events {
            self.apply(*event).inspect_err(|err| {
                warn!(%event, code = %err.code(), applied, "event stream rejected");
            })?;
            applied += 1;
        }
        debug!(applied, time_steps = self.time_steps, "event stream applied");
        Ok(())
    }

    /// Applies a single event.
    ///
    /// # Errors
    /// Returns [`ReplayError::NodeIdMismatch`] when a node addition announces
    /// an identity other than the next one, [`ReplayError::SelfLoop`] or
    /// [`ReplayError::UnknownNode`] for malformed edge events, and
    /// [`ReplayError::DuplicateEdge`] or [`ReplayError::MissingEdge`] when an
    /// edge event contradicts the current graph.
    pub fn apply(&mut self, event: GraphEvent) -> Result<(), ReplayError> {
        match event {
            GraphEvent::NodeAddition { u } => {
                let assigned = self.graph.upper_node_id_bound();
                if assigned != u {
                    return Err(ReplayError::NodeIdMismatch {
                        announced: u,
                        assigned,
                    });
                }
                self.graph.add_node();
            }
            GraphEvent::EdgeAddition { u, v } => {
                self.check_endpoints(u, v)?;
                if self.graph.has_edge(u, v) {
                    return Err(ReplayError::DuplicateEdge { u, v });
                }
                self.graph.add_edge(u, v);
            }
            GraphEvent::EdgeRemoval { u, v } => {
                self.check_endpoints(u, v)?;
                if !self.graph.has_edge(u, v) {
                    return Err(ReplayError::MissingEdge { u, v });
                }
                self.graph.remove_edge(u, v);
            }
            GraphEvent::TimeStep => {
                self.graph.time_step();
                self.time_steps += 1;
            }
        }
        Ok(())
    }

    fn check_endpoints(&self, u: PointId, v: PointId) -> Result<(), ReplayError> {
        if u == v {
            return Err(ReplayError::SelfLoop { node: u });
        }
        match [u, v].into_iter().find(|&node| !self.graph.has_node(node)) {
            Some(node) => Err(ReplayError::UnknownNode { node }),
            None => Ok(()),
        }
    }
}

/// Undirected graph stored as sorted adjacency sets.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AdjacencyGraph {
    adjacency: Vec<BTreeSet<PointId>>,
    edge_count: usize,
    time_steps: usize,
}

impl AdjacencyGraph {
    /// Graph with `nodes` isolated nodes.
    #[must_use]
    pub fn with_nodes(nodes: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); nodes],
            ..Self::default()
        }
    }

    /// Materialises a generated graph.
    #[must_use]
    pub fn from_generated(graph: &GeneratedGraph) -> Self {
        let mut store = Self::with_nodes(graph.node_count());
        for edge in graph.edges() {
            store.add_edge(edge.u(), edge.v());
        }
        store
    }

    /// Number of nodes.
    #[must_use]
    pub fn number_of_nodes(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        self.edge_count
    }

    /// Number of time steps seen.
    #[must_use]
    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// Degree of `u`, or `None` for an unknown node.
    #[must_use]
    pub fn degree(&self, u: PointId) -> Option<usize> {
        self.adjacency.get(u).map(BTreeSet::len)
    }

    /// Neighbours of `u` in ascending order.
    pub fn neighbours(&self, u: PointId) -> impl Iterator<Item = PointId> + '_ {
        self.adjacency.get(u).into_iter().flatten().copied()
    }

    /// Edges in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, neighbours)| {
            neighbours.range(u + 1..).map(move |&v| Edge::new(u, v))
        })
    }

    /// Whether every edge is stored from both endpoints, no node links to
    /// itself or to an unknown node, and the edge counter agrees.
    #[must_use]
    pub fn check_consistency(&self) -> bool {
        let mut endpoints = 0_usize;
        for (u, neighbours) in self.adjacency.iter().enumerate() {
            for &v in neighbours {
                let mirrored = self.adjacency.get(v).is_some_and(|back| back.contains(&u));
                if v == u || !mirrored {
                    return false;
                }
            }
            endpoints += neighbours.len();
        }
        endpoints == 2 * self.edge_count
    }
}

impl GraphStore for AdjacencyGraph {
    fn add_node(&mut self) -> PointId {
        self.adjacency.push(BTreeSet::new());
        self.adjacency.len() - 1
    }

    fn upper_node_id_bound(&self) -> PointId {
        self.adjacency.len()
    }

    fn has_node(&self, u: PointId) -> bool {
        u < self.adjacency.len()
    }

    fn has_edge(&self, u: PointId, v: PointId) -> bool {
        self.adjacency.get(u).is_some_and(|neighbours| neighbours.contains(&v))
    }

    fn add_edge(&mut self, u: PointId, v: PointId) {
        let inserted = self
            .adjacency
            .get_mut(u)
            .is_some_and(|neighbours| neighbours.insert(v));
        if let Some(neighbours) = self.adjacency.get_mut(v) {
            neighbours.insert(u);
        }
        if inserted {
            self.edge_count += 1;
        }
    }

    fn remove_edge(&mut self, u: PointId, v: PointId) {
        let removed = self
            .adjacency
            .get_mut(u)
            .is_some_and(|neighbours| neighbours.remove(&v));
        if let Some(neighbours) = self.adjacency.get_mut(v) {
            neighbours.remove(&u);
        }
        if removed {
            self.edge_count -= 1;
        }
    }

    fn time_step(&mut self) {
        self.time_steps += 1;
    }
}

#[cfg(test)]
mod tests;
