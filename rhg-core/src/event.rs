//! Typed graph mutation events.
//!
//! Generators never touch a graph directly; they emit an ordered stream of
//! [`GraphEvent`]s that a [`crate::GraphStore`] replays. Edge events carry
//! their endpoints ordered `u < v`.

use std::fmt;

use crate::PointId;

/// Discriminant of a [`GraphEvent`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum GraphEventKind {
    /// A node joins the graph.
    NodeAddition,
    /// An edge appears.
    EdgeAddition,
    /// An edge disappears.
    EdgeRemoval,
    /// A round of changes is complete.
    TimeStep,
}

/// One mutation of an evolving graph.
///
/// Events order by kind, then endpoints, so sorting two streams compares them
/// as multisets.
///
/// # Examples
/// ```
/// use rhg_core::{GraphEvent, GraphEventKind};
///
/// let event = GraphEvent::EdgeAddition { u: 1, v: 4 };
/// assert_eq!(event.kind(), GraphEventKind::EdgeAddition);
/// assert_eq!(event.to_string(), "ae(1,4)");
/// assert!(GraphEvent::NodeAddition { u: 9 } < event);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum GraphEvent {
    /// Node `u` is added; stores assign identities densely from zero.
    NodeAddition {
        /// Identity of the new node.
        u: PointId,
    },
    /// Edge `{u, v}` is added.
    EdgeAddition {
        /// Smaller endpoint.
        u: PointId,
        /// Larger endpoint.
        v: PointId,
    },
    /// Edge `{u, v}` is removed.
    EdgeRemoval {
        /// Smaller endpoint.
        u: PointId,
        /// Larger endpoint.
        v: PointId,
    },
    /// Marks the end of a round.
    TimeStep,
}

impl GraphEvent {
    /// Kind of this event.
    #[must_use]
    pub const fn kind(&self) -> GraphEventKind {
        match self {
            Self::NodeAddition { .. } => GraphEventKind::NodeAddition,
            Self::EdgeAddition { .. } => GraphEventKind::EdgeAddition,
            Self::EdgeRemoval { .. } => GraphEventKind::EdgeRemoval,
            Self::TimeStep => GraphEventKind::TimeStep,
        }
    }

    /// Endpoints of an edge event.
    #[must_use]
    pub const fn endpoints(&self) -> Option<(PointId, PointId)> {
        match *self {
            Self::EdgeAddition { u, v } | Self::EdgeRemoval { u, v } => Some((u, v)),
            Self::NodeAddition { .. } | Self::TimeStep => None,
        }
    }
}

impl fmt::Display for GraphEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeAddition { u } => write!(f, "an({u})"),
            Self::EdgeAddition { u, v } => write!(f, "ae({u},{v})"),
            Self::EdgeRemoval { u, v } => write!(f, "re({u},{v})"),
            Self::TimeStep => f.write_str("st"),
        }
    }
}
