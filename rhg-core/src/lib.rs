//! Random hyperbolic graph generation.
//!
//! Points are sampled in the Poincaré disk, indexed by a polar [`Quadtree`],
//! and connected whenever their hyperbolic distance falls below a threshold.
//! [`HyperbolicGenerator`] produces one such graph; [`DynamicHyperbolicGenerator`]
//! moves points and grows the threshold round by round, emitting the
//! difference between consecutive graphs as a [`GraphEvent`] stream that a
//! [`GraphStore`] replays through a [`GraphUpdater`].
#![cfg_attr(docsrs, feature(doc_cfg))]

mod coordinates;
mod dynamic;
mod error;
mod event;
mod generator;
pub mod geometry;
mod quadtree;
mod replay;

#[cfg(test)]
mod test_utils;

/// Stable handle of a point, dense from zero.
pub type PointId = usize;

pub use crate::{
    coordinates::{Coordinates, PolarPoint},
    dynamic::{DynamicGraphSource, DynamicHyperbolicGenerator, DynamicParams},
    error::{GeneratorError, GeneratorErrorCode, ReplayError, ReplayErrorCode, Result},
    event::{GraphEvent, GraphEventKind},
    generator::{
        Edge, GeneratedGraph, GraphGenerator, HyperbolicGenerator, HyperbolicParams,
        unit_disk_edges,
    },
    quadtree::{Quadtree, QuadtreeParams, QuadtreeViolation, RangeQuery},
    replay::{AdjacencyGraph, GraphStore, GraphUpdater},
};
