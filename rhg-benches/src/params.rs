//! Benchmark parameter types, rendered as Criterion benchmark ids.

use std::fmt;

/// Parameters for a quadtree benchmark run.
#[derive(Clone, Debug)]
pub struct QuadtreeBenchParams {
    /// Number of points in the index.
    pub point_count: usize,
    /// Leaf capacity.
    pub capacity: usize,
}

impl fmt::Display for QuadtreeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},cap={}", self.point_count, self.capacity)
    }
}

/// Parameters for a static generation benchmark run.
#[derive(Clone, Debug)]
pub struct GeneratorBenchParams {
    /// Number of nodes.
    pub point_count: usize,
    /// Target average degree.
    pub average_degree: f64,
    /// Power-law exponent.
    pub exponent: f64,
}

impl fmt::Display for GeneratorBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},k={},gamma={}",
            self.point_count, self.average_degree, self.exponent
        )
    }
}

/// Parameters for a dynamic round benchmark run.
#[derive(Clone, Debug)]
pub struct DynamicBenchParams {
    /// Number of nodes.
    pub point_count: usize,
    /// Probability that a node moves per round.
    pub moved_share: f64,
}

impl fmt::Display for DynamicBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},moved={}", self.point_count, self.moved_share)
    }
}
