//! Benchmark support crate for rhg.
//!
//! Provides seeded point sets and parameter types used by the Criterion
//! benchmarks for quadtree construction and queries, static generation and
//! dynamic rounds.

pub mod error;
pub mod params;
pub mod source;
