//! Test helpers shared across the rhg crates: a `tracing` layer that records
//! spans and events for assertions, and the environment-driven property-test
//! profile.

pub mod ci;
pub mod tracing;
