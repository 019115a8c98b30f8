//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of `.expect()`.

use rhg_core::GeneratorError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Sampling, indexing or generation rejected its inputs.
    #[error("generator setup failed: {0}")]
    Generator(#[from] GeneratorError),
}
