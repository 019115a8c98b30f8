//! Parameters of the hyperbolic random graph model.

use crate::{
    error::{GeneratorError, Result},
    geometry::exponent_to_dispersion,
};

const DEFAULT_SEED: u64 = 0x0DD_C0FFEE;
const DEFAULT_CAPACITY: usize = 64;

/// Node count, target average degree and power-law exponent of a hyperbolic
/// random graph, plus the seed and index capacity used to realise it.
#[derive(Clone, Debug, PartialEq)]
pub struct HyperbolicParams {
    nodes: usize,
    average_degree: f64,
    exponent: f64,
    seed: u64,
    capacity: usize,
}

impl HyperbolicParams {
    /// Creates a parameter set.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when `average_degree` is
    /// not finite and positive or `exponent` is not finite and greater than
    /// two.
    ///
    /// # Examples
    /// ```
    /// use rhg_core::HyperbolicParams;
    ///
    /// let params = HyperbolicParams::new(1_000, 8.0, 3.0)?.with_seed(7);
    /// assert_eq!(params.dispersion(), 1.0);
    /// assert!(HyperbolicParams::new(1_000, 8.0, 2.0).is_err());
    /// # Ok::<(), rhg_core::GeneratorError>(())
    /// ```
    pub fn new(nodes: usize, average_degree: f64, exponent: f64) -> Result<Self> {
        if !(average_degree > 0.0) || !average_degree.is_finite() {
            return Err(GeneratorError::InvalidParameter {
                name: "average_degree",
                reason: format!("average degree must be finite and positive (got {average_degree})"),
            });
        }
        if !(exponent > 2.0) || !exponent.is_finite() {
            return Err(GeneratorError::InvalidParameter {
                name: "exponent",
                reason: format!("power-law exponent must be finite and above 2 (got {exponent})"),
            });
        }
        Ok(Self {
            nodes,
            average_degree,
            exponent,
            seed: DEFAULT_SEED,
            capacity: DEFAULT_CAPACITY,
        })
    }

    /// Seeds the point sampler.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the quadtree leaf capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Number of nodes.
    #[must_use]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Target average degree.
    #[must_use]
    pub fn average_degree(&self) -> f64 {
        self.average_degree
    }

    /// Power-law exponent of the degree distribution.
    #[must_use]
    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Radial dispersion `α = (γ − 1) / 2`.
    #[must_use]
    pub fn dispersion(&self) -> f64 {
        exponent_to_dispersion(self.exponent)
    }

    /// Sampler seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Quadtree leaf capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
