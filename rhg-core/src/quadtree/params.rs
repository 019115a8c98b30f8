//! Parameter handling for the polar quadtree.

use crate::error::{GeneratorError, Result};

const DEFAULT_CAPACITY: usize = 64;
const MIN_DISPERSION: f64 = 0.05;
const MAX_DISPERSION: f64 = 8.0;

/// Configuration of a [`crate::Quadtree`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadtreeParams {
    max_radius: f64,
    capacity: usize,
    dispersion: f64,
}

impl QuadtreeParams {
    /// Creates parameters for a disk of Euclidean radius `max_radius`.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] unless
    /// `0 <= max_radius < 1`.
    ///
    /// # Examples
    /// ```
    /// use rhg_core::QuadtreeParams;
    ///
    /// let params = QuadtreeParams::new(0.9)?.with_capacity(16);
    /// assert_eq!(params.capacity(), 16);
    /// assert!(QuadtreeParams::new(1.0).is_err());
    /// # Ok::<(), rhg_core::GeneratorError>(())
    /// ```
    pub fn new(max_radius: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&max_radius) {
            return Err(GeneratorError::InvalidParameter {
                name: "max_radius",
                reason: format!("disk radius must lie in [0, 1) (got {max_radius})"),
            });
        }
        Ok(Self {
            max_radius,
            capacity: DEFAULT_CAPACITY,
            dispersion: 1.0,
        })
    }

    /// Sets the number of points a leaf holds before it splits.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Sets the radial dispersion used to balance ring splits. Only the shape
    /// of the tree depends on it; query results do not.
    #[must_use]
    pub fn with_dispersion(mut self, dispersion: f64) -> Self {
        self.dispersion = if dispersion.is_nan() {
            1.0
        } else {
            dispersion.clamp(MIN_DISPERSION, MAX_DISPERSION)
        };
        self
    }

    /// Euclidean radius of the indexed disk.
    #[must_use]
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Leaf split threshold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Dispersion used for ring splits.
    #[must_use]
    pub fn dispersion(&self) -> f64 {
        self.dispersion
    }
}
