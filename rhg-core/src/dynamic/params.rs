//! Parameters of the dynamic hyperbolic model.

use crate::{
    error::{GeneratorError, Result},
    geometry::area_to_radius,
};

const DEFAULT_CAPACITY: usize = 64;

/// Disk size, threshold schedule and movement policy of a
/// [`super::DynamicHyperbolicGenerator`].
///
/// The active threshold of round `t` is `(initial_factor + t ·
/// factor_growth) · disk_radius`, never below zero. Each round, every point
/// moves with probability `moved_share` by at most `move_distance`.
///
/// # Examples
/// ```
/// use rhg_core::DynamicParams;
///
/// let params = DynamicParams::for_nodes(1_000, 1.0)?
///     .with_initial_factor(0.5)
///     .with_factor_growth(0.025);
/// assert_eq!(params.initial_factor(), 0.5);
/// assert!(params.validate().is_ok());
/// assert!(params.with_moved_share(1.5).validate().is_err());
/// # Ok::<(), rhg_core::GeneratorError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicParams {
    disk_radius: f64,
    initial_factor: f64,
    factor_growth: f64,
    moved_share: f64,
    move_distance: f64,
    dispersion: f64,
    capacity: usize,
}

impl DynamicParams {
    /// Parameters for a disk of native radius `disk_radius`, with a static
    /// threshold equal to the radius and no movement.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when `disk_radius` is
    /// negative or not finite.
    pub fn new(disk_radius: f64) -> Result<Self> {
        if !(disk_radius >= 0.0) || !disk_radius.is_finite() {
            return Err(GeneratorError::InvalidParameter {
                name: "disk_radius",
                reason: format!("disk radius must be finite and non-negative (got {disk_radius})"),
            });
        }
        Ok(Self {
            disk_radius,
            initial_factor: 1.0,
            factor_growth: 0.0,
            moved_share: 0.0,
            move_distance: 0.0,
            dispersion: 1.0,
            capacity: DEFAULT_CAPACITY,
        })
    }

    /// Parameters for `nodes` points in the disk of radius
    /// `stretch · area_to_radius(nodes)`.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when `stretch` is not
    /// finite and positive.
    pub fn for_nodes(nodes: usize, stretch: f64) -> Result<Self> {
        if !(stretch > 0.0) || !stretch.is_finite() {
            return Err(GeneratorError::InvalidParameter {
                name: "stretch",
                reason: format!("stretch must be finite and positive (got {stretch})"),
            });
        }
        Self::new(stretch * area_to_radius(nodes as f64))
    }

    /// Fraction of the disk radius used as the threshold before any round.
    #[must_use]
    pub fn with_initial_factor(mut self, factor: f64) -> Self {
        self.initial_factor = factor;
        self
    }

    /// Amount added to the factor every round; may be negative.
    #[must_use]
    pub fn with_factor_growth(mut self, growth: f64) -> Self {
        self.factor_growth = growth;
        self
    }

    /// Probability that a point moves in a given round.
    #[must_use]
    pub fn with_moved_share(mut self, share: f64) -> Self {
        self.moved_share = share;
        self
    }

    /// Largest radial and angular step of a moving point.
    #[must_use]
    pub fn with_move_distance(mut self, distance: f64) -> Self {
        self.move_distance = distance;
        self
    }

    /// Radial dispersion `α` the movement preserves.
    #[must_use]
    pub fn with_dispersion(mut self, dispersion: f64) -> Self {
        self.dispersion = dispersion;
        self
    }

    /// Quadtree leaf capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Checks the values set through the builder methods.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] naming the first value
    /// that is not finite, a negative initial factor or move distance, a
    /// moved share outside `[0, 1]`, or a dispersion that is not positive.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("initial_factor", self.initial_factor, self.initial_factor >= 0.0),
            ("factor_growth", self.factor_growth, true),
            ("moved_share", self.moved_share, (0.0..=1.0).contains(&self.moved_share)),
            ("move_distance", self.move_distance, self.move_distance >= 0.0),
            ("dispersion", self.dispersion, self.dispersion > 0.0),
        ];
        match checks
            .into_iter()
            .find(|&(_, value, in_range)| !in_range || !value.is_finite())
        {
            Some((name, value, _)) => Err(GeneratorError::InvalidParameter {
                name,
                reason: format!("value {value} is out of range"),
            }),
            None => Ok(()),
        }
    }

    /// Native disk radius `R`.
    #[must_use]
    pub fn disk_radius(&self) -> f64 {
        self.disk_radius
    }

    /// Threshold factor before the first round.
    #[must_use]
    pub fn initial_factor(&self) -> f64 {
        self.initial_factor
    }

    /// Per-round factor increment.
    #[must_use]
    pub fn factor_growth(&self) -> f64 {
        self.factor_growth
    }

    /// Per-round movement probability.
    #[must_use]
    pub fn moved_share(&self) -> f64 {
        self.moved_share
    }

    /// Largest movement step.
    #[must_use]
    pub fn move_distance(&self) -> f64 {
        self.move_distance
    }

    /// Radial dispersion.
    #[must_use]
    pub fn dispersion(&self) -> f64 {
        self.dispersion
    }

    /// Quadtree leaf capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
