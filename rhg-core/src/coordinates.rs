//! Point coordinates in the Poincaré disk.

use std::f64::consts::TAU;

use crate::{
    PointId,
    error::{GeneratorError, Result},
};

/// A point given by its angle in `[0, 2π)` and its Euclidean radius in the
/// Poincaré disk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarPoint {
    /// Angular coordinate.
    pub angle: f64,
    /// Euclidean (Poincaré) radial coordinate.
    pub radius: f64,
}

impl PolarPoint {
    /// Creates a point without validation.
    #[must_use]
    pub const fn new(angle: f64, radius: f64) -> Self {
        Self { angle, radius }
    }
}

/// Ordered angle and radius sequences, one entry per point identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Coordinates {
    angles: Vec<f64>,
    radii: Vec<f64>,
}

impl Coordinates {
    /// Pairs the two sequences.
    ///
    /// # Errors
    /// Returns [`GeneratorError::LengthMismatch`] when the lengths differ.
    pub fn new(angles: Vec<f64>, radii: Vec<f64>) -> Result<Self> {
        if angles.len() != radii.len() {
            return Err(GeneratorError::LengthMismatch {
                angles: angles.len(),
                radii: radii.len(),
            });
        }
        Ok(Self { angles, radii })
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// Whether there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Angles ordered by identity.
    #[must_use]
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Radii ordered by identity.
    #[must_use]
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Coordinates of point `id`, if present.
    #[must_use]
    pub fn point(&self, id: PointId) -> Option<PolarPoint> {
        Some(PolarPoint::new(*self.angles.get(id)?, *self.radii.get(id)?))
    }

    /// Iterates over points in identity order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = PolarPoint> + '_ {
        self.angles
            .iter()
            .zip(&self.radii)
            .map(|(&angle, &radius)| PolarPoint::new(angle, radius))
    }

    /// Splits into `(angles, radii)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.angles, self.radii)
    }

    /// Checks every point against the disk of Euclidean radius `bound`.
    ///
    /// # Errors
    /// Returns the first [`GeneratorError::InvalidAngle`] or
    /// [`GeneratorError::OutsideDisk`] encountered in identity order.
    pub fn validate(&self, bound: f64) -> Result<()> {
        self.iter()
            .enumerate()
            .try_for_each(|(id, point)| validate_point(id, point, bound))
    }
}

impl FromIterator<PolarPoint> for Coordinates {
    fn from_iter<I: IntoIterator<Item = PolarPoint>>(iter: I) -> Self {
        let (angles, radii) = iter.into_iter().map(|p| (p.angle, p.radius)).unzip();
        Self { angles, radii }
    }
}

/// Rejects angles outside `[0, 2π)` and radii outside `[0, bound]`,
/// including non-finite values.
///
/// # Errors
/// Returns [`GeneratorError::InvalidAngle`] or [`GeneratorError::OutsideDisk`].
pub(crate) fn validate_point(id: PointId, point: PolarPoint, bound: f64) -> Result<()> {
    if !(0.0..TAU).contains(&point.angle) {
        return Err(GeneratorError::InvalidAngle {
            point: id,
            angle: point.angle,
        });
    }
    if !(0.0..=bound).contains(&point.radius) {
        return Err(GeneratorError::OutsideDisk {
            point: id,
            radius: point.radius,
            bound,
        });
    }
    Ok(())
}
