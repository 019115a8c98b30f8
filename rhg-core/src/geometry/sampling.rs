//! Seeded sampling of point sets following the hyperbolic radial density.

use std::f64::consts::TAU;

use rand::Rng;

use super::{area_to_radius, radius_to_euclidean};
use crate::{
    coordinates::Coordinates,
    error::{GeneratorError, Result},
};

/// Wraps a finite angle into `[0, 2π)`.
///
/// # Examples
/// ```
/// use std::f64::consts::PI;
/// use rhg_core::geometry::normalize_angle;
///
/// assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
/// assert_eq!(normalize_angle(2.0 * PI), 0.0);
/// ```
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Samples `nodes` points with dispersion `alpha` inside a disk of native
/// radius `disk_radius`. Angles are uniform; native radii follow the density
/// `α sinh(αρ) / (cosh(αR) − 1)`. Returned radii are Euclidean (Poincaré).
///
/// # Errors
/// Returns [`GeneratorError::InvalidParameter`] when `alpha` is not strictly
/// positive or `disk_radius` is negative or not finite.
pub fn sample_points_within<R: Rng + ?Sized>(
    nodes: usize,
    alpha: f64,
    disk_radius: f64,
    rng: &mut R,
) -> Result<Coordinates> {
    if !(alpha > 0.0) || !alpha.is_finite() {
        return Err(GeneratorError::InvalidParameter {
            name: "dispersion",
            reason: format!("dispersion must be finite and positive (got {alpha})"),
        });
    }
    if !(disk_radius >= 0.0) || !disk_radius.is_finite() {
        return Err(GeneratorError::InvalidParameter {
            name: "disk_radius",
            reason: format!("disk radius must be finite and non-negative (got {disk_radius})"),
        });
    }

    let bound = radius_to_euclidean(disk_radius);
    let spread = (alpha * disk_radius).cosh() - 1.0;
    let mut angles = Vec::with_capacity(nodes);
    let mut radii = Vec::with_capacity(nodes);
    for _ in 0..nodes {
        angles.push(normalize_angle(rng.gen_range(0.0..TAU)));
        let draw: f64 = rng.gen_range(0.0..1.0);
        let native = (draw * spread + 1.0).acosh() / alpha;
        radii.push(radius_to_euclidean(native).min(bound));
    }
    Coordinates::new(angles, radii)
}

/// Samples `nodes` points in the disk of native radius
/// `stretch · area_to_radius(nodes)`.
///
/// # Errors
/// Returns [`GeneratorError::InvalidParameter`] when `stretch` is not
/// strictly positive or `alpha` is invalid.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use rhg_core::geometry::{area_to_radius, radius_to_euclidean, sample_points};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let points = sample_points(100, 1.0, 1.0, &mut rng)?;
/// let bound = radius_to_euclidean(area_to_radius(100.0));
/// assert_eq!(points.len(), 100);
/// assert!(points.radii().iter().all(|&r| (0.0..=bound).contains(&r)));
/// # Ok::<(), rhg_core::GeneratorError>(())
/// ```
pub fn sample_points<R: Rng + ?Sized>(
    nodes: usize,
    alpha: f64,
    stretch: f64,
    rng: &mut R,
) -> Result<Coordinates> {
    if !(stretch > 0.0) || !stretch.is_finite() {
        return Err(GeneratorError::InvalidParameter {
            name: "stretch",
            reason: format!("stretch must be finite and positive (got {stretch})"),
        });
    }
    sample_points_within(nodes, alpha, stretch * area_to_radius(nodes as f64), rng)
}
