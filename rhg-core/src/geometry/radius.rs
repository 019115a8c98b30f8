//! Radius conversions and the degree statistics of the threshold model.

use std::f64::consts::{PI, TAU};

use crate::error::{GeneratorError, Result};

const MAX_BISECTION_STEPS: usize = 200;
const DEGREE_TOLERANCE: f64 = 1.0e-5;

/// Native radius of a hyperbolic disk with the given area (curvature −1).
///
/// # Examples
/// ```
/// use rhg_core::geometry::area_to_radius;
///
/// assert_eq!(area_to_radius(0.0), 0.0);
/// assert!(area_to_radius(1000.0) > area_to_radius(100.0));
/// ```
#[must_use]
pub fn area_to_radius(area: f64) -> f64 {
    (area / TAU + 1.0).acosh()
}

/// Euclidean radius in the Poincaré disk of a native hyperbolic radius.
#[must_use]
pub fn radius_to_euclidean(radius: f64) -> f64 {
    (radius * 0.5).tanh()
}

/// Native hyperbolic radius of a Euclidean Poincaré radius. Radii on or beyond
/// the unit circle map to `f64::INFINITY`.
#[must_use]
pub fn euclidean_to_radius(radius: f64) -> f64 {
    if radius >= 1.0 {
        return f64::INFINITY;
    }
    ((1.0 + radius) / (1.0 - radius)).ln()
}

/// Radial dispersion `α` matching a power-law degree exponent `γ = 2α + 1`.
#[must_use]
pub fn exponent_to_dispersion(exponent: f64) -> f64 {
    (exponent - 1.0) * 0.5
}

/// Expected average degree of a threshold hyperbolic random graph on `nodes`
/// points with dispersion `alpha` inside a disk of native radius `radius`,
/// when the connection threshold equals the disk radius.
#[must_use]
pub fn expected_degree(nodes: f64, alpha: f64, radius: f64) -> f64 {
    let gamma = 2.0 * alpha + 1.0;
    let xi = (gamma - 1.0) / (gamma - 2.0);
    let inverse = alpha.recip();
    let first = (-radius * 0.5).exp();
    let second = (-alpha * radius).exp()
        * (alpha
            * (radius * 0.5)
            * ((PI / 4.0) * inverse * inverse - (PI - 1.0) * inverse + (PI - 2.0))
            - 1.0);
    (2.0 / PI) * xi * xi * nodes * (first + second)
}

/// Expected number of edges for `nodes` points sampled with `α = 1` in a
/// disk stretched by `stretch`, connected at threshold equal to the disk
/// radius.
#[must_use]
pub fn expected_number_of_edges(nodes: usize, stretch: f64) -> f64 {
    let count = nodes as f64;
    let radius = stretch * area_to_radius(count);
    expected_degree(count, 1.0, radius) * count * 0.5
}

/// Disk radius at which `nodes` points with dispersion `alpha` reach the
/// requested average degree.
///
/// # Errors
/// Returns [`GeneratorError::InvalidParameter`] for `alpha <= 0.5` (the
/// degree exponent must exceed two) or a non-positive degree, and
/// [`GeneratorError::UnreachableDegree`] when no radius in the search bracket
/// produces the degree, which happens once `average_degree` approaches the
/// node count.
pub fn target_radius(nodes: usize, average_degree: f64, alpha: f64) -> Result<f64> {
    if !(alpha > 0.5) || !alpha.is_finite() {
        return Err(GeneratorError::InvalidParameter {
            name: "dispersion",
            reason: format!("dispersion must be finite and greater than 0.5 (got {alpha})"),
        });
    }
    if !(average_degree > 0.0) || !average_degree.is_finite() {
        return Err(GeneratorError::InvalidParameter {
            name: "average_degree",
            reason: format!("average degree must be finite and positive (got {average_degree})"),
        });
    }
    let unreachable = || GeneratorError::UnreachableDegree {
        nodes,
        average_degree,
        exponent: 2.0 * alpha + 1.0,
    };
    let count = nodes as f64;
    if average_degree + 1.0 >= count {
        return Err(unreachable());
    }

    let gamma = 2.0 * alpha + 1.0;
    let xi_inverse = (gamma - 2.0) / (gamma - 1.0);
    let scale = average_degree * (PI / 2.0) * xi_inverse * xi_inverse;
    let guess = 2.0 * (count / scale).ln();
    if !(guess > 0.0) {
        return Err(unreachable());
    }
    let mut lower = guess * 0.5;
    let mut upper = guess * 2.0;
    if expected_degree(count, alpha, lower) <= average_degree
        || expected_degree(count, alpha, upper) >= average_degree
    {
        return Err(unreachable());
    }

    for _ in 0..MAX_BISECTION_STEPS {
        let middle = (lower + upper) * 0.5;
        let degree = expected_degree(count, alpha, middle);
        if (degree - average_degree).abs() < DEGREE_TOLERANCE {
            return Ok(middle);
        }
        if degree < average_degree {
            upper = middle;
        } else {
            lower = middle;
        }
    }
    Ok((lower + upper) * 0.5)
}
