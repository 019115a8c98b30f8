//! Distance predicates on the Poincaré disk.

/// Hyperbolic distance between two points given in Poincaré polar coordinates.
///
/// The squared Euclidean separation is taken from the law of cosines in its
/// half-angle form, which cannot go negative, and the `acosh` argument is
/// clamped to `[1, ∞)`. A point on or beyond the unit circle is infinitely far
/// from everything, so the function returns `f64::INFINITY` rather than NaN.
///
/// # Examples
/// ```
/// use rhg_core::geometry::hyperbolic_distance;
///
/// assert_eq!(hyperbolic_distance(0.3, 0.5, 0.3, 0.5), 0.0);
/// let d = hyperbolic_distance(0.0, 0.0, 1.0, 0.5);
/// assert!((d - 2.0 * 0.5_f64.atanh()).abs() < 1e-12);
/// ```
#[must_use]
pub fn hyperbolic_distance(angle1: f64, radius1: f64, angle2: f64, radius2: f64) -> f64 {
    let half_sine = ((angle1 - angle2) * 0.5).sin();
    let radial = radius1 - radius2;
    let squared = (radial * radial + 4.0 * radius1 * radius2 * half_sine * half_sine).max(0.0);
    let denominator = (1.0 - radius1) * (1.0 + radius1) * (1.0 - radius2) * (1.0 + radius2);
    if !(denominator > 0.0) {
        return f64::INFINITY;
    }
    let argument = (1.0 + 2.0 * squared / denominator).max(1.0);
    argument.acosh()
}

/// Hyperbolic distance between two points given in native polar coordinates
/// (angle, hyperbolic radius), using the hyperbolic law of cosines.
///
/// `cos Δφ` is clamped to `[-1, 1]` and the `acosh` argument to `[1, ∞)` so
/// rounding never produces NaN.
///
/// # Examples
/// ```
/// use rhg_core::geometry::native_distance;
///
/// let d = native_distance(0.0, 2.0, std::f64::consts::PI, 3.0);
/// assert!((d - 5.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn native_distance(angle1: f64, radius1: f64, angle2: f64, radius2: f64) -> f64 {
    let cos_delta = (angle1 - angle2).cos().clamp(-1.0, 1.0);
    let argument = radius1.cosh() * radius2.cosh() - radius1.sinh() * radius2.sinh() * cos_delta;
    argument.max(1.0).acosh()
}

/// Euclidean circle coinciding with a hyperbolic circle in the Poincaré disk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EuclideanCircle {
    /// Cartesian x coordinate of the centre.
    pub x: f64,
    /// Cartesian y coordinate of the centre.
    pub y: f64,
    /// Euclidean radius.
    pub radius: f64,
}

/// Returns the Euclidean circle that bounds every point within hyperbolic
/// distance `threshold` of the Poincaré point `(angle, radius)`.
///
/// Both extremes of the hyperbolic circle lie on the ray through the origin
/// and the centre, at native radii `d - threshold` and `d + threshold`; their
/// Poincaré images are the ends of the Euclidean diameter.
#[must_use]
pub fn euclidean_circle(angle: f64, radius: f64, threshold: f64) -> EuclideanCircle {
    let native = super::euclidean_to_radius(radius);
    let near = ((native - threshold) * 0.5).tanh();
    let far = ((native + threshold) * 0.5).tanh();
    let centre = (near + far) * 0.5;
    EuclideanCircle {
        x: centre * angle.cos(),
        y: centre * angle.sin(),
        radius: (far - near) * 0.5,
    }
}
