//! Random displacement of points that keeps the radial density stationary.

use rand::Rng;

use crate::geometry::normalize_angle;

/// Position of a point after one displacement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Displaced {
    pub(super) angle: f64,
    pub(super) native_radius: f64,
    pub(super) clamped: bool,
}

/// Movement policy of one generator.
#[derive(Clone, Copy, Debug)]
pub(super) struct Mover {
    pub(super) dispersion: f64,
    pub(super) disk_radius: f64,
    pub(super) distance: f64,
}

impl Mover {
    /// Moves the point at `(angle, native_radius)`.
    ///
    /// The radial step is uniform in `[-d, d]` in `cosh(αρ)` space, where the
    /// sampling density is uniform, so a moved point set keeps its radial
    /// distribution. The angular step is uniform in `[-d, d]` divided by
    /// `max(1, sinh ρ)`, which bounds the arc length travelled. Radii are
    /// clamped into `[0, R]`; angles wrap.
    pub(super) fn displace<R: Rng + ?Sized>(
        &self,
        angle: f64,
        native_radius: f64,
        rng: &mut R,
    ) -> Displaced {
        let radial_step = rng.gen_range(-self.distance..=self.distance);
        let angular_step = rng.gen_range(-self.distance..=self.distance);

        let ceiling = (self.dispersion * self.disk_radius).cosh();
        let stretched = (self.dispersion * native_radius).cosh() + radial_step;
        let clamped = !(1.0..=ceiling).contains(&stretched);
        let native_radius =
            (stretched.clamp(1.0, ceiling).acosh() / self.dispersion).clamp(0.0, self.disk_radius);
        let angle = normalize_angle(angle + angular_step / native_radius.sinh().max(1.0));
        Displaced {
            angle,
            native_radius,
            clamped,
        }
    }
}
