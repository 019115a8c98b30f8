//! Annular sectors of the Poincaré disk covered by quadtree nodes.

use std::f64::consts::TAU;

use crate::{
    coordinates::PolarPoint,
    geometry::{euclidean_to_radius, radius_to_euclidean},
};

const MIN_ANGULAR_SPAN: f64 = 1.0e-9;
const MIN_RADIAL_SPAN: f64 = 1.0e-15;

/// `[min_angle, max_angle) × [min_radius, max_radius)`, closed at
/// `max_radius` for regions touching the rim of the indexed disk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Region {
    pub(crate) min_angle: f64,
    pub(crate) max_angle: f64,
    pub(crate) min_radius: f64,
    pub(crate) max_radius: f64,
    pub(crate) outer_closed: bool,
}

impl Region {
    pub(crate) fn disk(max_radius: f64) -> Self {
        Self {
            min_angle: 0.0,
            max_angle: TAU,
            min_radius: 0.0,
            max_radius,
            outer_closed: true,
        }
    }

    pub(crate) fn contains(&self, point: PolarPoint) -> bool {
        let angular = self.min_angle <= point.angle && point.angle < self.max_angle;
        let inner = self.min_radius <= point.radius;
        let outer = point.radius < self.max_radius
            || (self.outer_closed && point.radius <= self.max_radius);
        angular && inner && outer
    }

    /// Cuts the region into `(low angle, low radius)`, `(low angle, high
    /// radius)`, `(high angle, low radius)` and `(high angle, high radius)`.
    /// The radial cut halves the hyperbolic area under `dispersion`.
    ///
    /// Returns `None` once the region is too thin to cut.
    pub(crate) fn quadrants(&self, dispersion: f64) -> Option<[Self; 4]> {
        let angular = self.max_angle - self.min_angle;
        let radial = self.max_radius - self.min_radius;
        if !(angular > MIN_ANGULAR_SPAN && radial > MIN_RADIAL_SPAN) {
            return None;
        }
        let mid_angle = self.min_angle + angular * 0.5;
        let mid_radius = self.radial_midpoint(dispersion);
        let strictly_inside = self.min_angle < mid_angle
            && mid_angle < self.max_angle
            && self.min_radius < mid_radius
            && mid_radius < self.max_radius;
        if !strictly_inside {
            return None;
        }
        let cut = |min_angle, max_angle, min_radius, max_radius, outer_closed| Self {
            min_angle,
            max_angle,
            min_radius,
            max_radius,
            outer_closed,
        };
        Some([
            cut(self.min_angle, mid_angle, self.min_radius, mid_radius, false),
            cut(
                self.min_angle,
                mid_angle,
                mid_radius,
                self.max_radius,
                self.outer_closed,
            ),
            cut(mid_angle, self.max_angle, self.min_radius, mid_radius, false),
            cut(
                mid_angle,
                self.max_angle,
                mid_radius,
                self.max_radius,
                self.outer_closed,
            ),
        ])
    }

    fn radial_midpoint(&self, dispersion: f64) -> f64 {
        let inner = (dispersion * euclidean_to_radius(self.min_radius)).cosh();
        let outer = (dispersion * euclidean_to_radius(self.max_radius)).cosh();
        let native = ((inner + outer) * 0.5).acosh() / dispersion;
        let mid = radius_to_euclidean(native);
        if mid.is_finite() && self.min_radius < mid && mid < self.max_radius {
            mid
        } else {
            self.min_radius + (self.max_radius - self.min_radius) * 0.5
        }
    }

    /// Four equal angular wedges spanning the full radial range.
    pub(crate) fn sectors(&self) -> [Self; 4] {
        let step = (self.max_angle - self.min_angle) / 4.0;
        let bound = |k: usize| {
            if k == 4 {
                self.max_angle
            } else {
                self.min_angle + step * k as f64
            }
        };
        std::array::from_fn(|k| Self {
            min_angle: bound(k),
            max_angle: bound(k + 1),
            ..*self
        })
    }

    /// Smallest Euclidean distance from the point at polar coordinates
    /// `(angle, radius)` to the region.
    pub(crate) fn min_distance(&self, angle: f64, radius: f64) -> f64 {
        if radius <= 0.0 {
            return self.min_radius;
        }
        if self.covers_angle(angle) {
            return (self.min_radius - radius)
                .max(radius - self.max_radius)
                .max(0.0);
        }
        // Outside the wedge the closest point lies on one of the two
        // bounding rays.
        let (px, py) = (radius * angle.cos(), radius * angle.sin());
        let to_ray = |boundary: f64| {
            let along = (radius * (angle - boundary).cos()).clamp(self.min_radius, self.max_radius);
            (px - along * boundary.cos()).hypot(py - along * boundary.sin())
        };
        to_ray(self.min_angle).min(to_ray(self.max_angle))
    }

    fn covers_angle(&self, angle: f64) -> bool {
        self.max_angle - self.min_angle >= TAU
            || (self.min_angle <= angle && angle <= self.max_angle)
    }
}
