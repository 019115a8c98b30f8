//! Pure hyperbolic geometry used by the index and the generators.
//!
//! Points live in the Poincaré disk: angles are native polar angles in
//! `[0, 2π)` and radii are Euclidean radii strictly below one. Conversions to
//! and from native hyperbolic radii, distance predicates, and the sampling of
//! scale-free point sets are all stateless; randomness is always supplied by
//! the caller.

mod distance;
mod radius;
mod sampling;

pub use self::distance::{EuclideanCircle, euclidean_circle, hyperbolic_distance, native_distance};
pub use self::radius::{
    area_to_radius, euclidean_to_radius, expected_degree, expected_number_of_edges,
    exponent_to_dispersion, radius_to_euclidean, target_radius,
};
pub use self::sampling::{normalize_angle, sample_points, sample_points_within};

#[cfg(test)]
mod tests;
