//! Seeded hyperbolic point sets for benchmarks.

use rand::{SeedableRng, rngs::SmallRng};
use rhg_core::{
    Coordinates,
    geometry::{area_to_radius, radius_to_euclidean, sample_points},
};

use crate::error::BenchSetupError;

/// Configuration of a synthetic point set.
#[derive(Clone, Debug)]
pub struct PointSetConfig {
    /// Number of points.
    pub point_count: usize,
    /// Multiple of the radius that holds `point_count` points.
    pub stretch: f64,
    /// Radial dispersion.
    pub dispersion: f64,
    /// Sampler seed.
    pub seed: u64,
}

/// Sampled points with the disk they live in.
#[derive(Clone, Debug)]
pub struct PointSet {
    /// Sampled coordinates.
    pub coordinates: Coordinates,
    /// Native disk radius, also the natural threshold.
    pub radius: f64,
    /// Euclidean disk radius.
    pub bound: f64,
}

impl PointSet {
    /// Samples the configured point set.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::Generator`] for invalid sampling parameters.
    pub fn generate(config: &PointSetConfig) -> Result<Self, BenchSetupError> {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let coordinates =
            sample_points(config.point_count, config.dispersion, config.stretch, &mut rng)?;
        let radius = config.stretch * area_to_radius(config.point_count as f64);
        Ok(Self {
            coordinates,
            radius,
            bound: radius_to_euclidean(radius),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0)]
    #[case(250)]
    fn point_sets_fit_their_disk(#[case] point_count: usize) {
        let set = PointSet::generate(&PointSetConfig {
            point_count,
            stretch: 1.0,
            dispersion: 1.0,
            seed: 9,
        })
        .expect("sampling must succeed");
        assert_eq!(set.coordinates.len(), point_count);
        assert!(set.coordinates.validate(set.bound).is_ok());
    }

    #[test]
    fn invalid_stretch_is_reported() {
        let err = PointSet::generate(&PointSetConfig {
            point_count: 10,
            stretch: 0.0,
            dispersion: 1.0,
            seed: 0,
        })
        .expect_err("stretch must be positive");
        assert!(matches!(err, BenchSetupError::Generator(_)));
    }
}
