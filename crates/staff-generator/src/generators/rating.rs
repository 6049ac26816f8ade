//! Performance rating sampling.

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Draw from the normal distribution, round to one decimal and clamp to `[min, max]`.
pub fn sample_rating<R: Rng>(rng: &mut R, distribution: &Normal<f64>, min: f64, max: f64) -> f64 {
    let raw = distribution.sample(rng);
    let rounded = (raw * 10.0).round() / 10.0;
    rounded.clamp(min, max)
}
