//! Skill subset sampling.

use rand::seq::SliceRandom;
use rand::Rng;

/// Sample distinct skills from a department's pool.
///
/// The size is drawn from `[min, max]` with `max` clamped to the pool size.
/// `RecordGenerator::new` rejects a `min` larger than any drawable pool.
pub fn sample_skills<R: Rng>(rng: &mut R, pool: &[String], min: usize, max: usize) -> Vec<String> {
    let effective_max = max.min(pool.len());
    let effective_min = min.min(effective_max);

    let length = rng.gen_range(effective_min..=effective_max);

    pool.choose_multiple(rng, length).cloned().collect()
}
