//! Years of experience, correlated with seniority rank.

use rand::Rng;

/// Inclusive experience range (years) for a seniority rank.
///
/// Both ends grow with the rank, so the mean does too.
pub fn experience_range(rank: usize) -> (u32, u32) {
    let rank = rank as u32;
    (3 * rank, 3 + 5 * rank)
}

/// Sample years of experience for a seniority rank.
pub fn sample_years_experience<R: Rng>(rng: &mut R, rank: usize) -> u32 {
    let (min, max) = experience_range(rank);
    rng.gen_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_range_grows_with_rank() {
        let mut previous = experience_range(0);
        assert_eq!(previous, (0, 3));
        for rank in 1..6 {
            let current = experience_range(rank);
            assert!(current.0 > previous.0 && current.1 > previous.1);
            previous = current;
        }
    }

    #[test]
    fn test_mean_increases_with_rank() {
        let mut rng = StdRng::seed_from_u64(42);
        let mean = |rng: &mut StdRng, rank| {
            (0..2000)
                .map(|_| sample_years_experience(rng, rank) as f64)
                .sum::<f64>()
                / 2000.0
        };

        let junior = mean(&mut rng, 0);
        let senior = mean(&mut rng, 3);
        assert!(senior > junior + 5.0, "junior {junior}, senior {senior}");
    }
}
