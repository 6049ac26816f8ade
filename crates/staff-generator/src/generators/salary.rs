//! Salary sampling within a position's band.

use rand::Rng;
use staff_core::SalaryBand;

/// Move a base salary towards the band ceiling by `bonus_per_year` of the
/// remaining headroom per year of experience.
///
/// For a fixed base the result never decreases as `years` grows, and only
/// reaches `band.high` once `bonus_per_year * years >= 1`.
pub fn experience_adjusted(base: i64, years: u32, bonus_per_year: f64, band: SalaryBand) -> i64 {
    let base = base.clamp(band.low, band.high);
    let share = (bonus_per_year * f64::from(years)).min(1.0);
    let headroom = (band.high - base) as f64;
    let adjusted = base + (headroom * share).round() as i64;
    adjusted.clamp(band.low, band.high)
}

/// Sample a base salary uniformly from the band, then apply the experience bonus.
pub fn sample_salary<R: Rng>(
    rng: &mut R,
    band: SalaryBand,
    years: u32,
    bonus_per_year: f64,
) -> i64 {
    let base = rng.gen_range(band.low..=band.high);
    experience_adjusted(base, years, bonus_per_year, band)
}
