//! Hire and promotion date sampling relative to a reference date.

use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Sample a hire date at least `years_experience` years before `today`.
///
/// A jitter of 1 to 365 days is added, so the hire date is always strictly
/// before `today`.
pub fn sample_hire_date<R: Rng>(rng: &mut R, today: NaiveDate, years_experience: u32) -> NaiveDate {
    let jitter = rng.gen_range(1..=365);
    today - Duration::days(365 * i64::from(years_experience) + jitter)
}

/// With `probability`, sample a promotion date strictly between `hire_date`
/// and `today`. Returns `None` when the coin flip fails or when there is no
/// whole day between the two dates.
pub fn sample_promotion<R: Rng>(
    rng: &mut R,
    hire_date: NaiveDate,
    today: NaiveDate,
    probability: f64,
) -> Option<NaiveDate> {
    if !rng.gen_bool(probability) {
        return None;
    }

    let gap = (today - hire_date).num_days();
    if gap < 2 {
        return None;
    }

    Some(hire_date + Duration::days(rng.gen_range(1..gap)))
}
