//! End-to-end tests for the staffgen commands.
//!
//! File-based tests run everywhere. The MongoDB test needs a live server and
//! is ignored unless run explicitly.

mod generate_test;
mod mongodb_test;
mod query_test;

use chrono::NaiveDate;
use staffgen::commands::PopulationArgs;

pub const SEED: u64 = 42;

pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

/// Population arguments for a pinned, reproducible population.
pub fn population_args(count: u64) -> PopulationArgs {
    PopulationArgs {
        config: None,
        count: Some(count),
        seed: Some(SEED),
        workers: 2,
        reference_date: Some(reference_date()),
    }
}
