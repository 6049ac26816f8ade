//! Field-level samplers used by the record generator.
//!
//! Each sampler takes the caller's RNG explicitly, so a record drawn from a
//! given RNG state is fully reproducible.

pub mod contact;
pub mod dates;
pub mod experience;
pub mod rating;
pub mod salary;
pub mod skills;
