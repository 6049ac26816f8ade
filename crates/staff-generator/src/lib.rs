//! Correlated employee record generator for staffgen.
//!
//! This crate provides the [`RecordGenerator`], which produces one internally
//! consistent employee record per identity, and the [`PopulationBuilder`],
//! which drives it over a whole population. All randomness comes from seeded
//! `StdRng` streams, so the same seed and configuration always reproduce the
//! same population.
//!
//! # Architecture
//!
//! ```text
//! GeneratorConfig (YAML / CLI)      Catalog (staff-core)
//!            │                            │
//!            └──────────────┬─────────────┘
//!                           ▼
//!                  ┌─────────────────┐
//!                  │ RecordGenerator │  department → position → experience
//!                  │                 │  → salary → rating → dates → skills
//!                  └────────┬────────┘
//!                           │ one StdRng per partition
//!                           ▼
//!                 ┌───────────────────┐
//!                 │ PopulationBuilder │  sequential or rayon pool
//!                 └─────────┬─────────┘
//!                           ▼
//!                     Vec<Employee>
//! ```
//!
//! # Example
//!
//! ```rust
//! use staff_core::Catalog;
//! use staff_generator::{GeneratorConfig, PopulationBuilder};
//!
//! let catalog = Catalog::standard().unwrap();
//! let config = GeneratorConfig {
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let builder = PopulationBuilder::new(catalog, &config).unwrap();
//! let population = builder.build(100).unwrap();
//! assert_eq!(population.len(), 100);
//! ```

pub mod config;
pub mod generator;
pub mod generators;
pub mod invariants;
pub mod population;

// Re-exports for convenience
pub use config::{ConfigError, GeneratorConfig, RatingConfig, SkillCountConfig};
pub use generator::{GeneratorError, RecordGenerator};
pub use invariants::InvariantViolation;
pub use population::{PopulationBuilder, PARTITION_SIZE};
