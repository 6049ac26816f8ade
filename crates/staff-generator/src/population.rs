//! Population builder: drives the record generator over a range of identities.
//!
//! Identities are split into fixed-size partitions. Each partition owns an
//! RNG seeded from the global seed and the partition's start index, so the
//! same seed yields the same population whether partitions run sequentially
//! or on a worker pool of any size.

use crate::config::{ConfigError, GeneratorConfig};
use crate::generator::{GeneratorError, RecordGenerator};
use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use staff_core::{Catalog, Employee, EmployeeId};
use std::time::Instant;
use tracing::{debug, info};

/// Number of identities generated from one RNG stream.
pub const PARTITION_SIZE: u64 = 1024;

/// Builds complete populations of employee records.
pub struct PopulationBuilder<'a> {
    generator: RecordGenerator<'a>,
    seed: u64,
    id_offset: u64,
}

impl<'a> PopulationBuilder<'a> {
    /// Create a builder using today's UTC date as the reference date.
    ///
    /// When the configuration carries no seed, a random one is drawn and
    /// logged so the run can be replayed.
    pub fn new(catalog: &'a Catalog, config: &'a GeneratorConfig) -> Result<Self, ConfigError> {
        Self::with_reference_date(catalog, config, Utc::now().date_naive())
    }

    /// Create a builder with a pinned reference date.
    pub fn with_reference_date(
        catalog: &'a Catalog,
        config: &'a GeneratorConfig,
        today: NaiveDate,
    ) -> Result<Self, ConfigError> {
        let generator = RecordGenerator::new(catalog, config, today)?;
        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::thread_rng().gen();
                info!("No seed configured; using random seed {seed}");
                seed
            }
        };

        Ok(Self {
            generator,
            seed,
            id_offset: config.id_offset,
        })
    }

    /// Seed actually used for generation.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Reference date used for generated dates.
    pub fn reference_date(&self) -> NaiveDate {
        self.generator.today()
    }

    /// Build `count` records on the current thread.
    pub fn build(&self, count: u64) -> Result<Vec<Employee>, GeneratorError> {
        let start_time = Instant::now();
        let partitions = self.partitions(count)?;
        info!(
            "Building population of {} records (seed={}, partitions={})",
            count,
            self.seed,
            partitions.len()
        );

        let mut records = Vec::with_capacity(count as usize);
        for (start, len) in partitions {
            records.extend(self.generate_partition(start, len)?);
        }

        self.log_complete(records.len(), start_time);
        Ok(records)
    }

    /// Build `count` records on a pool of `workers` threads (0 = one per core).
    ///
    /// The result is identical to [`PopulationBuilder::build`] for the same seed.
    pub fn build_parallel(
        &self,
        count: u64,
        workers: usize,
    ) -> Result<Vec<Employee>, GeneratorError> {
        let start_time = Instant::now();
        let partitions = self.partitions(count)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| GeneratorError::WorkerPool(e.to_string()))?;
        info!(
            "Building population of {} records (seed={}, partitions={}, workers={})",
            count,
            self.seed,
            partitions.len(),
            pool.current_num_threads()
        );

        let chunks: Vec<Vec<Employee>> = pool.install(|| {
            partitions
                .par_iter()
                .map(|&(start, len)| self.generate_partition(start, len))
                .collect::<Result<Vec<_>, GeneratorError>>()
        })?;
        let records: Vec<Employee> = chunks.into_iter().flatten().collect();

        self.log_complete(records.len(), start_time);
        Ok(records)
    }

    /// Split `count` identities into `(start, len)` partitions.
    fn partitions(&self, count: u64) -> Result<Vec<(u64, u64)>, ConfigError> {
        if count == 0 {
            return Err(ConfigError::InvalidPopulationSize(count));
        }
        if self.id_offset.checked_add(count).is_none() {
            return Err(ConfigError::IdentityOverflow {
                offset: self.id_offset,
                count,
            });
        }

        Ok((0..count)
            .step_by(PARTITION_SIZE as usize)
            .map(|start| (start, PARTITION_SIZE.min(count - start)))
            .collect())
    }

    /// Compute the RNG seed for the partition starting at `start`.
    fn partition_seed(&self, start: u64) -> u64 {
        self.seed
            .wrapping_add(start.wrapping_mul(0x9E3779B97F4A7C15))
    }

    fn generate_partition(&self, start: u64, len: u64) -> Result<Vec<Employee>, GeneratorError> {
        let mut rng = StdRng::seed_from_u64(self.partition_seed(start));
        let records = (start..start + len)
            .map(|index| {
                let identity = EmployeeId::new(self.id_offset + index);
                self.generator.generate(identity, &mut rng)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Partition starting at {} complete: {} records", start, len);
        Ok(records)
    }

    fn log_complete(&self, count: usize, start_time: Instant) {
        let elapsed = start_time.elapsed();
        let rate = if elapsed.as_secs_f64() > 0.0 {
            count as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        info!(
            "Population complete: {} records in {:?} ({:.2} records/sec)",
            count, elapsed, rate
        );
    }
}
