//! Population arguments shared by `generate` and `populate`.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use staff_core::{Catalog, Employee};
use staff_generator::{GeneratorConfig, PopulationBuilder};
use std::path::PathBuf;

/// How to build a population. Flags override values from `--config`.
#[derive(Args, Clone, Debug, Default)]
pub struct PopulationArgs {
    /// Path to generator configuration YAML file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of records to generate
    #[arg(long)]
    pub count: Option<u64>,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long, env = "STAFFGEN_SEED")]
    pub seed: Option<u64>,

    /// Worker threads for generation (0 = one per core)
    #[arg(long, default_value_t = 0)]
    pub workers: usize,

    /// Date generated hire and promotion dates are relative to (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub reference_date: Option<NaiveDate>,
}

impl PopulationArgs {
    /// Load the configuration file (or defaults) and apply flag overrides.
    pub fn load_config(&self) -> anyhow::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)
                .with_context(|| format!("Failed to load generator config from {path:?}"))?,
            None => GeneratorConfig::default(),
        };

        if let Some(count) = self.count {
            config.population_size = count;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        config.validate().context("Invalid generator configuration")?;
        Ok(config)
    }

    /// Build the population these arguments describe.
    pub fn build(&self) -> anyhow::Result<Vec<Employee>> {
        let config = self.load_config()?;
        let catalog = Catalog::standard().context("Built-in catalog is invalid")?;

        let builder = match self.reference_date {
            Some(today) => PopulationBuilder::with_reference_date(catalog, &config, today),
            None => PopulationBuilder::new(catalog, &config),
        }
        .context("Failed to create population builder")?;

        tracing::info!(
            "Generating {} records (seed={}, reference date {})",
            config.population_size,
            builder.seed(),
            builder.reference_date()
        );

        let records = if self.workers == 1 {
            builder.build(config.population_size)
        } else {
            builder.build_parallel(config.population_size, self.workers)
        }
        .context("Population generation failed")?;

        Ok(records)
    }
}
