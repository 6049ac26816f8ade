//! `generate` command handler.

use super::args::PopulationArgs;
use anyhow::Context;
use clap::Args;
use staff_export::{export_records, ExportFormat, ExportMetrics};
use std::path::PathBuf;

/// Arguments for `staffgen generate`.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub population: PopulationArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Jsonl)]
    pub format: ExportFormat,

    /// Output file
    #[arg(long, short = 'o')]
    pub output: PathBuf,
}

/// Generate a population and write it to a file.
pub fn run_generate(args: GenerateArgs) -> anyhow::Result<ExportMetrics> {
    let records = args.population.build()?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {parent:?}"))?;
    }

    let metrics = export_records(args.format, &args.output, &records)
        .with_context(|| format!("Failed to write {:?}", args.output))?;

    tracing::info!(
        "Generated {:?}: {} records in {:?}",
        args.output,
        metrics.rows_written,
        metrics.total_duration
    );
    Ok(metrics)
}
