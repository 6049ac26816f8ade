//! `populate` command handler.

use super::args::PopulationArgs;
use anyhow::Context;
use clap::Subcommand;
use staff_export::read_jsonl_records;
use staff_store::{populate, MongoPopulateArgs, MongoStore, PopulateMetrics};
use std::path::PathBuf;

/// Store to populate with a generated population
#[derive(Subcommand, Clone, Debug)]
pub enum PopulateTarget {
    /// Populate a MongoDB collection
    #[command(name = "mongodb")]
    MongoDB {
        #[command(flatten)]
        population: PopulationArgs,

        #[command(flatten)]
        args: MongoPopulateArgs,

        /// Load records from a JSONL file instead of generating them
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

/// Insert a population into the target store.
pub async fn run_populate(target: PopulateTarget) -> anyhow::Result<PopulateMetrics> {
    match target {
        PopulateTarget::MongoDB {
            population,
            args,
            input,
        } => {
            let records = match &input {
                Some(path) => read_jsonl_records(path)
                    .with_context(|| format!("Failed to read records from {path:?}"))?,
                None => population.build()?,
            };

            let store = MongoStore::connect(
                &args.mongo.mongodb_connection_string,
                &args.mongo.mongodb_database,
                &args.mongo.collection,
            )
            .await
            .context("Failed to connect to MongoDB")?;

            if args.drop {
                store
                    .drop_collection()
                    .await
                    .context("Failed to drop collection")?;
            }

            let metrics = populate(&store, &records, args.batch_size)
                .await
                .with_context(|| {
                    format!("Failed to populate collection '{}'", args.mongo.collection)
                })?;

            tracing::info!(
                "Populated {}: {} documents in {:?}",
                args.mongo.collection,
                metrics.rows_inserted,
                metrics.total_duration
            );
            Ok(metrics)
        }
    }
}
