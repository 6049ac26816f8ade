//! `query` command handler.

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use clap::Args;
use staff_export::{export_rows, read_jsonl_records, record_columns, ExportFormat};
use staff_query::{executor, EvaluationContext, QueryLibrary, QuerySpec, ResultRow};
use staff_store::MongoStore;
use std::path::PathBuf;

/// Arguments for `staffgen query`.
#[derive(Args, Clone, Debug)]
pub struct QueryArgs {
    /// Query name, or `all` for every query in the library
    pub query: String,

    /// Population JSONL file to query
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// MongoDB connection string, used when no --input is given
    #[arg(long, env = "MONGODB_CONNECTION_STRING")]
    pub mongodb_connection_string: Option<String>,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DATABASE")]
    pub mongodb_database: Option<String>,

    /// Collection holding the employee records
    #[arg(long, env = "MONGODB_COLLECTION", default_value = "employees")]
    pub collection: String,

    /// YAML file with custom queries and parameter overrides
    #[arg(long)]
    pub queries: Option<PathBuf>,

    /// Output format for result files
    #[arg(long, value_enum, default_value_t = ExportFormat::Jsonl)]
    pub format: ExportFormat,

    /// Directory result files are written to (one file per query)
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Worker threads for scanning a JSONL population (0 = one per core)
    #[arg(long, default_value_t = 0)]
    pub workers: usize,

    /// Evaluation instant (RFC 3339); defaults to now
    #[arg(long, value_name = "TIMESTAMP")]
    pub at: Option<DateTime<Utc>>,
}

/// Result of one query run.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub name: String,
    pub rows: usize,
    pub path: PathBuf,
}

enum Source {
    Population(Vec<staff_core::Employee>),
    Mongo(MongoStore),
}

/// Run one or all queries and write one result file per query.
pub async fn run_query(args: QueryArgs) -> anyhow::Result<Vec<QueryOutcome>> {
    let library = match &args.queries {
        Some(path) => QueryLibrary::from_file(path)
            .with_context(|| format!("Failed to load queries from {path:?}"))?,
        None => QueryLibrary::canonical(),
    };

    // Captured once for every query in this run
    let ctx = args
        .at
        .map(EvaluationContext::at)
        .unwrap_or_else(EvaluationContext::current);
    library.validate(&ctx).context("Invalid query library")?;

    let specs: Vec<&QuerySpec> = if args.query == "all" {
        library.specs().iter().collect()
    } else {
        vec![library.get(&args.query)?]
    };

    let source = open_source(&args).await?;

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", args.output_dir))?;

    let mut outcomes = Vec::with_capacity(specs.len());
    for spec in specs {
        let rows: Vec<ResultRow> = match &source {
            Source::Population(records) => {
                executor::evaluate_partitioned(spec, records, args.workers, &ctx)
            }
            Source::Mongo(store) => executor::execute_at(spec, store, &ctx).await,
        }
        .with_context(|| format!("Query '{}' failed", spec.name()))?;

        let path = args
            .output_dir
            .join(format!("{}.{}", spec.name(), args.format.extension()));
        export_rows(args.format, &path, output_columns(spec), &rows)
            .with_context(|| format!("Failed to write {path:?}"))?;

        tracing::info!("{}: {} rows -> {:?}", spec.name(), rows.len(), path);
        outcomes.push(QueryOutcome {
            name: spec.name().to_string(),
            rows: rows.len(),
            path,
        });
    }

    Ok(outcomes)
}

/// Columns of the rows `spec` produces, as written to CSV.
fn output_columns(spec: &QuerySpec) -> Vec<String> {
    let projection = spec.projection();
    if projection.is_empty() {
        return record_columns();
    }
    projection
        .iter()
        .map(|column| column.column_name().to_string())
        .collect()
}

async fn open_source(args: &QueryArgs) -> anyhow::Result<Source> {
    if let Some(path) = &args.input {
        let records = read_jsonl_records(path)
            .with_context(|| format!("Failed to read population from {path:?}"))?;
        return Ok(Source::Population(records));
    }

    match (&args.mongodb_connection_string, &args.mongodb_database) {
        (Some(connection_string), Some(database)) => {
            let store = MongoStore::connect(connection_string, database, &args.collection)
                .await
                .context("Failed to connect to MongoDB")?;
            Ok(Source::Mongo(store))
        }
        _ => bail!(
            "No data source: pass --input <file.jsonl> or --mongodb-connection-string and --mongodb-database"
        ),
    }
}
