//! Query execution over in-memory populations and stores.
//!
//! Every entry point captures "now" exactly once and compiles the
//! specification before reading any record, so configuration errors never
//! produce partial results.

use crate::error::QueryError;
use crate::plan::{EvaluationContext, QueryPlan};
use crate::row::ResultRow;
use crate::spec::QuerySpec;
use crate::store::Store;
use rayon::prelude::*;
use staff_core::Employee;
use std::time::Instant;
use tracing::{debug, info};

/// Evaluate `spec` against `population` at the current instant.
pub fn evaluate(spec: &QuerySpec, population: &[Employee]) -> Result<Vec<ResultRow>, QueryError> {
    evaluate_at(spec, population, &EvaluationContext::current())
}

/// Evaluate `spec` against `population` at a pinned instant.
pub fn evaluate_at(
    spec: &QuerySpec,
    population: &[Employee],
    ctx: &EvaluationContext,
) -> Result<Vec<ResultRow>, QueryError> {
    let start_time = Instant::now();
    let plan = QueryPlan::compile(spec, ctx)?;
    debug!("Compiled {plan}");

    let rows = plan.run(population);
    log_complete(&plan, population.len(), rows.len(), start_time);
    Ok(rows)
}

/// Evaluate `spec` with a parallel scan over `workers` threads (0 = one per core).
///
/// The population is split into one contiguous partition per worker and the
/// partial results are concatenated in partition order, so the output equals
/// [`evaluate_at`].
pub fn evaluate_partitioned(
    spec: &QuerySpec,
    population: &[Employee],
    workers: usize,
    ctx: &EvaluationContext,
) -> Result<Vec<ResultRow>, QueryError> {
    let start_time = Instant::now();
    let plan = QueryPlan::compile(spec, ctx)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| QueryError::WorkerPool(e.to_string()))?;

    let partitions = pool.current_num_threads().max(1);
    let chunk_size = population.len().div_ceil(partitions).max(1);
    debug!(
        "Scanning {} records for '{}' in chunks of {}",
        population.len(),
        plan.name(),
        chunk_size
    );

    let partials: Vec<Vec<ResultRow>> = pool.install(|| {
        population
            .par_chunks(chunk_size)
            .map(|chunk| plan.run(chunk))
            .collect()
    });
    let rows: Vec<ResultRow> = partials.into_iter().flatten().collect();

    log_complete(&plan, population.len(), rows.len(), start_time);
    Ok(rows)
}

/// Execute `spec` against a store at the current instant.
pub async fn execute(spec: &QuerySpec, store: &dyn Store) -> Result<Vec<ResultRow>, QueryError> {
    execute_at(spec, store, &EvaluationContext::current()).await
}

/// Execute `spec` against a store at a pinned instant.
///
/// Full-record queries go through [`Store::find`]; projected queries through
/// [`Store::aggregate`]. Store failures are returned as-is, never retried.
pub async fn execute_at(
    spec: &QuerySpec,
    store: &dyn Store,
    ctx: &EvaluationContext,
) -> Result<Vec<ResultRow>, QueryError> {
    let start_time = Instant::now();
    let plan = QueryPlan::compile(spec, ctx)?;
    debug!("Compiled {plan}");

    let rows = if plan.is_projected() {
        store.aggregate(&plan).await?
    } else {
        store
            .find(plan.predicate())
            .await?
            .iter()
            .map(ResultRow::from_employee)
            .collect()
    };

    info!(
        "Query '{}' returned {} rows from store in {:?}",
        plan.name(),
        rows.len(),
        start_time.elapsed()
    );
    Ok(rows)
}

fn log_complete(plan: &QueryPlan, scanned: usize, matched: usize, start_time: Instant) {
    let elapsed = start_time.elapsed();
    let rate = if elapsed.as_secs_f64() > 0.0 {
        scanned as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };
    info!(
        "Query '{}' matched {} of {} records in {:?} ({:.2} records/sec)",
        plan.name(),
        matched,
        scanned,
        elapsed,
        rate
    );
}
