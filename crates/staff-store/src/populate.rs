//! Batched population of any store.

use staff_core::Employee;
use staff_query::{Store, StoreError};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default batch size for insert operations.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of records inserted.
    pub rows_inserted: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Number of batches executed.
    pub batch_count: u64,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Insert `records` in batches of `batch_size`, in order.
///
/// The first failing batch aborts the run; earlier batches are not rolled back.
pub async fn populate(
    store: &dyn Store,
    records: &[Employee],
    batch_size: usize,
) -> Result<PopulateMetrics, StoreError> {
    let start_time = Instant::now();
    let mut metrics = PopulateMetrics::default();
    let batch_size = batch_size.max(1);

    info!(
        "Populating store with {} records (batch size {})",
        records.len(),
        batch_size
    );

    for batch in records.chunks(batch_size) {
        metrics.rows_inserted += store.insert_many(batch).await?;
        metrics.batch_count += 1;
        debug!(
            "Batch {} complete: {}/{} records",
            metrics.batch_count,
            metrics.rows_inserted,
            records.len()
        );
    }

    metrics.total_duration = start_time.elapsed();
    info!(
        "Population complete: {} records in {:?} ({:.2} records/sec)",
        metrics.rows_inserted,
        metrics.total_duration,
        metrics.rows_per_second()
    );

    Ok(metrics)
}
