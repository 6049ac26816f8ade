//! JSON Lines writer and record reader.

use crate::error::ExportError;
use crate::metrics::ExportMetrics;
use crate::RowSink;
use serde::Serialize;
use staff_core::Employee;
use staff_query::ResultRow;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Default buffer size for JSONL writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Writes one JSON object per line.
pub struct JsonlWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    rows_written: u64,
    start_time: Instant,
}

impl JsonlWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        info!("Writing JSONL file '{}'", path.display());

        Ok(Self {
            path,
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file),
            rows_written: 0,
            start_time: Instant::now(),
        })
    }

    /// Write any serializable value as one line.
    pub fn write<T: Serialize>(&mut self, value: &T) -> Result<(), ExportError> {
        serde_json::to_writer(&mut self.writer, value)?;
        writeln!(self.writer)?;
        self.rows_written += 1;

        if self.rows_written % 10000 == 0 {
            debug!("Written {} rows", self.rows_written);
        }
        Ok(())
    }

    /// Flush and report metrics.
    pub fn finish(mut self) -> Result<ExportMetrics, ExportError> {
        self.writer.flush()?;
        drop(self.writer);

        let metrics = ExportMetrics {
            rows_written: self.rows_written,
            total_duration: self.start_time.elapsed(),
            file_size_bytes: std::fs::metadata(&self.path)?.len(),
        };
        info!(
            "JSONL export complete: {} rows, {} bytes in {:?} ({:.2} rows/sec)",
            metrics.rows_written,
            metrics.file_size_bytes,
            metrics.total_duration,
            metrics.rows_per_second()
        );
        Ok(metrics)
    }
}

impl RowSink for JsonlWriter {
    fn write_row(&mut self, row: &ResultRow) -> Result<(), ExportError> {
        self.write(row)
    }

    fn write_record(&mut self, employee: &Employee) -> Result<(), ExportError> {
        self.write(employee)
    }

    fn finish(self: Box<Self>) -> Result<ExportMetrics, ExportError> {
        JsonlWriter::finish(*self)
    }
}

/// Load a population from a JSONL file, skipping blank lines.
pub fn read_jsonl_records(path: impl AsRef<Path>) -> Result<Vec<Employee>, ExportError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record =
            serde_json::from_str(&line).map_err(|source| ExportError::InvalidRecord {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })?;
        records.push(record);
    }

    info!("Loaded {} records from '{}'", records.len(), path.display());
    Ok(records)
}
