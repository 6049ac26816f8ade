//! Row-oriented export for staffgen.
//!
//! Populations and query results are written as JSON Lines or CSV through the
//! [`RowSink`] trait; callers pick a format and stay agnostic of it.
//!
//! # Example
//!
//! ```ignore
//! use staff_export::{export_rows, ExportFormat};
//!
//! let columns = vec!["full_name".into(), "salary".into(), "years_experience".into()];
//! let metrics = export_rows(ExportFormat::Csv, "salary_outliers.csv", columns, &rows)?;
//! println!("Wrote {} rows in {:?}", metrics.rows_written, metrics.total_duration);
//! ```

pub mod error;
pub mod jsonl;
pub mod metrics;
pub mod tabular;

pub use error::ExportError;
pub use jsonl::{read_jsonl_records, JsonlWriter};
pub use metrics::ExportMetrics;
pub use tabular::{flatten_row, record_columns, CsvWriter};

use clap::ValueEnum;
use staff_core::Employee;
use staff_query::ResultRow;
use std::fmt;
use std::path::Path;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Jsonl,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jsonl => "jsonl",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Destination for ordered rows.
pub trait RowSink {
    fn write_row(&mut self, row: &ResultRow) -> Result<(), ExportError>;

    /// Write a full record in its wire shape.
    fn write_record(&mut self, employee: &Employee) -> Result<(), ExportError>;

    /// Flush and report metrics.
    fn finish(self: Box<Self>) -> Result<ExportMetrics, ExportError>;
}

/// Open a sink for `format` at `path`.
///
/// `columns` fixes the CSV header; without it the header is taken from the
/// first row. JSONL ignores it.
pub fn create_sink(
    format: ExportFormat,
    path: impl AsRef<Path>,
    columns: Option<Vec<String>>,
) -> Result<Box<dyn RowSink>, ExportError> {
    Ok(match format {
        ExportFormat::Jsonl => Box::new(JsonlWriter::create(path)?),
        ExportFormat::Csv => {
            let writer = CsvWriter::create(path)?;
            Box::new(match columns {
                Some(columns) => writer.with_columns(columns),
                None => writer,
            })
        }
    })
}

/// Write query result rows in order under a fixed set of columns.
///
/// Full-record rows use [`record_columns`] so optional fields keep their
/// column even when the first row lacks them.
pub fn export_rows(
    format: ExportFormat,
    path: impl AsRef<Path>,
    columns: Vec<String>,
    rows: &[ResultRow],
) -> Result<ExportMetrics, ExportError> {
    let mut sink = create_sink(format, path, Some(columns))?;
    for row in rows {
        sink.write_row(row)?;
    }
    sink.finish()
}

/// Write a population in order.
pub fn export_records(
    format: ExportFormat,
    path: impl AsRef<Path>,
    records: &[Employee],
) -> Result<ExportMetrics, ExportError> {
    let mut sink = create_sink(format, path, Some(record_columns()))?;
    for record in records {
        sink.write_record(record)?;
    }
    sink.finish()
}
