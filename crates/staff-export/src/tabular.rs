//! CSV writer.
//!
//! Rows are JSON objects; nested objects are flattened to `parent_child`
//! columns and arrays are joined with `;`. The header is fixed either
//! explicitly or by the first row written, and later rows are written in
//! header order with missing columns left empty. A row with a column the
//! header lacks is rejected.

use crate::error::ExportError;
use crate::metrics::ExportMetrics;
use crate::RowSink;
use csv::Writer;
use serde_json::{Map, Value};
use staff_core::{Employee, Field};
use staff_query::ResultRow;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Default buffer size for CSV writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

const LIST_SEPARATOR: &str = ";";

/// CSV header for full records, in wire order.
pub fn record_columns() -> Vec<String> {
    Field::ALL
        .iter()
        .map(|field| field.name().replace('.', "_"))
        .collect()
}

/// Flatten a row into `(column, cell)` pairs.
pub fn flatten_row(row: &Map<String, Value>) -> Vec<(String, String)> {
    let mut cells = Vec::with_capacity(row.len());
    flatten_into(None, row, &mut cells);
    cells
}

fn flatten_into(prefix: Option<&str>, object: &Map<String, Value>, cells: &mut Vec<(String, String)>) {
    for (key, value) in object {
        let column = match prefix {
            Some(prefix) => format!("{prefix}_{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => flatten_into(Some(&column), nested, cells),
            other => cells.push((column, cell(other))),
        }
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(cell)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        other => other.to_string(),
    }
}

/// Writes rows as CSV.
pub struct CsvWriter {
    path: PathBuf,
    writer: Writer<BufWriter<File>>,
    include_header: bool,
    columns: Option<Vec<String>>,
    header_written: bool,
    rows_written: u64,
    start_time: Instant,
}

impl CsvWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        info!("Writing CSV file '{}'", path.display());

        Ok(Self {
            path,
            writer: Writer::from_writer(BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file)),
            include_header: true,
            columns: None,
            header_written: false,
            rows_written: 0,
            start_time: Instant::now(),
        })
    }

    /// Set whether to include a header row in the CSV output.
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    /// Fix the header instead of taking it from the first row.
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Write one JSON object as a CSV line.
    pub fn write_object(&mut self, object: &Map<String, Value>) -> Result<(), ExportError> {
        let cells = flatten_row(object);
        let columns = self
            .columns
            .get_or_insert_with(|| cells.iter().map(|(column, _)| column.clone()).collect());

        if let Some((column, _)) = cells.iter().find(|(name, _)| !columns.contains(name)) {
            return Err(ExportError::UnexpectedColumn {
                column: column.clone(),
                path: self.path.clone(),
            });
        }

        if self.include_header && !self.header_written {
            self.writer.write_record(columns.iter())?;
            self.header_written = true;
        }

        let record: Vec<&str> = columns
            .iter()
            .map(|column| {
                cells
                    .iter()
                    .find(|(name, _)| name == column)
                    .map_or("", |(_, value)| value.as_str())
            })
            .collect();
        self.writer.write_record(&record)?;
        self.rows_written += 1;

        if self.rows_written % 10000 == 0 {
            debug!("Written {} rows", self.rows_written);
        }
        Ok(())
    }

    /// Flush and report metrics.
    pub fn finish(mut self) -> Result<ExportMetrics, ExportError> {
        if self.include_header && !self.header_written {
            if let Some(columns) = &self.columns {
                self.writer.write_record(columns.iter())?;
            }
        }
        self.writer.flush()?;
        drop(self.writer);

        let metrics = ExportMetrics {
            rows_written: self.rows_written,
            total_duration: self.start_time.elapsed(),
            file_size_bytes: std::fs::metadata(&self.path)?.len(),
        };
        info!(
            "CSV export complete: {} rows, {} bytes in {:?} ({:.2} rows/sec)",
            metrics.rows_written,
            metrics.file_size_bytes,
            metrics.total_duration,
            metrics.rows_per_second()
        );
        Ok(metrics)
    }
}

impl RowSink for CsvWriter {
    fn write_row(&mut self, row: &ResultRow) -> Result<(), ExportError> {
        self.write_object(row.as_map())
    }

    fn write_record(&mut self, employee: &Employee) -> Result<(), ExportError> {
        if self.columns.is_none() {
            // Optional fields may be absent from the first record
            self.columns = Some(record_columns());
        }
        self.write_object(ResultRow::from_employee(employee).as_map())
    }

    fn finish(self: Box<Self>) -> Result<ExportMetrics, ExportError> {
        CsvWriter::finish(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_flatten_nested_and_lists() {
        let row = object(json!({
            "employee_id": "EMP000001",
            "skills": ["Rust", "Go"],
            "last_promotion": null,
            "address": { "city": "Denver", "state": "CO" }
        }));

        assert_eq!(
            flatten_row(&row),
            vec![
                ("employee_id".to_string(), "EMP000001".to_string()),
                ("skills".to_string(), "Rust;Go".to_string()),
                ("last_promotion".to_string(), String::new()),
                ("address_city".to_string(), "Denver".to_string()),
                ("address_state".to_string(), "CO".to_string()),
            ]
        );
    }

    #[test]
    fn test_record_columns() {
        let columns = record_columns();
        assert_eq!(columns.first().map(String::as_str), Some("employee_id"));
        assert_eq!(
            &columns[columns.len() - 3..],
            &["address_city", "address_state", "address_zip"]
        );
    }

    #[test]
    fn test_header_from_first_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("outliers.csv");

        let mut writer = CsvWriter::create(&path).unwrap();
        writer
            .write_object(&object(json!({"full_name": "Ada Park", "salary": 59999})))
            .unwrap();
        writer
            .write_object(&object(json!({"salary": 100001, "full_name": "Bo Diaz, Jr."})))
            .unwrap();
        let metrics = writer.finish().unwrap();

        assert_eq!(metrics.rows_written, 2);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "full_name,salary\nAda Park,59999\n\"Bo Diaz, Jr.\",100001\n"
        );
    }

    #[test]
    fn test_empty_export_with_columns_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        let writer = CsvWriter::create(&path)
            .unwrap()
            .with_columns(vec!["full_name".to_string(), "salary".to_string()]);
        let metrics = writer.finish().unwrap();

        assert_eq!(metrics.rows_written, 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "full_name,salary\n");
    }

    #[test]
    fn test_column_missing_from_header_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("promotions.csv");

        let mut writer = CsvWriter::create(&path).unwrap();
        writer
            .write_object(&object(json!({"employee_id": "EMP000001"})))
            .unwrap();
        let err = writer
            .write_object(&object(
                json!({"employee_id": "EMP000002", "last_promotion": "2022-08-01"}),
            ))
            .unwrap_err();

        assert!(matches!(
            err,
            ExportError::UnexpectedColumn { column, .. } if column == "last_promotion"
        ));
    }

    #[test]
    fn test_full_record_rows_keep_optional_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.csv");

        let mut writer = CsvWriter::create(&path)
            .unwrap()
            .with_columns(record_columns());
        writer
            .write_object(&object(json!({"employee_id": "EMP000001", "address": {"city": "Denver"}})))
            .unwrap();
        writer
            .write_object(&object(
                json!({"employee_id": "EMP000002", "last_promotion": "2022-08-01"}),
            ))
            .unwrap();
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], record_columns().join(","));
        let promotion_column = record_columns()
            .iter()
            .position(|c| c == "last_promotion")
            .unwrap();
        assert_eq!(lines[2].split(',').nth(promotion_column), Some("2022-08-01"));
        assert_eq!(lines[1].split(',').nth(promotion_column), Some(""));
    }

    #[test]
    fn test_without_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bare.csv");

        let mut writer = CsvWriter::create(&path).unwrap().with_header(false);
        writer
            .write_object(&object(json!({"remote": true, "rating": 4.5})))
            .unwrap();
        writer.finish().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "true,4.5\n");
    }
}
