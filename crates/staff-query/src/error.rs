//! Error types for query compilation and execution.

use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur while compiling or executing a query.
#[derive(Error, Debug)]
pub enum QueryError {
    /// A specification references a field absent from the record schema.
    #[error("Query '{query}' references unknown field '{field}'")]
    UnknownField { query: String, field: String },

    /// The operator cannot be applied to the field's type.
    #[error("Query '{query}': operator '{op}' cannot be applied to field '{field}'")]
    IncompatibleOperator {
        query: String,
        field: String,
        op: &'static str,
    },

    /// The bound value's type does not match the field's type.
    #[error("Query '{query}': bound {bound} is not comparable with field '{field}'")]
    IncompatibleBound {
        query: String,
        field: String,
        bound: String,
    },

    /// A query name was not found in the library.
    #[error("Unknown query: '{0}'")]
    UnknownQuery(String),

    /// Two queries in a library share a name.
    #[error("Duplicate query name: '{0}'")]
    DuplicateQuery(String),

    /// Error reading a query library file.
    #[error("Failed to read query file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a query library file.
    #[error("Failed to parse query YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The scan worker pool could not be started.
    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),
}
