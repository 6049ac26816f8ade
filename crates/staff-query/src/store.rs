//! Abstract store contract consumed by the executor.
//!
//! Implementations live in the `staff-store` crate. The query layer only
//! depends on this trait, never on a store's wire protocol.

use crate::plan::QueryPlan;
use crate::predicate::Predicate;
use crate::row::ResultRow;
use async_trait::async_trait;
use staff_core::Employee;
use thiserror::Error;

/// Errors raised by a store. Never retried by the query layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not complete the operation.
    #[error("Store unavailable during {operation}: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },

    /// A document could not be converted to or from the record shape.
    #[error("Serialization error during {operation}: {message}")]
    Serialization {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn unavailable(operation: &'static str, err: impl std::fmt::Display) -> Self {
        StoreError::Unavailable {
            operation,
            message: err.to_string(),
        }
    }

    pub fn serialization(operation: &'static str, err: impl std::fmt::Display) -> Self {
        StoreError::Serialization {
            operation,
            message: err.to_string(),
        }
    }
}

/// A document store holding employee records.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert records in order; returns the number inserted.
    async fn insert_many(&self, records: &[Employee]) -> Result<u64, StoreError>;

    /// Return every record matching `predicate`, in insertion order.
    async fn find(&self, predicate: &Predicate) -> Result<Vec<Employee>, StoreError>;

    /// Run a compiled plan (filter then projection), in insertion order.
    async fn aggregate(&self, plan: &QueryPlan) -> Result<Vec<ResultRow>, StoreError>;

    /// Number of records held.
    async fn count(&self) -> Result<u64, StoreError>;
}
