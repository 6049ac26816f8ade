//! In-memory store backed by the query crate's predicate engine.

use async_trait::async_trait;
use staff_core::Employee;
use staff_query::{Predicate, QueryPlan, ResultRow, Store, StoreError};
use tokio::sync::RwLock;

/// A store holding records in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Employee>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with `records`.
    pub fn with_records(records: Vec<Employee>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_many(&self, records: &[Employee]) -> Result<u64, StoreError> {
        self.records.write().await.extend_from_slice(records);
        Ok(records.len() as u64)
    }

    async fn find(&self, predicate: &Predicate) -> Result<Vec<Employee>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|employee| predicate.matches(employee))
            .cloned()
            .collect())
    }

    async fn aggregate(&self, plan: &QueryPlan) -> Result<Vec<ResultRow>, StoreError> {
        Ok(plan.run(&self.records.read().await))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.read().await.len() as u64)
    }
}
