//! Store implementations for staffgen.
//!
//! Both stores implement [`staff_query::Store`]:
//!
//! - [`MemoryStore`] - records held in process, queried with the shared predicate engine
//! - [`MongoStore`] - one MongoDB collection; queries are translated to BSON
//!   filters and aggregation pipelines
//!
//! [`populate`] inserts a population into any store in batches.

pub mod args;
pub mod memory;
pub mod mongo;
pub mod populate;
pub mod translate;

pub use args::{MongoArgs, MongoPopulateArgs};
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use populate::{populate, PopulateMetrics, DEFAULT_BATCH_SIZE};
