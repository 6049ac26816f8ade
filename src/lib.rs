//! staffgen: synthetic employee populations and declarative queries over them.
//!
//! The binary is a thin layer over the workspace crates:
//!
//! - `staff-core` - catalog, record and field schema
//! - `staff-generator` - seeded, partitioned population generation
//! - `staff-query` - query specifications, plans and the executor
//! - `staff-store` - in-memory and MongoDB stores
//! - `staff-export` - JSONL and CSV output
//!
//! [`commands`] holds the subcommand arguments and handlers.

pub mod commands;
