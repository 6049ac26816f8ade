//! Command handlers.
//!
//! Each subcommand owns its clap arguments and a `run_*` handler returning
//! `anyhow::Result`, so the binary only parses and dispatches.

pub mod args;
pub mod generate;
pub mod populate;
pub mod query;

pub use args::PopulationArgs;
pub use generate::{run_generate, GenerateArgs};
pub use populate::{run_populate, PopulateTarget};
pub use query::{run_query, QueryArgs, QueryOutcome};
