//! Convenient re-exports for common pg-repartition usage.
//!
//! # Example
//!
//! ```no_run
//! use pg_repartition::prelude::*;
//!
//! let result = run_blocking(RunOptions::new(
//!     "postgres://localhost/mydb",
//!     "partitions.yaml",
//! )).unwrap();
//!
//! println!("partitions created: {}", result.partitions_created);
//! ```

// Async/blocking entry points
pub use crate::api::{run, run_blocking};

// Options and results
pub use crate::api::{RunOptions, RunResult};

// Error types
pub use crate::error::Error;

// Core types
pub use crate::config::{Config, Directive, PartitionSpec};
pub use crate::model::{Column, PartitionKind, TableInfo};
pub use crate::value::PartitionValue;
