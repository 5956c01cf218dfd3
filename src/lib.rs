//! pg-repartition - converts live PostgreSQL tables into declaratively
//! partitioned tables in place.
//!
//! Given a running database populated with ordinary tables, this crate
//! transforms selected tables into partitioned tables, creates the child
//! partitions needed to hold existing data, copies the data across, and
//! records a durable inventory of every partition it created.
//!
//! # Quick Start
//!
//! Use the high-level API via the [`api`] module or [`prelude`]:
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
//!
//! # Modules
//!
//! - [`api`] - high-level API mirroring the CLI
//! - [`prelude`] - convenient re-exports for common usage
//! - [`config`] - configuration loading and the directive/partition-spec model
//! - [`model`] - core data types (columns, table info, partition kind, ledger records)
//! - [`value`] - partition-key value representation
//! - [`planner`] - range/list partition planning
//! - [`pg`] - PostgreSQL catalog, bounds, and DDL generation
//! - [`sink`] - execution sink (live vs. script mode)
//! - [`ledger`] - partition tracking table maintenance
//! - [`orchestrator`] - top-level pipeline driver

pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod model;
pub mod orchestrator;
pub mod pg;
pub mod planner;
pub mod prelude;
pub mod sink;
pub mod value;
