//! High-level API for embedding this engine in other applications.
//!
//! Mirrors the CLI's single `run` command with a structured input and
//! output. Both async and blocking variants are available.
//!
//! # Example
//!
//! ```no_run
//! use pg_repartition::api::{run_blocking, RunOptions};
//!
//! let result = run_blocking(RunOptions::new(
//!     "postgres://localhost/mydb",
//!     "partitions.yaml",
//! )).unwrap();
//!
//! println!("partitions created: {}", result.partitions_created);
//! ```

mod options;
mod results;

pub use options::RunOptions;
pub use results::RunResult;

use crate::config::Config;
use crate::error::Error;
use crate::orchestrator;
use crate::pg::connection::PgConnection;
use crate::sink::ExecutionSink;

/// Runs the full partitioning pipeline described by `options`.
pub async fn run(options: RunOptions) -> Result<RunResult, Error> {
    let config = Config::load(&options.config_path).map_err(Error::from)?;

    let connection = PgConnection::new(&options.database_url).await?;
    let pool = connection.into_pool();

    let sink = match options.script_path {
        Some(path) => ExecutionSink::script(pool, path).map_err(Error::from)?,
        None => ExecutionSink::live(pool),
    };

    orchestrator::run(&sink, &config).await.map_err(Error::from)
}

fn create_runtime() -> Result<tokio::runtime::Runtime, Error> {
    tokio::runtime::Runtime::new().map_err(|e| Error::connection(format!("failed to start async runtime: {e}")))
}

/// Blocking variant of [`run`].
pub fn run_blocking(options: RunOptions) -> Result<RunResult, Error> {
    create_runtime()?.block_on(run(options))
}
