//! Structured error types for the partitioning engine.
//!
//! Mirrors the teacher's two-layer shape: an internal, narrowly-typed
//! [`EngineError`] per component failure kind, and a richer [`Error`] exposed
//! to embedders through [`crate::prelude`]. `anyhow` is reserved for the CLI
//! boundary in [`crate::cli`].

use thiserror::Error;

/// Failures raised by the engine's internal components.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid interval_type '{interval_type}': expected one of \"month\", \"year\"")]
    InvalidInterval { interval_type: String },

    #[error("table {schema}.{table} is empty and column \"{column}\" is not a date/timestamp type; cannot infer partition bounds")]
    EmptyNonTemporal {
        schema: String,
        table: String,
        column: String,
    },

    #[error("catalog query failed: {0}")]
    Catalog(String),

    #[error("statement execution failed: {message}\nstatement: {sql}")]
    Execution { message: String, sql: String },

    #[error("script file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Public, caller-facing error type exposed through the library API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("connection failed: {message}")]
    Connection { message: String },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("config load failed: {message}")]
    ConfigLoad { message: String },
}

impl Error {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn config_load(message: impl Into<String>) -> Self {
        Self::ConfigLoad {
            message: message.into(),
        }
    }
}
