use std::path::PathBuf;

/// Options for a full partitioning run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Database connection URL.
    pub database_url: String,
    /// Path to the configuration document (YAML or JSON).
    pub config_path: PathBuf,
    /// If set, generated DDL/DML is written here instead of executed;
    /// catalog/bounds reads still execute against the connection.
    pub script_path: Option<PathBuf>,
}

impl RunOptions {
    pub fn new(database_url: impl Into<String>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            database_url: database_url.into(),
            config_path: config_path.into(),
            script_path: None,
        }
    }

    pub fn with_script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.script_path = Some(path.into());
        self
    }
}
