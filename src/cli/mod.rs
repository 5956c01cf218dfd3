use crate::api;
use crate::config::generate_sample_config;
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "pg-repartition")]
#[command(about = "Converts live PostgreSQL tables into declaratively partitioned tables in place", long_about = None)]
struct Cli {
    /// Database connection URL.
    #[arg(short = 'd', long)]
    database: Option<String>,

    /// Configuration file path (YAML or JSON).
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Emit a sample configuration document to standard output and exit.
    #[arg(short = 'g', long = "gen-sample-config")]
    gen_sample_config: bool,

    /// Write generated DDL/DML to this file instead of executing it.
    #[arg(short = 's', long)]
    sql: Option<String>,
}

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt().with_target(true).with_level(true).init();

    let cli = Cli::parse();

    if cli.gen_sample_config {
        println!("{}", generate_sample_config());
        return Ok(());
    }

    let database = cli
        .database
        .context("-d/--database is required unless -g/--gen-sample-config is used")?;
    let config = cli
        .config
        .context("-c/--config is required unless -g/--gen-sample-config is used")?;

    let mut options = api::RunOptions::new(database, config);
    if let Some(sql_path) = cli.sql {
        options = options.with_script_path(sql_path);
    }

    let summary = api::run(options).await?;
    tracing::info!(
        schemas = summary.schemas_processed,
        tables = summary.tables_transformed,
        partitions = summary.partitions_created,
        "run complete"
    );

    Ok(())
}
