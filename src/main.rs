mod api;
mod cli;
mod config;
mod error;
mod ledger;
mod model;
mod orchestrator;
mod pg;
mod planner;
mod sink;
mod value;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::run().await
}
