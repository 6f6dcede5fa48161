mod auth;
mod cli;
mod date_range;
mod error;
mod providers;
mod report;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting ghatime - GitHub Actions execution time analysis");
    cli.execute().await?;

    Ok(())
}
