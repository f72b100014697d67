mod auth;
mod cli;
mod config;
mod deploy;
mod error;
mod github;
mod output;
mod terraform;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    output::print_banner();

    let cli = Cli::parse();
    info!("Starting tfcdeploy");
    cli.execute().await?;

    Ok(())
}
