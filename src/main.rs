mod auth;
mod cli;
mod config;
mod error;
mod output;
mod providers;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    output::print_banner();
    info!("Starting my-mr");
    cli.execute().await?;

    Ok(())
}
