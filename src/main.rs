mod cli;
mod error;
mod report;
mod sources;
mod spc;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting spcdash - Statistical Process Control");
    cli.execute().await?;

    Ok(())
}
