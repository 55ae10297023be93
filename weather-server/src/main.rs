//! Binary crate for the `weather-server` service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Loading configuration
//! - Starting the HTTP listener

use clap::Parser;
use weather_server::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
