//! Binary crate for the `citytemp` board.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Wiring the core pipeline to the terminal

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
