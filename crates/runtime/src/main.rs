#![deny(clippy::all, clippy::pedantic)]

use anyhow::Result;
use clap::Parser;
use starlane_runtime::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    starlane_runtime::run(&cli)?;
    Ok(())
}
