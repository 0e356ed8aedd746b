use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use rigsmith::commands::{self, Command};
use rigsmith::AdvisorController;

/// Recommend compatible PC builds for a budget.
#[derive(Debug, Parser)]
#[command(name = "rigsmith", version, about)]
struct Cli {
    /// Catalog file (JSON or TOML), overriding the configured one.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let controller =
        AdvisorController::new(cli.catalog).context("Failed to initialize application")?;

    let output = commands::execute(&controller, cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
