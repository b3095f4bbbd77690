//! Command implementations

mod anomalies;
mod config;
mod demographics;
mod insights;
mod metrics;
mod states;
mod summary;
mod trends;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_engine;
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    tracing::debug!(command = ?cli.command, data_dir = %cli.data_dir.display(), "Executing command");

    if let Commands::Config = cli.command {
        return config::execute(&cli, &output);
    }

    let (engine, source) = load_engine(&cli)?;

    match &cli.command {
        Commands::Summary => summary::execute(&engine, &source, &output),
        Commands::Metrics => metrics::execute(&engine, &output),
        Commands::Trends(args) => trends::execute(args, &engine, &output),
        Commands::States(args) => states::execute(args, &engine, &output),
        Commands::Demographics => demographics::execute(&engine, &output),
        Commands::Anomalies => anomalies::execute(&engine, &output),
        Commands::Insights => insights::execute(&engine, &output),
        Commands::Config => config::execute(&cli, &output),
    }
}
