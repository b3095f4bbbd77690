//! Configuration and dataset loading shared by the commands

use anyhow::{Context, Result};
use std::sync::Arc;

use uidai_analytics::AnalyticsEngine;
use uidai_core::config::LayeredConfig;
use uidai_store::{load_context, CsvDatasetSource, DatasetSource};

use crate::cli::Cli;

/// Layer defaults, the optional config file, `UIDAI_*` variables and CLI flags
pub fn load_layered_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();
    if let Some(path) = &cli.config {
        config = config
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }
    let mut config = config.load_from_env();
    config.update_from_cli(cli.thresholds.overrides());
    Ok(config)
}

fn dataset_source(cli: &Cli) -> CsvDatasetSource {
    let source = CsvDatasetSource::new(&cli.data_dir);
    match &cli.report {
        Some(report) => source.with_report(report),
        None => source,
    }
}

/// Resolve configuration and load every dataset into a ready engine
pub fn load_engine(cli: &Cli) -> Result<(AnalyticsEngine, String)> {
    let config = load_layered_config(cli)?
        .resolve()
        .context("Invalid analytics configuration")?;

    let source = dataset_source(cli);
    let description = source.describe();

    let context = load_context(&source).with_context(|| {
        format!(
            "Failed to load datasets from {}. Run the cleaning stage or pass --data-dir",
            cli.data_dir.display()
        )
    })?;

    Ok((AnalyticsEngine::new(Arc::new(context), config), description))
}
