use std::sync::Arc;

use uidai_analytics::AnalyticsEngine;
use uidai_core::config::LayeredConfig;
use uidai_core::error::Result;
use uidai_store::{load_context, CsvDatasetSource};

use crate::config::ApiConfig;

/// Resolve analytics configuration, load the datasets and build the engine.
///
/// Fails when any dataset cannot be loaded; the server must not start without data.
pub fn build_engine(config: &ApiConfig) -> Result<AnalyticsEngine> {
    let mut layered = LayeredConfig::with_defaults();
    if let Some(path) = &config.config_path {
        layered = layered.load_from_file(path)?;
    }
    let analytics_config = layered.load_from_env().resolve()?;

    let mut source = CsvDatasetSource::new(&config.data_dir);
    if let Some(report) = &config.report_path {
        source = source.with_report(report);
    }

    let context = load_context(&source)?;
    Ok(AnalyticsEngine::new(Arc::new(context), analytics_config))
}
