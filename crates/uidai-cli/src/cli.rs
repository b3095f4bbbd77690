use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use uidai_core::config::CliConfigOverrides;

/// UIDAI - Aadhaar enrollment and update analytics
#[derive(Parser, Debug)]
#[command(name = "uidai")]
#[command(about = "Aadhaar enrollment and update analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the cleaned CSV files
    #[arg(long, global = true, default_value = "data_clean")]
    pub data_dir: PathBuf,

    /// Path to data_cleaning_report.json
    #[arg(long, global = true)]
    pub report: Option<PathBuf>,

    /// TOML file with analytics thresholds
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Threshold overrides, highest precedence layer
#[derive(Args, Debug, Default)]
pub struct ThresholdArgs {
    /// Demographic duplicate rate that raises a data quality warning
    #[arg(long, global = true, value_name = "RATE")]
    pub duplicate_rate_warn: Option<f64>,

    /// Latest-week multiple of the trailing average that flags a regional spike
    #[arg(long, global = true, value_name = "MULTIPLE")]
    pub spike_multiple: Option<f64>,

    /// Demographic-to-biometric ratio that flags an update imbalance
    #[arg(long, global = true, value_name = "RATIO")]
    pub update_ratio: Option<f64>,

    /// Number of complete weeks in the spike baseline
    #[arg(long, global = true, value_name = "WEEKS")]
    pub trailing_weeks: Option<usize>,

    /// Recompute every query instead of memoizing results
    #[arg(long, global = true)]
    pub no_cache: bool,
}

impl ThresholdArgs {
    pub fn overrides(&self) -> CliConfigOverrides {
        CliConfigOverrides {
            duplicate_rate_warn_threshold: self.duplicate_rate_warn,
            spike_multiple_threshold: self.spike_multiple,
            update_ratio_threshold: self.update_ratio,
            trailing_weeks: self.trailing_weeks,
            no_cache: self.no_cache.then_some(true),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Headline metrics, top states and current anomalies
    Summary,

    /// Totals, success rate and data quality score
    Metrics,

    /// Daily enrollment and update totals
    Trends(TrendsArgs),

    /// State ranking by enrollments
    States(StatesArgs),

    /// Enrollment share by age group
    Demographics,

    /// Detected anomalies
    Anomalies,

    /// Recommended actions
    Insights,

    /// Show resolved thresholds and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct TrendsArgs {
    /// Number of days ending at the latest enrollment date
    #[arg(long, short = 'd', default_value = "30", allow_negative_numbers = true)]
    pub days: i64,
}

#[derive(Parser, Debug)]
pub struct StatesArgs {
    /// Number of states to show
    #[arg(long, short = 'n', default_value = "10", allow_negative_numbers = true)]
    pub top: i64,

    /// List every state with its region code
    #[arg(long, conflicts_with = "top")]
    pub all: bool,
}
