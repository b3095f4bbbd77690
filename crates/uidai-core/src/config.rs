use crate::error::{Result, UidaiError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Thresholds consulted by the anomaly rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyThresholds {
    /// Demographic duplicate-removal rate above which a warning is raised
    pub duplicate_rate_warn_threshold: f64,
    /// Multiple of the trailing weekly average that counts as a regional spike
    pub spike_multiple_threshold: f64,
    /// Biometric-to-demographic update ratio above which a warning is raised
    pub update_ratio_threshold: f64,
    /// Number of complete weeks forming the spike baseline
    pub trailing_weeks: usize,
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            duplicate_rate_warn_threshold: 0.2,
            spike_multiple_threshold: 1.5,
            update_ratio_threshold: 1.5,
            trailing_weeks: 4,
        }
    }
}

/// Thresholds consulted by the insight rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsightThresholds {
    /// Percentage of 0-5 enrollments that marks a young-population drive
    pub young_share_threshold: f64,
    /// Relative weekend uplift over weekdays that marks a surge
    pub weekend_uplift_threshold: f64,
    /// Data quality score below which a review is suggested
    pub quality_review_threshold: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            young_share_threshold: 60.0,
            weekend_uplift_threshold: 0.10,
            quality_review_threshold: 90.0,
        }
    }
}

/// Weights of the data quality score; they sum to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityWeights {
    pub duplicate: f64,
    pub invalid_state: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            duplicate: 0.6,
            invalid_state: 0.4,
        }
    }
}

/// Resolved, validated configuration handed to the analytics engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub anomalies: AnomalyThresholds,
    pub insights: InsightThresholds,
    pub quality: QualityWeights,
    pub cache_enabled: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            anomalies: AnomalyThresholds::default(),
            insights: InsightThresholds::default(),
            quality: QualityWeights::default(),
            cache_enabled: true,
        }
    }
}

/// Layered configuration for the analytics engine
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub duplicate_rate_warn_threshold: ConfigValue<f64>,
    pub spike_multiple_threshold: ConfigValue<f64>,
    pub update_ratio_threshold: ConfigValue<f64>,
    pub trailing_weeks: ConfigValue<usize>,
    pub young_share_threshold: ConfigValue<f64>,
    pub weekend_uplift_threshold: ConfigValue<f64>,
    pub quality_review_threshold: ConfigValue<f64>,
    pub duplicate_weight: ConfigValue<f64>,
    pub invalid_state_weight: ConfigValue<f64>,
    pub cache_enabled: ConfigValue<bool>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        let defaults = AnalyticsConfig::default();
        let d = ConfigSource::Default;
        Self {
            duplicate_rate_warn_threshold: ConfigValue::new(
                defaults.anomalies.duplicate_rate_warn_threshold,
                d,
            ),
            spike_multiple_threshold: ConfigValue::new(
                defaults.anomalies.spike_multiple_threshold,
                d,
            ),
            update_ratio_threshold: ConfigValue::new(defaults.anomalies.update_ratio_threshold, d),
            trailing_weeks: ConfigValue::new(defaults.anomalies.trailing_weeks, d),
            young_share_threshold: ConfigValue::new(defaults.insights.young_share_threshold, d),
            weekend_uplift_threshold: ConfigValue::new(
                defaults.insights.weekend_uplift_threshold,
                d,
            ),
            quality_review_threshold: ConfigValue::new(
                defaults.insights.quality_review_threshold,
                d,
            ),
            duplicate_weight: ConfigValue::new(defaults.quality.duplicate, d),
            invalid_state_weight: ConfigValue::new(defaults.quality.invalid_state, d),
            cache_enabled: ConfigValue::new(defaults.cache_enabled, d),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| UidaiError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| UidaiError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        let src = ConfigSource::File;
        if let Some(v) = file_config.duplicate_rate_warn_threshold {
            self.duplicate_rate_warn_threshold.update(v, src);
        }
        if let Some(v) = file_config.spike_multiple_threshold {
            self.spike_multiple_threshold.update(v, src);
        }
        if let Some(v) = file_config.update_ratio_threshold {
            self.update_ratio_threshold.update(v, src);
        }
        if let Some(v) = file_config.trailing_weeks {
            self.trailing_weeks.update(v, src);
        }
        if let Some(v) = file_config.young_share_threshold {
            self.young_share_threshold.update(v, src);
        }
        if let Some(v) = file_config.weekend_uplift_threshold {
            self.weekend_uplift_threshold.update(v, src);
        }
        if let Some(v) = file_config.quality_review_threshold {
            self.quality_review_threshold.update(v, src);
        }
        if let Some(v) = file_config.duplicate_weight {
            self.duplicate_weight.update(v, src);
        }
        if let Some(v) = file_config.invalid_state_weight {
            self.invalid_state_weight.update(v, src);
        }
        if let Some(v) = file_config.cache_enabled {
            self.cache_enabled.update(v, src);
        }

        Ok(self)
    }

    /// Load configuration from `UIDAI_*` environment variables
    pub fn load_from_env(mut self) -> Self {
        env_override("UIDAI_DUPLICATE_RATE_WARN_THRESHOLD", &mut self.duplicate_rate_warn_threshold);
        env_override("UIDAI_SPIKE_MULTIPLE_THRESHOLD", &mut self.spike_multiple_threshold);
        env_override("UIDAI_UPDATE_RATIO_THRESHOLD", &mut self.update_ratio_threshold);
        env_override("UIDAI_TRAILING_WEEKS", &mut self.trailing_weeks);
        env_override("UIDAI_YOUNG_SHARE_THRESHOLD", &mut self.young_share_threshold);
        env_override("UIDAI_WEEKEND_UPLIFT_THRESHOLD", &mut self.weekend_uplift_threshold);
        env_override("UIDAI_QUALITY_REVIEW_THRESHOLD", &mut self.quality_review_threshold);
        env_override("UIDAI_DUPLICATE_WEIGHT", &mut self.duplicate_weight);
        env_override("UIDAI_INVALID_STATE_WEIGHT", &mut self.invalid_state_weight);
        env_override("UIDAI_CACHE_ENABLED", &mut self.cache_enabled);
        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        let src = ConfigSource::Cli;
        if let Some(v) = overrides.duplicate_rate_warn_threshold {
            self.duplicate_rate_warn_threshold.update(v, src);
        }
        if let Some(v) = overrides.spike_multiple_threshold {
            self.spike_multiple_threshold.update(v, src);
        }
        if let Some(v) = overrides.update_ratio_threshold {
            self.update_ratio_threshold.update(v, src);
        }
        if let Some(v) = overrides.trailing_weeks {
            self.trailing_weeks.update(v, src);
        }
        if let Some(v) = overrides.no_cache {
            self.cache_enabled.update(!v, src);
        }
    }

    /// Validate every value and produce the engine configuration
    pub fn resolve(&self) -> Result<AnalyticsConfig> {
        let non_negative = [
            ("duplicate_rate_warn_threshold", self.duplicate_rate_warn_threshold.value),
            ("spike_multiple_threshold", self.spike_multiple_threshold.value),
            ("update_ratio_threshold", self.update_ratio_threshold.value),
            ("young_share_threshold", self.young_share_threshold.value),
            ("weekend_uplift_threshold", self.weekend_uplift_threshold.value),
            ("quality_review_threshold", self.quality_review_threshold.value),
            ("duplicate_weight", self.duplicate_weight.value),
            ("invalid_state_weight", self.invalid_state_weight.value),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(UidaiError::ConfigInvalid {
                    key: key.to_string(),
                    reason: format!("expected a non-negative number, got {}", value),
                });
            }
        }

        if self.trailing_weeks.value == 0 {
            return Err(UidaiError::ConfigInvalid {
                key: "trailing_weeks".to_string(),
                reason: "at least one trailing week is required".to_string(),
            });
        }

        let weight_sum = self.duplicate_weight.value + self.invalid_state_weight.value;
        if (weight_sum - 1.0).abs() > 1e-9 {
            return Err(UidaiError::ConfigInvalid {
                key: "duplicate_weight".to_string(),
                reason: format!("quality weights must sum to 1.0, got {}", weight_sum),
            });
        }

        Ok(AnalyticsConfig {
            anomalies: AnomalyThresholds {
                duplicate_rate_warn_threshold: self.duplicate_rate_warn_threshold.value,
                spike_multiple_threshold: self.spike_multiple_threshold.value,
                update_ratio_threshold: self.update_ratio_threshold.value,
                trailing_weeks: self.trailing_weeks.value,
            },
            insights: InsightThresholds {
                young_share_threshold: self.young_share_threshold.value,
                weekend_uplift_threshold: self.weekend_uplift_threshold.value,
                quality_review_threshold: self.quality_review_threshold.value,
            },
            quality: QualityWeights {
                duplicate: self.duplicate_weight.value,
                invalid_state: self.invalid_state_weight.value,
            },
            cache_enabled: self.cache_enabled.value,
        })
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();
        insert(&mut map, "duplicate_rate_warn_threshold", &self.duplicate_rate_warn_threshold);
        insert(&mut map, "spike_multiple_threshold", &self.spike_multiple_threshold);
        insert(&mut map, "update_ratio_threshold", &self.update_ratio_threshold);
        insert(&mut map, "trailing_weeks", &self.trailing_weeks);
        insert(&mut map, "young_share_threshold", &self.young_share_threshold);
        insert(&mut map, "weekend_uplift_threshold", &self.weekend_uplift_threshold);
        insert(&mut map, "quality_review_threshold", &self.quality_review_threshold);
        insert(&mut map, "duplicate_weight", &self.duplicate_weight);
        insert(&mut map, "invalid_state_weight", &self.invalid_state_weight);
        insert(&mut map, "cache_enabled", &self.cache_enabled);
        map
    }
}

fn insert<T: Display>(
    map: &mut HashMap<String, (String, ConfigSource)>,
    key: &str,
    value: &ConfigValue<T>,
) {
    map.insert(key.to_string(), (value.value.to_string(), value.source));
}

fn env_override<T: FromStr>(key: &str, target: &mut ConfigValue<T>) {
    if let Ok(raw) = env::var(key) {
        match raw.trim().parse::<T>() {
            Ok(value) => target.update(value, ConfigSource::Environment),
            Err(_) => tracing::warn!("Ignoring invalid {} value '{}'", key, raw),
        }
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    duplicate_rate_warn_threshold: Option<f64>,
    spike_multiple_threshold: Option<f64>,
    update_ratio_threshold: Option<f64>,
    trailing_weeks: Option<usize>,
    young_share_threshold: Option<f64>,
    weekend_uplift_threshold: Option<f64>,
    quality_review_threshold: Option<f64>,
    duplicate_weight: Option<f64>,
    invalid_state_weight: Option<f64>,
    cache_enabled: Option<bool>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub duplicate_rate_warn_threshold: Option<f64>,
    pub spike_multiple_threshold: Option<f64>,
    pub update_ratio_threshold: Option<f64>,
    pub trailing_weeks: Option<usize>,
    pub no_cache: Option<bool>,
}
