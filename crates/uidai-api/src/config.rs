use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_DATA_DIR: &str = "data_clean";

/// API server configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,

    /// Directory holding the cleaned CSV files
    pub data_dir: PathBuf,

    /// Optional `data_cleaning_report.json`
    pub report_path: Option<PathBuf>,

    /// Optional TOML file with analytics thresholds
    pub config_path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            report_path: None,
            config_path: None,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("UIDAI_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let cors_origin = env::var("UIDAI_CORS_ORIGIN").unwrap_or(defaults.cors_origin);

        let data_dir = env::var("UIDAI_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        Self {
            port,
            cors_origin,
            data_dir,
            report_path: env::var("UIDAI_REPORT").ok().map(PathBuf::from),
            config_path: env::var("UIDAI_CONFIG").ok().map(PathBuf::from),
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 5] = [
        "UIDAI_PORT",
        "UIDAI_CORS_ORIGIN",
        "UIDAI_DATA_DIR",
        "UIDAI_REPORT",
        "UIDAI_CONFIG",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = ApiConfig::from_env();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("UIDAI_PORT", "9100");
        env::set_var("UIDAI_DATA_DIR", "/srv/uidai");
        env::set_var("UIDAI_REPORT", "/srv/uidai/report.json");

        let config = ApiConfig::from_env();
        assert_eq!(config.port, 9100);
        assert_eq!(config.data_dir, PathBuf::from("/srv/uidai"));
        assert_eq!(config.report_path, Some(PathBuf::from("/srv/uidai/report.json")));
        assert!(config.config_path.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_bad_port_falls_back() {
        clear_env();
        env::set_var("UIDAI_PORT", "not-a-port");
        assert_eq!(ApiConfig::from_env().port, 8000);
        clear_env();
    }
}
