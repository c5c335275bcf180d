//! Configuration for the supplier registry and its exporters

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Smallest accepted progress step per upload tick (percent)
pub const MIN_PROGRESS_STEP: f64 = 1.0;

/// Largest accepted progress step per upload tick (percent)
pub const MAX_PROGRESS_STEP: f64 = 100.0;

/// Registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Seed the registry with demo suppliers on startup
    pub seed_mock_data: bool,

    /// Export configuration
    pub export: ExportConfig,

    /// Document upload configuration
    pub upload: UploadConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "esg-dashboard".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            seed_mock_data: true,
            export: ExportConfig::default(),
            upload: UploadConfig::default(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported files are written to
    pub output_dir: PathBuf,

    /// File name prefix for supplier CSV exports
    pub csv_prefix: String,

    /// File name prefix for portfolio reports
    pub report_prefix: String,

    /// File name prefix for JSON exports
    pub json_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./data/exports"),
            csv_prefix: "suppliers-export".to_string(),
            report_prefix: "suppliers-report".to_string(),
            json_prefix: "suppliers-data".to_string(),
        }
    }
}

/// Document upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum files accepted in one batch
    pub max_files: usize,

    /// Maximum size of a single file (bytes)
    pub max_file_bytes: u64,

    /// Simulated progress tick (milliseconds)
    pub tick_interval_ms: u64,

    /// Upper bound of the random progress added per tick (percent)
    pub max_progress_step: f64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_files: 5,
            max_file_bytes: 10 * 1024 * 1024, // 10 MB
            tick_interval_ms: 200,
            max_progress_step: 30.0,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| RegistryError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(dir) = std::env::var("ESG_EXPORT_DIR") {
            config.export.output_dir = PathBuf::from(dir);
        }

        if let Ok(value) = std::env::var("ESG_MAX_UPLOAD_FILES") {
            config.upload.max_files = parse_env("ESG_MAX_UPLOAD_FILES", &value)?;
        }

        if let Ok(value) = std::env::var("ESG_MAX_UPLOAD_BYTES") {
            config.upload.max_file_bytes = parse_env("ESG_MAX_UPLOAD_BYTES", &value)?;
        }

        if let Ok(value) = std::env::var("ESG_SEED_MOCK_DATA") {
            config.seed_mock_data = parse_env("ESG_SEED_MOCK_DATA", &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.upload.max_files == 0 {
            return Err(RegistryError::ConfigError(
                "upload.max_files must be at least 1".to_string(),
            ));
        }
        let step = self.upload.max_progress_step;
        if !(MIN_PROGRESS_STEP..=MAX_PROGRESS_STEP).contains(&step) {
            return Err(RegistryError::ConfigError(format!(
                "upload.max_progress_step must be between {} and {}, got {}",
                MIN_PROGRESS_STEP, MAX_PROGRESS_STEP, step
            )));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| RegistryError::ConfigError(format!("Invalid value for {}: {}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service_name, "esg-dashboard");
        assert_eq!(config.upload.max_files, 5);
        assert_eq!(config.upload.max_file_bytes, 10_485_760);
        assert!(config.seed_mock_data);
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            seed_mock_data = false

            [export]
            output_dir = "/tmp/esg"
            "#,
        )
        .unwrap();

        assert!(!config.seed_mock_data);
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/esg"));
        assert_eq!(config.export.csv_prefix, "suppliers-export");
        assert_eq!(config.export.json_prefix, "suppliers-data");
        assert_eq!(config.upload.tick_interval_ms, 200);
    }

    #[test]
    fn test_from_file_rejects_zero_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("esg.toml");
        std::fs::write(&path, "[upload]\nmax_files = 0\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, RegistryError::ConfigError(_)));
    }

    #[test]
    fn test_from_file_rejects_bad_progress_step() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("esg.toml");

        for step in ["inf", "nan", "0.0", "-1.0", "250.0"] {
            std::fs::write(&path, format!("[upload]\nmax_progress_step = {}\n", step)).unwrap();
            let err = Config::from_file(&path).unwrap_err();
            assert!(matches!(err, RegistryError::ConfigError(_)), "step {}", step);
        }

        std::fs::write(&path, "[upload]\nmax_progress_step = 100.0\n").unwrap();
        assert_eq!(Config::from_file(&path).unwrap().upload.max_progress_step, 100.0);
    }
}
