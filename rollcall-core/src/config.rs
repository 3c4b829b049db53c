//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/rollcall/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/rollcall/` (~/.config/rollcall/)
//! - Data: `$XDG_DATA_HOME/rollcall/` (~/.local/share/rollcall/)
//! - State/Logs: `$XDG_STATE_HOME/rollcall/` (~/.local/state/rollcall/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics thresholds and window sizes
#[derive(Debug, Deserialize)]
pub struct AnalyticsConfig {
    /// Consistency score below which a student lands on the
    /// low-attendance list (0-10 scale)
    #[serde(default = "default_low_score_threshold")]
    pub low_score_threshold: f64,

    /// Number of students on the top-regulars list
    #[serde(default = "default_top_regulars")]
    pub top_regulars: usize,

    /// Number of students enumerated in the shareable summary
    #[serde(default = "default_summary_top_count")]
    pub summary_top_count: usize,

    /// Number of record days in the daily trend series
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,

    /// Whole months of history shown in the calendar heatmap
    #[serde(default = "default_heatmap_months_back")]
    pub heatmap_months_back: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            low_score_threshold: default_low_score_threshold(),
            top_regulars: default_top_regulars(),
            summary_top_count: default_summary_top_count(),
            trend_window: default_trend_window(),
            heatmap_months_back: default_heatmap_months_back(),
        }
    }
}

fn default_low_score_threshold() -> f64 {
    5.0
}

fn default_top_regulars() -> usize {
    5
}

fn default_summary_top_count() -> usize {
    3
}

fn default_trend_window() -> usize {
    30
}

fn default_heatmap_months_back() -> u32 {
    3
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/rollcall/config.toml` (~/.config/rollcall/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("rollcall").join("config.toml")
    }

    /// Returns the data directory path (for the attendance snapshot)
    ///
    /// `$XDG_DATA_HOME/rollcall/` (~/.local/share/rollcall/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("rollcall")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/rollcall/` (~/.local/state/rollcall/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("rollcall")
    }

    /// Returns the snapshot file path
    ///
    /// `$XDG_DATA_HOME/rollcall/attendance.json`
    pub fn snapshot_path() -> PathBuf {
        Self::data_dir().join("attendance.json")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/rollcall/rollcall.log`
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("rollcall.log")
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// This is mainly for CLI binaries that want explicit, stable path
    /// behavior before invoking other components that read these env vars.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_DATA_HOME").is_err() {
            std::env::set_var("XDG_DATA_HOME", home.join(".local/share"));
        }

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analytics.low_score_threshold, 5.0);
        assert_eq!(config.analytics.top_regulars, 5);
        assert_eq!(config.analytics.trend_window, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analytics]
low_score_threshold = 4.0
trend_window = 14

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.analytics.low_score_threshold, 4.0);
        assert_eq!(config.analytics.trend_window, 14);
        // Unspecified fields keep their defaults
        assert_eq!(config.analytics.top_regulars, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.max_files, 5);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.analytics.heatmap_months_back, 3);
        assert_eq!(config.analytics.summary_top_count, 3);
    }
}
