//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::analysis::StatusMappingKind;
use crate::core::constants::{config_files, server, status_mappings};
use crate::core::error::{DashboardError, Result};
use crate::discovery::resolve_data_dir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `kafka-analysis-*.json` reports
    pub data_dir: Option<String>,

    /// Address the HTTP server binds to
    pub host: Option<String>,

    /// Port the HTTP server listens on
    pub port: Option<u16>,

    /// Enable debug logging
    pub debug: Option<bool>,

    /// Seconds between automatic refreshes
    pub refresh_interval: Option<u64>,

    /// How health check statuses are shown (always-passed, reported)
    pub status_mapping: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None, // Resolved from well-known locations
            host: Some(server::DEFAULT_HOST.to_string()),
            port: Some(server::DEFAULT_PORT),
            debug: Some(false),
            refresh_interval: Some(server::DEFAULT_REFRESH_INTERVAL_SECONDS),
            status_mapping: Some(status_mappings::DEFAULT.to_string()),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults for absent keys
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let parsed: Config = toml::from_str(&content).map_err(|e| {
            DashboardError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::default().overlay(parsed);
        config.validate()?;
        Ok(config)
    }

    /// Look for a config file in `start` and up to three of its parents
    pub fn load_from_dir(start: &Path) -> Self {
        let mut dir = Some(start);
        for _ in 0..=config_files::MAX_PARENT_LEVELS {
            let Some(current) = dir else {
                break;
            };

            let candidate = current.join(config_files::FILE_NAME);
            if candidate.is_file() {
                match Self::load_from_file(&candidate) {
                    Ok(config) => {
                        log::debug!("Loaded configuration from {}", candidate.display());
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring {}: {e}", candidate.display()),
                }
            }
            dir = current.parent();
        }

        Self::default()
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        match std::env::current_dir() {
            Ok(cwd) => Self::load_from_dir(&cwd),
            Err(_) => Self::default(),
        }
    }

    fn overlay(mut self, other: Config) -> Self {
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.host.is_some() {
            self.host = other.host;
        }
        if other.port.is_some() {
            self.port = other.port;
        }
        if other.debug.is_some() {
            self.debug = other.debug;
        }
        if other.refresh_interval.is_some() {
            self.refresh_interval = other.refresh_interval;
        }
        if other.status_mapping.is_some() {
            self.status_mapping = other.status_mapping;
        }
        self
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(ref data_dir) = cli_config.data_dir {
            self.data_dir = Some(data_dir.clone());
        }
        if let Some(ref host) = cli_config.host {
            self.host = Some(host.clone());
        }
        if let Some(port) = cli_config.port {
            self.port = Some(port);
        }
        if cli_config.debug {
            self.debug = Some(true);
        }
        if let Some(interval) = cli_config.refresh_interval {
            self.refresh_interval = Some(interval);
        }
        if let Some(ref mapping) = cli_config.status_mapping {
            self.status_mapping = Some(mapping.clone());
        }
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(server::DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(server::DEFAULT_PORT)
    }

    /// `host:port` string handed to the TCP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }

    pub fn is_debug(&self) -> bool {
        self.debug.unwrap_or(false)
    }

    pub fn refresh_interval_duration(&self) -> Duration {
        Duration::from_secs(
            self.refresh_interval
                .unwrap_or(server::DEFAULT_REFRESH_INTERVAL_SECONDS),
        )
    }

    pub fn status_mapping_kind(&self) -> Result<StatusMappingKind> {
        self.status_mapping
            .as_deref()
            .unwrap_or(status_mappings::DEFAULT)
            .parse()
    }

    /// The configured data directory, or the first well-known one that exists
    pub fn resolved_data_dir(&self) -> PathBuf {
        resolve_data_dir(self.data_dir.as_deref())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(ref host) = self.host
            && host.trim().is_empty()
        {
            return Err(DashboardError::Config(
                "Host cannot be empty. Expected an address such as 127.0.0.1.".to_string(),
            ));
        }

        if self.port == Some(0) {
            return Err(DashboardError::Config(
                "Port cannot be 0. Expected a number between 1-65535.".to_string(),
            ));
        }

        if let Some(interval) = self.refresh_interval {
            if interval == 0 {
                return Err(DashboardError::Config(
                    "Refresh interval cannot be 0. Expected a positive number of seconds."
                        .to_string(),
                ));
            }
            if interval > server::MAX_REFRESH_INTERVAL_SECONDS {
                return Err(DashboardError::Config(format!(
                    "Refresh interval of {interval} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        if let Some(ref data_dir) = self.data_dir
            && data_dir.trim().is_empty()
        {
            return Err(DashboardError::Config(
                "Data directory cannot be empty.".to_string(),
            ));
        }

        self.status_mapping_kind()?;

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub data_dir: Option<String>,         // --data-dir
    pub host: Option<String>,             // --host
    pub port: Option<u16>,                // --port
    pub debug: bool,                      // --debug
    pub refresh_interval: Option<u64>,    // --refresh-interval
    pub status_mapping: Option<String>,   // --status-mapping
    pub quiet: bool,                      // --quiet

    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.data_dir, None);
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), 8050);
        assert!(!config.is_debug());
        assert_eq!(config.refresh_interval_duration(), Duration::from_secs(30));
        assert_eq!(
            config.status_mapping_kind().unwrap(),
            StatusMappingKind::AlwaysPassed
        );
        assert_eq!(config.bind_address(), "127.0.0.1:8050");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(
            b"data_dir = \"/srv/kafka-analysis\"\nport = 9000\nstatus_mapping = \"reported\"",
        )?;

        let config = Config::load_from_file(file.path())?;

        assert_eq!(config.data_dir.as_deref(), Some("/srv/kafka-analysis"));
        assert_eq!(config.port(), 9000);
        assert_eq!(config.status_mapping_kind()?, StatusMappingKind::Reported);
        // keys absent from the file keep their defaults
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.refresh_interval, Some(30));
        Ok(())
    }

    #[test]
    fn test_config_load_from_file__missing() {
        let result = Config::load_from_file("/definitely/not/here.toml");

        match result {
            Err(DashboardError::Config(msg)) => assert!(msg.contains("Could not read")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_load_from_file__invalid_toml() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"port = \"not a number")?;

        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid TOML"));
        Ok(())
    }

    #[test]
    fn test_config_load_from_file__invalid_values() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"refresh_interval = 0")?;

        assert!(Config::load_from_file(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_config_load_from_dir__searches_parents() -> Result<()> {
        let root = tempfile::tempdir()?;
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested)?;
        std::fs::write(root.path().join("a").join(".kafka-dashboard.toml"), "port = 9100")?;

        let config = Config::load_from_dir(&nested);

        assert_eq!(config.port(), 9100);
        Ok(())
    }

    #[test]
    fn test_config_load_from_dir__nearest_wins() -> Result<()> {
        let root = tempfile::tempdir()?;
        let nested = root.path().join("a");
        std::fs::create_dir_all(&nested)?;
        std::fs::write(root.path().join(".kafka-dashboard.toml"), "port = 9100")?;
        std::fs::write(nested.join(".kafka-dashboard.toml"), "port = 9200")?;

        assert_eq!(Config::load_from_dir(&nested).port(), 9200);
        Ok(())
    }

    #[test]
    fn test_config_load_from_dir__invalid_file_falls_back() -> Result<()> {
        let root = tempfile::tempdir()?;
        std::fs::write(root.path().join(".kafka-dashboard.toml"), "port = 0")?;

        assert_eq!(Config::load_from_dir(root.path()), Config::default());
        Ok(())
    }

    #[test]
    fn test_config_load_from_dir__nothing_found() -> Result<()> {
        let root = tempfile::tempdir()?;
        assert_eq!(Config::load_from_dir(root.path()), Config::default());
        Ok(())
    }

    #[test]
    fn test_config_merge_with_cli() {
        let mut config = Config::default();
        let cli_config = CliConfig {
            data_dir: Some("reports".to_string()),
            port: Some(8080),
            debug: true,
            refresh_interval: Some(5),
            status_mapping: Some("reported".to_string()),
            ..Default::default()
        };

        config.merge_with_cli(&cli_config);

        assert_eq!(config.data_dir.as_deref(), Some("reports"));
        assert_eq!(config.port(), 8080);
        assert!(config.is_debug());
        assert_eq!(config.refresh_interval_duration(), Duration::from_secs(5));
        assert_eq!(config.status_mapping.as_deref(), Some("reported"));
        assert_eq!(config.host(), "127.0.0.1");
    }

    #[test]
    fn test_config_merge_with_cli__empty_keeps_values() {
        let mut config = Config {
            port: Some(9999),
            debug: Some(true),
            ..Default::default()
        };

        config.merge_with_cli(&CliConfig::default());

        assert_eq!(config.port(), 9999);
        assert!(config.is_debug());
    }

    #[test]
    fn test_validate__port_zero() {
        let config = Config {
            port: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate__refresh_interval_bounds() {
        let too_small = Config {
            refresh_interval: Some(0),
            ..Default::default()
        };
        let too_large = Config {
            refresh_interval: Some(86_401),
            ..Default::default()
        };
        let max = Config {
            refresh_interval: Some(86_400),
            ..Default::default()
        };

        assert!(too_small.validate().is_err());
        assert!(too_large.validate().is_err());
        assert!(max.validate().is_ok());
    }

    #[test]
    fn test_validate__unknown_status_mapping() {
        let config = Config {
            status_mapping: Some("sometimes".to_string()),
            ..Default::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("always-passed, reported"));
    }

    #[test]
    fn test_validate__empty_host_and_data_dir() {
        let empty_host = Config {
            host: Some("  ".to_string()),
            ..Default::default()
        };
        let empty_dir = Config {
            data_dir: Some(String::new()),
            ..Default::default()
        };

        assert!(empty_host.validate().is_err());
        assert!(empty_dir.validate().is_err());
    }

    #[test]
    fn test_resolved_data_dir__explicit() {
        let config = Config {
            data_dir: Some("/var/reports".to_string()),
            ..Default::default()
        };

        assert_eq!(config.resolved_data_dir(), PathBuf::from("/var/reports"));
    }
}
