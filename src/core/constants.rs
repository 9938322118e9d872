/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes all magic strings, numbers, and other literal values
/// used across the application, making them easier to maintain and modify.
/// Report file naming
pub mod reports {
    /// Prefix every analyzer report file name starts with
    pub const FILE_PREFIX: &str = "kafka-analysis-";
    /// Extension of analyzer report files
    pub const FILE_EXTENSION: &str = ".json";
    /// Human readable form of the file pattern
    pub const FILE_PATTERN: &str = "kafka-analysis-*.json";
    /// Directory name the analyzer writes into by default
    pub const DATA_DIR_NAME: &str = "kafka-analysis";
    /// Relative directory used when no data directory can be located
    pub const FALLBACK_DATA_DIR: &str = "../kafka-analysis";
}

/// Server defaults
pub mod server {
    /// Default bind address
    pub const DEFAULT_HOST: &str = "127.0.0.1";
    /// Default HTTP port
    pub const DEFAULT_PORT: u16 = 8050;
    /// Default refresh interval in seconds
    pub const DEFAULT_REFRESH_INTERVAL_SECONDS: u64 = 30;
    /// Upper bound accepted for the refresh interval (24 hours)
    pub const MAX_REFRESH_INTERVAL_SECONDS: u64 = 86_400;
}

/// Health score thresholds shared by the gauge, cards and terminal output
pub mod health {
    /// Scores at or above this value are healthy
    pub const HEALTHY_THRESHOLD: f64 = 90.0;
    /// Scores at or above this value (and below healthy) are degraded
    pub const DEGRADED_THRESHOLD: f64 = 70.0;
    /// Target line drawn on gauges and trend charts
    pub const TARGET_SCORE: f64 = 90.0;
    pub const MAX_SCORE: f64 = 100.0;
}

/// Status mapping names accepted in configuration
pub mod status_mappings {
    /// Every check is reported as passed
    pub const ALWAYS_PASSED: &str = "always-passed";
    /// The status written by the analyzer is used
    pub const REPORTED: &str = "reported";

    pub const DEFAULT: &str = ALWAYS_PASSED;
    pub const ALL: [&str; 2] = [ALWAYS_PASSED, REPORTED];
}

/// Output format constants for the `check` command
pub mod output_formats {
    pub const TEXT: &str = "text";
    pub const JSON: &str = "json";

    pub const DEFAULT: &str = TEXT;
    pub const ALL: [&str; 2] = [TEXT, JSON];
}

/// Placeholder values for missing report fields
pub mod fallbacks {
    pub const UNKNOWN: &str = "Unknown";
    pub const NO_DESCRIPTION: &str = "No description available";
    pub const NO_RECOMMENDATION: &str = "No recommendation";
    pub const CHECK_NAME_PREFIX: &str = "Health Check";
}

/// Configuration file locations
pub mod config_files {
    /// File name searched for in the working directory and its parents
    pub const FILE_NAME: &str = ".kafka-dashboard.toml";
    /// How many parent directories are searched
    pub const MAX_PARENT_LEVELS: usize = 3;
}

/// Command users run to produce reports
pub const ANALYZER_COMMAND: &str = "npx superstream-kafka-analyzer --config config.json";
