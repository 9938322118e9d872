use crate::config::Config;
use crate::core::types::LoadedReport;
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(debug: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // A second initialisation (tests, embedding) keeps the first logger
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config, data_dir: &Path) {
    info!(
        "Configuration: address={}, refresh_interval={}s, debug={}",
        config.bind_address(),
        config.refresh_interval_duration().as_secs(),
        config.is_debug()
    );
    info!(
        "Reports: data_dir={}, status_mapping={}",
        data_dir.display(),
        config
            .status_mapping
            .as_deref()
            .unwrap_or(crate::core::constants::status_mappings::DEFAULT)
    );
}

/// Log the outcome of a directory scan
pub fn log_scan(data_dir: &Path, file_count: usize) {
    debug!(
        "Found {file_count} report file(s) in {}",
        data_dir.display()
    );
}

pub fn log_report_loaded(loaded: &LoadedReport) {
    info!(
        "Loaded {} (vendor={}, timestamp={})",
        loaded.metadata.filename,
        loaded.report.vendor.as_deref().unwrap_or("unknown"),
        loaded.report.timestamp.as_deref().unwrap_or("none")
    );
}

/// Log a report file that could not be parsed
pub fn log_skipped_report(path: &Path, reason: &str) {
    warn!("Skipping {}: {reason}", path.display());
}

/// Log refresh completion
pub fn log_refresh_complete(
    has_data: bool,
    reports_loaded: usize,
    skipped: usize,
    duration_ms: u128,
) {
    if !has_data {
        info!("Refresh complete: no analysis data available ({duration_ms}ms)");
    } else if skipped == 0 {
        info!("✅ Refresh complete: {reports_loaded} report(s) loaded ({duration_ms}ms)");
    } else {
        warn!(
            "⚠️ Refresh complete: {reports_loaded} report(s) loaded, {skipped} skipped ({duration_ms}ms)"
        );
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
