//! Terminal output for the startup banner, `check` and `export`

use serde::Serialize;
use std::path::Path;

use crate::analysis::snapshot::DashboardSnapshot;
use crate::config::Config;
use crate::core::constants::{ANALYZER_COMMAND, output_formats, reports};
use crate::core::error::Result;
use crate::discovery::ReportInventory;
use crate::reporting::charts::HealthBand;
use crate::ui::color::{Colors, band_color, colorize};

fn label(text: &str) -> String {
    colorize(&colorize(text, Colors::BOLD), Colors::BRIGHT_CYAN)
}

fn value(text: &str) -> String {
    colorize(text, Colors::BRIGHT_WHITE)
}

/// Lines printed before the server starts
pub fn startup_banner(inventory: &ReportInventory, config: &Config) -> Vec<String> {
    let mut lines = vec![
        colorize("🚀 Kafka Analysis Dashboard", Colors::BOLD),
        format!(
            "{}: {}",
            label("Data directory"),
            value(&inventory.data_dir.display().to_string())
        ),
    ];

    if inventory.has_reports() {
        lines.push(format!(
            "{}: {}",
            label("Report files"),
            value(&inventory.files.len().to_string())
        ));
        if let Some(newest) = inventory.newest() {
            lines.push(format!("{}: {}", label("Latest report"), value(newest)));
        }
    } else {
        let reason = if inventory.exists {
            format!("No {} files found", reports::FILE_PATTERN)
        } else {
            "Data directory does not exist".to_string()
        };
        lines.push(colorize(&format!("⚠️  {reason}"), Colors::YELLOW));
        lines.push(format!(
            "   Run the analyzer first: {}",
            colorize(ANALYZER_COMMAND, Colors::BRIGHT_WHITE)
        ));
    }

    lines.push(format!(
        "{}: {}",
        label("Dashboard URL"),
        value(&format!("http://{}", config.bind_address()))
    ));
    lines.push(format!(
        "{}: every {}s, or use the Refresh Now button",
        label("Auto-refresh"),
        config.refresh_interval_duration().as_secs()
    ));
    lines.push(colorize("Press Ctrl+C to stop", Colors::DIM));
    lines
}

pub fn display_startup_banner(inventory: &ReportInventory, config: &Config) {
    for line in startup_banner(inventory, config) {
        println!("{line}");
    }
    println!();
}

/// Result of a one-shot `check`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    pub report_file: String,
    pub vendor: String,
    pub timestamp: String,
    pub health_score: f64,
    pub band: HealthBand,
    pub passed_checks: u32,
    pub failed_checks: u32,
    pub warnings: u32,
    pub total_checks: u32,
    pub topics: usize,
    pub brokers: usize,
    pub consumer_groups: usize,
    pub reports_loaded: usize,
    pub skipped: usize,
    pub fail_under: Option<f64>,
    pub passed_threshold: bool,
}

impl CheckSummary {
    /// `None` when the snapshot holds no report
    pub fn from_snapshot(snapshot: &DashboardSnapshot, fail_under: Option<f64>) -> Option<Self> {
        let overview = snapshot.overview.as_ref()?;
        let report_file = snapshot
            .latest
            .as_ref()
            .map(|latest| latest.metadata.filename.clone())
            .unwrap_or_default();

        Some(Self {
            report_file,
            vendor: overview.vendor.clone(),
            timestamp: overview.timestamp.clone(),
            health_score: overview.health_score,
            band: HealthBand::for_score(overview.health_score),
            passed_checks: overview.health_checks.passed_checks,
            failed_checks: overview.health_checks.failed_checks,
            warnings: overview.health_checks.warnings,
            total_checks: overview.health_checks.total_checks,
            topics: overview.topics.total,
            brokers: overview.brokers.total_brokers,
            consumer_groups: overview.consumer_groups.total,
            reports_loaded: snapshot.reports_loaded,
            skipped: snapshot.skipped.len(),
            fail_under,
            passed_threshold: fail_under.is_none_or(|min| overview.health_score >= min),
        })
    }
}

pub fn check_text(summary: &CheckSummary) -> String {
    let score = colorize(
        &format!("{:.1}%", summary.health_score),
        band_color(summary.band),
    );

    let mut out = format!(
        "{}: {}\n{}: {} ({})\n{}: {}\n{}: {} passed, {} failed, {} warnings of {}\n{}: {} topics, {} brokers, {} consumer groups\n",
        label("Report"),
        value(&summary.report_file),
        label("Cluster"),
        value(&summary.vendor),
        summary.timestamp,
        label("Health score"),
        score,
        label("Checks"),
        summary.passed_checks,
        summary.failed_checks,
        summary.warnings,
        summary.total_checks,
        label("Inventory"),
        summary.topics,
        summary.brokers,
        summary.consumer_groups,
    );

    if summary.skipped > 0 {
        out.push_str(&colorize(
            &format!("⚠️  {} report file(s) could not be parsed\n", summary.skipped),
            Colors::YELLOW,
        ));
    }

    if let Some(min) = summary.fail_under {
        let verdict = if summary.passed_threshold {
            colorize(&format!("✅ Health score meets {min:.1}%"), Colors::GREEN)
        } else {
            colorize(&format!("❌ Health score is below {min:.1}%"), Colors::RED)
        };
        out.push_str(&verdict);
        out.push('\n');
    }

    out
}

pub fn check_json(summary: &CheckSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Print the `check` result; returns whether the run should succeed
pub fn display_check(
    snapshot: &DashboardSnapshot,
    fail_under: Option<f64>,
    format: &str,
) -> Result<bool> {
    let Some(summary) = CheckSummary::from_snapshot(snapshot, fail_under) else {
        display_no_data(&snapshot.data_dir);
        return Ok(false);
    };

    if format == output_formats::JSON {
        println!("{}", check_json(&summary)?);
    } else {
        print!("{}", check_text(&summary));
    }

    Ok(summary.passed_threshold)
}

pub fn display_no_data(data_dir: &Path) {
    eprintln!(
        "{}",
        colorize(
            &format!(
                "No analysis report found in {}",
                data_dir.display()
            ),
            Colors::YELLOW
        )
    );
    eprintln!("Run the analyzer first: {ANALYZER_COMMAND}");
}

pub fn display_export_complete(path: &Path, snapshot: &DashboardSnapshot) {
    let status = if snapshot.has_data() {
        format!("{} report(s)", snapshot.reports_loaded)
    } else {
        "no analysis data".to_string()
    };
    println!(
        "{} {} ({status})",
        colorize("✅ Dashboard written to", Colors::GREEN),
        value(&path.display().to_string())
    );
}
