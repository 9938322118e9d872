//! Time series built from every report in the data directory

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::analysis::aggregator::health_score;
use crate::core::types::LoadedReport;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Parse a report timestamp. Values without an offset are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// When a report was taken, falling back to the file's modification time
pub fn report_time(loaded: &LoadedReport) -> DateTime<Utc> {
    loaded
        .report
        .timestamp
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(loaded.metadata.last_modified)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScorePoint {
    pub timestamp: DateTime<Utc>,
    pub health_score: f64,
    pub total_checks: u32,
    pub passed_checks: u32,
    pub failed_checks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicsPoint {
    pub timestamp: DateTime<Utc>,
    pub total_topics: u64,
    pub user_topics: u64,
    pub total_partitions: u64,
}

pub struct HistoricalProcessor<'a> {
    reports: &'a [LoadedReport],
}

impl<'a> HistoricalProcessor<'a> {
    pub fn new(reports: &'a [LoadedReport]) -> Self {
        Self { reports }
    }

    pub fn health_score_trend(&self) -> Vec<HealthScorePoint> {
        let mut points: Vec<HealthScorePoint> = self
            .reports
            .iter()
            .map(|loaded| {
                let checks = loaded.report.health_checks.clone().unwrap_or_default();
                HealthScorePoint {
                    timestamp: report_time(loaded),
                    health_score: health_score(&loaded.report),
                    total_checks: checks.total_checks,
                    passed_checks: checks.passed_checks,
                    failed_checks: checks.failed_checks,
                }
            })
            .collect();

        points.sort_by_key(|point| point.timestamp);
        points
    }

    pub fn topics_trend(&self) -> Vec<TopicsPoint> {
        let mut points: Vec<TopicsPoint> = self
            .reports
            .iter()
            .map(|loaded| {
                let summary = loaded.report.summary.clone().unwrap_or_default();
                TopicsPoint {
                    timestamp: report_time(loaded),
                    total_topics: summary.total_topics,
                    user_topics: summary.user_topics,
                    total_partitions: summary.total_partitions,
                }
            })
            .collect();

        points.sort_by_key(|point| point.timestamp);
        points
    }
}
