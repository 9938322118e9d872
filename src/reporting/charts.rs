//! Chart, card and table projections of the aggregates
//!
//! Everything here is a deterministic function of its input and serializes to
//! the JSON the page hands to Chart.js.

use serde::Serialize;

use crate::analysis::aggregator::{
    ClusterOverview, ConsumerGroupsSummary, HealthCheckDetail, ReplicationHistogram, TopicsSummary,
};
use crate::analysis::trend::{HealthScorePoint, TopicsPoint};
use crate::core::constants::health;
use crate::core::types::{CheckStatus, HealthChecks, Topic};

mod palette {
    pub const GREEN: &str = "#28a745";
    pub const YELLOW: &str = "#ffc107";
    pub const RED: &str = "#dc3545";
    pub const BLUE: &str = "#007bff";
    pub const GREY: &str = "#6c757d";
    pub const TEAL: &str = "#17a2b8";
    pub const LIGHT_BLUE: &str = "#add8e6";
    pub const LIGHT_CORAL: &str = "#f08080";
}

const TREND_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Severity band of a health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthBand {
    Healthy,
    Degraded,
    Critical,
}

impl HealthBand {
    pub fn for_score(score: f64) -> Self {
        if score >= health::HEALTHY_THRESHOLD {
            HealthBand::Healthy
        } else if score >= health::DEGRADED_THRESHOLD {
            HealthBand::Degraded
        } else {
            HealthBand::Critical
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            HealthBand::Healthy => palette::GREEN,
            HealthBand::Degraded => palette::YELLOW,
            HealthBand::Critical => palette::RED,
        }
    }

    /// CSS class used by the page for this band
    pub fn css_class(&self) -> &'static str {
        match self {
            HealthBand::Healthy => "success",
            HealthBand::Degraded => "warning",
            HealthBand::Critical => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeStep {
    pub from: f64,
    pub to: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeSpec {
    pub value: f64,
    pub color: &'static str,
    pub band: HealthBand,
    pub target: f64,
    pub steps: Vec<GaugeStep>,
}

pub fn health_gauge(score: f64) -> GaugeSpec {
    let band = HealthBand::for_score(score);
    let step = |from: f64, to: f64, color: &'static str| GaugeStep { from, to, color };

    GaugeSpec {
        value: score,
        color: band.color(),
        band,
        target: health::TARGET_SCORE,
        steps: vec![
            step(0.0, 50.0, "#f8d7da"),
            step(50.0, 70.0, "#fff3cd"),
            step(70.0, 90.0, "#d1ecf1"),
            step(90.0, 100.0, "#d4edda"),
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Doughnut,
    Pie,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<u32>>,
    pub fill: bool,
}

impl Dataset {
    fn new(label: &str, data: Vec<f64>, colors: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            data,
            background_color: colors.iter().map(|c| c.to_string()).collect(),
            border_color: None,
            border_dash: None,
            fill: false,
        }
    }

    fn line(label: &str, data: Vec<f64>, color: &str) -> Self {
        Self {
            border_color: Some(color.to_string()),
            ..Self::new(label, data, &[color])
        }
    }
}

/// A chart ready for Chart.js; `empty_message` replaces the chart when set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub id: &'static str,
    pub kind: ChartKind,
    pub title: &'static str,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub empty_message: Option<&'static str>,
}

impl ChartSpec {
    fn new(id: &'static str, kind: ChartKind, title: &'static str) -> Self {
        Self {
            id,
            kind,
            title,
            labels: Vec::new(),
            datasets: Vec::new(),
            empty_message: None,
        }
    }

    fn empty(mut self, message: &'static str) -> Self {
        self.empty_message = Some(message);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.empty_message.is_some()
    }
}

pub fn health_checks_summary(checks: &HealthChecks) -> ChartSpec {
    ChartSpec {
        labels: vec!["Passed".into(), "Failed".into(), "Warnings".into()],
        datasets: vec![Dataset::new(
            "Checks",
            vec![
                f64::from(checks.passed_checks),
                f64::from(checks.failed_checks),
                f64::from(checks.warnings),
            ],
            &[palette::GREEN, palette::RED, palette::YELLOW],
        )],
        ..ChartSpec::new("health-checks-summary", ChartKind::Bar, "Health Checks Summary")
    }
}

pub fn topics_distribution(summary: &TopicsSummary) -> ChartSpec {
    ChartSpec {
        labels: vec!["User Topics".into(), "Internal Topics".into()],
        datasets: vec![Dataset::new(
            "Topics",
            vec![summary.user_count as f64, summary.internal_count as f64],
            &[palette::BLUE, palette::GREY],
        )],
        ..ChartSpec::new("topics-distribution", ChartKind::Doughnut, "Topics Distribution")
    }
}

pub fn partitions_per_topic(topics: &[Topic]) -> ChartSpec {
    let chart = ChartSpec::new("partitions-chart", ChartKind::Bar, "Partitions per Topic");
    let user_topics: Vec<&Topic> = topics.iter().filter(|t| !t.is_internal).collect();
    if user_topics.is_empty() {
        return chart.empty("No user topics found");
    }

    ChartSpec {
        labels: user_topics.iter().map(|t| t.name.clone()).collect(),
        datasets: vec![Dataset::new(
            "Partitions",
            user_topics.iter().map(|t| f64::from(t.partitions)).collect(),
            &[palette::LIGHT_BLUE],
        )],
        ..chart
    }
}

pub fn consumer_groups_status(summary: &ConsumerGroupsSummary) -> ChartSpec {
    let chart = ChartSpec::new("consumer-groups-chart", ChartKind::Pie, "Consumer Groups Status");
    if summary.total == 0 {
        return chart.empty("No consumer groups found");
    }

    ChartSpec {
        labels: vec!["Active".into(), "Inactive".into()],
        datasets: vec![Dataset::new(
            "Consumer Groups",
            vec![summary.active_count as f64, summary.inactive_count as f64],
            &[palette::GREEN, palette::YELLOW],
        )],
        ..chart
    }
}

pub fn replication_factor_distribution(histogram: &ReplicationHistogram) -> ChartSpec {
    let chart = ChartSpec::new(
        "replication-factor-chart",
        ChartKind::Bar,
        "Replication Factor Distribution",
    );
    if histogram.is_empty() {
        return chart.empty("No topics found");
    }

    ChartSpec {
        labels: histogram.iter().map(|(rf, _)| format!("RF={rf}")).collect(),
        datasets: vec![Dataset::new(
            "Topics",
            histogram.iter().map(|(_, count)| count as f64).collect(),
            &[palette::LIGHT_CORAL],
        )],
        ..chart
    }
}

pub fn health_score_trend(points: &[HealthScorePoint]) -> ChartSpec {
    let chart = ChartSpec::new("health-score-trend", ChartKind::Line, "Health Score Trend");
    if points.is_empty() {
        return chart.empty("No historical data available");
    }

    let target = Dataset {
        border_dash: Some(vec![6, 6]),
        ..Dataset::line(
            "Target: 90%",
            vec![health::TARGET_SCORE; points.len()],
            palette::RED,
        )
    };

    ChartSpec {
        labels: points
            .iter()
            .map(|p| p.timestamp.format(TREND_TIME_FORMAT).to_string())
            .collect(),
        datasets: vec![
            Dataset::line(
                "Health Score",
                points.iter().map(|p| p.health_score).collect(),
                palette::BLUE,
            ),
            target,
        ],
        ..chart
    }
}

pub fn topics_trend(points: &[TopicsPoint]) -> ChartSpec {
    let chart = ChartSpec::new("topics-trend", ChartKind::Line, "Topics Trend");
    if points.is_empty() {
        return chart.empty("No historical data available");
    }

    ChartSpec {
        labels: points
            .iter()
            .map(|p| p.timestamp.format(TREND_TIME_FORMAT).to_string())
            .collect(),
        datasets: vec![
            Dataset::line(
                "Total Topics",
                points.iter().map(|p| p.total_topics as f64).collect(),
                palette::BLUE,
            ),
            Dataset::line(
                "User Topics",
                points.iter().map(|p| p.user_topics as f64).collect(),
                palette::TEAL,
            ),
            Dataset::line(
                "Total Partitions",
                points.iter().map(|p| p.total_partitions as f64).collect(),
                palette::GREEN,
            ),
        ],
        ..chart
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub icon: &'static str,
    pub color: &'static str,
}

pub fn cluster_metrics(overview: &ClusterOverview) -> Vec<MetricCard> {
    let card =
        |title: &'static str, value: String, icon: &'static str, color: &'static str| {
            MetricCard {
                title,
                value,
                icon,
                color,
            }
        };

    vec![
        card(
            "Total Brokers",
            overview.brokers.total_brokers.to_string(),
            "🖥️",
            "primary",
        ),
        card("Total Topics", overview.topics.total.to_string(), "📋", "info"),
        card(
            "Total Partitions",
            overview.topics.total_partitions.to_string(),
            "📊",
            "success",
        ),
        card(
            "Consumer Groups",
            overview.consumer_groups.total.to_string(),
            "👥",
            "warning",
        ),
        card(
            "Active Groups",
            overview.consumer_groups.active_count.to_string(),
            "✅",
            "success",
        ),
        card(
            "Avg Partitions/Topic",
            format!("{:.1}", overview.topics.avg_partitions_per_topic),
            "⚖️",
            "secondary",
        ),
    ]
}

pub fn status_label(status: CheckStatus) -> String {
    format!("{} {}", status.emoji(), status.as_str())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthTableRow {
    pub status: CheckStatus,
    pub status_label: String,
    pub name: String,
    pub message: String,
    pub recommendation: String,
}

pub fn health_table_rows(details: &[HealthCheckDetail]) -> Vec<HealthTableRow> {
    details
        .iter()
        .map(|detail| HealthTableRow {
            status: detail.status,
            status_label: status_label(detail.status),
            name: detail.name.clone(),
            message: detail.message.clone(),
            recommendation: detail.recommendation.clone(),
        })
        .collect()
}

/// Every chart shown for one report, in page order
pub fn overview_charts(overview: &ClusterOverview, topics: &[Topic]) -> Vec<ChartSpec> {
    vec![
        health_checks_summary(&overview.health_checks),
        topics_distribution(&overview.topics),
        partitions_per_topic(topics),
        consumer_groups_status(&overview.consumer_groups),
        replication_factor_distribution(&overview.replication_factors),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregator::replication_factor_histogram;
    use crate::analysis::status::AlwaysPassed;
    use crate::core::types::{AnalysisReport, ConsumerGroup};
    use chrono::{TimeZone, Utc};

    fn topic(name: &str, partitions: u32, rf: u32, is_internal: bool) -> Topic {
        Topic {
            name: name.to_string(),
            partitions,
            replication_factor: rf,
            is_internal,
            error_code: 0,
        }
    }

    #[test]
    fn test_health_band_thresholds() {
        assert_eq!(HealthBand::for_score(100.0), HealthBand::Healthy);
        assert_eq!(HealthBand::for_score(90.0), HealthBand::Healthy);
        assert_eq!(HealthBand::for_score(89.9), HealthBand::Degraded);
        assert_eq!(HealthBand::for_score(70.0), HealthBand::Degraded);
        assert_eq!(HealthBand::for_score(69.9), HealthBand::Critical);
        assert_eq!(HealthBand::for_score(0.0), HealthBand::Critical);
    }

    #[test]
    fn test_health_gauge() {
        let gauge = health_gauge(75.0);

        assert_eq!(gauge.color, "#ffc107");
        assert_eq!(gauge.band, HealthBand::Degraded);
        assert_eq!(gauge.target, 90.0);
        assert_eq!(gauge.steps.len(), 4);
        assert_eq!(gauge.steps[3].color, "#d4edda");
        assert_eq!(health_gauge(95.0).color, "#28a745");
        assert_eq!(health_gauge(10.0).color, "#dc3545");
    }

    #[test]
    fn test_health_checks_summary() {
        let chart = health_checks_summary(&HealthChecks {
            total_checks: 10,
            passed_checks: 7,
            failed_checks: 2,
            warnings: 1,
            checks: Vec::new(),
        });

        assert_eq!(chart.labels, vec!["Passed", "Failed", "Warnings"]);
        assert_eq!(chart.datasets[0].data, vec![7.0, 2.0, 1.0]);
        assert!(!chart.is_empty());
    }

    #[test]
    fn test_partitions_per_topic_excludes_internal() {
        let topics = vec![
            topic("orders", 6, 3, false),
            topic("__consumer_offsets", 50, 3, true),
            topic("payments", 3, 3, false),
        ];

        let chart = partitions_per_topic(&topics);

        assert_eq!(chart.labels, vec!["orders", "payments"]);
        assert_eq!(chart.datasets[0].data, vec![6.0, 3.0]);
    }

    #[test]
    fn test_empty_charts_have_messages() {
        let only_internal = vec![topic("__consumer_offsets", 50, 3, true)];

        assert_eq!(
            partitions_per_topic(&only_internal).empty_message,
            Some("No user topics found")
        );
        assert_eq!(
            consumer_groups_status(&ConsumerGroupsSummary::default()).empty_message,
            Some("No consumer groups found")
        );
        assert_eq!(
            replication_factor_distribution(&ReplicationHistogram::default()).empty_message,
            Some("No topics found")
        );
        assert_eq!(
            health_score_trend(&[]).empty_message,
            Some("No historical data available")
        );
        assert!(topics_trend(&[]).is_empty());
    }

    #[test]
    fn test_replication_factor_distribution_labels() {
        let topics = vec![
            topic("a", 1, 3, false),
            topic("b", 1, 1, false),
            topic("c", 1, 3, false),
        ];

        let chart = replication_factor_distribution(&replication_factor_histogram(&topics));

        assert_eq!(chart.labels, vec!["RF=3", "RF=1"]);
        assert_eq!(chart.datasets[0].data, vec![2.0, 1.0]);
    }

    #[test]
    fn test_health_score_trend_has_target_line() {
        let points = vec![HealthScorePoint {
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap(),
            health_score: 80.0,
            total_checks: 10,
            passed_checks: 8,
            failed_checks: 2,
        }];

        let chart = health_score_trend(&points);

        assert_eq!(chart.labels, vec!["2025-03-01 08:30"]);
        assert_eq!(chart.datasets.len(), 2);
        assert_eq!(chart.datasets[1].data, vec![90.0]);
        assert_eq!(chart.datasets[1].border_dash, Some(vec![6, 6]));
    }

    #[test]
    fn test_chart_spec_serialization() {
        let value = serde_json::to_value(topics_distribution(&TopicsSummary {
            user_count: 4,
            internal_count: 1,
            ..Default::default()
        }))
        .unwrap();

        assert_eq!(value["kind"], "doughnut");
        assert_eq!(value["datasets"][0]["backgroundColor"][0], "#007bff");
        assert!(value["emptyMessage"].is_null());
        assert!(value["datasets"][0].get("borderDash").is_none());
    }

    #[test]
    fn test_cluster_metrics() {
        let report = AnalysisReport {
            topics: vec![topic("a", 3, 1, false), topic("b", 4, 1, false)],
            consumer_groups: vec![
                ConsumerGroup {
                    members: 2,
                    ..Default::default()
                },
                ConsumerGroup::default(),
            ],
            ..Default::default()
        };
        let overview = ClusterOverview::from_report(&report, &AlwaysPassed);

        let cards = cluster_metrics(&overview);

        let titles: Vec<_> = cards.iter().map(|c| c.title).collect();
        assert_eq!(
            titles,
            vec![
                "Total Brokers",
                "Total Topics",
                "Total Partitions",
                "Consumer Groups",
                "Active Groups",
                "Avg Partitions/Topic"
            ]
        );
        assert_eq!(cards[0].value, "0");
        assert_eq!(cards[2].value, "7");
        assert_eq!(cards[4].value, "1");
        assert_eq!(cards[5].value, "3.5");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(CheckStatus::Passed), "✅ PASSED");
        assert_eq!(status_label(CheckStatus::Failed), "❌ FAILED");
        assert_eq!(status_label(CheckStatus::Warning), "⚠️ WARNING");
        assert_eq!(status_label(CheckStatus::Info), "ℹ️ INFO");
        assert_eq!(status_label(CheckStatus::Unknown), "? UNKNOWN");
    }

    #[test]
    fn test_health_table_rows() {
        let details = vec![HealthCheckDetail {
            id: 0,
            name: "Health Check 1".to_string(),
            status: CheckStatus::Warning,
            message: "Replication below 3".to_string(),
            recommendation: "Increase replication".to_string(),
        }];

        let rows = health_table_rows(&details);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status_label, "⚠️ WARNING");
        assert_eq!(rows[0].message, "Replication below 3");
    }

    #[test]
    fn test_overview_charts_order() {
        let overview = ClusterOverview::from_report(&AnalysisReport::default(), &AlwaysPassed);

        let ids: Vec<_> = overview_charts(&overview, &[]).iter().map(|c| c.id).collect();

        assert_eq!(
            ids,
            vec![
                "health-checks-summary",
                "topics-distribution",
                "partitions-chart",
                "consumer-groups-chart",
                "replication-factor-chart"
            ]
        );
    }
}
