//! Data model for Kafka analysis reports
//!
//! Reports are produced by an external analyzer, so every key is optional.
//! Missing keys and explicit `null` values both deserialize to the zero value
//! of the field type instead of failing the whole document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::core::constants::fallbacks;

/// Deserialize `null` the same way as a missing key.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_replication_factor() -> u32 {
    1
}

fn nullable_replication_factor<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_replication_factor))
}

/// Render a JSON identifier (string or number) as display text.
///
/// Strings are shown without quotes, `null` becomes the "Unknown" sentinel and
/// anything else falls back to its compact JSON form.
pub fn identifier_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => fallbacks::UNKNOWN.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// One analysis report, the root document written by the analyzer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisReport {
    pub timestamp: Option<String>,
    pub vendor: Option<String>,
    pub cluster_info: Option<ClusterInfo>,
    #[serde(deserialize_with = "nullable")]
    pub topics: Vec<Topic>,
    #[serde(deserialize_with = "nullable")]
    pub consumer_groups: Vec<ConsumerGroup>,
    pub health_checks: Option<HealthChecks>,
    pub summary: Option<ReportSummary>,
}

impl AnalysisReport {
    /// Parse a report from raw JSON text
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Topics flagged as internal by the analyzer are excluded
    pub fn user_topics(&self) -> impl Iterator<Item = &Topic> {
        self.topics.iter().filter(|topic| !topic.is_internal)
    }

    pub fn brokers(&self) -> &[Broker] {
        self.cluster_info
            .as_ref()
            .map(|info| info.brokers.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterInfo {
    pub cluster_id: Option<String>,
    pub controller: Option<Value>,
    #[serde(deserialize_with = "nullable")]
    pub brokers: Vec<Broker>,
}

/// A broker entry; everything except the node id is passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broker {
    #[serde(default)]
    pub node_id: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Broker {
    pub fn display_id(&self) -> String {
        identifier_to_string(self.node_id.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Topic {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub partitions: u32,
    #[serde(deserialize_with = "nullable_replication_factor")]
    pub replication_factor: u32,
    #[serde(deserialize_with = "nullable")]
    pub is_internal: bool,
    #[serde(deserialize_with = "nullable")]
    pub error_code: i32,
}

impl Default for Topic {
    fn default() -> Self {
        Self {
            name: String::new(),
            partitions: 0,
            replication_factor: default_replication_factor(),
            is_internal: false,
            error_code: 0,
        }
    }
}

impl Topic {
    pub fn has_error(&self) -> bool {
        self.error_code != 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerGroup {
    #[serde(default, deserialize_with = "nullable")]
    pub group_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub members: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConsumerGroup {
    pub fn is_active(&self) -> bool {
        self.members > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthChecks {
    #[serde(deserialize_with = "nullable")]
    pub total_checks: u32,
    #[serde(deserialize_with = "nullable")]
    pub passed_checks: u32,
    #[serde(deserialize_with = "nullable")]
    pub failed_checks: u32,
    #[serde(deserialize_with = "nullable")]
    pub warnings: u32,
    #[serde(deserialize_with = "nullable")]
    pub checks: Vec<CheckResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckResult {
    pub description: Option<String>,
    pub recommendation: Option<String>,
    pub status: Option<String>,
}

impl CheckResult {
    /// Status as reported by the analyzer; missing or unrecognised values are `Unknown`
    pub fn reported_status(&self) -> CheckStatus {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(CheckStatus::Unknown)
    }
}

/// Outcome of a single health check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Passed,
    Failed,
    Warning,
    Info,
    Unknown,
}

impl CheckStatus {
    pub const ALL: [CheckStatus; 5] = [
        CheckStatus::Passed,
        CheckStatus::Failed,
        CheckStatus::Warning,
        CheckStatus::Info,
        CheckStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Passed => "PASSED",
            CheckStatus::Failed => "FAILED",
            CheckStatus::Warning => "WARNING",
            CheckStatus::Info => "INFO",
            CheckStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            CheckStatus::Passed => "✅",
            CheckStatus::Failed => "❌",
            CheckStatus::Warning => "⚠️",
            CheckStatus::Info => "ℹ️",
            CheckStatus::Unknown => "?",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PASSED" | "PASS" => Ok(CheckStatus::Passed),
            "FAILED" | "FAIL" => Ok(CheckStatus::Failed),
            "WARNING" | "WARN" => Ok(CheckStatus::Warning),
            "INFO" => Ok(CheckStatus::Info),
            "UNKNOWN" => Ok(CheckStatus::Unknown),
            other => Err(format!("unknown check status '{other}'")),
        }
    }
}

/// Precomputed aggregates some analyzer versions write next to the raw data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    #[serde(default, deserialize_with = "nullable")]
    pub total_topics: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub user_topics: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub total_partitions: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// File information attached by the loader; never part of the analyzer output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub filename: String,
    pub filepath: PathBuf,
    pub last_modified: DateTime<Utc>,
}

/// A parsed report together with the file it was read from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedReport {
    #[serde(flatten)]
    pub report: AnalysisReport,
    #[serde(rename = "_metadata")]
    pub metadata: ReportMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_uses_defaults() {
        let report = AnalysisReport::from_json("{}").unwrap();

        assert_eq!(report, AnalysisReport::default());
        assert!(report.topics.is_empty());
        assert!(report.brokers().is_empty());
    }

    #[test]
    fn test_null_values_use_defaults() {
        let report = AnalysisReport::from_json(
            r#"{"topics": null, "consumerGroups": null,
                "healthChecks": {"totalChecks": null, "checks": null}}"#,
        )
        .unwrap();

        assert!(report.topics.is_empty());
        assert!(report.consumer_groups.is_empty());
        let checks = report.health_checks.unwrap();
        assert_eq!(checks.total_checks, 0);
        assert!(checks.checks.is_empty());
    }

    #[test]
    fn test_topic_defaults() {
        let topic: Topic = serde_json::from_value(json!({"name": "orders"})).unwrap();

        assert_eq!(topic.name, "orders");
        assert_eq!(topic.partitions, 0);
        assert_eq!(topic.replication_factor, 1);
        assert!(!topic.is_internal);
        assert!(!topic.has_error());
    }

    #[test]
    fn test_full_document() {
        let report = AnalysisReport::from_json(
            r#"{
                "timestamp": "2025-03-01T10:00:00.000Z",
                "vendor": "apache",
                "clusterInfo": {
                    "clusterId": "abc-123",
                    "controller": 2,
                    "brokers": [{"nodeId": 1, "host": "kafka-1", "port": 9092}]
                },
                "topics": [
                    {"name": "orders", "partitions": 6, "replicationFactor": 3,
                     "isInternal": false, "errorCode": 0}
                ],
                "consumerGroups": [{"groupId": "billing", "members": 2, "state": "Stable"}],
                "healthChecks": {
                    "totalChecks": 4, "passedChecks": 3, "failedChecks": 1, "warnings": 0,
                    "checks": [{"description": "Replication ok", "status": "PASSED"}]
                },
                "summary": {"totalTopics": 1, "userTopics": 1, "totalPartitions": 6,
                            "internalTopics": 0}
            }"#,
        )
        .unwrap();

        assert_eq!(report.vendor.as_deref(), Some("apache"));
        assert_eq!(report.brokers().len(), 1);
        assert_eq!(report.brokers()[0].display_id(), "1");
        assert_eq!(report.brokers()[0].extra.get("host"), Some(&json!("kafka-1")));
        assert_eq!(report.topics[0].replication_factor, 3);
        assert_eq!(report.consumer_groups[0].extra.get("state"), Some(&json!("Stable")));
        assert!(report.consumer_groups[0].is_active());

        let summary = report.summary.unwrap();
        assert_eq!(summary.total_partitions, 6);
        assert_eq!(summary.extra.get("internalTopics"), Some(&json!(0)));
    }

    #[test]
    fn test_broker_passthrough_serializes_extra_fields() {
        let broker: Broker =
            serde_json::from_value(json!({"nodeId": "b-1", "rack": "eu-1a"})).unwrap();
        let value = serde_json::to_value(&broker).unwrap();

        assert_eq!(value, json!({"nodeId": "b-1", "rack": "eu-1a"}));
    }

    #[test]
    fn test_identifier_to_string() {
        assert_eq!(identifier_to_string(None), "Unknown");
        assert_eq!(identifier_to_string(Some(&Value::Null)), "Unknown");
        assert_eq!(identifier_to_string(Some(&json!("ctrl"))), "ctrl");
        assert_eq!(identifier_to_string(Some(&json!(3))), "3");
    }

    #[test]
    fn test_reported_status() {
        let check = |status: Option<&str>| CheckResult {
            status: status.map(String::from),
            ..Default::default()
        };

        assert_eq!(check(Some("FAILED")).reported_status(), CheckStatus::Failed);
        assert_eq!(check(Some("warning")).reported_status(), CheckStatus::Warning);
        assert_eq!(check(Some("bogus")).reported_status(), CheckStatus::Unknown);
        assert_eq!(check(None).reported_status(), CheckStatus::Unknown);
    }

    #[test]
    fn test_check_status_display_and_emoji() {
        assert_eq!(CheckStatus::Passed.to_string(), "PASSED");
        assert_eq!(CheckStatus::Info.emoji(), "ℹ️");
        assert_eq!(CheckStatus::ALL.len(), 5);
    }

    #[test]
    fn test_wrong_type_is_a_parse_error() {
        assert!(AnalysisReport::from_json(r#"{"topics": "not-a-list"}"#).is_err());
        assert!(AnalysisReport::from_json("{ not json").is_err());
    }
}
