//! Aggregates derived from a single analysis report
//!
//! Every function here is pure and tolerant of missing report sections: an
//! absent section behaves exactly like an empty one.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::analysis::status::StatusMapping;
use crate::core::constants::{fallbacks, health};
use crate::core::types::{
    AnalysisReport, Broker, ConsumerGroup, HealthChecks, Topic, identifier_to_string,
};

/// Percentage of passed checks, `0.0` when the report ran no checks
pub fn health_score(report: &AnalysisReport) -> f64 {
    let Some(checks) = report.health_checks.as_ref() else {
        return 0.0;
    };
    if checks.total_checks == 0 {
        return 0.0;
    }

    let score = checks.passed_checks as f64 / checks.total_checks as f64 * health::MAX_SCORE;
    score.clamp(0.0, health::MAX_SCORE)
}

/// Two decimals, exact halves to even
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicsSummary {
    pub total: usize,
    pub user_count: usize,
    pub internal_count: usize,
    pub total_partitions: u64,
    pub avg_partitions_per_topic: f64,
    pub topics_with_errors: usize,
}

pub fn topics_summary(report: &AnalysisReport) -> TopicsSummary {
    let topics = &report.topics;
    let total = topics.len();
    let internal_count = topics.iter().filter(|t| t.is_internal).count();
    let total_partitions: u64 = topics.iter().map(|t| u64::from(t.partitions)).sum();
    let avg_partitions_per_topic = if total > 0 {
        round2(total_partitions as f64 / total as f64)
    } else {
        0.0
    };

    TopicsSummary {
        total,
        user_count: total - internal_count,
        internal_count,
        total_partitions,
        avg_partitions_per_topic,
        topics_with_errors: topics.iter().filter(|t| t.has_error()).count(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerInfo {
    pub total_brokers: usize,
    pub cluster_id: String,
    pub controller: String,
    pub brokers: Vec<Broker>,
}

pub fn broker_info(report: &AnalysisReport) -> BrokerInfo {
    let cluster = report.cluster_info.as_ref();
    let brokers = report.brokers().to_vec();

    BrokerInfo {
        total_brokers: brokers.len(),
        cluster_id: cluster
            .and_then(|c| c.cluster_id.clone())
            .unwrap_or_else(|| fallbacks::UNKNOWN.to_string()),
        controller: identifier_to_string(cluster.and_then(|c| c.controller.as_ref())),
        brokers,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerGroupsSummary {
    pub total: usize,
    pub active_count: usize,
    pub inactive_count: usize,
    pub groups: Vec<ConsumerGroup>,
}

pub fn consumer_groups_summary(report: &AnalysisReport) -> ConsumerGroupsSummary {
    let groups = report.consumer_groups.clone();
    let active_count = groups.iter().filter(|g| g.is_active()).count();

    ConsumerGroupsSummary {
        total: groups.len(),
        active_count,
        inactive_count: groups.len() - active_count,
        groups,
    }
}

/// Topic count per replication factor, in the order factors were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplicationHistogram {
    buckets: Vec<(u32, usize)>,
}

impl ReplicationHistogram {
    pub fn get(&self, replication_factor: u32) -> Option<usize> {
        self.buckets
            .iter()
            .find(|(rf, _)| *rf == replication_factor)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.buckets.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn record(&mut self, replication_factor: u32) {
        match self
            .buckets
            .iter_mut()
            .find(|(rf, _)| *rf == replication_factor)
        {
            Some((_, count)) => *count += 1,
            None => self.buckets.push((replication_factor, 1)),
        }
    }
}

impl Serialize for ReplicationHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (rf, count) in &self.buckets {
            map.serialize_entry(&rf.to_string(), count)?;
        }
        map.end()
    }
}

pub fn replication_factor_histogram(topics: &[Topic]) -> ReplicationHistogram {
    let mut histogram = ReplicationHistogram::default();
    for topic in topics {
        histogram.record(topic.replication_factor);
    }
    histogram
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthCheckDetail {
    pub id: usize,
    pub name: String,
    pub status: crate::core::types::CheckStatus,
    pub message: String,
    pub recommendation: String,
}

pub fn health_check_details(
    report: &AnalysisReport,
    mapping: &dyn StatusMapping,
) -> Vec<HealthCheckDetail> {
    let Some(checks) = report.health_checks.as_ref() else {
        return Vec::new();
    };

    checks
        .checks
        .iter()
        .enumerate()
        .map(|(id, check)| HealthCheckDetail {
            id,
            name: format!("{} {}", fallbacks::CHECK_NAME_PREFIX, id + 1),
            status: mapping.map_status(check),
            message: check
                .description
                .clone()
                .unwrap_or_else(|| fallbacks::NO_DESCRIPTION.to_string()),
            recommendation: check
                .recommendation
                .clone()
                .unwrap_or_else(|| fallbacks::NO_RECOMMENDATION.to_string()),
        })
        .collect()
}

/// Everything the dashboard shows about one report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOverview {
    pub vendor: String,
    pub timestamp: String,
    pub health_score: f64,
    pub health_checks: HealthChecks,
    pub topics: TopicsSummary,
    pub brokers: BrokerInfo,
    pub consumer_groups: ConsumerGroupsSummary,
    pub replication_factors: ReplicationHistogram,
    pub check_details: Vec<HealthCheckDetail>,
}

impl ClusterOverview {
    pub fn from_report(report: &AnalysisReport, mapping: &dyn StatusMapping) -> Self {
        Self {
            vendor: report
                .vendor
                .clone()
                .unwrap_or_else(|| fallbacks::UNKNOWN.to_string()),
            timestamp: report
                .timestamp
                .clone()
                .unwrap_or_else(|| fallbacks::UNKNOWN.to_string()),
            health_score: health_score(report),
            health_checks: report.health_checks.clone().unwrap_or_default(),
            topics: topics_summary(report),
            brokers: broker_info(report),
            consumer_groups: consumer_groups_summary(report),
            replication_factors: replication_factor_histogram(&report.topics),
            check_details: health_check_details(report, mapping),
        }
    }
}
