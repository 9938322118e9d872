use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::analysis::aggregator::ClusterOverview;
use crate::analysis::trend::{HealthScorePoint, TopicsPoint};
use crate::core::types::LoadedReport;
use crate::discovery::SkippedReport;

/// Everything the dashboard page and the JSON API show, as of one refresh
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub last_updated: DateTime<Utc>,
    pub data_dir: PathBuf,
    pub overview: Option<ClusterOverview>,
    pub latest: Option<LoadedReport>,
    pub health_trend: Vec<HealthScorePoint>,
    pub topics_trend: Vec<TopicsPoint>,
    pub reports_loaded: usize,
    pub skipped: Vec<SkippedReport>,
}

impl DashboardSnapshot {
    /// The "no data" state, used before the first refresh completes
    pub fn empty(data_dir: PathBuf) -> Self {
        Self {
            last_updated: Utc::now(),
            data_dir,
            overview: None,
            latest: None,
            health_trend: Vec::new(),
            topics_trend: Vec::new(),
            reports_loaded: 0,
            skipped: Vec::new(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.overview.is_some()
    }
}
