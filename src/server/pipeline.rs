use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

use crate::analysis::aggregator::ClusterOverview;
use crate::analysis::snapshot::DashboardSnapshot;
use crate::analysis::status::StatusMapping;
use crate::analysis::trend::HistoricalProcessor;
use crate::core::types::LoadedReport;
use crate::discovery::{ReportBatch, ReportLocator, ReportSource};
use crate::reporting::logging;

/// Raw output of one load pass
#[derive(Debug, Clone, Default)]
pub struct LoadResult {
    pub latest: Option<LoadedReport>,
    pub batch: ReportBatch,
}

/// load → aggregate, run once per refresh trigger
#[derive(Clone)]
pub struct RefreshPipeline {
    source: Arc<dyn ReportSource>,
    status_mapping: Arc<dyn StatusMapping>,
}

impl RefreshPipeline {
    pub fn new(locator: ReportLocator, status_mapping: Arc<dyn StatusMapping>) -> Self {
        Self::with_source(Arc::new(locator), status_mapping)
    }

    pub fn with_source(
        source: Arc<dyn ReportSource>,
        status_mapping: Arc<dyn StatusMapping>,
    ) -> Self {
        Self {
            source,
            status_mapping,
        }
    }

    pub fn source(&self) -> &dyn ReportSource {
        self.source.as_ref()
    }

    pub fn load(&self) -> LoadResult {
        let (latest, batch) = self.source.scan();
        LoadResult { latest, batch }
    }

    pub fn aggregate(&self, loaded: LoadResult) -> DashboardSnapshot {
        let LoadResult { latest, batch } = loaded;

        let mapping = self.status_mapping.as_ref();
        let overview = latest
            .as_ref()
            .map(|report| ClusterOverview::from_report(&report.report, mapping));
        let history = HistoricalProcessor::new(&batch.reports);

        DashboardSnapshot {
            last_updated: Utc::now(),
            data_dir: self.source.data_dir().to_path_buf(),
            overview,
            latest,
            health_trend: history.health_score_trend(),
            topics_trend: history.topics_trend(),
            reports_loaded: batch.reports.len(),
            skipped: batch.skipped,
        }
    }

    pub fn refresh(&self) -> DashboardSnapshot {
        let start = Instant::now();
        let snapshot = self.aggregate(self.load());
        logging::log_refresh_complete(
            snapshot.has_data(),
            snapshot.reports_loaded,
            snapshot.skipped.len(),
            start.elapsed().as_millis(),
        );
        snapshot
    }
}
