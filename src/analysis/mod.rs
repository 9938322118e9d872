//! Pure computations over parsed reports
//!
//! Nothing in this module touches the filesystem. Aggregates for a single
//! report live in [`aggregator`], time series over many reports in [`trend`].

pub mod aggregator;
pub mod snapshot;
pub mod status;
pub mod trend;

pub use aggregator::{
    BrokerInfo, ClusterOverview, ConsumerGroupsSummary, HealthCheckDetail, ReplicationHistogram,
    TopicsSummary, broker_info, consumer_groups_summary, health_check_details, health_score,
    replication_factor_histogram, topics_summary,
};
pub use snapshot::DashboardSnapshot;
pub use status::{AlwaysPassed, ReportedStatus, StatusMapping, StatusMappingKind};
pub use trend::{HealthScorePoint, HistoricalProcessor, TopicsPoint};
