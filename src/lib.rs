//! Web dashboard for Kafka cluster analysis reports
//!
//! Reports written by the analyzer (`kafka-analysis-*.json`) are discovered
//! in a data directory, aggregated into a [`DashboardSnapshot`] and served as
//! an HTML page plus a small JSON API.

pub mod analysis;
pub mod config;
pub mod core;
pub mod discovery;
pub mod reporting;
pub mod server;
pub mod ui;

// Re-export commonly used types
pub use crate::analysis::{ClusterOverview, DashboardSnapshot, StatusMapping, StatusMappingKind};
pub use crate::config::{CliConfig, Config};
pub use crate::core::{AnalysisReport, DashboardError, LoadedReport, Result};
pub use crate::discovery::{ReportLocator, ReportSource};
pub use crate::reporting::{HtmlDashboard, RenderOptions};
pub use crate::server::{AppState, DashboardServer, RefreshPipeline};
