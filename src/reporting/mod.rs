//! Presentation and logging
//!
//! This module turns aggregates into charts, cards and the HTML dashboard
//! page, and holds the structured logging helpers.

pub mod charts;
pub mod dashboard;
pub mod logging;

// Re-export commonly used items
pub use charts::{ChartSpec, GaugeSpec, HealthBand, HealthTableRow, MetricCard};
pub use dashboard::{HtmlDashboard, RenderOptions, escape_html};
