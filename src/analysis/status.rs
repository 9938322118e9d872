//! How a raw health check is mapped to the status shown on the dashboard

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::core::constants::status_mappings;
use crate::core::error::DashboardError;
use crate::core::types::{CheckResult, CheckStatus};

pub trait StatusMapping: Send + Sync {
    fn map_status(&self, check: &CheckResult) -> CheckStatus;
}

/// Reports every check as passed, whatever the analyzer wrote.
///
/// This is the default mapping; `ReportedStatus` is selected through the
/// `status_mapping` setting.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysPassed;

impl StatusMapping for AlwaysPassed {
    fn map_status(&self, _check: &CheckResult) -> CheckStatus {
        CheckStatus::Passed
    }
}

/// Uses the status field written by the analyzer
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportedStatus;

impl StatusMapping for ReportedStatus {
    fn map_status(&self, check: &CheckResult) -> CheckStatus {
        check.reported_status()
    }
}

/// Configurable choice between the built-in mappings
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StatusMappingKind {
    #[default]
    AlwaysPassed,
    Reported,
}

impl StatusMappingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusMappingKind::AlwaysPassed => status_mappings::ALWAYS_PASSED,
            StatusMappingKind::Reported => status_mappings::REPORTED,
        }
    }

    pub fn build(&self) -> Arc<dyn StatusMapping> {
        match self {
            StatusMappingKind::AlwaysPassed => Arc::new(AlwaysPassed),
            StatusMappingKind::Reported => Arc::new(ReportedStatus),
        }
    }
}

impl fmt::Display for StatusMappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusMappingKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            status_mappings::ALWAYS_PASSED => Ok(StatusMappingKind::AlwaysPassed),
            status_mappings::REPORTED => Ok(StatusMappingKind::Reported),
            other => Err(DashboardError::Config(format!(
                "Invalid status mapping '{other}'. Expected one of: {}.",
                status_mappings::ALL.join(", ")
            ))),
        }
    }
}
