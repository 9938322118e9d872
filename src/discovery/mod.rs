//! Report discovery and loading
//!
//! This module finds analyzer reports on disk, parses them, and
//! resolves which directory to read them from.

pub mod data_dir;
pub mod locator;

// Re-export commonly used items
pub use data_dir::{ReportInventory, inventory, resolve_data_dir};
pub use locator::{ReportBatch, ReportFile, ReportLocator, ReportSource, SkippedReport, load_file};
