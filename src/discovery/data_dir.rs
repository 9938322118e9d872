//! Locating the analyzer's output directory

use std::env;
use std::path::{Path, PathBuf};

use crate::core::constants::reports;
use crate::discovery::locator::ReportLocator;

/// Directories searched, in order, when no data directory is configured
pub fn candidate_dirs(cwd: &Path, home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![
        cwd.join(reports::DATA_DIR_NAME),
        cwd.join("..").join(reports::DATA_DIR_NAME),
        cwd.join("..").join("..").join(reports::DATA_DIR_NAME),
    ];
    if let Some(home) = home {
        candidates.push(home.join(reports::DATA_DIR_NAME));
    }
    candidates
}

/// First candidate directory that exists
pub fn find_data_directory(cwd: &Path, home: Option<&Path>) -> Option<PathBuf> {
    candidate_dirs(cwd, home)
        .into_iter()
        .find(|path| path.is_dir())
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

/// Pick the data directory: the configured one, else the first existing
/// candidate, else the relative fallback.
pub fn resolve_data_dir(configured: Option<&str>) -> PathBuf {
    if let Some(dir) = configured {
        return PathBuf::from(dir);
    }

    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_data_directory(&cwd, home_dir().as_deref())
        .unwrap_or_else(|| PathBuf::from(reports::FALLBACK_DATA_DIR))
}

/// What the data directory holds, used by the startup banner
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInventory {
    pub data_dir: PathBuf,
    pub exists: bool,
    /// Report file names, oldest first
    pub files: Vec<String>,
}

impl ReportInventory {
    pub fn has_reports(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn newest(&self) -> Option<&str> {
        self.files.last().map(String::as_str)
    }
}

/// Take stock of the report files without parsing them
pub fn inventory(locator: &ReportLocator) -> ReportInventory {
    let files = locator
        .discover()
        .into_iter()
        .map(|f| f.filename)
        .collect();

    ReportInventory {
        data_dir: locator.data_dir().to_path_buf(),
        exists: locator.data_dir().is_dir(),
        files,
    }
}
