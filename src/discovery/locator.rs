use chrono::{DateTime, Utc};
use ignore::WalkBuilder;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;

use crate::core::constants::reports;
use crate::core::error::Result;
use crate::core::types::{AnalysisReport, LoadedReport, ReportMetadata};
use crate::reporting::logging;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

static REPORT_FILE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "^{}.*{}$",
        regex::escape(reports::FILE_PREFIX),
        regex::escape(reports::FILE_EXTENSION)
    ))
    .expect("Failed to compile report file name pattern")
});

/// Whether a bare file name matches `kafka-analysis-*.json`
pub fn is_report_file_name(name: &str) -> bool {
    REPORT_FILE_NAME.is_match(name)
}

/// A report file found on disk, before parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub path: PathBuf,
    pub filename: String,
    pub modified: SystemTime,
}

/// A report file that could not be loaded
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SkippedReport {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of loading every report in the data directory
#[derive(Debug, Clone, Default)]
pub struct ReportBatch {
    /// Successfully parsed reports, oldest first
    pub reports: Vec<LoadedReport>,
    /// One entry per file that failed to load
    pub skipped: Vec<SkippedReport>,
}

/// Where the refresh pipeline gets its reports from
pub trait ReportSource: Send + Sync {
    fn data_dir(&self) -> &Path;
    fn latest(&self) -> Option<LoadedReport>;
    fn all(&self) -> ReportBatch;

    /// Newest report and full batch together
    fn scan(&self) -> (Option<LoadedReport>, ReportBatch) {
        (self.latest(), self.all())
    }
}

/// Finds and parses analyzer reports in a single directory
#[derive(Debug, Clone)]
pub struct ReportLocator {
    data_dir: PathBuf,
}

impl ReportLocator {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// List matching report files, oldest first.
    ///
    /// A missing data directory simply holds no reports. Entries that cannot
    /// be read or stat'ed are logged and left out; they never hide the rest.
    /// Files sharing a modification time are ordered by name so the result is
    /// stable across calls.
    pub fn discover(&self) -> Vec<ReportFile> {
        if !self.data_dir.is_dir() {
            log::debug!("Data directory {} does not exist", self.data_dir.display());
            return Vec::new();
        }

        let mut builder = WalkBuilder::new(&self.data_dir);
        builder.max_depth(Some(1)).standard_filters(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    logging::log_error(
                        &format!("Could not read an entry in '{}'", self.data_dir.display()),
                        Some(&e),
                    );
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }

            if let Some(file) = report_file(entry.path()) {
                files.push(file);
            }
        }

        files.sort_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| a.filename.cmp(&b.filename))
        });

        logging::log_scan(&self.data_dir, files.len());
        files
    }

    /// Load the report with the newest modification time.
    ///
    /// Returns `None` when there is no report or when the newest one fails to
    /// parse; the failure is logged and older files are not tried.
    pub fn latest(&self) -> Option<LoadedReport> {
        let files = self.discover();
        let newest = files.last()?;
        match load_report_file(newest) {
            Ok(report) => {
                logging::log_report_loaded(&report);
                Some(report)
            }
            Err(e) => {
                logging::log_skipped_report(&newest.path, &e.to_string());
                None
            }
        }
    }

    /// Load every report, oldest first, skipping the ones that fail to parse.
    pub fn all(&self) -> ReportBatch {
        parse_all(&self.discover())
    }

    /// `latest()` and `all()` from one directory scan, parsing each file once
    pub fn scan(&self) -> (Option<LoadedReport>, ReportBatch) {
        let files = self.discover();
        let batch = parse_all(&files);

        let latest = files.last().and_then(|newest| {
            batch
                .reports
                .last()
                .filter(|report| report.metadata.filepath == newest.path)
                .cloned()
        });
        if let Some(report) = &latest {
            logging::log_report_loaded(report);
        }

        (latest, batch)
    }
}

/// Stat a walked path; `None` for non-report names, directories and
/// entries that vanished or cannot be read
fn report_file(path: &Path) -> Option<ReportFile> {
    let filename = path.file_name().and_then(|n| n.to_str())?;
    if !is_report_file_name(filename) {
        return None;
    }

    let modified = fs::metadata(path).and_then(|metadata| {
        if metadata.is_file() {
            metadata.modified().map(Some)
        } else {
            Ok(None)
        }
    });

    match modified {
        Ok(Some(modified)) => Some(ReportFile {
            path: path.to_path_buf(),
            filename: filename.to_string(),
            modified,
        }),
        Ok(None) => None,
        Err(e) => {
            logging::log_skipped_report(path, &e.to_string());
            None
        }
    }
}

fn parse_all(files: &[ReportFile]) -> ReportBatch {
    // collect() on an indexed parallel iterator keeps the input order
    let results: Vec<(&ReportFile, Result<LoadedReport>)> = files
        .par_iter()
        .map(|file| (file, load_report_file(file)))
        .collect();

    let mut batch = ReportBatch::default();
    for (file, result) in results {
        match result {
            Ok(report) => batch.reports.push(report),
            Err(e) => {
                let reason = e.to_string();
                logging::log_skipped_report(&file.path, &reason);
                batch.skipped.push(SkippedReport {
                    path: file.path.clone(),
                    reason,
                });
            }
        }
    }

    batch
}

impl ReportSource for ReportLocator {
    fn data_dir(&self) -> &Path {
        ReportLocator::data_dir(self)
    }

    fn latest(&self) -> Option<LoadedReport> {
        ReportLocator::latest(self)
    }

    fn all(&self) -> ReportBatch {
        ReportLocator::all(self)
    }

    fn scan(&self) -> (Option<LoadedReport>, ReportBatch) {
        ReportLocator::scan(self)
    }
}

/// Parse a single report file and attach its file metadata
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<LoadedReport> {
    let path = path.as_ref();
    let modified = fs::metadata(path)?.modified()?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    load_report_file(&ReportFile {
        path: path.to_path_buf(),
        filename,
        modified,
    })
}

fn load_report_file(file: &ReportFile) -> Result<LoadedReport> {
    let content = fs::read_to_string(&file.path)?;
    let report = AnalysisReport::from_json(&content)?;

    Ok(LoadedReport {
        report,
        metadata: ReportMetadata {
            filename: file.filename.clone(),
            filepath: file.path.clone(),
            last_modified: DateTime::<Utc>::from(file.modified),
        },
    })
}
