//! File Locator - resolve which results log to read
//!
//! An explicit path always wins. Without one, the newest `results*.txt`
//! in the search directory is chosen by modification time.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::{Error, Result};

/// File name prefix of a results log.
pub const RESULTS_PREFIX: &str = "results";

/// File name suffix of a results log.
pub const RESULTS_SUFFIX: &str = ".txt";

/// A results log found in the search directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogCandidate {
    path: PathBuf,
    modified: DateTime<Utc>,
}

impl LogCandidate {
    /// Path of the candidate file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last modification time.
    #[must_use]
    pub const fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Consume the candidate, returning its path.
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Check whether a file name matches `results*.txt`.
#[must_use]
pub fn is_results_file_name(name: &str) -> bool {
    name.len() >= RESULTS_PREFIX.len() + RESULTS_SUFFIX.len()
        && name.starts_with(RESULTS_PREFIX)
        && name.ends_with(RESULTS_SUFFIX)
}

/// Resolve the log file to parse.
///
/// # Arguments
///
/// * `explicit` - Path given by the user; takes priority when present
/// * `search_dir` - Directory scanned for `results*.txt` otherwise
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the explicit path does not exist, or if
/// no `results*.txt` file exists in `search_dir`.
pub fn locate_results(explicit: Option<&Path>, search_dir: &Path) -> Result<PathBuf> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::NotFound(format!(
                    "--results not found: {}",
                    path.display()
                )));
            }
            tracing::info!("Using results log {}", path.display());
            Ok(path.to_path_buf())
        }
        None => find_latest_results(search_dir).map(LogCandidate::into_path),
    }
}

/// Find the most recently modified `results*.txt` in a directory.
///
/// Candidates with equal modification times are ordered by file name; the
/// lexicographically greatest name wins, which for timestamped names such
/// as `results20260208-153000.txt` is also the newest run.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the directory cannot be listed or holds
/// no matching file.
pub fn find_latest_results(dir: &Path) -> Result<LogCandidate> {
    let latest = list_candidates(dir)
        .into_iter()
        .max_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| a.path.file_name().cmp(&b.path.file_name()))
        })
        .ok_or_else(|| {
            Error::NotFound(format!(
                "No {RESULTS_PREFIX}*{RESULTS_SUFFIX} found in: {}",
                dir.display()
            ))
        })?;

    tracing::info!(
        "Using latest results log {} (modified {})",
        latest.path.display(),
        latest.modified.to_rfc3339()
    );
    Ok(latest)
}

fn list_candidates(dir: &Path) -> Vec<LogCandidate> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot list {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut candidates = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name();
        if !name.to_str().is_some_and(is_results_file_name) {
            continue;
        }

        // Follows symlinks, so a linked log counts with its target's mtime.
        let metadata = match std::fs::metadata(entry.path()) {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!("Skipping {}: {e}", entry.path().display());
                continue;
            }
        };

        let Ok(modified) = metadata.modified() else {
            continue;
        };

        candidates.push(LogCandidate {
            path: entry.path(),
            modified: DateTime::<Utc>::from(modified),
        });
    }

    tracing::debug!("Found {} results logs in {}", candidates.len(), dir.display());
    candidates
}
