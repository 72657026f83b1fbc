//! # training-summary: per-epoch training log charts
//!
//! Extracts `epoch`, `train_loss`, `lr` and `dice coefficient` values from
//! plain-text training logs and renders a three-panel summary figure
//! (loss, Dice, learning rate) sharing one epoch axis.
//!
//! ## Pipeline
//!
//! ```text
//! locator::locate_results ──> metrics::parse_results_file ──> chart::render_summary
//!      (which log?)              (MetricsTable)                 (one image file)
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use training_summary::{chart::ChartStyle, run, SummaryRequest};
//!
//! let request = SummaryRequest {
//!     results: None,
//!     results_dir: Path::new(".").to_path_buf(),
//!     out: Path::new("training_summary.png").to_path_buf(),
//!     style: ChartStyle::default(),
//! };
//! let saved = run(&request)?;
//! println!("Saved: {}", saved.display());
//! # Ok::<(), training_summary::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod chart;
pub mod cli;
pub mod error;
pub mod locator;
pub mod metrics;

use std::path::PathBuf;

pub use error::{Error, Result};

/// One end-to-end summary job: which log to read and where to draw it.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    /// Explicit log path; overrides `results_dir` when set
    pub results: Option<PathBuf>,
    /// Directory searched for the newest `results*.txt`
    pub results_dir: PathBuf,
    /// Output image path
    pub out: PathBuf,
    /// Figure style, including output DPI
    pub style: chart::ChartStyle,
}

/// Locate, parse and render; returns the path that was written.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no log can be located, [`Error::Parse`]
/// if the log holds no complete epoch block, or any rendering error.
pub fn run(request: &SummaryRequest) -> Result<PathBuf> {
    let log_path = locator::locate_results(request.results.as_deref(), &request.results_dir)?;
    let table = metrics::parse_results_file(&log_path)?;

    if let Some(best) = table.best_dice() {
        tracing::info!(
            "Best dice {:.4} at epoch {} (epochs {}..={})",
            best.dice(),
            best.epoch(),
            table.first().map_or(0, metrics::LogRecord::epoch),
            table.last().map_or(0, metrics::LogRecord::epoch),
        );
    }

    chart::render_summary(&table, &request.out, &request.style)?;
    Ok(request.out.clone())
}
