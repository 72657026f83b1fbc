//! Training metrics extracted from plain-text logs
//!
//! ## Schema Overview
//!
//! ```text
//! log text ──split──> blocks ──regex──> LogRecord (N) ──> MetricsTable
//!                                                         (sorted, one per epoch)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use training_summary::metrics::parse_log;
//!
//! let text = "[epoch: 1] train_loss: 0.5 lr: 0.01 dice coefficient: 0.2\n\n\
//!             [epoch: 2] train_loss: 0.3 lr: 0.009 dice coefficient: 0.4\n";
//!
//! let table = parse_log(text)?;
//! assert_eq!(table.epochs(), vec![1, 2]);
//! # Ok::<(), training_summary::Error>(())
//! ```

mod parser;
mod record;
mod table;

pub use parser::{parse_log, parse_log_bytes, parse_log_with_stats, parse_results_file, ParseStats};
pub use record::LogRecord;
pub use table::MetricsTable;
