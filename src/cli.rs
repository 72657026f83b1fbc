//! Command-line options
//!
//! Flag names keep their underscore spelling (`--results_dir`) so existing
//! invocations keep working.

use std::path::PathBuf;

use clap::Parser;

use crate::chart::{ChartStyle, DEFAULT_DPI};
use crate::SummaryRequest;

/// Plot loss, Dice and learning rate from a training results log.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "plot-training-summary", version, about)]
pub struct Cli {
    /// Path to a results*.txt log (empty = pick the newest in --results_dir)
    #[arg(long, default_value = "")]
    pub results: String,

    /// Directory searched for the newest results*.txt
    #[arg(long = "results_dir", default_value = ".")]
    pub results_dir: PathBuf,

    /// Output image path (png recommended; jpg, bmp and svg also work)
    #[arg(long, default_value = "training_summary.png")]
    pub out: PathBuf,

    /// Output resolution in dots per inch
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(1..))]
    pub dpi: u32,
}

impl Cli {
    /// Explicit results path, if one was given.
    #[must_use]
    pub fn results_path(&self) -> Option<PathBuf> {
        (!self.results.is_empty()).then(|| PathBuf::from(&self.results))
    }

    /// Figure style for these options.
    #[must_use]
    pub fn chart_style(&self) -> ChartStyle {
        ChartStyle::with_dpi(self.dpi)
    }
}

/// Convert CLI options into a summary request; the library never sees clap types.
impl From<Cli> for SummaryRequest {
    fn from(cli: Cli) -> Self {
        Self {
            results: cli.results_path(),
            style: cli.chart_style(),
            results_dir: cli.results_dir,
            out: cli.out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["plot-training-summary"]).unwrap();
        assert_eq!(cli.results, "");
        assert!(cli.results_path().is_none());
        assert_eq!(cli.results_dir, PathBuf::from("."));
        assert_eq!(cli.out, PathBuf::from("training_summary.png"));
        assert_eq!(cli.dpi, 300);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "plot-training-summary",
            "--results",
            "results20260208-153000.txt",
            "--results_dir",
            "logs",
            "--out",
            "plots/summary.svg",
            "--dpi",
            "150",
        ])
        .unwrap();

        assert_eq!(
            cli.results_path(),
            Some(PathBuf::from("results20260208-153000.txt"))
        );
        assert_eq!(cli.results_dir, PathBuf::from("logs"));
        assert_eq!(cli.chart_style().dpi, 150);

        let request = SummaryRequest::from(cli);
        assert_eq!(request.out, PathBuf::from("plots/summary.svg"));
        assert_eq!(request.style, ChartStyle::with_dpi(150));
    }

    #[test]
    fn test_rejects_zero_dpi() {
        assert!(Cli::try_parse_from(["plot-training-summary", "--dpi", "0"]).is_err());
        assert!(Cli::try_parse_from(["plot-training-summary", "--dpi", "abc"]).is_err());
    }

    #[test]
    fn test_rejects_subcommand() {
        assert!(Cli::try_parse_from(["plot-training-summary", "train"]).is_err());
    }
}
