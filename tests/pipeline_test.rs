//! End-to-end pipeline tests: locate → parse → render
//!
//! Each stage must fail before the next one runs.

use std::path::{Path, PathBuf};

use training_summary::chart::ChartStyle;
use training_summary::{run, Error, SummaryRequest};

fn request(results: Option<PathBuf>, results_dir: &Path, out: PathBuf) -> SummaryRequest {
    SummaryRequest {
        results,
        results_dir: results_dir.to_path_buf(),
        out,
        style: ChartStyle::with_dpi(60),
    }
}

#[test]
fn test_missing_explicit_results_fails_before_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out/summary.png");
    let req = request(Some(dir.path().join("results_nope.txt")), dir.path(), out.clone());

    let err = run(&req).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(!out.exists());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_empty_search_directory_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let req = request(None, dir.path(), dir.path().join("summary.png"));

    assert!(matches!(run(&req), Err(Error::NotFound(_))));
}

#[test]
fn test_unparseable_log_fails_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("results1.txt"), "epoch 1 no fields\n").unwrap();
    let out = dir.path().join("summary.png");

    let err = run(&request(None, dir.path(), out.clone())).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert!(!out.exists());
}

#[test]
fn test_unsupported_output_extension() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("results1.txt"),
        "[epoch: 1] train_loss: 0.5 lr: 0.01 dice coefficient: 0.2\n",
    )
    .unwrap();

    let err = run(&request(None, dir.path(), dir.path().join("summary.gif"))).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
}

#[test]
fn test_run_writes_summary() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("results20260208-153000.txt"),
        "[epoch: 1] train_loss: 0.5 lr: 0.01 dice coefficient: 0.2\n\n\
         [epoch: 2] train_loss: 0.3 lr: 0.009 dice coefficient: 0.4\n",
    )
    .unwrap();
    let out = dir.path().join("plots/training_summary.png");

    let saved = run(&request(None, dir.path(), out.clone())).unwrap();
    assert_eq!(saved, out);
    assert!(out.is_file());
}

#[test]
fn test_overflowing_value_is_skipped_and_rest_renders() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("results1.txt"),
        format!(
            "[epoch: 1] train_loss: {} lr: 0.01 dice coefficient: 0.2\n\n\
             [epoch: 2] train_loss: 0.3 lr: 0.009 dice coefficient: 0.4\n",
            "9".repeat(400)
        ),
    )
    .unwrap();
    let out = dir.path().join("summary.svg");

    let saved = run(&request(None, dir.path(), out.clone())).unwrap();
    assert_eq!(saved, out);
    assert!(std::fs::read_to_string(&out).unwrap().starts_with("<svg"));
}

#[test]
fn test_oversized_dpi_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("results1.txt"),
        "[epoch: 1] train_loss: 0.5 lr: 0.01 dice coefficient: 0.2\n",
    )
    .unwrap();
    let out = dir.path().join("plots/summary.png");
    let req = SummaryRequest {
        style: ChartStyle::with_dpi(100_000),
        ..request(None, dir.path(), out.clone())
    };

    assert!(matches!(run(&req), Err(Error::InvalidInput(_))));
    assert!(!dir.path().join("plots").exists());
}
