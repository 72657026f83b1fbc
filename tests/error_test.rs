//! Tests for error types

use training_summary::Error;

#[test]
fn test_not_found_error() {
    let error = Error::NotFound("No results*.txt found in: logs".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Results log not found"));
    assert!(error_str.contains("logs"));
}

#[test]
fn test_parse_error() {
    let error = Error::Parse("Parsed 0 rows from results.txt".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Log parse error"));
    assert!(error_str.contains("results.txt"));
}

#[test]
fn test_unsupported_format_error() {
    let error = Error::UnsupportedFormat(".pdf".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Unsupported output format"));
    assert!(error_str.contains("png, jpg, jpeg, bmp, svg"));
}

#[test]
fn test_invalid_input_error() {
    let error = Error::InvalidInput("dpi must be positive".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid input"));
    assert!(error_str.contains("dpi must be positive"));
}

#[test]
fn test_render_error() {
    let error = Error::Render("font not available".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Render error"));
    assert!(error_str.contains("font not available"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
}

#[test]
fn test_error_debug() {
    let error = Error::NotFound("x".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("NotFound"));
}

#[test]
fn test_result_type_alias_error() {
    fn returns_error() -> training_summary::Result<i32> {
        Err(Error::Parse("no rows".to_string()))
    }

    let result = returns_error();
    assert!(matches!(result, Err(Error::Parse(_))));
}
