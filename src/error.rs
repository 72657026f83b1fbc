//! Error types for training-summary
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// training-summary error types
#[derive(Error, Debug)]
pub enum Error {
    /// Results log could not be located
    #[error("Results log not found: {0}")]
    NotFound(String),

    /// Log text yielded zero complete epoch blocks
    #[error("Log parse error: {0}")]
    Parse(String),

    /// Output extension has no renderer
    #[error("Unsupported output format: {0}\nUse one of: png, jpg, jpeg, bmp, svg")]
    UnsupportedFormat(String),

    /// Invalid caller-supplied parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Plotting backend failure
    #[error("Render error: {0}")]
    Render(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Raster encoding error
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
