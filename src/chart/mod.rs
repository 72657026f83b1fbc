//! Chart Renderer - metrics table to a three-panel summary image
//!
//! The figure is drawn into memory first (pixel buffer or SVG string) and
//! written to disk only after every panel rendered successfully. The
//! in-memory figure is owned by [`render_summary`] and released on return,
//! whether drawing succeeded or not.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use training_summary::chart::{render_summary, ChartStyle};
//! use training_summary::metrics::parse_log;
//!
//! let table = parse_log("[epoch: 1] train_loss: 0.5 lr: 0.01 dice coefficient: 0.2")?;
//! render_summary(&table, Path::new("plots/summary.png"), &ChartStyle::with_dpi(150))?;
//! # Ok::<(), training_summary::Error>(())
//! ```

mod output;
mod render;
mod scale;
mod style;

use std::path::Path;

use plotters::prelude::{BitMapBackend, IntoDrawingArea, SVGBackend};

pub use output::{EncodedFigure, OutputFormat};
pub use render::draw_figure;
pub use scale::{
    epoch_range, lr_scale, padded_log_range, padded_range, YScale, AXIS_MARGIN, LOG_SCALE_RATIO,
};
pub use style::{ChartStyle, DEFAULT_DPI, MAX_PIXELS_PER_SIDE};

use crate::metrics::MetricsTable;
use crate::{Error, Result};

/// Render the loss / Dice / learning-rate summary and write it to `out`.
///
/// The format follows the extension of `out` (see [`OutputFormat`]);
/// missing parent directories are created.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for an unknown extension,
/// [`Error::InvalidInput`] for an undrawable table or style (see
/// [`draw_in_memory`]), [`Error::Render`] if drawing fails, and
/// [`Error::Io`] / [`Error::Image`] if writing fails.
pub fn render_summary(table: &MetricsTable, out: &Path, style: &ChartStyle) -> Result<()> {
    let format = OutputFormat::from_path(out)?;

    let figure = draw_in_memory(table, style, format)?;
    figure.write(out, format)?;

    tracing::info!(
        "Rendered {} epochs to {} ({:?}, {} dpi, lr axis {:?})",
        table.len(),
        out.display(),
        format,
        style.dpi,
        lr_scale(&table.learning_rates())
    );
    Ok(())
}

/// Draw the figure into an owned in-memory buffer.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an invalid style, an empty table or
/// a record holding a non-finite value, and [`Error::Render`] if drawing
/// fails.
pub fn draw_in_memory(
    table: &MetricsTable,
    style: &ChartStyle,
    format: OutputFormat,
) -> Result<EncodedFigure> {
    style.validate()?;
    check_drawable(table)?;
    let (width, height) = style.pixel_size();

    if format.is_raster() {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| {
                Error::InvalidInput(format!("{width}x{height} px does not fit in memory"))
            })?;
        let mut pixels = vec![0u8; len];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            draw_figure(&root, table, style)?;
        }
        Ok(EncodedFigure::Raster {
            width,
            height,
            pixels,
        })
    } else {
        let mut document = String::new();
        {
            let root = SVGBackend::with_string(&mut document, (width, height)).into_drawing_area();
            draw_figure(&root, table, style)?;
        }
        Ok(EncodedFigure::Svg(document))
    }
}

/// Axis ranges need at least one row and finite values.
fn check_drawable(table: &MetricsTable) -> Result<()> {
    if table.is_empty() {
        return Err(Error::InvalidInput(
            "cannot render an empty metrics table".to_string(),
        ));
    }
    if let Some(record) = table.records().iter().find(|r| !r.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "epoch {} has a non-finite value (loss {}, lr {}, dice {})",
            record.epoch(),
            record.train_loss(),
            record.lr(),
            record.dice()
        )));
    }
    Ok(())
}
