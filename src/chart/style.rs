//! Chart style - explicit, per-render figure configuration
//!
//! Sizes are given in typographic points and converted to pixels with the
//! output DPI, so the same style renders proportionally at any resolution.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default output resolution (dots per inch)
pub const DEFAULT_DPI: u32 = 300;

/// Canvas sides must stay below this many pixels
pub const MAX_PIXELS_PER_SIDE: u32 = 1 << 16;

/// Points per inch
const POINTS_PER_INCH: f64 = 72.0;

/// Figure style for one render call.
///
/// `Default` reproduces the reference summary figure: a 7.4 × 9.6 inch
/// canvas, 12 pt base text, 13 pt panel titles and 1.7 pt lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartStyle {
    /// Figure width in inches
    pub width_in: f64,
    /// Figure height in inches
    pub height_in: f64,
    /// Output resolution
    pub dpi: u32,
    /// Base font size (tick labels), points
    pub font_size: f64,
    /// Panel title size, points
    pub title_size: f64,
    /// Axis label size, points
    pub label_size: f64,
    /// Series line width, points
    pub line_width: f64,
    /// Gridline width, points
    pub grid_width: f64,
    /// Gridline opacity in [0, 1]
    pub grid_alpha: f64,
    /// Dash length of gridlines, points
    pub grid_dash: f64,
    /// Gap between gridline dashes, points
    pub grid_gap: f64,
    /// Tick mark length, points (drawn inward)
    pub tick_length: f64,
    /// Space above each panel title, points
    pub title_pad: f64,
    /// Fraction of figure height kept free above the top panel
    pub top_margin: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width_in: 7.4,
            height_in: 9.6,
            dpi: DEFAULT_DPI,
            font_size: 12.0,
            title_size: 13.0,
            label_size: 12.0,
            line_width: 1.7,
            grid_width: 0.6,
            grid_alpha: 0.6,
            grid_dash: 3.7,
            grid_gap: 1.6,
            tick_length: 3.5,
            title_pad: 8.0,
            top_margin: 0.02,
        }
    }
}

impl ChartStyle {
    /// Default style at a given resolution.
    #[must_use]
    pub fn with_dpi(dpi: u32) -> Self {
        Self {
            dpi,
            ..Self::default()
        }
    }

    /// Check that the style can produce a non-empty figure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a zero DPI, a non-positive
    /// figure size, a canvas side of [`MAX_PIXELS_PER_SIDE`] pixels or more,
    /// or a top margin outside [0, 1).
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(Error::InvalidInput("dpi must be positive".to_string()));
        }
        if !(self.width_in > 0.0 && self.height_in > 0.0) {
            return Err(Error::InvalidInput(format!(
                "figure size must be positive, got {}x{} in",
                self.width_in, self.height_in
            )));
        }
        let dpi = f64::from(self.dpi);
        let (width_px, height_px) = (
            (self.width_in * dpi).round(),
            (self.height_in * dpi).round(),
        );
        let limit = f64::from(MAX_PIXELS_PER_SIDE);
        if !(width_px < limit && height_px < limit) {
            return Err(Error::InvalidInput(format!(
                "{width_px}x{height_px} px at {} dpi exceeds {MAX_PIXELS_PER_SIDE} px per side",
                self.dpi
            )));
        }
        if !(0.0..1.0).contains(&self.top_margin) {
            return Err(Error::InvalidInput(format!(
                "top margin must be in [0, 1), got {}",
                self.top_margin
            )));
        }
        Ok(())
    }

    /// Canvas size in pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_in * dpi).round().max(1.0) as u32,
            (self.height_in * dpi).round().max(1.0) as u32,
        )
    }

    /// Convert a size in points to whole pixels (at least one).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn px(&self, points: f64) -> u32 {
        (points * f64::from(self.dpi) / POINTS_PER_INCH)
            .round()
            .max(1.0) as u32
    }

    /// Font size in pixels for a point size.
    #[must_use]
    pub fn font_px(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / POINTS_PER_INCH
    }
}
