//! Axis scale selection and padded axis ranges

use std::ops::Range;

/// Minimum max/min ratio at which the learning-rate axis switches to log scale
pub const LOG_SCALE_RATIO: f64 = 50.0;

/// Fraction of the data span added on each side of an axis
pub const AXIS_MARGIN: f64 = 0.05;

/// Vertical axis scale of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YScale {
    /// Evenly spaced values
    Linear,
    /// Evenly spaced decades
    Log,
}

/// Pick the scale for the learning-rate panel.
///
/// Log scale is used only when every value is strictly positive and the
/// largest is at least [`LOG_SCALE_RATIO`] times the smallest.
#[must_use]
pub fn lr_scale(learning_rates: &[f64]) -> YScale {
    let Some((min, max)) = min_max(learning_rates) else {
        return YScale::Linear;
    };

    if min > 0.0 && max / min >= LOG_SCALE_RATIO {
        YScale::Log
    } else {
        YScale::Linear
    }
}

/// Linear axis range covering `values` with [`AXIS_MARGIN`] on each side.
///
/// A constant series is widened so the range is never empty.
#[must_use]
pub fn padded_range(values: &[f64]) -> Range<f64> {
    let Some((min, max)) = min_max(values) else {
        return 0.0..1.0;
    };

    let span = max - min;
    let pad = if span > 0.0 {
        span * AXIS_MARGIN
    } else if min == 0.0 {
        0.5
    } else {
        min.abs() * AXIS_MARGIN
    };
    (min - pad)..(max + pad)
}

/// Log axis range covering strictly positive `values`, padded in log space.
///
/// Non-positive values are ignored; with none left the range is `1..10`.
#[must_use]
pub fn padded_log_range(values: &[f64]) -> Range<f64> {
    let logs: Vec<f64> = values
        .iter()
        .filter(|v| **v > 0.0)
        .map(|v| v.log10())
        .collect();

    let Some((min, max)) = min_max(&logs) else {
        return 1.0..10.0;
    };

    let span = max - min;
    let pad = if span > 0.0 { span * AXIS_MARGIN } else { 0.5 };
    10f64.powf(min - pad)..10f64.powf(max + pad)
}

/// Shared horizontal range for all panels.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn epoch_range(epochs: &[u64]) -> Range<f64> {
    let values: Vec<f64> = epochs.iter().map(|e| *e as f64).collect();
    padded_range(&values)
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().copied().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}
