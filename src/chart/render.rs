//! Three-panel summary figure drawn with `plotters`
//!
//! Layout (shared epoch axis):
//!
//! ```text
//! ┌──────────────────────┐
//! │ Training Loss        │  epoch vs train_loss
//! ├──────────────────────┤
//! │ Validation Dice      │  epoch vs dice, y in [0, 1]
//! ├──────────────────────┤
//! │ Learning Rate        │  epoch vs lr, log y when the span is wide
//! └──────── Epoch ───────┘
//! ```

use std::ops::Range;

use once_cell::sync::Lazy;
use plotters::coord::ranged1d::{AsRangedCoord, BoldPoints, Ranged, ValueFormatter};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::register_font;

use super::scale::{epoch_range, lr_scale, padded_log_range, padded_range, YScale};
use super::ChartStyle;
use crate::metrics::MetricsTable;
use crate::{Error, Result};

/// DejaVu Sans, registered as the `sans-serif` family for every backend
static SANS_SERIF_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

static SANS_SERIF: Lazy<bool> = Lazy::new(|| {
    register_font(FontFamily::SansSerif.as_str(), FontStyle::Normal, SANS_SERIF_TTF).is_ok()
});

/// Series color
const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Gridline color before alpha
const GRID_COLOR: RGBColor = RGBColor(176, 176, 176);

/// Target number of labelled ticks per axis
const X_TICKS: usize = 8;
const Y_TICKS: usize = 6;

/// Static description of one panel.
struct Panel {
    title: &'static str,
    y_label: &'static str,
    x_label: Option<&'static str>,
}

const LOSS_PANEL: Panel = Panel {
    title: "Training Loss",
    y_label: "Loss",
    x_label: None,
};

const DICE_PANEL: Panel = Panel {
    title: "Validation Dice",
    y_label: "Dice",
    x_label: None,
};

const LR_PANEL: Panel = Panel {
    title: "Learning Rate",
    y_label: "LR",
    x_label: Some("Epoch"),
};

/// Draw the full figure onto `root` and flush it to the backend.
///
/// # Errors
///
/// Returns [`Error::Render`] if the bundled font cannot be loaded or any
/// drawing operation fails.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &MetricsTable,
    style: &ChartStyle,
) -> Result<()> {
    if !*SANS_SERIF {
        return Err(Error::Render("bundled sans-serif font is invalid".to_string()));
    }
    root.fill(&WHITE).map_err(render_error)?;

    let (_, height) = root.dim_in_pixel();
    #[allow(clippy::cast_possible_truncation)]
    let top = (f64::from(height) * style.top_margin).round() as i32;
    let panels = root.margin(top, 0, 0, 0).split_evenly((3, 1));

    #[allow(clippy::cast_precision_loss)]
    let epochs: Vec<f64> = table.epochs().iter().map(|e| *e as f64).collect();
    let x_range = epoch_range(&table.epochs());

    let losses = table.train_losses();
    let dice = table.dice_scores();
    let lrs = table.learning_rates();

    draw_panel(
        &panels[0],
        &LOSS_PANEL,
        x_range.clone(),
        padded_range(&losses),
        &zip_points(&epochs, &losses),
        style,
    )?;
    draw_panel(
        &panels[1],
        &DICE_PANEL,
        x_range.clone(),
        0.0..1.0,
        &zip_points(&epochs, &dice),
        style,
    )?;

    let lr_points = zip_points(&epochs, &lrs);
    match lr_scale(&lrs) {
        YScale::Log => draw_panel(
            &panels[2],
            &LR_PANEL,
            x_range,
            padded_log_range(&lrs).log_scale(),
            &lr_points,
            style,
        )?,
        YScale::Linear => draw_panel(
            &panels[2],
            &LR_PANEL,
            x_range,
            padded_range(&lrs),
            &lr_points,
            style,
        )?,
    }

    root.present().map_err(render_error)?;
    Ok(())
}

fn draw_panel<DB, Y>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    x_range: Range<f64>,
    y_spec: Y,
    points: &[(f64, f64)],
    style: &ChartStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    Y: AsRangedCoord<Value = f64>,
    Y::CoordDescType: ValueFormatter<f64>,
{
    let title_font = font(style, style.title_size);
    let tick_font = font(style, style.font_size);
    let label_font = font(style, style.label_size);

    let show_x_labels = panel.x_label.is_some();
    let x_label_area = if show_x_labels {
        style.px(style.font_size * 3.2)
    } else {
        style.px(style.font_size * 0.6)
    };

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, title_font)
        .margin_top(style.px(style.title_pad))
        .margin_left(style.px(4.0))
        .margin_right(style.px(12.0))
        .x_label_area_size(x_label_area)
        .y_label_area_size(style.px(style.font_size * 5.5))
        .build_cartesian_2d(x_range, y_spec)
        .map_err(render_error)?;

    // Tick labels on the upper panels would duplicate the shared epoch axis.
    let x_formatter: &dyn Fn(&f64) -> String = if show_x_labels {
        &format_epoch
    } else {
        &blank_label
    };

    let tick_px = i32::try_from(style.px(style.tick_length)).unwrap_or(i32::MAX);
    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh()
        .set_all_tick_mark_size(-tick_px)
        .x_labels(X_TICKS)
        .y_labels(Y_TICKS)
        .x_label_formatter(x_formatter)
        .y_label_formatter(&format_value)
        .label_style(tick_font)
        .axis_desc_style(label_font)
        .y_desc(panel.y_label);
    if let Some(x_label) = panel.x_label {
        mesh.x_desc(x_label);
    }
    mesh.draw().map_err(render_error)?;

    draw_grid(&mut chart, style)?;

    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            LINE_COLOR.stroke_width(style.px(style.line_width)),
        ))
        .map_err(render_error)?;

    Ok(())
}

/// Light dashed gridlines at the labelled key points of both axes.
fn draw_grid<DB, X, Y>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<X, Y>>,
    style: &ChartStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    let spec = chart.as_coord_spec();
    let x_bounds = spec.x_spec().range();
    let y_bounds = spec.y_spec().range();
    let x_keys = spec.x_spec().key_points(BoldPoints(X_TICKS));
    let y_keys = spec.y_spec().key_points(BoldPoints(Y_TICKS));

    let grid_style = GRID_COLOR
        .mix(style.grid_alpha)
        .stroke_width(style.px(style.grid_width));
    let dash = style.px(style.grid_dash);
    let gap = style.px(style.grid_gap);

    let vertical = x_keys
        .into_iter()
        .map(|x| vec![(x, y_bounds.start), (x, y_bounds.end)]);
    let horizontal = y_keys
        .into_iter()
        .map(|y| vec![(x_bounds.start, y), (x_bounds.end, y)]);

    for line in vertical.chain(horizontal) {
        chart
            .draw_series(DashedLineSeries::new(line, dash, gap, grid_style))
            .map_err(render_error)?;
    }
    Ok(())
}

fn zip_points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().copied().zip(ys.iter().copied()).collect()
}

fn font(style: &ChartStyle, points: f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, style.font_px(points), FontStyle::Normal)
}

fn format_epoch(x: &f64) -> String {
    if (x - x.round()).abs() < 1e-9 {
        format!("{x:.0}")
    } else {
        format!("{x:.1}")
    }
}

fn blank_label(_: &f64) -> String {
    String::new()
}

/// Compact tick label: fixed notation for ordinary magnitudes, scientific otherwise.
fn format_value(y: &f64) -> String {
    let y = *y;
    if y == 0.0 {
        return "0".to_string();
    }
    let magnitude = y.abs();
    if (1e-3..1e4).contains(&magnitude) {
        let fixed = format!("{y:.4}");
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        format!("{y:.0e}")
    }
}

fn render_error<E: std::fmt::Display>(err: E) -> Error {
    Error::Render(err.to_string())
}
