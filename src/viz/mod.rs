//! Chart renderers for reduced scattering data.
//!
//! - `render_1d`: `I(Q)` points with error-bar I-beams, optional log intensity
//!   axis, minor ticks, grid lines and a hover readout
//! - `render_2d`: `I(Qx, Qy)` heatmap with 64 rainbow or 11 named color buckets,
//!   linear or logarithmic color scale
//!
//! Each call builds a fresh scene and mounts it on the surface, replacing the
//! chart previously mounted on the same anchor.

pub mod axis;
pub mod hover;
pub mod text;
pub mod types;
pub mod util;

pub use types::{
    DEFAULT_ANCHOR_1D, DEFAULT_ANCHOR_2D, Palette, PlotOptions1D, PlotOptions2D, SeriesStyle,
};

use crate::error::{PlotError, PlotResult};
use crate::models::{Grid, Sample, retain_plottable};
use crate::scale::{Scale, ScaleKind, padded_extent};
use crate::scene::{Circle, Group, Line, Node, Rect, Rgb, Stroke, Text, TextAnchor};
use crate::surface::{Chart, ChartKind, Surface};

use axis::{Orient, axis, grid, minor_axis};
use hover::HoverOverlay;
use types::{MARGIN_1D, MARGIN_2D};
use util::{ColorScale, x_extent, y_extent};

/// Ticks used by `nice()` when rounding domains.
const NICE_TICKS: usize = 10;
/// Coarse tick count that minor subdivisions hang off.
const MINOR_AXIS_TICKS: usize = 4;
/// Heatmap cells are drawn larger than their spacing so no seams show.
pub const CELL_INFLATION: f64 = 1.5;

/// Render an `I(Q)` chart onto `anchor`.
///
/// Samples with `y <= 0` or `error >= y` are skipped. The anchor is cleared
/// before drawing, so on error it is left empty.
pub fn render_1d<'s>(
    surface: &'s mut Surface,
    samples: &[Sample],
    anchor: &str,
    options: &PlotOptions1D,
) -> PlotResult<&'s mut Chart> {
    surface.unmount(anchor);
    let chart = build_1d(samples, options)?;
    Ok(surface.mount(anchor, chart))
}

/// Render several `I(Q)` data sets overlaid on one chart at `anchor`, each
/// with its own marker style. Axes span all series; hover picks the nearest
/// sample across them.
pub fn render_1d_layers<'s>(
    surface: &'s mut Surface,
    series: &[(&[Sample], SeriesStyle)],
    anchor: &str,
    options: &PlotOptions1D,
) -> PlotResult<&'s mut Chart> {
    surface.unmount(anchor);
    let chart = build_1d_layers(series, options)?;
    Ok(surface.mount(anchor, chart))
}

/// Render an `I(Qx, Qy)` heatmap onto [`DEFAULT_ANCHOR_2D`].
pub fn render_2d<'s>(
    surface: &'s mut Surface,
    grid: &[Vec<f64>],
    qx: &[f64],
    qy: &[f64],
    max_intensity: f64,
    options: &PlotOptions2D,
) -> PlotResult<&'s mut Chart> {
    surface.unmount(DEFAULT_ANCHOR_2D);
    let chart = build_2d(grid, qx, qy, max_intensity, options)?;
    Ok(surface.mount(DEFAULT_ANCHOR_2D, chart))
}

/// [`render_2d`] for a loaded [`Grid`].
pub fn render_grid<'s>(
    surface: &'s mut Surface,
    grid: &Grid,
    options: &PlotOptions2D,
) -> PlotResult<&'s mut Chart> {
    render_2d(
        surface,
        &grid.values,
        &grid.qx,
        &grid.qy,
        grid.max_intensity,
        options,
    )
}

/// Build an `I(Q)` chart without mounting it.
pub fn build_1d(samples: &[Sample], options: &PlotOptions1D) -> PlotResult<Chart> {
    build_1d_layers(&[(samples, options.series_style())], options)
}

/// Build an overlay of `I(Q)` series without mounting it. Series keep their
/// order: later series draw on top.
pub fn build_1d_layers(
    series: &[(&[Sample], SeriesStyle)],
    options: &PlotOptions1D,
) -> PlotResult<Chart> {
    let o = options.resolve()?;
    let mut sets = Vec::with_capacity(series.len());
    for (samples, style) in series {
        let (color, ms) = style.resolve()?;
        let kept = retain_plottable(samples);
        log::debug!("1d: {} of {} samples retained", kept.len(), samples.len());
        sets.push((kept, color, ms));
    }
    let data: Vec<Sample> = sets.iter().flat_map(|(kept, ..)| kept.iter().copied()).collect();
    let (Some(xe), Some(ye)) = (x_extent(&data), y_extent(&data)) else {
        return Err(PlotError::NoData);
    };
    let x_domain = padded_extent([xe.0, xe.1], o.x_kind).ok_or(PlotError::NoData)?;
    let y_domain = padded_extent([ye.0, ye.1], o.y_kind).ok_or(PlotError::NoData)?;
    let (pw, ph) = (o.plot_width, o.plot_height);
    let x = Scale::new(o.x_kind, x_domain, (0.0, pw))?.nice(NICE_TICKS);
    let y = Scale::new(o.y_kind, y_domain, (ph, 0.0))?.nice(NICE_TICKS);

    let x_ticks = x.ticks(o.x_ticks);
    let y_ticks = y.ticks(o.y_ticks);
    let mut layers: Vec<Node> = Vec::new();

    layers.push(axis("x axis", &x, Orient::Bottom, &x_ticks, true).at(0.0, ph).into());
    layers.push(
        minor_axis("x axis", &x, Orient::Bottom, MINOR_AXIS_TICKS, o.minor_subdivisions)
            .at(0.0, ph)
            .into(),
    );
    layers.push(axis("y axis", &y, Orient::Left, &y_ticks, true).into());
    layers.push(minor_axis("y axis", &y, Orient::Left, MINOR_AXIS_TICKS, o.minor_subdivisions).into());

    layers.push(Text::new(pw, ph + 40.0, o.x_label.as_str(), 12.0, TextAnchor::End).into());
    layers.push(
        Text::new(22.0 - MARGIN_1D.left, 0.0, o.y_label.as_str(), 12.0, TextAnchor::End)
            .vertical()
            .into(),
    );
    layers.push(Text::new(pw / 2.0, -10.0, o.title.as_str(), 16.0, TextAnchor::Middle).into());

    if o.grid {
        layers.push(grid(&x, Orient::Bottom, &x_ticks, ph).at(0.0, ph).into());
        layers.push(grid(&y, Orient::Left, &y_ticks, pw).into());
    }

    for (kept, color, ms) in &sets {
        let (points, bars) = series_glyphs(kept, &x, &y, *color, *ms);
        layers.push(points.into());
        layers.push(bars.into());
    }

    let hover = HoverOverlay::new(&data, x, y, pw, ph);
    Ok(Chart::new(
        ChartKind::Iq,
        "default_1d",
        (o.width, o.height),
        (MARGIN_1D.left, MARGIN_1D.top),
        (x, y),
        layers,
        Some(hover),
    ))
}

/// Point markers and dashed error-bar I-beams for one series.
fn series_glyphs(data: &[Sample], x: &Scale, y: &Scale, color: Rgb, ms: f64) -> (Group, Group) {
    let mut points = Group::new("points");
    let mut bars = Group::new("error-bars");
    let solid = Stroke::solid(color, ms / 2.0);
    let dashed = Stroke {
        opacity: 0.7,
        dash: Some((2.0, 2.0)),
        ..solid.clone()
    };
    for s in data {
        let (cx, cy) = (x.map(s.x), y.map(s.y));
        let (top, bottom) = (y.map(s.high()), y.map(s.low()));
        points.push(Circle {
            cx,
            cy,
            r: ms,
            fill: color,
        });
        bars.push(Line {
            x1: cx,
            y1: bottom,
            x2: cx,
            y2: top,
            stroke: dashed.clone(),
        });
        for cap in [top, bottom] {
            bars.push(Line {
                x1: cx - ms,
                y1: cap,
                x2: cx + ms,
                y2: cap,
                stroke: solid.clone(),
            });
        }
    }
    (points, bars)
}

fn check_grid(grid: &[Vec<f64>], qx: &[f64], qy: &[f64], max_intensity: f64) -> PlotResult<()> {
    if grid.is_empty() || qx.is_empty() || qy.is_empty() {
        return Err(PlotError::NoData);
    }
    if grid.len() != qy.len() {
        return Err(PlotError::GridShape(format!(
            "{} rows but {} qy values",
            grid.len(),
            qy.len()
        )));
    }
    if let Some((row, r)) = grid.iter().enumerate().find(|(_, r)| r.len() != qx.len()) {
        return Err(PlotError::GridShape(format!(
            "row {row} has {} cells but there are {} qx values",
            r.len(),
            qx.len()
        )));
    }
    for (name, q) in [("qx", qx), ("qy", qy)] {
        if q.len() < 2 {
            return Err(PlotError::TooFewCoordinates {
                axis: name,
                got: q.len(),
            });
        }
    }
    if !(max_intensity.is_finite() && max_intensity > 0.0) {
        return Err(PlotError::InvalidIntensity(max_intensity));
    }
    Ok(())
}

/// Build an `I(Qx, Qy)` heatmap without mounting it.
pub fn build_2d(
    grid: &[Vec<f64>],
    qx: &[f64],
    qy: &[f64],
    max_intensity: f64,
    options: &PlotOptions2D,
) -> PlotResult<Chart> {
    let o = options.resolve()?;
    check_grid(grid, qx, qy, max_intensity)?;
    let (pw, ph) = (o.plot_width, o.plot_height);
    let x_domain = padded_extent(qx.iter().copied(), ScaleKind::Linear).ok_or(PlotError::NoData)?;
    let y_domain = padded_extent(qy.iter().copied(), ScaleKind::Linear).ok_or(PlotError::NoData)?;
    let x = Scale::linear(x_domain, (0.0, pw));
    let y = Scale::linear(y_domain, (ph, 0.0));

    let cell_w = CELL_INFLATION * (x.map(qx[1]) - x.map(qx[0])).abs();
    let cell_h = CELL_INFLATION * (y.map(qy[0]) - y.map(qy[1])).abs();
    let colors = ColorScale::new(o.palette, max_intensity, o.log_scale);
    log::debug!(
        "2d: {}x{} cells, {} color buckets, cell {cell_w:.2}x{cell_h:.2} px",
        grid.len(),
        qx.len(),
        colors.quantizer().buckets()
    );

    let mut cells = Group::new("cells");
    for (row, values) in grid.iter().enumerate() {
        let mut g = Group::new("row").at(0.0, y.map(qy[row]) - cell_h);
        for (col, &v) in values.iter().enumerate() {
            let v = if v.is_finite() { v } else { 0.0 };
            let (fill, class) = colors.style(v);
            g.push(Rect {
                x: x.map(qx[col]),
                y: 0.0,
                width: cell_w,
                height: cell_h,
                fill: Some(fill),
                class,
            });
        }
        cells.push(g);
    }

    let mut layers: Vec<Node> = vec![cells.into()];
    layers.push(Text::new(pw, ph + MARGIN_2D.top + 15.0, o.x_label.as_str(), 12.0, TextAnchor::End).into());
    layers.push(
        Text::new(12.0 - MARGIN_2D.left, MARGIN_2D.top, o.y_label.as_str(), 12.0, TextAnchor::End)
            .vertical()
            .into(),
    );
    layers.push(Text::new(pw / 2.0, -6.0, o.title.as_str(), 14.0, TextAnchor::Middle).into());
    layers.push(axis("x axis", &x, Orient::Bottom, &x.ticks(NICE_TICKS), true).at(0.0, ph).into());
    layers.push(axis("y axis", &y, Orient::Left, &y.ticks(NICE_TICKS), true).into());

    let class = match o.palette {
        Palette::Spectral => "Spectral",
        Palette::Rainbow => "heatmap",
    };
    Ok(Chart::new(
        ChartKind::Iqxy,
        class,
        (o.width, o.height),
        (MARGIN_2D.left, MARGIN_2D.top),
        (x, y),
        layers,
        None,
    ))
}
