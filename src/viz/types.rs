//! Public option types and defaults for the two chart shapes.
//!
//! Both option structs deserialize from partial JSON; every missing field
//! takes its default. `resolve()` validates once at the call boundary.

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::scale::ScaleKind;
use crate::scene::Rgb;

/// Fixed anchor the 2D heatmap is mounted on.
pub const DEFAULT_ANCHOR_2D: &str = "plot_anchor_2d";

/// Default 1D anchor (used by the CLI).
pub const DEFAULT_ANCHOR_1D: &str = "plot_anchor";

pub const DEFAULT_COLOR: &str = "#0077cc";

/// Pixel margins around the inner plot rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

pub const MARGIN_1D: Margin = Margin {
    top: 40.0,
    right: 100.0,
    bottom: 60.0,
    left: 60.0,
};

pub const MARGIN_2D: Margin = Margin {
    top: 20.0,
    right: 20.0,
    bottom: 60.0,
    left: 60.0,
};

/// Options for `I(Q)` charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions1D {
    /// Marker and error-bar color, `#rrggbb`.
    pub color: String,
    /// Marker radius in pixels; error-bar caps use it as half-width.
    pub marker_size: f64,
    pub width: u32,
    pub height: u32,
    /// Logarithmic intensity axis.
    pub log_scale: bool,
    /// Logarithmic Q axis.
    pub x_log_scale: bool,
    /// Background grid at the major tick positions.
    pub grid: bool,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
    pub x_ticks: usize,
    pub y_ticks: usize,
    /// Unlabeled subdivisions between minor-axis ticks.
    pub minor_subdivisions: usize,
}

impl Default for PlotOptions1D {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.into(),
            marker_size: 2.0,
            width: 500,
            height: 250,
            log_scale: false,
            x_log_scale: false,
            grid: false,
            x_label: "Q [1/\u{00C5}]".into(),
            y_label: "Intensity".into(),
            title: "I(Q)".into(),
            x_ticks: 8,
            y_ticks: 4,
            minor_subdivisions: 4,
        }
    }
}

/// Per-series marker style for overlaid `I(Q)` data sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesStyle {
    /// Marker and error-bar color, `#rrggbb`.
    pub color: String,
    /// Marker radius in pixels.
    pub marker_size: f64,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.into(),
            marker_size: 2.0,
        }
    }
}

impl SeriesStyle {
    /// Parsed color and validated marker size.
    pub fn resolve(&self) -> PlotResult<(Rgb, f64)> {
        let color = Rgb::parse_hex(&self.color).ok_or_else(|| PlotError::InvalidOption {
            name: "color",
            reason: format!("expected #rrggbb, got {:?}", self.color),
        })?;
        if !(self.marker_size > 0.0 && self.marker_size.is_finite()) {
            return Err(PlotError::InvalidOption {
                name: "marker_size",
                reason: format!("must be positive, got {}", self.marker_size),
            });
        }
        Ok((color, self.marker_size))
    }
}

/// Color ramp used by the heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    /// 64 computed colors walking a rainbow hue cycle.
    #[default]
    Rainbow,
    /// 11 named style classes (`q0-11` … `q10-11`) with Spectral fills.
    Spectral,
}

impl Palette {
    pub fn buckets(&self) -> usize {
        match self {
            Palette::Rainbow => 64,
            Palette::Spectral => 11,
        }
    }
}

/// Options for `I(Qx, Qy)` heatmaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions2D {
    pub width: u32,
    pub height: u32,
    /// Logarithmic color scale (axes stay linear).
    pub log_scale: bool,
    pub palette: Palette,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
}

impl Default for PlotOptions2D {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            log_scale: false,
            palette: Palette::default(),
            x_label: "Qx [1/\u{00C5}]".into(),
            y_label: "Qy [1/\u{00C5}]".into(),
            title: "I(Qx, Qy)".into(),
        }
    }
}

/// Validated 1D options with derived quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved1D {
    pub width: u32,
    pub height: u32,
    pub plot_width: f64,
    pub plot_height: f64,
    pub x_kind: ScaleKind,
    pub y_kind: ScaleKind,
    pub grid: bool,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
    pub x_ticks: usize,
    pub y_ticks: usize,
    pub minor_subdivisions: usize,
}

/// Validated 2D options with derived quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved2D {
    pub width: u32,
    pub height: u32,
    pub plot_width: f64,
    pub plot_height: f64,
    pub log_scale: bool,
    pub palette: Palette,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
}

fn inner_size(width: u32, height: u32, m: Margin) -> PlotResult<(f64, f64)> {
    let w = width as f64 - m.left - m.right;
    let h = height as f64 - m.top - m.bottom;
    if w <= 0.0 {
        return Err(PlotError::InvalidOption {
            name: "width",
            reason: format!("{width} leaves no room inside {} px of margins", m.left + m.right),
        });
    }
    if h <= 0.0 {
        return Err(PlotError::InvalidOption {
            name: "height",
            reason: format!("{height} leaves no room inside {} px of margins", m.top + m.bottom),
        });
    }
    Ok((w, h))
}

fn kind(log: bool) -> ScaleKind {
    if log { ScaleKind::Log } else { ScaleKind::Linear }
}

impl PlotOptions1D {
    /// Marker style of the single series drawn by `render_1d`.
    pub fn series_style(&self) -> SeriesStyle {
        SeriesStyle {
            color: self.color.clone(),
            marker_size: self.marker_size,
        }
    }

    /// Validate the chart-level options. The marker style is checked
    /// separately through [`SeriesStyle::resolve`].
    pub fn resolve(&self) -> PlotResult<Resolved1D> {
        for (name, n) in [("x_ticks", self.x_ticks), ("y_ticks", self.y_ticks)] {
            if n == 0 {
                return Err(PlotError::InvalidOption {
                    name,
                    reason: "tick count must be at least 1".into(),
                });
            }
        }
        let (plot_width, plot_height) = inner_size(self.width, self.height, MARGIN_1D)?;
        Ok(Resolved1D {
            width: self.width,
            height: self.height,
            plot_width,
            plot_height,
            x_kind: kind(self.x_log_scale),
            y_kind: kind(self.log_scale),
            grid: self.grid,
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            title: self.title.clone(),
            x_ticks: self.x_ticks,
            y_ticks: self.y_ticks,
            minor_subdivisions: self.minor_subdivisions,
        })
    }
}

impl PlotOptions2D {
    pub fn resolve(&self) -> PlotResult<Resolved2D> {
        let (plot_width, plot_height) = inner_size(self.width, self.height, MARGIN_2D)?;
        Ok(Resolved2D {
            width: self.width,
            height: self.height,
            plot_width,
            plot_height,
            log_scale: self.log_scale,
            palette: self.palette,
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            title: self.title.clone(),
        })
    }
}
