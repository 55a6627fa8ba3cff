//! Display surface: charts mounted under named anchors.
//!
//! Mounting a chart on an anchor that already holds one tears the old chart
//! down first, so each anchor shows at most one chart (last writer wins).

use std::collections::BTreeMap;

use crate::error::PlotResult;
use crate::models::Sample;
use crate::scale::Scale;
use crate::scene::{Group, Node};
use crate::scene_plotters_adapter::render_svg;
use crate::viz::hover::HoverOverlay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// 1D `I(Q)` points with error bars.
    Iq,
    /// 2D `I(Qx, Qy)` heatmap.
    Iqxy,
}

/// A rendered chart: static layers plus optional hover state.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    kind: ChartKind,
    class: String,
    width: u32,
    height: u32,
    /// Top-left corner of the plot area inside the chart.
    origin: (f64, f64),
    x: Scale,
    y: Scale,
    layers: Vec<Node>,
    hover: Option<HoverOverlay>,
}

impl Chart {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        kind: ChartKind,
        class: &str,
        (width, height): (u32, u32),
        origin: (f64, f64),
        (x, y): (Scale, Scale),
        layers: Vec<Node>,
        hover: Option<HoverOverlay>,
    ) -> Self {
        Self {
            kind,
            class: class.to_string(),
            width,
            height,
            origin,
            x,
            y,
            layers,
            hover,
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn x_scale(&self) -> &Scale {
        &self.x
    }

    pub fn y_scale(&self) -> &Scale {
        &self.y
    }

    pub fn hover(&self) -> Option<&HoverOverlay> {
        self.hover.as_ref()
    }

    /// Full scene tree: root group, plot group at the margins, layers, then
    /// the hover overlay and focus marker on top.
    pub fn scene(&self) -> Node {
        let mut plot = Group::new("plot").at(self.origin.0, self.origin.1);
        plot.extend(self.layers.iter().cloned());
        if let Some(h) = &self.hover {
            let (overlay, focus) = h.nodes();
            plot.push(focus);
            plot.push(overlay);
        }
        let mut root = Group::new(self.class.clone());
        root.push(plot);
        Node::Group(root)
    }

    pub fn to_svg(&self) -> PlotResult<String> {
        render_svg(&self.scene(), self.width, self.height)
    }

    pub fn pointer_enter(&mut self) {
        if let Some(h) = self.hover.as_mut() {
            h.enter();
        }
    }

    pub fn pointer_leave(&mut self) {
        if let Some(h) = self.hover.as_mut() {
            h.leave();
        }
    }

    /// Pointer at plot-area pixel `(px, py)`; returns the highlighted sample.
    pub fn pointer_move(&mut self, px: f64, py: f64) -> Option<Sample> {
        self.hover.as_mut()?.pointer_move(px, py)
    }

    /// Highlight the sample nearest to data-space `x0`.
    pub fn probe(&mut self, x0: f64) -> Option<Sample> {
        let h = self.hover.as_mut()?;
        h.enter();
        h.select(x0)
    }
}

/// Anchor → mounted chart.
#[derive(Debug, Default, Clone)]
pub struct Surface {
    charts: BTreeMap<String, Chart>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is mounted on `anchor` with `chart`.
    pub fn mount(&mut self, anchor: &str, chart: Chart) -> &mut Chart {
        if self.charts.remove(anchor).is_some() {
            log::debug!("removed previous chart from anchor {anchor:?}");
        }
        self.charts.entry(anchor.to_string()).or_insert(chart)
    }

    pub fn get(&self, anchor: &str) -> Option<&Chart> {
        self.charts.get(anchor)
    }

    pub fn get_mut(&mut self, anchor: &str) -> Option<&mut Chart> {
        self.charts.get_mut(anchor)
    }

    pub fn unmount(&mut self, anchor: &str) -> Option<Chart> {
        self.charts.remove(anchor)
    }

    pub fn anchors(&self) -> impl Iterator<Item = &str> {
        self.charts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}
