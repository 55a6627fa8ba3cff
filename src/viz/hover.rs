//! Pointer-tracking readout for 1D charts.
//!
//! The overlay covers the plot area. On each pointer move the pointer's
//! pixel x is inverted to data space and the nearest sample by x is looked
//! up with a binary search; the focus marker moves onto that sample and its
//! label shows `"x, y ± error"`.

use crate::models::Sample;
use crate::scale::Scale;
use crate::scene::{Circle, Group, Rect, Rgb, Text, TextAnchor};

use super::text::readout;

pub const FOCUS_RADIUS: f64 = 4.5;

/// Index of the sample nearest to `x0` in `sorted` (ascending by x).
///
/// The two samples bracketing `x0` are compared by distance; on a tie the
/// right one wins. Pointers beyond either end select the end sample.
pub fn nearest_index(sorted: &[Sample], x0: f64) -> Option<usize> {
    match sorted.len() {
        0 => None,
        1 => Some(0),
        n => {
            let i = 1 + sorted[1..].partition_point(|s| s.x < x0);
            if i >= n {
                return Some(n - 1);
            }
            let (d0, d1) = (&sorted[i - 1], &sorted[i]);
            Some(if x0 - d0.x >= d1.x - x0 { i } else { i - 1 })
        }
    }
}

/// Focus marker state, rendered as a `focus` group.
#[derive(Debug, Clone, PartialEq)]
pub struct Focus {
    pub visible: bool,
    pub position: (f64, f64),
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverOverlay {
    samples: Vec<Sample>,
    x: Scale,
    y: Scale,
    width: f64,
    height: f64,
    focus: Focus,
}

impl HoverOverlay {
    /// `samples` need not be sorted; a sorted copy backs the lookup.
    pub fn new(samples: &[Sample], x: Scale, y: Scale, width: f64, height: f64) -> Self {
        let mut samples = samples.to_vec();
        samples.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self {
            samples,
            x,
            y,
            width,
            height,
            focus: Focus {
                visible: false,
                position: (0.0, 0.0),
                label: String::new(),
            },
        }
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        (0.0..=self.width).contains(&px) && (0.0..=self.height).contains(&py)
    }

    pub fn enter(&mut self) {
        self.focus.visible = true;
    }

    pub fn leave(&mut self) {
        self.focus.visible = false;
    }

    /// Move the focus to the sample nearest to data-space `x0`.
    pub fn select(&mut self, x0: f64) -> Option<Sample> {
        let s = self.samples[nearest_index(&self.samples, x0)?];
        self.focus.position = (self.x.map(s.x), self.y.map(s.y));
        self.focus.label = readout(&s);
        Some(s)
    }

    /// Pointer moved to plot-area pixel `(px, py)`. Leaving the area hides
    /// the focus; moving inside shows it and tracks the nearest sample.
    pub fn pointer_move(&mut self, px: f64, py: f64) -> Option<Sample> {
        if !self.contains(px, py) {
            self.leave();
            return None;
        }
        self.enter();
        self.select(self.x.invert(px))
    }

    /// Transparent capture rectangle plus the focus group.
    pub fn nodes(&self) -> (Rect, Group) {
        let overlay = Rect {
            x: 0.0,
            y: 0.0,
            width: self.width,
            height: self.height,
            fill: None,
            class: Some("overlay".into()),
        };
        let mut focus = Group::new("focus").at(self.focus.position.0, self.focus.position.1);
        focus.hidden = !self.focus.visible;
        focus.push(Circle {
            cx: 0.0,
            cy: 0.0,
            r: FOCUS_RADIUS,
            fill: Rgb::BLACK,
        });
        let mut label = Text::new(9.0, 0.0, self.focus.label.clone(), 12.0, TextAnchor::Start);
        label.y = -2.0;
        focus.push(label);
        (overlay, focus)
    }
}
