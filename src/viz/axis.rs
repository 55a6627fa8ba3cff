//! Axis, minor-tick and grid-line groups.
//!
//! Groups are built at the origin of the axis line: callers translate bottom
//! axes down by the plot height. Tick marks point away from the plot area.

use crate::scale::Scale;
use crate::scene::{Group, Line, Rgb, Stroke, Text, TextAnchor};

use super::text::format_tick;

pub const MAJOR_TICK: f64 = 6.0;
pub const MINOR_TICK: f64 = 3.0;
const TICK_PADDING: f64 = 3.0;
const LABEL_SIZE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

fn tick_line(orient: Orient, pos: f64, from: f64, to: f64, stroke: Stroke) -> Line {
    match orient {
        Orient::Bottom => Line {
            x1: pos,
            y1: from,
            x2: pos,
            y2: to,
            stroke,
        },
        Orient::Left => Line {
            x1: -from,
            y1: pos,
            x2: -to,
            y2: pos,
            stroke,
        },
    }
}

/// Axis line with major ticks at `ticks`, labelled when `labelled` is set.
pub fn axis(class: &str, scale: &Scale, orient: Orient, ticks: &[f64], labelled: bool) -> Group {
    let mut g = Group::new(class);
    let stroke = Stroke::solid(Rgb::BLACK, 1.0);
    let (r0, r1) = scale.range();
    g.push(match orient {
        Orient::Bottom => Line {
            x1: r0,
            y1: 0.0,
            x2: r1,
            y2: 0.0,
            stroke: stroke.clone(),
        },
        Orient::Left => Line {
            x1: 0.0,
            y1: r0,
            x2: 0.0,
            y2: r1,
            stroke: stroke.clone(),
        },
    });

    let size = if labelled { MAJOR_TICK } else { MINOR_TICK };
    for &t in ticks {
        let pos = scale.map(t);
        g.push(tick_line(orient, pos, 0.0, size, stroke.clone()));
        if labelled {
            let offset = size + TICK_PADDING;
            let label = match orient {
                Orient::Bottom => Text::new(
                    pos,
                    offset + LABEL_SIZE,
                    format_tick(t),
                    LABEL_SIZE,
                    TextAnchor::Middle,
                ),
                Orient::Left => Text::new(
                    -offset,
                    pos + LABEL_SIZE * 0.32,
                    format_tick(t),
                    LABEL_SIZE,
                    TextAnchor::End,
                ),
            };
            g.push(label);
        }
    }
    g
}

/// Unlabeled short ticks: `count` coarse ticks plus `subdivisions` between each.
pub fn minor_axis(class: &str, scale: &Scale, orient: Orient, count: usize, subdivisions: usize) -> Group {
    let coarse = scale.ticks(count);
    let mut all = coarse.clone();
    all.extend(scale.subdivide(&coarse, subdivisions));
    axis(class, scale, orient, &all, false)
}

/// Grid lines through `ticks`, spanning `length` pixels into the plot area.
pub fn grid(scale: &Scale, orient: Orient, ticks: &[f64], length: f64) -> Group {
    let mut g = Group::new("grid");
    let stroke = Stroke::solid(Rgb::GRID, 1.0);
    for &t in ticks {
        let pos = scale.map(t);
        // Bottom grids hang upward from the x axis; left grids run rightward.
        g.push(tick_line(orient, pos, 0.0, -length, stroke.clone()));
    }
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Node;

    fn count_lines(g: &Group) -> usize {
        g.children
            .iter()
            .filter(|c| matches!(c, Node::Line(_)))
            .count()
    }

    #[test]
    fn labelled_axis_has_one_label_per_tick() {
        let s = Scale::linear((0.0, 10.0), (0.0, 100.0));
        let ticks = s.ticks(5);
        let g = axis("x axis", &s, Orient::Bottom, &ticks, true);
        let labels = g
            .children
            .iter()
            .filter(|c| matches!(c, Node::Text(_)))
            .count();
        assert_eq!(labels, ticks.len());
        assert_eq!(count_lines(&g), ticks.len() + 1);
    }

    #[test]
    fn grid_lines_span_plot() {
        let s = Scale::linear((0.0, 10.0), (200.0, 0.0));
        let g = grid(&s, Orient::Left, &[0.0, 5.0, 10.0], 340.0);
        let Node::Line(l) = &g.children[1] else {
            panic!("expected line");
        };
        assert_eq!((l.x1, l.x2), (0.0, 340.0));
        assert_eq!(l.y1, 100.0);
    }

    #[test]
    fn minor_axis_has_no_labels() {
        let s = Scale::linear((0.0, 1.0), (0.0, 300.0));
        let g = minor_axis("x axis", &s, Orient::Bottom, 4, 4);
        assert!(g.children.iter().all(|c| !matches!(c, Node::Text(_))));
        assert!(count_lines(&g) > 5);
    }
}
