//! Adapter drawing a scene graph with the plotters crate.
//!
//! Every primitive maps onto a plotters element drawn on an [`SVGBackend`]
//! writing into a `String`:
//! - `Circle` → `plotters::element::Circle` (filled)
//! - `Line` → `PathElement` (dashes are split into short solid segments)
//! - `Rect` → `Rectangle` (filled; transparent rects are skipped)
//! - `Text` → `Text` with anchor and optional 270° rotation
//!
//! Hidden groups are not drawn.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_svg::SVGBackend;

use crate::error::{PlotError, PlotResult};
use crate::scene::{self, Node, Rgb, Stroke, TextAnchor};

pub fn rgb_color(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Build a ShapeStyle for line strokes.
pub fn line_style(stroke: &Stroke) -> ShapeStyle {
    ShapeStyle {
        color: rgb_color(stroke.color).mix(stroke.opacity.clamp(0.0, 1.0)),
        filled: false,
        stroke_width: stroke.width.round().max(1.0) as u32,
    }
}

/// Build a filled style for markers and cells.
pub fn fill_style(c: Rgb) -> ShapeStyle {
    rgb_color(c).filled()
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

fn export_err<E: std::fmt::Debug>(e: E) -> PlotError {
    PlotError::Export(format!("{e:?}"))
}

/// Draw `root` into a fresh `width × height` SVG document.
pub fn render_svg(root: &Node, width: u32, height: u32) -> PlotResult<String> {
    let mut buf = String::new();
    {
        let area = SVGBackend::with_string(&mut buf, (width, height)).into_drawing_area();
        area.fill(&rgb_color(Rgb::WHITE)).map_err(export_err)?;
        draw_node(&area, root, (0.0, 0.0))?;
        area.present().map_err(export_err)?;
    }
    Ok(buf)
}

/// Split a dashed segment into its visible pieces.
pub fn dash_segments(
    from: (f64, f64),
    to: (f64, f64),
    on: f64,
    off: f64,
) -> Vec<((f64, f64), (f64, f64))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = dx.hypot(dy);
    if len == 0.0 || on <= 0.0 {
        return vec![(from, to)];
    }
    let (ux, uy) = (dx / len, dy / len);
    let at = |d: f64| (from.0 + ux * d, from.1 + uy * d);
    let mut out = Vec::new();
    let mut d = 0.0;
    while d < len {
        let end = (d + on).min(len);
        out.push((at(d), at(end)));
        d = end + off.max(0.0);
    }
    out
}

fn draw_node<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    node: &Node,
    origin: (f64, f64),
) -> PlotResult<()> {
    let (ox, oy) = origin;
    match node {
        Node::Group(g) => {
            if g.hidden {
                return Ok(());
            }
            let inner = (ox + g.offset.0, oy + g.offset.1);
            for child in &g.children {
                draw_node(area, child, inner)?;
            }
        }
        Node::Circle(c) => {
            area.draw(&Circle::new(
                (px(ox + c.cx), px(oy + c.cy)),
                px(c.r).max(1),
                fill_style(c.fill),
            ))
            .map_err(export_err)?;
        }
        Node::Line(l) => {
            let from = (ox + l.x1, oy + l.y1);
            let to = (ox + l.x2, oy + l.y2);
            let pieces = match l.stroke.dash {
                Some((on, off)) => dash_segments(from, to, on, off),
                None => vec![(from, to)],
            };
            let style = line_style(&l.stroke);
            for (a, b) in pieces {
                area.draw(&PathElement::new(
                    vec![(px(a.0), px(a.1)), (px(b.0), px(b.1))],
                    style,
                ))
                .map_err(export_err)?;
            }
        }
        Node::Rect(r) => {
            if let Some(fill) = r.fill {
                let (x0, y0) = (ox + r.x, oy + r.y);
                area.draw(&Rectangle::new(
                    [(px(x0), px(y0)), (px(x0 + r.width), px(y0 + r.height))],
                    fill_style(fill),
                ))
                .map_err(export_err)?;
            }
        }
        Node::Text(t) => draw_text(area, t, origin)?,
    }
    Ok(())
}

fn draw_text<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    t: &scene::Text,
    (ox, oy): (f64, f64),
) -> PlotResult<()> {
    let h_pos = match t.anchor {
        TextAnchor::Start => HPos::Left,
        TextAnchor::Middle => HPos::Center,
        TextAnchor::End => HPos::Right,
    };
    let mut font = ("sans-serif", t.size).into_font();
    if t.vertical {
        font = font.transform(FontTransform::Rotate270);
    }
    let style = font
        .color(&rgb_color(Rgb::BLACK))
        .pos(Pos::new(h_pos, VPos::Bottom));
    area.draw(&Text::new(
        t.content.clone(),
        (px(ox + t.x), px(oy + t.y)),
        style,
    ))
    .map_err(export_err)?;
    Ok(())
}
