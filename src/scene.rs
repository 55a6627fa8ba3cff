//! Scene graph produced by the renderers.
//!
//! A chart is a tree of [`Node`]s: translated groups holding circles, lines,
//! rectangles and text, in pixel coordinates relative to the enclosing group.
//! The tree is plain data; [`crate::scene_plotters_adapter`] turns it into SVG
//! and `serde` can dump it as JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 8-bit RGB color. Serializes as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GRID: Rgb = Rgb::new(211, 211, 211);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).ok();
        match hex.len() {
            6 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some(Self::new(short(0)?, short(1)?, short(2)?))
            }
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgb::parse_hex(&s).ok_or_else(|| format!("invalid color {s:?}"))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Horizontal text alignment relative to the text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64,
    pub opacity: f64,
    /// `(on, off)` dash lengths in pixels; solid when `None`.
    pub dash: Option<(f64, f64)>,
}

impl Stroke {
    pub fn solid(color: Rgb, width: f64) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
            dash: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub class: Option<String>,
    /// Translation applied to every child.
    pub offset: (f64, f64),
    pub hidden: bool,
    pub children: Vec<Node>,
}

impl Group {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            offset: (0.0, 0.0),
            hidden: false,
            children: Vec::new(),
        }
    }

    pub fn at(mut self, dx: f64, dy: f64) -> Self {
        self.offset = (dx, dy);
        self
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn extend<I: IntoIterator<Item = Node>>(&mut self, nodes: I) {
        self.children.extend(nodes);
    }

    /// First descendant group (depth-first, self included) with the given class.
    pub fn find(&self, class: &str) -> Option<&Group> {
        if self.class.as_deref() == Some(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| match c {
            Node::Group(g) => g.find(class),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Stroke,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Transparent when `None` (e.g. pointer-capture overlays).
    pub fill: Option<Rgb>,
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub size: f64,
    pub anchor: TextAnchor,
    /// Counter-clockwise quarter turn when set (vertical axis titles).
    pub vertical: bool,
}

impl Text {
    pub fn new(x: f64, y: f64, content: impl Into<String>, size: f64, anchor: TextAnchor) -> Self {
        Self {
            x,
            y,
            content: content.into(),
            size,
            anchor,
            vertical: false,
        }
    }

    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Group(Group),
    Circle(Circle),
    Line(Line),
    Rect(Rect),
    Text(Text),
}

impl Node {
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(g) => Some(g),
            _ => None,
        }
    }
}

impl From<Group> for Node {
    fn from(g: Group) -> Self {
        Node::Group(g)
    }
}

impl From<Circle> for Node {
    fn from(c: Circle) -> Self {
        Node::Circle(c)
    }
}

impl From<Line> for Node {
    fn from(l: Line) -> Self {
        Node::Line(l)
    }
}

impl From<Rect> for Node {
    fn from(r: Rect) -> Self {
        Node::Rect(r)
    }
}

impl From<Text> for Node {
    fn from(t: Text) -> Self {
        Node::Text(t)
    }
}
