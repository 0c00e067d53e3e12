use crate::config::DocumentConfig;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_NODE_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A CSS color value as entered in the inspector (`#fff`, `#3498db`, `red`).
///
/// The engine never interprets the value; it is handed back to the renderer
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_COLOR)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Label font size in points, always within `[FontSize::MIN, FontSize::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct FontSize(u8);

impl FontSize {
    pub const MIN: u8 = 12;
    pub const MAX: u8 = 24;
    pub const DEFAULT: FontSize = FontSize(16);

    /// Returns `None` when `value` lies outside the slider range.
    pub fn new(value: i64) -> Option<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i64> for FontSize {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<FontSize> for i64 {
    fn from(value: FontSize) -> Self {
        value.0 as i64
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub position: Position,
    pub label: String,
    pub color: Color,
    pub font_size: FontSize,
    pub selected: bool,
}

impl Node {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            position,
            color: Color::default(),
            font_size: FontSize::default(),
            selected: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_font_size(mut self, font_size: FontSize) -> Self {
        self.font_size = font_size;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// One version of the whole graph document.
///
/// Snapshots are values: every edit in [`crate::change`] builds a new one and
/// the history store hands out shared borrows only, so a snapshot that has
/// been committed is never written to again.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Snapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn selected_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.selected)
    }
}

/// Builds the document a fresh session starts from: `node-1..node-N` scattered
/// over the configured area and chained by `edge-i: node-i -> node-(i+1)`.
pub fn initial_document(config: &DocumentConfig) -> Snapshot {
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let mut coord = |extent: f64| {
        if extent.is_finite() && extent > 0.0 {
            rng.random_range(0.0..extent)
        } else {
            0.0
        }
    };

    let nodes: Vec<Node> = (1..=config.node_count)
        .map(|i| {
            let position = Position::new(coord(config.width), coord(config.height));
            Node::new(format!("node-{i}"), position)
                .with_label(format!("Node {i}"))
                .with_color(config.node_color.clone())
                .with_font_size(config.font_size)
        })
        .collect();

    let edges = nodes
        .windows(2)
        .enumerate()
        .map(|(i, pair)| Edge::new(format!("edge-{}", i + 1), &pair[0].id, &pair[1].id))
        .collect();

    Snapshot::new(nodes, edges)
}
