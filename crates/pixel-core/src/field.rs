//! Display fields: the registry of derived representations of a sample.
//!
//! Each field kind maps to a static label and a pure render function.
//! Adding a representation means adding a kind and a registry entry; the
//! refresh loop and the display only ever walk the registry.

use crate::Sample;
use serde::{Deserialize, Serialize};

/// Kinds of derived text shown for a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Coordinates,
    Rgb,
    Hsv,
    Hex,
}

impl FieldKind {
    /// All kinds in display order.
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Coordinates,
        FieldKind::Rgb,
        FieldKind::Hsv,
        FieldKind::Hex,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Coordinates => "X,Y = ",
            FieldKind::Rgb => "RGB = ",
            FieldKind::Hsv => "HSV = ",
            FieldKind::Hex => "Hex = ",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Coordinates => "coordinates",
            FieldKind::Rgb => "rgb",
            FieldKind::Hsv => "hsv",
            FieldKind::Hex => "hex",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// `"(x, y)"`.
pub fn format_coordinates(sample: &Sample) -> String {
    format!("({}, {})", sample.position.x, sample.position.y)
}

/// `"(r, g, b)"`.
pub fn format_rgb(sample: &Sample) -> String {
    let c = sample.color;
    format!("({}, {}, {})", c.r, c.g, c.b)
}

/// `"(h%, s%, v%)"` with whole percentages.
pub fn format_hsv(sample: &Sample) -> String {
    let [h, s, v] = sample.color.hsv_percentages();
    format!("({}%, {}%, {}%)", h, s, v)
}

/// `"#RRGGBB"`, uppercase.
pub fn format_hex(sample: &Sample) -> String {
    sample.color.to_hex()
}

/// Pure function turning a sample into display text.
pub type RenderFn = fn(&Sample) -> String;

/// One registry entry.
#[derive(Clone, Copy)]
pub struct FieldEntry {
    pub kind: FieldKind,
    pub render: RenderFn,
}

impl std::fmt::Debug for FieldEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldEntry").field("kind", &self.kind).finish()
    }
}

/// Ordered lookup table from field kind to render function.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    entries: Vec<FieldEntry>,
}

impl FieldRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The four built-in fields in their fixed vertical order.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(FieldKind::Coordinates, format_coordinates);
        registry.register(FieldKind::Rgb, format_rgb);
        registry.register(FieldKind::Hsv, format_hsv);
        registry.register(FieldKind::Hex, format_hex);
        registry
    }

    /// Add or replace the render function for a kind. New kinds go to the end.
    pub fn register(&mut self, kind: FieldKind, render: RenderFn) {
        match self.entries.iter_mut().find(|e| e.kind == kind) {
            Some(entry) => entry.render = render,
            None => self.entries.push(FieldEntry { kind, render }),
        }
    }

    /// Kinds in display order.
    pub fn order(&self) -> Vec<FieldKind> {
        self.entries.iter().map(|e| e.kind).collect()
    }

    /// Render every kind accepted by `visible`, in registry order.
    pub fn render(&self, sample: &Sample, visible: impl Fn(FieldKind) -> bool) -> Rendering {
        let values = self
            .entries
            .iter()
            .filter(|e| visible(e.kind))
            .map(|e| (e.kind, (e.render)(sample)))
            .collect();
        Rendering { values }
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Formatted strings derived from one sample, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendering {
    values: Vec<(FieldKind, String)>,
}

impl Rendering {
    pub fn get(&self, kind: FieldKind) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKind, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
