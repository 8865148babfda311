#![forbid(unsafe_code)]

//! Diagram color palette and per-style drawing parameters.
//!
//! Fills are keyed on style and level: organizational charts use a solid
//! blue-to-purple ramp with white text; the other styles use light neutral
//! fills with dark text.

use skema_core::SchemaStyle;
use tiny_skia::Color;

use skema_layout::ConnectorKind;

/// Solid fills for organizational levels, root first.
const ORGANIZATIONAL_FILLS: [[u8; 3]; 6] = [
    [0x1e, 0x40, 0xaf],
    [0x3b, 0x82, 0xf6],
    [0x63, 0x66, 0xf1],
    [0x8b, 0x5c, 0xf6],
    [0xa8, 0x55, 0xf7],
    [0xc0, 0x84, 0xfc],
];

/// Light fills for the remaining styles, level 0 first.
const LEVEL_FILLS: [[u8; 3]; 4] = [
    [0xff, 0xff, 0xff],
    [0xf8, 0xfa, 0xfc],
    [0xf1, 0xf5, 0xf9],
    [0xe2, 0xe8, 0xf0],
];

/// Colors and stroke widths for one rendering pass.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub dark_border: Color,
    pub light_border: Color,
    pub dark_text: Color,
    pub light_text: Color,
    pub connector: Color,
    pub connector_strong: Color,
    pub baseline: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            dark_border: rgb([0x37, 0x41, 0x51]),
            light_border: rgb([0xcb, 0xd5, 0xe1]),
            dark_text: rgb([0x1e, 0x29, 0x3b]),
            light_text: Color::WHITE,
            connector: rgb([0x64, 0x74, 0x8b]),
            connector_strong: rgb([0x37, 0x41, 0x51]),
            baseline: rgb([0x94, 0xa3, 0xb8]),
        }
    }
}

impl Theme {
    /// Node fill for a style/level pair.
    #[must_use]
    pub fn node_fill(&self, style: SchemaStyle, level: usize) -> Color {
        match style {
            SchemaStyle::Organizational => {
                rgb(ORGANIZATIONAL_FILLS[level.min(ORGANIZATIONAL_FILLS.len() - 1)])
            }
            _ => rgb(LEVEL_FILLS[level.min(LEVEL_FILLS.len() - 1)]),
        }
    }

    #[must_use]
    pub fn node_border(&self, style: SchemaStyle) -> (Color, f32) {
        match style {
            SchemaStyle::Organizational => (self.dark_border, 2.0),
            _ => (self.light_border, 1.0),
        }
    }

    #[must_use]
    pub fn node_text(&self, style: SchemaStyle) -> Color {
        match style {
            SchemaStyle::Organizational => self.light_text,
            _ => self.dark_text,
        }
    }

    #[must_use]
    pub fn connector_stroke(&self, style: SchemaStyle, kind: ConnectorKind) -> (Color, f32) {
        match kind {
            ConnectorKind::Baseline => (self.baseline, 3.0),
            ConnectorKind::Elbow => (self.connector_strong, 2.0),
            _ => match style {
                SchemaStyle::Organizational => (self.connector_strong, 2.0),
                _ => (self.connector, 2.0),
            },
        }
    }

    /// Box corner radius per style.
    #[must_use]
    pub fn corner_radius(&self, style: SchemaStyle) -> f32 {
        match style {
            SchemaStyle::Organizational => 6.0,
            _ => 8.0,
        }
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::from_rgba8(r, g, b, 255)
}
