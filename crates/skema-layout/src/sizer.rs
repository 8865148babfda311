#![forbid(unsafe_code)]

//! Dynamic node sizing.
//!
//! Node boxes have a fixed, style-dependent width; height follows from the
//! label. The label is greedily word-wrapped so that no line's measured
//! width exceeds the box width minus padding, and the box grows to
//! `lines * line_height + 2 * padding`, floored at a style minimum.
//!
//! Sizing is pure and idempotent: the same text, spec, and measurer always
//! produce the same lines and the same height. Nodes never share height
//! here; row alignment is a layout-strategy concern.

use skema_core::{SchemaStyle, TextMeasurer};

/// Box geometry parameters for one diagram style (world units).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingSpec {
    pub box_width: f32,
    pub padding: f32,
    pub line_height: f32,
    pub min_height: f32,
}

impl SizingSpec {
    /// Organizational charts use narrower, shorter boxes; every other style
    /// shares the wide box.
    #[must_use]
    pub fn for_style(style: SchemaStyle) -> Self {
        match style {
            SchemaStyle::Organizational => Self {
                box_width: 180.0,
                padding: 20.0,
                line_height: 16.0,
                min_height: 70.0,
            },
            _ => Self {
                box_width: 280.0,
                padding: 20.0,
                line_height: 16.0,
                min_height: 80.0,
            },
        }
    }

    /// Width available to text inside the box.
    #[must_use]
    pub fn text_width(&self) -> f32 {
        self.box_width - self.padding
    }
}

/// A sized node box: fixed width, derived height, wrapped label lines.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSize {
    pub width: f32,
    pub height: f32,
    pub lines: Vec<String>,
}

/// Greedily wrap `text` into lines no wider than `max_width`.
///
/// Text that already fits stays on one line. A single word wider than the
/// box is emitted as its own line, unsplit; overflow is accepted rather
/// than hyphenated.
#[must_use]
pub fn wrap_label(text: &str, max_width: f32, measurer: &dyn TextMeasurer) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= 1 || measurer.width(text) <= max_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    for word in words {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if !line.is_empty() && measurer.width(&candidate) > max_width {
            lines.push(line);
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    lines
}

/// Wrap a label and derive the node's box size.
#[must_use]
pub fn measure_node(text: &str, spec: &SizingSpec, measurer: &dyn TextMeasurer) -> NodeSize {
    let lines = wrap_label(text, spec.text_width(), measurer);
    let text_height = lines.len() as f32 * spec.line_height;
    NodeSize {
        width: spec.box_width,
        height: (text_height + 2.0 * spec.padding).max(spec.min_height),
        lines,
    }
}
