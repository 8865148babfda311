#![forbid(unsafe_code)]

//! Font loading, text measurement, and glyph drawing.
//!
//! Wraps a `fontdue` font at a fixed pixel size. The same object serves as
//! the layout-side [`TextMeasurer`] (so sized boxes match what gets drawn)
//! and as the renderer's glyph source.
//!
//! Font discovery follows an explicit path, then the `SKEMA_FONT_PATH`
//! environment variable, then a short list of common system locations.
//! Not finding any font is a [`RenderError::FontUnavailable`]; callers that
//! only need layout should use `skema_core::MonospaceMetrics` instead.

use std::path::{Path, PathBuf};

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use fontdue::{Font, FontSettings};
use tiny_skia::Color;
use tracing::debug;

use skema_core::TextMeasurer;

use crate::error::RenderError;
use crate::surface::Surface;

/// Label font size used throughout the diagram.
pub const FONT_SIZE: f32 = 13.0;

const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A loaded font plus the fixed label size.
pub struct FontContext {
    font: Font,
    px: f32,
}

impl FontContext {
    /// Parse font bytes (TTF/OTF) at the default label size.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RenderError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|err| RenderError::FontUnavailable(err.to_string()))?;
        Ok(Self {
            font,
            px: FONT_SIZE,
        })
    }

    /// Load a font file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Resolve a font: explicit path, `SKEMA_FONT_PATH`, then system
    /// locations, in that order.
    pub fn load(explicit: Option<&Path>) -> Result<Self, RenderError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        for candidate in font_candidates() {
            if candidate.exists() {
                debug!(path = %candidate.display(), "loading font");
                return Self::from_file(&candidate);
            }
        }
        Err(RenderError::FontUnavailable(
            "no font found; pass a path or set SKEMA_FONT_PATH".into(),
        ))
    }

    /// Measured width of one line of text, in pixels.
    #[must_use]
    pub fn measure(&self, text: &str) -> f32 {
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.font], &TextStyle::new(text, self.px, 0));

        let mut min_x = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        for glyph in layout.glyphs() {
            min_x = min_x.min(glyph.x);
            max_x = max_x.max(glyph.x + glyph.width as f32);
        }
        if min_x.is_finite() && max_x.is_finite() {
            (max_x - min_x).max(0.0)
        } else {
            0.0
        }
    }

    /// Draw one line of text centered on `(center_x, center_y)`.
    pub(crate) fn draw_line(
        &self,
        surface: &mut Surface,
        text: &str,
        center_x: f32,
        center_y: f32,
        color: Color,
    ) {
        let width = self.measure(text);

        let mut settings = LayoutSettings::default();
        settings.x = center_x - width / 2.0;
        settings.y = match self.font.horizontal_line_metrics(self.px) {
            Some(metrics) => {
                let baseline = center_y + (metrics.ascent + metrics.descent) * 0.5;
                baseline - metrics.ascent
            }
            None => center_y - self.px * 0.5,
        };

        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&settings);
        layout.append(&[&self.font], &TextStyle::new(text, self.px, 0));

        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (metrics, bitmap) = self
                .font
                .rasterize_indexed(glyph.key.glyph_index, glyph.key.px);
            let origin_x = glyph.x.floor() as i32;
            let origin_y = glyph.y.floor() as i32;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let coverage = bitmap[row * metrics.width + col];
                    surface.blend_pixel(
                        origin_x + col as i32,
                        origin_y + row as i32,
                        color,
                        coverage,
                    );
                }
            }
        }
    }
}

impl TextMeasurer for FontContext {
    fn width(&self, text: &str) -> f32 {
        self.measure(text)
    }
}

fn font_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(path) = std::env::var("SKEMA_FONT_PATH") {
        candidates.push(PathBuf::from(path));
    }
    candidates.extend(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));
    candidates
}
