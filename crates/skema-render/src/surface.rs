#![forbid(unsafe_code)]

//! The raster drawing surface.
//!
//! A thin wrapper over a `tiny-skia` pixmap exposing just the drawing
//! vocabulary the renderer needs: clear, rounded rectangles, polylines,
//! per-pixel glyph blending, and PNG export.

use std::path::Path;

use tiny_skia::{
    Color, FillRule, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Stroke, Transform,
};

use skema_layout::{LayoutPoint, LayoutRect};

use crate::error::RenderError;

/// Hard cap on either surface dimension; anything larger is a sizing bug,
/// not a drawable diagram.
const MAX_DIMENSION: u32 = 32_768;

/// An owned RGBA raster surface.
#[derive(Clone)]
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// Allocate a surface of the given pixel size.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RenderError::SurfaceAlloc { width, height });
        }
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::SurfaceAlloc { width, height })?;
        Ok(Self { pixmap })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Flood the whole surface with one color.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color);
    }

    /// Fill a rounded rectangle.
    pub fn fill_round_rect(&mut self, rect: LayoutRect, radius: f32, color: Color) {
        if let Some(path) = round_rect_path(rect, radius) {
            self.pixmap.fill_path(
                &path,
                &solid_paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    /// Stroke the outline of a rounded rectangle.
    pub fn stroke_round_rect(&mut self, rect: LayoutRect, radius: f32, color: Color, width: f32) {
        if let Some(path) = round_rect_path(rect, radius) {
            self.pixmap.stroke_path(
                &path,
                &solid_paint(color),
                &Stroke {
                    width,
                    ..Stroke::default()
                },
                Transform::identity(),
                None,
            );
        }
    }

    /// Stroke an open polyline through the given waypoints.
    pub fn stroke_polyline(&mut self, points: &[LayoutPoint], color: Color, width: f32) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.is_empty() {
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(first.x, first.y);
        for p in rest {
            pb.line_to(p.x, p.y);
        }
        let Some(path) = pb.finish() else {
            return;
        };
        self.pixmap.stroke_path(
            &path,
            &solid_paint(color),
            &Stroke {
                width,
                ..Stroke::default()
            },
            Transform::identity(),
            None,
        );
    }

    /// Alpha-blend one pixel of glyph coverage onto the surface.
    pub(crate) fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: u8) {
        if coverage == 0 || x < 0 || y < 0 {
            return;
        }
        let (w, h) = (self.pixmap.width() as i32, self.pixmap.height() as i32);
        if x >= w || y >= h {
            return;
        }

        let idx = (y * w + x) as usize;
        let pixels = self.pixmap.pixels_mut();
        let dst = pixels[idx];

        let src_a = color.alpha() * f32::from(coverage) / 255.0;
        let inv = 1.0 - src_a;
        let r = color.red() * src_a + f32::from(dst.red()) / 255.0 * inv;
        let g = color.green() * src_a + f32::from(dst.green()) / 255.0 * inv;
        let b = color.blue() * src_a + f32::from(dst.blue()) / 255.0 * inv;
        let a = src_a + f32::from(dst.alpha()) / 255.0 * inv;

        // Premultiplied storage: channels may not exceed alpha.
        let a8 = to_u8(a);
        if let Some(out) = PremultipliedColorU8::from_rgba(
            to_u8(r).min(a8),
            to_u8(g).min(a8),
            to_u8(b).min(a8),
            a8,
        ) {
            pixels[idx] = out;
        }
    }

    /// Encode the surface as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|err| RenderError::Encode(err.to_string()))
    }

    /// Encode and write the surface to a file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

fn to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

/// Rounded-rectangle path: straight runs joined by corner quads.
fn round_rect_path(rect: LayoutRect, radius: f32) -> Option<tiny_skia::Path> {
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let r = radius.clamp(0.0, w.min(h) / 2.0);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}
