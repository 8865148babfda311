#![forbid(unsafe_code)]

//! Draw-ordered diagram rendering.
//!
//! Connectors go down first so node boxes sit above them; each node is a
//! filled rounded rectangle with a border and its wrapped label centered
//! line by line. Arrow connectors are finished with a two-stroke head.

use tiny_skia::Color;
use tracing::debug;

use skema_layout::{Connector, ConnectorKind, DiagramLayout, LayoutPoint, SizingSpec};

use crate::error::RenderError;
use crate::surface::Surface;
use crate::text::FontContext;
use crate::theme::Theme;

/// Arrowhead stroke length.
const HEAD_LENGTH: f32 = 10.0;
/// Half-angle between the arrowhead strokes and the shaft.
const HEAD_ANGLE: f32 = std::f32::consts::PI / 6.0;

/// Renders positioned layouts onto freshly allocated surfaces.
pub struct Renderer<'f> {
    font: &'f FontContext,
    theme: Theme,
}

impl<'f> Renderer<'f> {
    #[must_use]
    pub fn new(font: &'f FontContext) -> Self {
        Self {
            font,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub fn with_theme(font: &'f FontContext, theme: Theme) -> Self {
        Self { font, theme }
    }

    /// Draw a layout onto a new surface sized to its canvas.
    pub fn render(&self, layout: &DiagramLayout) -> Result<Surface, RenderError> {
        let width = layout.canvas.width.ceil().max(1.0) as u32;
        let height = layout.canvas.height.ceil().max(1.0) as u32;
        let mut surface = Surface::new(width, height)?;
        surface.clear(self.theme.background);

        for connector in &layout.connectors {
            self.draw_connector(&mut surface, layout, connector);
        }

        let spec = SizingSpec::for_style(layout.style);
        let radius = self.theme.corner_radius(layout.style);
        let (border_color, border_width) = self.theme.node_border(layout.style);
        let text_color = self.theme.node_text(layout.style);

        for node in &layout.nodes {
            let fill = self.theme.node_fill(layout.style, node.level);
            surface.fill_round_rect(node.rect, radius, fill);
            surface.stroke_round_rect(node.rect, radius, border_color, border_width);

            let center = node.rect.center();
            let start_y = center.y - (node.lines.len() as f32 - 1.0) * spec.line_height / 2.0;
            for (i, line) in node.lines.iter().enumerate() {
                self.font.draw_line(
                    &mut surface,
                    line,
                    center.x,
                    start_y + i as f32 * spec.line_height,
                    text_color,
                );
            }
        }

        debug!(
            width,
            height,
            nodes = layout.nodes.len(),
            "rendered diagram"
        );
        Ok(surface)
    }

    fn draw_connector(&self, surface: &mut Surface, layout: &DiagramLayout, connector: &Connector) {
        let (color, width) = self.theme.connector_stroke(layout.style, connector.kind);
        surface.stroke_polyline(&connector.points, color, width);

        if connector.kind == ConnectorKind::Arrow {
            if let Some((from, to)) = connector.head_segment() {
                draw_arrowhead(surface, from, to, color, width);
            }
        }
    }
}

/// Two strokes swept back from the tip at ±30° to the shaft.
fn draw_arrowhead(
    surface: &mut Surface,
    from: LayoutPoint,
    to: LayoutPoint,
    color: Color,
    width: f32,
) {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    for side in [-1.0f32, 1.0] {
        let theta = angle + side * HEAD_ANGLE;
        let tip = LayoutPoint::new(
            to.x - HEAD_LENGTH * theta.cos(),
            to.y - HEAD_LENGTH * theta.sin(),
        );
        surface.stroke_polyline(&[to, tip], color, width);
    }
}

/// Render a layout straight to PNG bytes.
pub fn render_png(layout: &DiagramLayout, font: &FontContext) -> Result<Vec<u8>, RenderError> {
    Renderer::new(font).render(layout)?.encode_png()
}
