#![forbid(unsafe_code)]

//! The outline-to-diagram pipeline.

use tracing::{debug, warn};

use skema_core::{
    MonospaceMetrics, SchemaNode, SchemaStyle, SchemaTree, TextMeasurer, build_tree, parse_outline,
};
use skema_layout::{CanvasSize, DiagramLayout, layout_tree};
use skema_render::{FontContext, RenderError, Renderer};

use crate::enhance::{EnhanceRequest, Enhancer, ModelConfig};

/// Pipeline parameters; the viewport is a lower bound, the layout grows
/// the canvas past it when content needs the room.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub style: SchemaStyle,
    pub viewport: CanvasSize,
    pub model: ModelConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            style: SchemaStyle::default(),
            viewport: CanvasSize::default(),
            model: ModelConfig::default(),
        }
    }
}

/// What happened at the enhancement boundary. `Degraded` is the
/// non-blocking notification surface for callers that want to tell the
/// user enhancement was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhancementOutcome {
    /// No enhancer configured.
    Skipped,
    /// The enhanced node list was used.
    Applied,
    /// The enhancer failed; the original nodes were used.
    Degraded(String),
}

/// Pipeline output: the reconstructed tree, the positioned layout, and the
/// enhancement outcome. Always produced — an empty outline yields an empty
/// layout, and render failures happen after this value exists.
#[derive(Debug, Clone)]
pub struct GeneratedSchema {
    pub tree: SchemaTree,
    pub layout: DiagramLayout,
    pub enhancement: EnhancementOutcome,
}

/// The synchronous generation pipeline.
///
/// Owns nothing heavier than configuration; every `generate` call starts
/// from the original text, so regeneration is a plain re-call.
pub struct Pipeline<'a> {
    config: PipelineConfig,
    enhancer: Option<&'a dyn Enhancer>,
    measurer: &'a dyn TextMeasurer,
}

const DEFAULT_MEASURER: MonospaceMetrics = MonospaceMetrics { advance: 7.2 };

impl<'a> Pipeline<'a> {
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            enhancer: None,
            measurer: &DEFAULT_MEASURER,
        }
    }

    /// Attach an enhancement collaborator.
    #[must_use]
    pub fn with_enhancer(mut self, enhancer: &'a dyn Enhancer) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    /// Replace the deterministic measurer, e.g. with a loaded
    /// [`FontContext`] so box sizes match the rendered glyphs.
    #[must_use]
    pub fn with_measurer(mut self, measurer: &'a dyn TextMeasurer) -> Self {
        self.measurer = measurer;
        self
    }

    /// Run parse → hierarchy → enhance → layout. Infallible; an empty
    /// outline produces an empty layout.
    #[must_use]
    pub fn generate(&self, text: &str) -> GeneratedSchema {
        let parsed = parse_outline(text);
        debug!(nodes = parsed.len(), style = %self.config.style, "outline parsed");
        let mut tree = build_tree(parsed);

        let enhancement = match self.enhancer {
            None => EnhancementOutcome::Skipped,
            Some(enhancer) => {
                let request = EnhanceRequest {
                    nodes: tree.nodes.clone(),
                    schema_type: self.config.style,
                    config: self.config.model.clone(),
                };
                match enhancer.enhance(&request) {
                    Ok(enhanced) => {
                        tree = rebuild_from_enhanced(enhanced);
                        EnhancementOutcome::Applied
                    }
                    Err(err) => {
                        warn!(error = %err, "enhancement failed; using original nodes");
                        EnhancementOutcome::Degraded(err.to_string())
                    }
                }
            }
        };

        let layout = layout_tree(&tree, self.config.style, self.config.viewport, self.measurer);

        GeneratedSchema {
            tree,
            layout,
            enhancement,
        }
    }

    /// Run the full pipeline and render a PNG.
    ///
    /// The schema is returned even when rendering fails, so callers keep
    /// the layout data when only the drawing surface is unavailable.
    pub fn generate_png(
        &self,
        text: &str,
        font: &FontContext,
    ) -> (GeneratedSchema, Result<Vec<u8>, RenderError>) {
        let schema = self.generate(text);
        let png = Renderer::new(font)
            .render(&schema.layout)
            .and_then(|surface| surface.encode_png());
        (schema, png)
    }
}

/// Re-anchor an enhancer's node list into a fresh arena.
///
/// Only text and level survive the boundary; ids are reissued densely and
/// levels are re-clamped before the hierarchy is rebuilt, so a sloppy
/// service cannot corrupt the tree.
fn rebuild_from_enhanced(enhanced: Vec<SchemaNode>) -> SchemaTree {
    let flat: Vec<SchemaNode> = enhanced
        .into_iter()
        .filter(|node| !node.text.trim().is_empty())
        .enumerate()
        .map(|(idx, node)| SchemaNode::new(skema_core::NodeId(idx), node.text, node.level))
        .collect();
    build_tree(flat)
}
