#![forbid(unsafe_code)]

//! skema — turn an indented text outline into a drawn diagram.
//!
//! The pipeline is strictly forward and synchronous:
//!
//! 1. Parse the outline into a flat node list
//! 2. Reconstruct the hierarchy
//! 3. Optionally let an enhancement collaborator rewrite the node list
//!    (failures fall back to the original nodes, never abort)
//! 4. Size nodes and run the selected layout strategy
//! 5. Route connectors
//! 6. Render and export a PNG
//!
//! Steps 1–5 are pure and need no rendering surface; step 6 needs a loaded
//! font and is the only step that can fail. Re-running the pipeline always
//! starts from the original text — layouts are never incrementally updated.
//!
//! ```
//! use skema::{Pipeline, PipelineConfig, SchemaStyle};
//!
//! let pipeline = Pipeline::new(PipelineConfig {
//!     style: SchemaStyle::Hierarchical,
//!     ..PipelineConfig::default()
//! });
//! let result = pipeline.generate("Root\n  Child A\n  Child B");
//! assert_eq!(result.layout.nodes.len(), 3);
//! ```

pub mod enhance;
pub mod pipeline;

pub use enhance::{EnhanceError, EnhanceRequest, Enhancer, ModelConfig};
#[cfg(feature = "http")]
pub use enhance::HttpEnhancer;
pub use pipeline::{EnhancementOutcome, GeneratedSchema, Pipeline, PipelineConfig};

pub use skema_core::{
    MonospaceMetrics, NodeId, SchemaNode, SchemaStyle, SchemaTree, TextMeasurer, build_tree,
    parse_outline,
};
pub use skema_layout::{CanvasSize, Connector, ConnectorKind, DiagramLayout, PlacedNode};
pub use skema_render::{FontContext, RenderError, Renderer, Surface, render_png};
