#![forbid(unsafe_code)]

//! Layout strategies.
//!
//! Each strategy is a pure placement function
//! `(tree, sizes, viewport) → node rects + required canvas`, selected by
//! [`skema_core::SchemaStyle`] dispatch. Strategies with an ordering
//! dependency (organizational: parent x before children x) process levels
//! strictly in increasing order; none of them is concurrent.
//!
//! After placement the canvas is grown — never shrunk below the requested
//! viewport — so that every node box plus a margin fits. Content is never
//! silently clipped.

mod flowchart;
mod hierarchical;
mod mindmap;
mod organizational;
pub(crate) mod timeline;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use skema_core::{NodeId, SchemaStyle, SchemaTree, TextMeasurer};
use tracing::debug;

use crate::geometry::LayoutRect;
use crate::router::{self, Connector};
use crate::sizer::{NodeSize, SizingSpec, measure_node};

/// Requested or computed drawing-surface size (world units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
        }
    }
}

/// A node with its final box geometry and wrapped label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedNode {
    pub id: NodeId,
    pub level: usize,
    pub rect: LayoutRect,
    pub lines: Vec<String>,
}

/// Complete layout result: positioned nodes, routed connectors, extents.
///
/// `nodes` is in document order and parallel to the input tree's arena:
/// `nodes[i].id == NodeId(i)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramLayout {
    pub style: SchemaStyle,
    pub nodes: Vec<PlacedNode>,
    pub connectors: Vec<Connector>,
    /// Bounding box of all node rects.
    pub bounds: LayoutRect,
    /// Final canvas size; always ≥ the requested viewport.
    pub canvas: CanvasSize,
}

/// Intermediate placement produced by a strategy: one rect per node (arena
/// order) and the canvas the strategy asked for.
pub(crate) struct Placement {
    pub rects: Vec<LayoutRect>,
    pub canvas: CanvasSize,
}

/// Lay out a tree with the given style.
///
/// An empty tree produces an empty layout on the requested viewport; this
/// is the "nothing to render" terminal state, not an error.
#[must_use]
pub fn layout_tree(
    tree: &SchemaTree,
    style: SchemaStyle,
    viewport: CanvasSize,
    measurer: &dyn TextMeasurer,
) -> DiagramLayout {
    if tree.is_empty() {
        return DiagramLayout {
            style,
            nodes: Vec::new(),
            connectors: Vec::new(),
            bounds: LayoutRect::ZERO,
            canvas: viewport,
        };
    }

    let spec = SizingSpec::for_style(style);
    let sizes: Vec<NodeSize> = tree
        .nodes
        .iter()
        .map(|node| measure_node(&node.text, &spec, measurer))
        .collect();

    let mut placement = match style {
        SchemaStyle::Hierarchical => hierarchical::place(tree, &sizes, &spec, viewport),
        SchemaStyle::Organizational => organizational::place(tree, &sizes, &spec, viewport),
        SchemaStyle::Timeline => timeline::place(tree, &sizes, &spec, viewport),
        SchemaStyle::Flowchart => flowchart::place(tree, &sizes, &spec, viewport),
        SchemaStyle::Mindmap => mindmap::place(tree, &sizes, &spec, viewport),
    };

    let bounds = fit_canvas(&mut placement, viewport);

    let nodes: Vec<PlacedNode> = tree
        .nodes
        .iter()
        .zip(placement.rects.iter())
        .zip(sizes)
        .map(|((node, &rect), size)| PlacedNode {
            id: node.id,
            level: node.level,
            rect,
            lines: size.lines,
        })
        .collect();

    let connectors = router::route(style, tree, &nodes, placement.canvas);

    debug!(
        style = %style,
        nodes = nodes.len(),
        connectors = connectors.len(),
        canvas_w = placement.canvas.width,
        canvas_h = placement.canvas.height,
        "layout complete"
    );

    DiagramLayout {
        style,
        nodes,
        connectors,
        bounds,
        canvas: placement.canvas,
    }
}

/// Canvas growth margin applied when content escapes the strategy's own
/// framing (e.g. wide organizational sibling fans).
const FIT_MARGIN: f32 = 40.0;

/// Shift content into view and grow the canvas around it.
///
/// Returns the (shifted) bounding box of all node rects.
fn fit_canvas(placement: &mut Placement, viewport: CanvasSize) -> LayoutRect {
    let mut bounds = placement.rects[0];
    for rect in &placement.rects[1..] {
        bounds = bounds.union(rect);
    }

    let dx = (FIT_MARGIN - bounds.x).max(0.0);
    let dy = (FIT_MARGIN - bounds.y).max(0.0);
    if dx > 0.0 || dy > 0.0 {
        for rect in &mut placement.rects {
            *rect = rect.translated(dx, dy);
        }
        bounds = bounds.translated(dx, dy);
    }

    placement.canvas = CanvasSize {
        width: placement
            .canvas
            .width
            .max(viewport.width)
            .max(bounds.right() + FIT_MARGIN),
        height: placement
            .canvas
            .height
            .max(viewport.height)
            .max(bounds.bottom() + FIT_MARGIN),
    };
    bounds
}

/// Group arena indices by tree level, levels ascending, document order
/// within a level.
pub(crate) fn level_buckets(tree: &SchemaTree) -> BTreeMap<usize, Vec<usize>> {
    let mut buckets: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, node) in tree.nodes.iter().enumerate() {
        buckets.entry(node.level).or_default().push(idx);
    }
    buckets
}
