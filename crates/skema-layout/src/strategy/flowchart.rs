#![forbid(unsafe_code)]

//! Flowchart layout: a row-major grid in document order.
//!
//! The grid approximates a square — `cols = min(ceil(sqrt(n)),
//! columns-that-fit, 4)` — and is filled left-to-right, top-to-bottom.
//! Connectors follow document order (a simple sequential flow), not the
//! tree hierarchy. Cells are widened beyond the viewport-derived pitch when
//! the node boxes need the room, growing the canvas rather than letting
//! neighbours overlap.

use skema_core::SchemaTree;

use super::{CanvasSize, Placement};
use crate::geometry::{LayoutPoint, LayoutRect};
use crate::sizer::{NodeSize, SizingSpec};

const MARGIN: f32 = 80.0;
const MIN_CELL_WIDTH: f32 = 160.0;
const MIN_CELL_HEIGHT: f32 = 144.0;
const CELL_GAP: f32 = 40.0;
const MAX_COLUMNS: usize = 4;

pub(crate) fn place(
    tree: &SchemaTree,
    sizes: &[NodeSize],
    spec: &SizingSpec,
    viewport: CanvasSize,
) -> Placement {
    let n = tree.len();
    let cols = column_count(n, viewport.width);
    let rows = n.div_ceil(cols);

    let tallest = sizes.iter().map(|s| s.height).fold(0.0, f32::max);

    let available_width = viewport.width - 2.0 * MARGIN;
    let available_height = viewport.height - 2.0 * MARGIN;
    let cell_width = (available_width / cols as f32)
        .max(MIN_CELL_WIDTH)
        .max(spec.box_width + CELL_GAP);
    let cell_height = (available_height / rows as f32)
        .max(MIN_CELL_HEIGHT)
        .max(tallest + CELL_GAP);

    let rects = sizes
        .iter()
        .enumerate()
        .map(|(i, size)| {
            let col = (i % cols) as f32;
            let row = (i / cols) as f32;
            LayoutRect::from_center(
                LayoutPoint::new(
                    MARGIN + col * cell_width + cell_width / 2.0,
                    MARGIN + row * cell_height + cell_height / 2.0,
                ),
                size.width,
                size.height,
            )
        })
        .collect();

    Placement {
        rects,
        canvas: CanvasSize {
            width: viewport.width.max(cols as f32 * cell_width + 2.0 * MARGIN),
            height: viewport
                .height
                .max(rows as f32 * cell_height + 2.0 * MARGIN),
        },
    }
}

/// `min(ceil(sqrt(n)), columns that fit the viewport, 4)`, at least 1.
fn column_count(n: usize, viewport_width: f32) -> usize {
    let square = (n as f32).sqrt().ceil() as usize;
    let fitting = ((viewport_width - 2.0 * MARGIN) / MIN_CELL_WIDTH).floor() as usize;
    square.min(fitting.max(1)).min(MAX_COLUMNS).max(1)
}
