#![forbid(unsafe_code)]

//! Timeline layout: document order along a horizontal baseline.
//!
//! Nodes are spaced evenly along the baseline regardless of level;
//! alternating nodes are offset above/below it to keep adjacent labels
//! apart. A single node is centered on the baseline with no offset.

use skema_core::SchemaTree;

use super::{CanvasSize, Placement};
use crate::geometry::{LayoutPoint, LayoutRect};
use crate::sizer::{NodeSize, SizingSpec};

pub(crate) const MARGIN: f32 = 100.0;
/// Vertical distance between the baseline and an offset node's center.
pub(crate) const STEM_OFFSET: f32 = 100.0;
/// Floor on the horizontal pitch: same-side neighbours are two slots apart,
/// so this keeps their wide boxes from touching.
const MIN_SPACING: f32 = 160.0;

pub(crate) fn place(
    tree: &SchemaTree,
    sizes: &[NodeSize],
    spec: &SizingSpec,
    viewport: CanvasSize,
) -> Placement {
    let n = tree.len();
    let tallest = sizes.iter().map(|s| s.height).fold(0.0, f32::max);

    // End nodes keep their whole box inside the margins.
    let inset = MARGIN + spec.box_width / 2.0;
    let required_width = viewport
        .width
        .max((n - 1) as f32 * MIN_SPACING + 2.0 * inset);
    let required_height = viewport
        .height
        .max(2.0 * (STEM_OFFSET + tallest / 2.0 + MARGIN));
    let center_y = required_height / 2.0;

    let rects = if n == 1 {
        vec![LayoutRect::from_center(
            LayoutPoint::new(required_width / 2.0, center_y),
            sizes[0].width,
            sizes[0].height,
        )]
    } else {
        let spacing = (required_width - 2.0 * inset) / (n - 1) as f32;
        sizes
            .iter()
            .enumerate()
            .map(|(i, size)| {
                let offset = if i % 2 == 0 { -STEM_OFFSET } else { STEM_OFFSET };
                LayoutRect::from_center(
                    LayoutPoint::new(inset + i as f32 * spacing, center_y + offset),
                    size.width,
                    size.height,
                )
            })
            .collect()
    };

    Placement {
        rects,
        canvas: CanvasSize {
            width: required_width,
            height: required_height,
        },
    }
}
