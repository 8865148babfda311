#![forbid(unsafe_code)]

//! Hierarchical layout: one centered horizontal row per level.
//!
//! Rows are stacked top-to-bottom in level order. Within a row, nodes keep
//! document order at a fixed pitch and the row is centered on the canvas;
//! the row's vertical slot is sized by its tallest node, so siblings share
//! a center line even when their wrapped heights differ.

use skema_core::SchemaTree;

use super::{CanvasSize, Placement, level_buckets};
use crate::geometry::{LayoutPoint, LayoutRect};
use crate::sizer::{NodeSize, SizingSpec};

const MARGIN: f32 = 80.0;
const NODE_GAP: f32 = 50.0;
const ROW_GAP: f32 = 40.0;

pub(crate) fn place(
    tree: &SchemaTree,
    sizes: &[NodeSize],
    spec: &SizingSpec,
    viewport: CanvasSize,
) -> Placement {
    let buckets = level_buckets(tree);

    let widest_row = buckets.values().map(Vec::len).max().unwrap_or(0) as f32;
    let required_width = viewport
        .width
        .max(widest_row * spec.box_width + (widest_row - 1.0).max(0.0) * NODE_GAP + 2.0 * MARGIN);

    let mut rects = vec![LayoutRect::ZERO; tree.len()];
    let mut cursor_y = MARGIN;

    for ids in buckets.values() {
        let row_height = row_height(ids, sizes);
        let row_width = ids.len() as f32 * spec.box_width + (ids.len() - 1) as f32 * NODE_GAP;
        let start_x = (required_width - row_width) / 2.0;
        let center_y = cursor_y + row_height / 2.0;

        for (i, &idx) in ids.iter().enumerate() {
            let center_x = start_x + i as f32 * (spec.box_width + NODE_GAP) + spec.box_width / 2.0;
            rects[idx] = LayoutRect::from_center(
                LayoutPoint::new(center_x, center_y),
                sizes[idx].width,
                sizes[idx].height,
            );
        }

        cursor_y += row_height + ROW_GAP;
    }

    Placement {
        rects,
        canvas: CanvasSize {
            width: required_width,
            height: viewport.height.max(cursor_y + MARGIN),
        },
    }
}

pub(crate) fn row_height(ids: &[usize], sizes: &[NodeSize]) -> f32 {
    ids.iter().map(|&idx| sizes[idx].height).fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{DiagramLayout, layout_tree};
    use skema_core::{MonospaceMetrics, NodeId, SchemaStyle, build_tree, parse_outline};

    fn layout(text: &str) -> DiagramLayout {
        let tree = build_tree(parse_outline(text));
        layout_tree(
            &tree,
            SchemaStyle::Hierarchical,
            CanvasSize::default(),
            &MonospaceMetrics::default(),
        )
    }

    #[test]
    fn root_and_children_form_two_rows() {
        let out = layout("Root\n  Child A\n  Child B");
        let root = &out.nodes[0].rect;
        let a = &out.nodes[1].rect;
        let b = &out.nodes[2].rect;

        assert!(root.center().y < a.center().y);
        assert_eq!(a.center().y, b.center().y);
        // Children positioned symmetrically beneath the root.
        let mid = (a.center().x + b.center().x) / 2.0;
        assert!((mid - root.center().x).abs() < 0.5);
    }

    #[test]
    fn two_arrows_connect_root_to_children() {
        let out = layout("Root\n  Child A\n  Child B");
        assert_eq!(out.connectors.len(), 2);
    }

    #[test]
    fn siblings_do_not_overlap() {
        let out = layout("r\n  a\n  b\n  c\n  d\n  e");
        for i in 1..out.nodes.len() {
            for j in i + 1..out.nodes.len() {
                assert!(
                    !out.nodes[i].rect.intersects(&out.nodes[j].rect),
                    "{i} overlaps {j}"
                );
            }
        }
    }

    #[test]
    fn wide_rows_grow_the_canvas() {
        let many = (0..8).fold("r\n".to_string(), |acc, i| acc + &format!("  c{i}\n"));
        let out = layout(&many);
        // 8 children * 280 + 7 * 50 + 160 margin > 1000.
        assert!(out.canvas.width > 1000.0);
    }

    #[test]
    fn rows_share_center_despite_uneven_heights() {
        let out = layout(&format!("r\n  short\n  {}", "long label ".repeat(12)));
        assert_eq!(
            out.nodes[1].rect.center().y,
            out.nodes[2].rect.center().y
        );
        assert!(out.nodes[2].rect.height > out.nodes[1].rect.height);
    }

    #[test]
    fn single_node_is_centered_horizontally() {
        let out = layout("only");
        assert_eq!(out.nodes[0].id, NodeId(0));
        assert!((out.nodes[0].rect.center().x - out.canvas.width / 2.0).abs() < 0.5);
    }
}
