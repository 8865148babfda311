#![forbid(unsafe_code)]

//! Organizational-chart layout: children hang under their own parent.
//!
//! Like the hierarchical layout this stacks one row per level, but within a
//! row siblings are grouped by parent and distributed symmetrically around
//! the parent's x — a single child aligns exactly under it. Levels are
//! processed strictly in increasing order so every parent's x is resolved
//! before its children's.
//!
//! Sibling groups of *different* parents may overlap for unbalanced trees;
//! only the parent-within-children-span property is guaranteed.

use skema_core::SchemaTree;

use super::{CanvasSize, Placement, hierarchical::row_height, level_buckets};
use crate::geometry::{LayoutPoint, LayoutRect};
use crate::sizer::{NodeSize, SizingSpec};

const MARGIN: f32 = 60.0;
const NODE_GAP: f32 = 40.0;
const LEVEL_GAP: f32 = 100.0;
/// Extra headroom above the root row.
const HEADER_OFFSET: f32 = 50.0;

pub(crate) fn place(
    tree: &SchemaTree,
    sizes: &[NodeSize],
    spec: &SizingSpec,
    viewport: CanvasSize,
) -> Placement {
    let buckets = level_buckets(tree);

    let mut required_width = viewport.width;
    for ids in buckets.values() {
        let row = ids.len() as f32 * spec.box_width
            + (ids.len() - 1) as f32 * NODE_GAP
            + 2.0 * MARGIN;
        required_width = required_width.max(row);
    }

    let mut rects = vec![LayoutRect::ZERO; tree.len()];
    let mut cursor_y = MARGIN + HEADER_OFFSET;
    let pitch = spec.box_width + NODE_GAP;

    for (&level, ids) in &buckets {
        let row_h = row_height(ids, sizes);
        let center_y = cursor_y + row_h / 2.0;

        if level == 0 {
            // Roots form one sibling group centered on the canvas.
            spread(&mut rects, ids, sizes, required_width / 2.0, center_y, pitch);
        } else {
            for (parent_idx, group) in groups_by_parent(tree, ids) {
                let parent_x = rects[parent_idx].center().x;
                spread(&mut rects, &group, sizes, parent_x, center_y, pitch);
            }
        }

        cursor_y += row_h + LEVEL_GAP;
    }

    Placement {
        rects,
        canvas: CanvasSize {
            width: required_width,
            height: viewport.height.max(cursor_y + MARGIN),
        },
    }
}

/// Place a sibling group symmetrically around `center_x`.
fn spread(
    rects: &mut [LayoutRect],
    ids: &[usize],
    sizes: &[NodeSize],
    center_x: f32,
    center_y: f32,
    pitch: f32,
) {
    let start_x = center_x - (ids.len() - 1) as f32 * pitch / 2.0;
    for (i, &idx) in ids.iter().enumerate() {
        rects[idx] = LayoutRect::from_center(
            LayoutPoint::new(start_x + i as f32 * pitch, center_y),
            sizes[idx].width,
            sizes[idx].height,
        );
    }
}

/// Split a level bucket into per-parent sibling groups, first-seen order.
fn groups_by_parent(tree: &SchemaTree, ids: &[usize]) -> Vec<(usize, Vec<usize>)> {
    let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
    for &idx in ids {
        let Some(parent) = tree.nodes[idx].parent else {
            continue;
        };
        match groups.iter_mut().find(|(p, _)| *p == parent.0) {
            Some((_, members)) => members.push(idx),
            None => groups.push((parent.0, vec![idx])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{DiagramLayout, layout_tree};
    use skema_core::{MonospaceMetrics, SchemaStyle, build_tree, parse_outline};

    fn layout(text: &str) -> DiagramLayout {
        let tree = build_tree(parse_outline(text));
        layout_tree(
            &tree,
            SchemaStyle::Organizational,
            CanvasSize::default(),
            &MonospaceMetrics::default(),
        )
    }

    #[test]
    fn single_child_aligns_under_parent() {
        let out = layout("boss\n  only report");
        assert_eq!(
            out.nodes[0].rect.center().x,
            out.nodes[1].rect.center().x
        );
        assert!(out.nodes[1].rect.y > out.nodes[0].rect.bottom());
    }

    #[test]
    fn parent_x_lies_within_children_span() {
        let out = layout("boss\n  a\n  b\n  c");
        let parent_x = out.nodes[0].rect.center().x;
        let xs: Vec<f32> = (1..4).map(|i| out.nodes[i].rect.center().x).collect();
        let min = xs.iter().copied().fold(f32::INFINITY, f32::min);
        let max = xs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(min <= parent_x && parent_x <= max);
        // And symmetrically: the middle child sits exactly under the parent.
        assert!((xs[1] - parent_x).abs() < 0.5);
    }

    #[test]
    fn sibling_groups_hang_under_their_own_parents() {
        let out = layout("root\n  left\n    l1\n    l2\n  right\n    r1\n    r2");
        let left_x = out.nodes[1].rect.center().x;
        let right_x = out.nodes[4].rect.center().x;
        assert!(left_x < right_x);

        let l_mid = (out.nodes[2].rect.center().x + out.nodes[3].rect.center().x) / 2.0;
        let r_mid = (out.nodes[5].rect.center().x + out.nodes[6].rect.center().x) / 2.0;
        assert!((l_mid - left_x).abs() < 0.5);
        assert!((r_mid - right_x).abs() < 0.5);
    }

    #[test]
    fn siblings_of_one_parent_do_not_overlap() {
        let out = layout("r\n  a\n  b\n  c\n  d");
        for i in 1..5 {
            for j in i + 1..5 {
                assert!(!out.nodes[i].rect.intersects(&out.nodes[j].rect));
            }
        }
    }

    #[test]
    fn multiple_roots_spread_as_siblings() {
        let out = layout("alpha\nbeta\ngamma");
        let xs: Vec<f32> = out.nodes.iter().map(|n| n.rect.center().x).collect();
        assert!(xs[0] < xs[1] && xs[1] < xs[2]);
        assert!(!out.nodes[0].rect.intersects(&out.nodes[1].rect));
    }

    #[test]
    fn deep_fans_stay_on_canvas() {
        // A wide fan under an off-center parent escapes the strategy's own
        // framing; the canvas must grow instead of clipping.
        let out = layout("r\n  far left\n    a\n    b\n    c\n    d\n    e\n  far right");
        assert!(out.bounds.x >= 0.0);
        assert!(out.bounds.right() <= out.canvas.width);
    }

    #[test]
    fn levels_stack_downwards() {
        let out = layout("a\n  b\n    c");
        assert!(out.nodes[0].rect.bottom() < out.nodes[1].rect.y);
        assert!(out.nodes[1].rect.bottom() < out.nodes[2].rect.y);
    }
}
