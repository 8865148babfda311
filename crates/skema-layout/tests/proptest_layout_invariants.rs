//! Property-based invariant tests for the skema layout engine.
//!
//! These tests verify structural invariants that must hold for **any**
//! outline input fed through parse → build → layout:
//!
//! 1. Tree validity — every node's level equals its parent's level + 1
//!    (or 0 for roots), for arbitrary indentation including skipped levels
//! 2. Determinism — re-parsing and re-laying-out identical input twice
//!    yields structurally identical results
//! 3. Node completeness — every parsed node appears in the layout, in
//!    arena order
//! 4. Bounding box containment — all node rects fit inside `bounds`, and
//!    `bounds` fits inside the canvas
//! 5. Canvas growth — the canvas never shrinks below the requested viewport
//! 6. Sizer idempotence — wrapping the same text twice gives the same lines
//! 7. Organizational parent span — a parent's x lies within its children's
//!    x span (or equals a single child's x)
//! 8. Sibling separation — children of one parent never overlap
//! 9. Connector sanity — every connector has at least two waypoints
//! 10. Style coverage — every invariant holds for all five styles

use proptest::prelude::*;
use skema_core::{MonospaceMetrics, SchemaStyle, build_tree, parse_outline};
use skema_layout::{CanvasSize, DiagramLayout, layout_tree, wrap_label};

// ── Generators ──────────────────────────────────────────────────────────

/// Outline lines: modest label lengths, depths 0..=8 (beyond the clamp on
/// purpose), occasional bullets.
fn outline_strategy() -> impl Strategy<Value = String> {
    let word = "[a-z]{1,12}";
    let label = proptest::collection::vec(word, 1..6).prop_map(|w| w.join(" "));
    let line = (0usize..=8, prop::bool::ANY, label).prop_map(|(depth, bullet, label)| {
        let marker = if bullet { "- " } else { "" };
        format!("{}{marker}{label}", "  ".repeat(depth))
    });
    proptest::collection::vec(line, 0..25).prop_map(|lines| lines.join("\n"))
}

fn any_style() -> impl Strategy<Value = SchemaStyle> {
    prop::sample::select(SchemaStyle::ALL.to_vec())
}

fn layout(text: &str, style: SchemaStyle) -> DiagramLayout {
    let tree = build_tree(parse_outline(text));
    layout_tree(
        &tree,
        style,
        CanvasSize::default(),
        &MonospaceMetrics::default(),
    )
}

// ── Invariants ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn tree_levels_are_parent_plus_one(text in outline_strategy()) {
        let tree = build_tree(parse_outline(&text));
        for node in &tree.nodes {
            match node.parent {
                Some(pid) => prop_assert_eq!(node.level, tree.node(pid).level + 1),
                None => prop_assert_eq!(node.level, 0),
            }
        }
    }

    #[test]
    fn parse_and_layout_are_deterministic(
        text in outline_strategy(),
        style in any_style(),
    ) {
        let first = build_tree(parse_outline(&text));
        let second = build_tree(parse_outline(&text));
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(layout(&text, style), layout(&text, style));
    }

    #[test]
    fn every_node_is_placed_in_order(
        text in outline_strategy(),
        style in any_style(),
    ) {
        let tree = build_tree(parse_outline(&text));
        let out = layout(&text, style);
        prop_assert_eq!(out.nodes.len(), tree.len());
        for (i, placed) in out.nodes.iter().enumerate() {
            prop_assert_eq!(placed.id.0, i);
            prop_assert!(placed.rect.width > 0.0);
            prop_assert!(placed.rect.height > 0.0);
        }
    }

    #[test]
    fn bounds_contain_nodes_and_canvas_contains_bounds(
        text in outline_strategy(),
        style in any_style(),
    ) {
        let out = layout(&text, style);
        for node in &out.nodes {
            prop_assert_eq!(out.bounds.union(&node.rect), out.bounds);
        }
        if !out.nodes.is_empty() {
            prop_assert!(out.bounds.x >= 0.0);
            prop_assert!(out.bounds.y >= 0.0);
            prop_assert!(out.bounds.right() <= out.canvas.width);
            prop_assert!(out.bounds.bottom() <= out.canvas.height);
        }
    }

    #[test]
    fn canvas_never_shrinks_below_viewport(
        text in outline_strategy(),
        style in any_style(),
    ) {
        let out = layout(&text, style);
        prop_assert!(out.canvas.width >= 1000.0);
        prop_assert!(out.canvas.height >= 700.0);
    }

    #[test]
    fn wrapping_is_idempotent(
        label in "[a-z ]{0,80}",
        width in 40.0f32..400.0,
    ) {
        let m = MonospaceMetrics::default();
        let trimmed = label.trim();
        if !trimmed.is_empty() {
            prop_assert_eq!(
                wrap_label(trimmed, width, &m),
                wrap_label(trimmed, width, &m)
            );
        }
    }

    #[test]
    fn organizational_parent_covers_children_span(text in outline_strategy()) {
        let tree = build_tree(parse_outline(&text));
        let out = layout(&text, SchemaStyle::Organizational);
        for node in &tree.nodes {
            if node.children.is_empty() {
                continue;
            }
            let parent_x = out.nodes[node.id.0].rect.center().x;
            let xs: Vec<f32> = node
                .children
                .iter()
                .map(|c| out.nodes[c.0].rect.center().x)
                .collect();
            let min = xs.iter().copied().fold(f32::INFINITY, f32::min);
            let max = xs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            prop_assert!(min - 0.01 <= parent_x && parent_x <= max + 0.01);
        }
    }

    #[test]
    fn siblings_never_overlap(
        text in outline_strategy(),
        style in any_style(),
    ) {
        let tree = build_tree(parse_outline(&text));
        let out = layout(&text, style);
        for node in &tree.nodes {
            for (i, &a) in node.children.iter().enumerate() {
                for &b in &node.children[i + 1..] {
                    prop_assert!(
                        !out.nodes[a.0].rect.intersects(&out.nodes[b.0].rect),
                        "children {} and {} of {} overlap under {}",
                        a.0,
                        b.0,
                        node.id.0,
                        style
                    );
                }
            }
        }
    }

    #[test]
    fn connectors_have_at_least_two_waypoints(
        text in outline_strategy(),
        style in any_style(),
    ) {
        let out = layout(&text, style);
        for connector in &out.connectors {
            prop_assert!(connector.points.len() >= 2);
        }
    }
}
