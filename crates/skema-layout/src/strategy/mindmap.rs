#![forbid(unsafe_code)]

//! Radial mind-map layout: a central node with satellites on rings.
//!
//! The first level-0 node sits at the canvas center. Few satellites (≤ 8)
//! share a single ring; beyond that, each tree level gets its own ring with
//! the radius stepping outwards. Angular positions are evenly spaced per
//! ring, and a ring's radius is enlarged when the even spacing would bring
//! neighbouring boxes closer than one box width plus a gap.

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use skema_core::SchemaTree;

use super::{CanvasSize, Placement};
use crate::geometry::{LayoutPoint, LayoutRect};
use crate::sizer::{NodeSize, SizingSpec};

const MARGIN: f32 = 100.0;
/// Satellite count that still fits a single ring.
const SINGLE_RING_LIMIT: usize = 8;
const MIN_RING_RADIUS: f32 = 150.0;
const RING_STEP: f32 = 80.0;
const NODE_GAP: f32 = 40.0;

pub(crate) fn place(
    tree: &SchemaTree,
    sizes: &[NodeSize],
    spec: &SizingSpec,
    viewport: CanvasSize,
) -> Placement {
    let center_idx = tree.root().map_or(0, |id| id.0);
    let satellites: Vec<usize> = (0..tree.len()).filter(|&i| i != center_idx).collect();

    let base_radius = viewport.width.min(viewport.height) / 5.0;
    let chord = spec.box_width + NODE_GAP;

    // Ring assignment: (radius, members) in stable order.
    let rings: Vec<(f32, Vec<usize>)> = if satellites.len() <= SINGLE_RING_LIMIT {
        if satellites.is_empty() {
            Vec::new()
        } else {
            let radius = ring_radius(base_radius.max(MIN_RING_RADIUS), satellites.len(), chord);
            vec![(radius, satellites)]
        }
    } else {
        let mut by_level: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for idx in satellites {
            by_level
                .entry(tree.nodes[idx].level.max(1))
                .or_default()
                .push(idx);
        }
        let mut rings = Vec::with_capacity(by_level.len());
        let mut previous = 0.0_f32;
        for (level, members) in by_level {
            let base = base_radius + level as f32 * RING_STEP;
            let radius = ring_radius(base, members.len(), chord).max(previous + RING_STEP);
            previous = radius;
            rings.push((radius, members));
        }
        rings
    };

    let max_radius = rings.iter().map(|(r, _)| *r).fold(0.0, f32::max);
    let tallest = sizes.iter().map(|s| s.height).fold(0.0, f32::max);

    let required_width = viewport
        .width
        .max(2.0 * (max_radius + spec.box_width / 2.0 + MARGIN));
    let required_height = viewport
        .height
        .max(2.0 * (max_radius + tallest / 2.0 + MARGIN));
    let center = LayoutPoint::new(required_width / 2.0, required_height / 2.0);

    let mut rects = vec![LayoutRect::ZERO; tree.len()];
    rects[center_idx] = LayoutRect::from_center(
        center,
        sizes[center_idx].width,
        sizes[center_idx].height,
    );

    for (radius, members) in &rings {
        let angle_step = TAU / members.len() as f32;
        for (i, &idx) in members.iter().enumerate() {
            let angle = i as f32 * angle_step;
            rects[idx] = LayoutRect::from_center(
                LayoutPoint::new(
                    center.x + angle.cos() * radius,
                    center.y + angle.sin() * radius,
                ),
                sizes[idx].width,
                sizes[idx].height,
            );
        }
    }

    Placement {
        rects,
        canvas: CanvasSize {
            width: required_width,
            height: required_height,
        },
    }
}

/// Enlarge a ring until evenly spaced neighbours are at least `chord` apart.
fn ring_radius(base: f32, count: usize, chord: f32) -> f32 {
    if count < 2 {
        return base;
    }
    let half_angle = std::f32::consts::PI / count as f32;
    base.max(chord / (2.0 * half_angle.sin()))
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
            SchemaStyle::Mindmap,
            CanvasSize::default(),
            &MonospaceMetrics::default(),
        )
    }

    #[test]
    fn single_node_is_centered_with_zero_connectors() {
        let out = layout("core idea");
        assert_eq!(out.nodes.len(), 1);
        assert!(out.connectors.is_empty());
        let c = out.nodes[0].rect.center();
        assert_eq!(c.x, out.canvas.width / 2.0);
        assert_eq!(c.y, out.canvas.height / 2.0);
    }

    #[test]
    fn first_root_takes_the_center() {
        let out = layout("center\n  a\n  b\nother root");
        let c = out.nodes[0].rect.center();
        assert_eq!(c.x, out.canvas.width / 2.0);
        assert_eq!(c.y, out.canvas.height / 2.0);
    }

    #[test]
    fn few_satellites_share_one_ring() {
        let out = layout("hub\n  a\n  b\n  c\n  d");
        let center = out.nodes[0].rect.center();
        let radii: Vec<f32> = (1..5)
            .map(|i| {
                let p = out.nodes[i].rect.center();
                ((p.x - center.x).powi(2) + (p.y - center.y).powi(2)).sqrt()
            })
            .collect();
        for r in &radii {
            assert!((r - radii[0]).abs() < 0.01, "satellites on one ring");
        }
    }

    #[test]
    fn many_satellites_ring_per_level() {
        let mut input = String::from("hub\n");
        for i in 0..6 {
            input.push_str(&format!("  branch {i}\n"));
            input.push_str(&format!("    leaf {i}\n"));
        }
        let out = layout(&input);
        let center = out.nodes[0].rect.center();
        let radius_of = |i: usize| {
            let p = out.nodes[i].rect.center();
            ((p.x - center.x).powi(2) + (p.y - center.y).powi(2)).sqrt()
        };
        // Level-1 branches sit on an inner ring, level-2 leaves further out.
        let branch_r = radius_of(1);
        let leaf_r = radius_of(2);
        assert!(leaf_r > branch_r);
    }

    #[test]
    fn satellites_on_a_ring_do_not_overlap() {
        let out = layout("hub\n  a\n  b\n  c\n  d\n  e\n  f\n  g\n  h");
        for i in 1..9 {
            for j in i + 1..9 {
                assert!(
                    !out.nodes[i].rect.intersects(&out.nodes[j].rect),
                    "{i} overlaps {j}"
                );
            }
        }
    }

    #[test]
    fn spokes_connect_center_to_every_satellite() {
        let out = layout("hub\n  a\n  b\n  c");
        assert_eq!(out.connectors.len(), 3);
    }

    #[test]
    fn large_rings_grow_the_canvas() {
        let out = layout("hub\n  a\n  b\n  c\n  d\n  e\n  f\n  g\n  h");
        // Eight 320-unit chords need a radius well past the default canvas.
        assert!(out.canvas.width > 1000.0);
    }
}
