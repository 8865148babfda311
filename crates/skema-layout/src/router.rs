#![forbid(unsafe_code)]

//! Style-dependent connector routing.
//!
//! Connectors are waypoint polylines tagged with a kind so the renderer
//! knows whether to finish them with an arrowhead:
//!
//! - hierarchical: parent-bottom → child-top arrows along tree edges
//! - flowchart: consecutive-node arrows in document order (sequence flow)
//! - organizational: T-shaped elbows — parent stem down to a midline, a
//!   horizontal run spanning the children, and one stem into each child;
//!   a single child gets one straight vertical segment instead
//! - timeline: one continuous baseline plus one stem per node
//! - mindmap: straight spokes from the central node to every other node

use serde::{Deserialize, Serialize};
use skema_core::{SchemaStyle, SchemaTree};

use crate::geometry::{LayoutPoint, LayoutRect};
use crate::strategy::{CanvasSize, PlacedNode};

/// How a connector is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectorKind {
    /// Straight segment finished with an arrowhead.
    Arrow,
    /// Plain segment of a T-shaped elbow run.
    Elbow,
    /// The timeline's horizontal base.
    Baseline,
    /// Short vertical tie between a node and a line.
    Stem,
    /// Radial line from a mind-map center.
    Spoke,
}

/// A routed connector: two or more waypoints in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub kind: ConnectorKind,
    pub points: Vec<LayoutPoint>,
}

impl Connector {
    fn line(kind: ConnectorKind, from: LayoutPoint, to: LayoutPoint) -> Self {
        Self {
            kind,
            points: vec![from, to],
        }
    }

    /// Last segment of the polyline, for arrowhead orientation.
    #[must_use]
    pub fn head_segment(&self) -> Option<(LayoutPoint, LayoutPoint)> {
        match self.points.as_slice() {
            [.., a, b] => Some((*a, *b)),
            _ => None,
        }
    }
}

/// Route all connectors for a placed layout.
pub(crate) fn route(
    style: SchemaStyle,
    tree: &SchemaTree,
    nodes: &[PlacedNode],
    canvas: CanvasSize,
) -> Vec<Connector> {
    match style {
        SchemaStyle::Hierarchical => route_hierarchy_arrows(tree, nodes),
        SchemaStyle::Organizational => route_elbows(tree, nodes),
        SchemaStyle::Timeline => route_timeline(nodes, canvas),
        SchemaStyle::Flowchart => route_sequence_arrows(nodes),
        SchemaStyle::Mindmap => route_spokes(tree, nodes),
    }
}

/// One arrow per tree edge, parent bottom-center to child top-center.
fn route_hierarchy_arrows(tree: &SchemaTree, nodes: &[PlacedNode]) -> Vec<Connector> {
    let mut connectors = Vec::new();
    for node in nodes {
        let Some(parent) = tree.node(node.id).parent else {
            continue;
        };
        let p = &nodes[parent.0].rect;
        connectors.push(Connector::line(
            ConnectorKind::Arrow,
            LayoutPoint::new(p.center().x, p.bottom()),
            LayoutPoint::new(node.rect.center().x, node.rect.y),
        ));
    }
    connectors
}

/// Arrows between consecutive nodes in document order, clipped to the box
/// edges so heads land on the target's border.
fn route_sequence_arrows(nodes: &[PlacedNode]) -> Vec<Connector> {
    nodes
        .windows(2)
        .map(|pair| {
            let (from, to) = clip_segment(&pair[0].rect, &pair[1].rect);
            Connector::line(ConnectorKind::Arrow, from, to)
        })
        .collect()
}

/// T-shaped elbows from each parent down into its children.
fn route_elbows(tree: &SchemaTree, nodes: &[PlacedNode]) -> Vec<Connector> {
    let mut connectors = Vec::new();

    for node in nodes {
        let children = &tree.node(node.id).children;
        if children.is_empty() {
            continue;
        }

        let parent_bottom = LayoutPoint::new(node.rect.center().x, node.rect.bottom());

        if let [only] = children.as_slice() {
            let child = &nodes[only.0].rect;
            connectors.push(Connector::line(
                ConnectorKind::Elbow,
                parent_bottom,
                LayoutPoint::new(child.center().x, child.y),
            ));
            continue;
        }

        let row_top = children
            .iter()
            .map(|c| nodes[c.0].rect.y)
            .fold(f32::INFINITY, f32::min);
        let mid_y = (parent_bottom.y + row_top) / 2.0;

        let xs: Vec<f32> = children.iter().map(|c| nodes[c.0].rect.center().x).collect();
        let left = xs.iter().copied().fold(f32::INFINITY, f32::min);
        let right = xs.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        connectors.push(Connector::line(
            ConnectorKind::Elbow,
            parent_bottom,
            LayoutPoint::new(parent_bottom.x, mid_y),
        ));
        connectors.push(Connector::line(
            ConnectorKind::Elbow,
            LayoutPoint::new(left, mid_y),
            LayoutPoint::new(right, mid_y),
        ));
        for child_id in children {
            let child = &nodes[child_id.0].rect;
            connectors.push(Connector::line(
                ConnectorKind::Elbow,
                LayoutPoint::new(child.center().x, mid_y),
                LayoutPoint::new(child.center().x, child.y),
            ));
        }
    }

    connectors
}

/// One baseline across the canvas plus a stem tying each node to it.
fn route_timeline(nodes: &[PlacedNode], canvas: CanvasSize) -> Vec<Connector> {
    use crate::strategy::timeline::MARGIN;

    let baseline_y = canvas.height / 2.0;
    let mut connectors = vec![Connector::line(
        ConnectorKind::Baseline,
        LayoutPoint::new(MARGIN, baseline_y),
        LayoutPoint::new(canvas.width - MARGIN, baseline_y),
    )];

    for node in nodes {
        let rect = &node.rect;
        // A node sitting on the baseline (single-node case) needs no stem.
        if rect.y <= baseline_y && baseline_y <= rect.bottom() {
            continue;
        }
        let x = rect.center().x;
        let edge_y = if rect.bottom() < baseline_y {
            rect.bottom()
        } else {
            rect.y
        };
        connectors.push(Connector::line(
            ConnectorKind::Stem,
            LayoutPoint::new(x, baseline_y),
            LayoutPoint::new(x, edge_y),
        ));
    }

    connectors
}

/// Straight spokes from the central node to every satellite.
fn route_spokes(tree: &SchemaTree, nodes: &[PlacedNode]) -> Vec<Connector> {
    let Some(center_id) = tree.root() else {
        return Vec::new();
    };
    let center = &nodes[center_id.0].rect;

    nodes
        .iter()
        .filter(|n| n.id != center_id)
        .map(|node| {
            let (from, to) = clip_segment(center, &node.rect);
            Connector::line(ConnectorKind::Spoke, from, to)
        })
        .collect()
}

/// Trim the center-to-center segment of two boxes to their borders.
fn clip_segment(from: &LayoutRect, to: &LayoutRect) -> (LayoutPoint, LayoutPoint) {
    let a = from.center();
    let b = to.center();
    (exit_point(from, a, b), exit_point(to, b, a))
}

/// Where the ray `from → towards` leaves `rect` (`from` is the center).
fn exit_point(rect: &LayoutRect, from: LayoutPoint, towards: LayoutPoint) -> LayoutPoint {
    let dx = towards.x - from.x;
    let dy = towards.y - from.y;
    if dx == 0.0 && dy == 0.0 {
        return from;
    }

    let tx = if dx > 0.0 {
        (rect.right() - from.x) / dx
    } else if dx < 0.0 {
        (rect.x - from.x) / dx
    } else {
        f32::INFINITY
    };
    let ty = if dy > 0.0 {
        (rect.bottom() - from.y) / dy
    } else if dy < 0.0 {
        (rect.y - from.y) / dy
    } else {
        f32::INFINITY
    };

    let t = tx.min(ty).clamp(0.0, 1.0);
    LayoutPoint::new(from.x + dx * t, from.y + dy * t)
}
