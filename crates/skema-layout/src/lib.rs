#![forbid(unsafe_code)]

//! Deterministic layout engine for skema diagrams.
//!
//! Turns a [`skema_core::SchemaTree`] into positioned node boxes and routed
//! connectors:
//!
//! 1. Node sizing — greedy word wrap against a [`skema_core::TextMeasurer`],
//!    box height derived from the wrapped line count
//! 2. Placement — one of five strategies ([`skema_core::SchemaStyle`])
//!    assigns a center to every node and computes the required canvas
//! 3. Connector routing — style-dependent arrows, elbows, baselines, or
//!    spokes as waypoint polylines
//!
//! All output is deterministic: identical tree input produces identical
//! layout. Coordinates are in abstract world units (pixels at scale 1.0),
//! origin top-left, y growing downwards. Every strategy grows the canvas
//! beyond the requested viewport when content needs the room; nothing is
//! silently clipped.

pub mod geometry;
pub mod router;
pub mod sizer;
pub mod strategy;

pub use geometry::{LayoutPoint, LayoutRect};
pub use router::{Connector, ConnectorKind};
pub use sizer::{NodeSize, SizingSpec, measure_node, wrap_label};
pub use strategy::{CanvasSize, DiagramLayout, PlacedNode, layout_tree};
