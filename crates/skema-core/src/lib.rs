#![forbid(unsafe_code)]

//! Node model, outline parsing, and hierarchy reconstruction for skema.
//!
//! This crate holds the data model shared by the layout and render layers:
//!
//! - [`SchemaNode`] / [`SchemaTree`] — an arena of labeled nodes with
//!   index-based parent/child pointers, reconstructed from an indented
//!   plain-text outline.
//! - [`SchemaStyle`] — the five supported diagram styles.
//! - [`TextMeasurer`] — the text-measurement capability layout depends on,
//!   with a deterministic monospace implementation for headless use.
//!
//! Parsing and hierarchy reconstruction are total: any input string produces
//! a valid (possibly empty) forest. An empty result is a terminal state for
//! callers ("nothing to render"), never an error.

pub mod hierarchy;
pub mod measure;
pub mod node;
pub mod outline;

pub use hierarchy::build_tree;
pub use measure::{MonospaceMetrics, TextMeasurer};
pub use node::{MAX_OUTLINE_DEPTH, NodeId, SchemaNode, SchemaStyle, SchemaTree};
pub use outline::parse_outline;
