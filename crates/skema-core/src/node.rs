#![forbid(unsafe_code)]

//! The schema node arena and diagram style selection.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Maximum outline depth. Deeper indentation is clamped to this level to
/// bound visual complexity.
pub const MAX_OUTLINE_DEPTH: usize = 6;

/// Stable identifier of a node within one parse run.
///
/// Ids are arena indices assigned in document order and are never reused
/// within a run. They are only meaningful relative to the [`SchemaTree`]
/// (or flat node list) they were issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// A single labeled outline node.
///
/// `level` is the node's depth in the reconstructed tree. The parser stores
/// the declared indentation level here; [`crate::build_tree`] replaces it
/// with the normalized tree depth (`parent.level + 1`, or 0 for roots).
///
/// Geometry does not live on the node: positions are derived data computed
/// by a layout strategy and returned separately, so a node list can always
/// be re-laid-out from `text` and the hierarchy alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaNode {
    pub id: NodeId,
    pub text: String,
    pub level: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,
}

impl SchemaNode {
    /// A detached node with no links, as emitted by the parser.
    #[must_use]
    pub fn new(id: NodeId, text: impl Into<String>, level: usize) -> Self {
        Self {
            id,
            text: text.into(),
            level: level.min(MAX_OUTLINE_DEPTH),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// An arena-backed forest of schema nodes.
///
/// Nodes are stored in document order; `nodes[id.0].id == id` always holds.
/// `roots` lists the level-0 nodes in document order. The first root is
/// "the" root for strategies that need a single anchor (mind-map centering);
/// the rest are top-level siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaTree {
    pub nodes: Vec<SchemaNode>,
    pub roots: Vec<NodeId>,
}

impl SchemaTree {
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued for this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    /// The anchor root: the first level-0 node in document order.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.roots.first().copied()
    }

    /// Deepest level present in the tree, or `None` when empty.
    #[must_use]
    pub fn max_level(&self) -> Option<usize> {
        self.nodes.iter().map(|n| n.level).max()
    }
}

/// The five supported layout styles.
///
/// Selecting a style selects a layout strategy, a connector routing rule,
/// and a node box geometry; see the layout crate for the algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaStyle {
    #[default]
    Hierarchical,
    Organizational,
    Timeline,
    Flowchart,
    Mindmap,
}

impl SchemaStyle {
    /// All styles, in presentation order.
    pub const ALL: [Self; 5] = [
        Self::Hierarchical,
        Self::Organizational,
        Self::Timeline,
        Self::Flowchart,
        Self::Mindmap,
    ];

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hierarchical" | "hierarchy" | "tree" => Some(Self::Hierarchical),
            "organizational" | "org" | "orgchart" => Some(Self::Organizational),
            "timeline" => Some(Self::Timeline),
            "flowchart" | "flow" => Some(Self::Flowchart),
            "mindmap" | "mind-map" | "radial" => Some(Self::Mindmap),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hierarchical => "hierarchical",
            Self::Organizational => "organizational",
            Self::Timeline => "timeline",
            Self::Flowchart => "flowchart",
            Self::Mindmap => "mindmap",
        }
    }
}

impl fmt::Display for SchemaStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
