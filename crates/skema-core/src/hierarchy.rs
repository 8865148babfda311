#![forbid(unsafe_code)]

//! Outline-to-tree reconstruction.
//!
//! Rebuilds parent/child links from the parser's flat, level-tagged node
//! list with a stack of "currently open ancestors": walking nodes in
//! document order, the stack is truncated to the node's declared level, the
//! node attaches under the new top of stack (or becomes a root), and is then
//! pushed as a potential ancestor itself. O(n), no recursion.
//!
//! Skipped levels are a documented relaxation, not an error: a jump from
//! level 0 straight to level 2 attaches the deep node to the nearest open
//! ancestor. The stored `level` of every node is normalized to its actual
//! tree depth afterwards, so `level == parent.level + 1` holds for any
//! input, however malformed the indentation.

use crate::node::{NodeId, SchemaNode, SchemaTree};

/// Reconstruct a tree from a flat, document-ordered node list.
///
/// The input nodes' `parent`/`children` links are overwritten and `level`
/// is replaced by the normalized tree depth; the declared level only drives
/// ancestor-stack truncation.
#[must_use]
pub fn build_tree(mut nodes: Vec<SchemaNode>) -> SchemaTree {
    let mut roots = Vec::new();
    // Open ancestors, outermost first; stack depth equals tree depth.
    let mut stack: Vec<NodeId> = Vec::new();

    for idx in 0..nodes.len() {
        let id = NodeId(idx);
        let declared = nodes[idx].level;

        stack.truncate(declared);
        let parent = stack.last().copied();

        nodes[idx].level = stack.len();
        nodes[idx].parent = parent;
        nodes[idx].children.clear();

        match parent {
            Some(pid) => nodes[pid.0].children.push(id),
            None => roots.push(id),
        }
        stack.push(id);
    }

    SchemaTree { nodes, roots }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::parse_outline;

    fn tree(text: &str) -> SchemaTree {
        build_tree(parse_outline(text))
    }

    #[test]
    fn single_root_with_children() {
        let t = tree("Root\n  Child A\n  Child B");
        assert_eq!(t.roots, vec![NodeId(0)]);
        assert_eq!(t.node(NodeId(0)).children, vec![NodeId(1), NodeId(2)]);
        assert_eq!(t.node(NodeId(1)).parent, Some(NodeId(0)));
        assert_eq!(t.node(NodeId(2)).parent, Some(NodeId(0)));
    }

    #[test]
    fn multiple_roots_become_siblings() {
        let t = tree("First\nSecond\n  Child of second");
        assert_eq!(t.roots, vec![NodeId(0), NodeId(1)]);
        assert_eq!(t.root(), Some(NodeId(0)));
        assert_eq!(t.node(NodeId(2)).parent, Some(NodeId(1)));
    }

    #[test]
    fn skipped_level_attaches_to_nearest_ancestor() {
        // 4 spaces = declared level 2, but A is the only open ancestor.
        let t = tree("A\n    B");
        assert_eq!(t.node(NodeId(1)).parent, Some(NodeId(0)));
        // Level is normalized to the actual tree depth.
        assert_eq!(t.node(NodeId(1)).level, 1);
    }

    #[test]
    fn sibling_after_skipped_level_shares_parent() {
        let t = tree("A\n    B\n    C");
        assert_eq!(t.node(NodeId(1)).parent, Some(NodeId(0)));
        assert_eq!(t.node(NodeId(2)).parent, Some(NodeId(0)));
        assert_eq!(t.node(NodeId(0)).children, vec![NodeId(1), NodeId(2)]);
    }

    #[test]
    fn dedent_reopens_outer_ancestor() {
        let t = tree("A\n  B\n    C\n  D");
        assert_eq!(t.node(NodeId(3)).parent, Some(NodeId(0)));
        assert_eq!(t.node(NodeId(0)).children, vec![NodeId(1), NodeId(3)]);
        assert_eq!(t.node(NodeId(1)).children, vec![NodeId(2)]);
    }

    #[test]
    fn orphan_deep_first_line_is_a_root() {
        let t = tree("    floating");
        assert_eq!(t.roots, vec![NodeId(0)]);
        assert_eq!(t.node(NodeId(0)).level, 0);
        assert_eq!(t.node(NodeId(0)).parent, None);
    }

    #[test]
    fn level_invariant_holds_for_malformed_input() {
        let t = tree("A\n      B\n  C\n          D\nE");
        for node in &t.nodes {
            match node.parent {
                Some(pid) => assert_eq!(node.level, t.node(pid).level + 1),
                None => assert_eq!(node.level, 0),
            }
        }
    }

    #[test]
    fn children_keep_document_order() {
        let t = tree("R\n  b\n  a\n  c");
        let texts: Vec<&str> = t.node(NodeId(0))
            .children
            .iter()
            .map(|&c| t.node(c).text.as_str())
            .collect();
        assert_eq!(texts, vec!["b", "a", "c"]);
    }

    #[test]
    fn rebuilding_identical_input_is_identical() {
        let input = "Root\n  A\n    B\n  C";
        assert_eq!(tree(input), tree(input));
    }

    #[test]
    fn empty_input_builds_empty_tree() {
        let t = tree("");
        assert!(t.is_empty());
        assert!(t.roots.is_empty());
    }
}
