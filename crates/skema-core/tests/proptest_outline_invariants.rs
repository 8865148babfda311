//! Property-based invariant tests for outline parsing and hierarchy
//! reconstruction.
//!
//! These must hold for **any** input string, not just well-formed outlines:
//!
//! 1. Totality — parsing never panics and never emits empty labels
//! 2. Id density — ids are exactly `0..n` in document order
//! 3. Level clamp — no parsed level exceeds the maximum depth
//! 4. Tree validity — after building, `level == parent.level + 1` for every
//!    non-root, and 0 for roots
//! 5. Link consistency — parent/child pointers agree in both directions
//! 6. Determinism — identical input parses to an identical tree
//! 7. Reachability — every node is a root or a descendant of one

use proptest::prelude::*;
use skema_core::{MAX_OUTLINE_DEPTH, NodeId, build_tree, parse_outline};

fn arbitrary_text() -> impl Strategy<Value = String> {
    // Anything printable, including blank lines, stray markers, and tabs.
    "[ a-zA-Z0-9•*\\-\\.\\)\t\n]{0,300}"
}

fn outline_lines() -> impl Strategy<Value = String> {
    let line = (0usize..=9, "[a-z0-9 ]{0,30}")
        .prop_map(|(depth, label)| format!("{}{label}", "  ".repeat(depth)));
    proptest::collection::vec(line, 0..30).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn parsing_any_text_is_total(text in arbitrary_text()) {
        let nodes = parse_outline(&text);
        for node in &nodes {
            prop_assert!(!node.text.trim().is_empty());
            prop_assert!(node.level <= MAX_OUTLINE_DEPTH);
        }
    }

    #[test]
    fn ids_are_dense_and_ordered(text in arbitrary_text()) {
        let nodes = parse_outline(&text);
        for (i, node) in nodes.iter().enumerate() {
            prop_assert_eq!(node.id, NodeId(i));
        }
    }

    #[test]
    fn built_tree_levels_are_valid(text in outline_lines()) {
        let tree = build_tree(parse_outline(&text));
        for node in &tree.nodes {
            match node.parent {
                Some(pid) => prop_assert_eq!(node.level, tree.node(pid).level + 1),
                None => prop_assert_eq!(node.level, 0),
            }
        }
    }

    #[test]
    fn parent_and_child_links_agree(text in outline_lines()) {
        let tree = build_tree(parse_outline(&text));
        for node in &tree.nodes {
            for &child in &node.children {
                prop_assert_eq!(tree.node(child).parent, Some(node.id));
            }
            if let Some(pid) = node.parent {
                prop_assert!(tree.node(pid).children.contains(&node.id));
            }
        }
        for &root in &tree.roots {
            prop_assert_eq!(tree.node(root).parent, None);
        }
    }

    #[test]
    fn reparsing_is_deterministic(text in arbitrary_text()) {
        prop_assert_eq!(
            build_tree(parse_outline(&text)),
            build_tree(parse_outline(&text))
        );
    }

    #[test]
    fn every_node_is_root_or_reachable(text in outline_lines()) {
        let tree = build_tree(parse_outline(&text));
        let mut reachable = vec![false; tree.len()];
        let mut stack: Vec<NodeId> = tree.roots.clone();
        while let Some(id) = stack.pop() {
            reachable[id.0] = true;
            stack.extend(tree.node(id).children.iter().copied());
        }
        prop_assert!(reachable.iter().all(|&r| r));
    }
}
