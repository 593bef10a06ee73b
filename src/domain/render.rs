//! Text rendering of a tree as a box-drawing diagram.
//!
//! Pure functions of (tree, style): no state, no I/O, same input gives the
//! same bytes.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::{NodeId, TreeArena};
use crate::domain::style::{Style, StyleName};

/// One output line and the node it was drawn for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub node: NodeId,
    pub text: String,
}

struct Frame {
    idx: Index,
    prefix: String,
    is_last: bool,
}

/// Render one line per node in pre-order.
///
/// The root is printed bare. Every other node is `prefix + connector + label`
/// where the connector depends on whether the node is the last of its
/// siblings, and the prefix grows by `pipe` under non-last nodes and by
/// `empty` under last ones. Uses an explicit stack, so depth is bounded only
/// by memory.
#[instrument(level = "debug", skip(tree, style), fields(nodes = tree.len()))]
pub fn render_lines(tree: &TreeArena, style: &Style) -> Vec<RenderedLine> {
    let mut lines = Vec::with_capacity(tree.len());
    let root = tree.root();
    let mut stack = vec![Frame {
        idx: root,
        prefix: String::new(),
        is_last: true,
    }];

    while let Some(frame) = stack.pop() {
        let Some(node) = tree.get_node(frame.idx) else {
            continue;
        };

        let child_prefix = if frame.idx == root {
            lines.push(RenderedLine {
                node: node.id(),
                text: node.label().to_string(),
            });
            String::new()
        } else {
            let connector = if frame.is_last { style.end } else { style.branch };
            lines.push(RenderedLine {
                node: node.id(),
                text: format!("{}{}{}", frame.prefix, connector, node.label()),
            });
            let continuation = if frame.is_last { style.empty } else { style.pipe };
            format!("{}{}", frame.prefix, continuation)
        };

        let count = node.children().len();
        for (position, &child) in node.children().iter().enumerate().rev() {
            stack.push(Frame {
                idx: child,
                prefix: child_prefix.clone(),
                is_last: position + 1 == count,
            });
        }
    }

    lines
}

/// Render the tree as text lines.
pub fn render(tree: &TreeArena, style: &Style) -> Vec<String> {
    render_lines(tree, style)
        .into_iter()
        .map(|line| line.text)
        .collect()
}

/// Render with a style looked up by name (unknown names use the default).
pub fn render_style_name(tree: &TreeArena, name: &str) -> Vec<String> {
    render(tree, &StyleName::lookup(name).style())
}

/// Render joined with `\n`, no trailing newline.
pub fn render_to_string(tree: &TreeArena, style: &Style) -> String {
    render(tree, style).join("\n")
}
