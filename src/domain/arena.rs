use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use generational_arena::{Arena, Index};
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::label::Label;

/// Stable node identifier.
///
/// Assigned from a per-tree counter, never reused: an identifier that
/// outlived its node resolves to "not found" instead of aliasing a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Text that is not a node reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid node id '{0}'")]
pub struct InvalidNodeId(String);

/// Accepts `7`, `#7` and `@7`: at most one sigil, then decimal digits only.
impl FromStr for NodeId {
    type Err = InvalidNodeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let digits = text
            .strip_prefix('#')
            .or_else(|| text.strip_prefix('@'))
            .unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidNodeId(text.to_string()));
        }
        digits
            .parse::<u64>()
            .map(NodeId)
            .map_err(|_| InvalidNodeId(text.to_string()))
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    id: NodeId,
    label: Label,
    /// Index of parent node in the arena, None for the root
    parent: Option<Index>,
    /// Indices of child nodes in the arena, in display order
    children: Vec<Index>,
}

impl TreeNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    pub fn children(&self) -> &[Index] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-based labeled tree.
///
/// Uses generational arena for memory-safe node references. An id -> slot map
/// is kept in step with every attach and detach so lookups by [`NodeId`] are
/// O(1) and agree with a depth-first search from the root.
#[derive(Debug)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    root: Index,
    ids: HashMap<NodeId, Index>,
    next_id: u64,
}

impl TreeArena {
    /// Create a tree holding only a root node, which gets id `#0`.
    pub fn new(root_label: Label) -> Self {
        let root_id = NodeId(0);
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            id: root_id,
            label: root_label,
            parent: None,
            children: Vec::new(),
        });
        let mut ids = HashMap::new();
        ids.insert(root_id, root);

        Self {
            arena,
            root,
            ids,
            next_id: 1,
        }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_id(&self) -> NodeId {
        self.root_node().id
    }

    pub fn root_node(&self) -> &TreeNode {
        // the root slot is never removed
        &self.arena[self.root]
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn find_by_id(&self, id: NodeId) -> Option<&TreeNode> {
        self.index_of(id).and_then(|idx| self.arena.get(idx))
    }

    pub fn index_of(&self, id: NodeId) -> Option<Index> {
        self.ids.get(&id).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains_key(&id)
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Always false: a tree owns at least its root.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn parent_id(&self, id: NodeId) -> Option<NodeId> {
        let node = self.find_by_id(id)?;
        node.parent
            .and_then(|idx| self.arena.get(idx))
            .map(|parent| parent.id)
    }

    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.find_by_id(id)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|&idx| self.arena.get(idx))
                    .map(|child| child.id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Construct a detached node under `parent`.
    ///
    /// The node receives a fresh id but is not linked into the parent's
    /// children until [`TreeArena::attach_last`] or
    /// [`TreeArena::attach_after`] is called.
    #[instrument(level = "trace", skip(self))]
    pub fn create_node(&mut self, label: Label, parent: NodeId) -> DomainResult<TreeNode> {
        let parent_idx = self
            .index_of(parent)
            .ok_or(DomainError::NodeNotFound(parent))?;
        let id = NodeId(self.next_id);
        self.next_id += 1;
        trace!("create_node: id={} parent={}", id, parent);
        Ok(TreeNode {
            id,
            label,
            parent: Some(parent_idx),
            children: Vec::new(),
        })
    }

    /// Link a detached node as the last child of its parent.
    #[instrument(level = "trace", skip(self, node), fields(id = %node.id))]
    pub fn attach_last(&mut self, node: TreeNode) -> DomainResult<NodeId> {
        let parent_idx = self.live_parent(&node)?;
        let id = node.id;
        let idx = self.arena.insert(node);
        if let Some(parent) = self.arena.get_mut(parent_idx) {
            parent.children.push(idx);
        }
        self.ids.insert(id, idx);
        Ok(id)
    }

    /// Link a detached node directly after `sibling` in the parent's children.
    #[instrument(level = "trace", skip(self, node), fields(id = %node.id))]
    pub fn attach_after(&mut self, node: TreeNode, sibling: NodeId) -> DomainResult<NodeId> {
        let sibling_idx = self
            .index_of(sibling)
            .ok_or(DomainError::NodeNotFound(sibling))?;
        let sibling_parent = self
            .arena
            .get(sibling_idx)
            .ok_or(DomainError::NodeNotFound(sibling))?
            .parent
            .ok_or(DomainError::RootHasNoSiblings)?;
        let parent_idx = self.live_parent(&node)?;
        let not_a_sibling = DomainError::NotASibling {
            node: node.id,
            sibling,
        };
        if parent_idx != sibling_parent {
            return Err(not_a_sibling);
        }
        let position = self.arena[parent_idx]
            .children
            .iter()
            .position(|&c| c == sibling_idx)
            .ok_or(not_a_sibling)?;

        let id = node.id;
        let idx = self.arena.insert(node);
        if let Some(parent) = self.arena.get_mut(parent_idx) {
            parent.children.insert(position + 1, idx);
        }
        self.ids.insert(id, idx);
        Ok(id)
    }

    fn live_parent(&self, node: &TreeNode) -> DomainResult<Index> {
        node.parent
            .filter(|&idx| self.arena.contains(idx))
            .ok_or(DomainError::NodeNotFound(node.id))
    }

    /// Replace a node's label, returning the previous one.
    #[instrument(level = "trace", skip(self))]
    pub fn set_label(&mut self, id: NodeId, label: Label) -> DomainResult<Label> {
        let idx = self.index_of(id).ok_or(DomainError::NodeNotFound(id))?;
        let node = self
            .arena
            .get_mut(idx)
            .ok_or(DomainError::NodeNotFound(id))?;
        Ok(std::mem::replace(&mut node.label, label))
    }

    /// Unlink `id` from its parent and drop it together with all descendants.
    ///
    /// Returns the ids of every removed node, descendants first.
    #[instrument(level = "debug", skip(self))]
    pub fn detach_subtree(&mut self, id: NodeId) -> DomainResult<Vec<NodeId>> {
        let idx = self.index_of(id).ok_or(DomainError::NodeNotFound(id))?;
        let parent_idx = self
            .arena
            .get(idx)
            .ok_or(DomainError::NodeNotFound(id))?
            .parent
            .ok_or(DomainError::CannotDeleteRoot)?;

        let doomed: Vec<Index> = self.iter_postorder_from(idx).map(|(i, _)| i).collect();
        if let Some(parent) = self.arena.get_mut(parent_idx) {
            parent.children.retain(|&c| c != idx);
        }

        let mut removed = Vec::with_capacity(doomed.len());
        for slot in doomed {
            if let Some(node) = self.arena.remove(slot) {
                self.ids.remove(&node.id);
                removed.push(node.id);
            }
        }
        debug!("detach_subtree: {} removed {} nodes", id, removed.len());
        Ok(removed)
    }

    /// Pre-order traversal of the whole tree.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, Some(self.root))
    }

    /// Pre-order traversal of the subtree rooted at `idx`.
    pub fn iter_from(&self, idx: Index) -> TreeIterator<'_> {
        TreeIterator::new(self, Some(idx).filter(|&i| self.arena.contains(i)))
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, self.root)
    }

    pub fn iter_postorder_from(&self, idx: Index) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, idx)
    }

    /// Number of nodes in the subtree rooted at `id`, the node itself included.
    pub fn subtree_size(&self, id: NodeId) -> usize {
        self.index_of(id)
            .map(|idx| self.iter_from(idx).count())
            .unwrap_or(0)
    }

    /// Number of levels, a lone root counts as 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get_node(idx) {
                for &child in &node.children {
                    stack.push((child, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Collects all leaf nodes (nodes with no children) in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.id)
            .collect()
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena, start: Option<Index>) -> Self {
        Self {
            arena,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena, start: Index) -> Self {
        Self {
            arena,
            stack: vec![(start, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str) -> Label {
        Label::new(text).unwrap()
    }

    #[test]
    fn given_node_id_text_when_parsing_then_accepts_prefixes() {
        assert_eq!("7".parse::<NodeId>().unwrap(), NodeId(7));
        assert_eq!("#7".parse::<NodeId>().unwrap(), NodeId(7));
        assert_eq!(" @12 ".parse::<NodeId>().unwrap(), NodeId(12));
        assert!("abc".parse::<NodeId>().is_err());
        assert!("#".parse::<NodeId>().is_err());
    }

    #[test]
    fn given_repeated_sigils_or_sign_when_parsing_then_rejected() {
        for text in ["@#@7", "##7", "+7", "#+7", "-1", "7a", "99999999999999999999"] {
            assert_eq!(
                text.parse::<NodeId>(),
                Err(InvalidNodeId(text.to_string())),
                "{text}"
            );
        }
    }

    #[test]
    fn given_detached_node_when_attach_after_foreign_sibling_then_refuses() {
        let mut tree = TreeArena::new(label("root"));
        let root = tree.root_id();
        let a = tree.create_node(label("a"), root).unwrap();
        let a = tree.attach_last(a).unwrap();
        let b = tree.create_node(label("b"), root).unwrap();
        let b = tree.attach_last(b).unwrap();

        // node created under `a` but placed next to `b`, which lives under root
        let stray = tree.create_node(label("stray"), a).unwrap();
        let stray_id = stray.id();
        let err = tree.attach_after(stray, b).unwrap_err();

        assert_eq!(
            err,
            DomainError::NotASibling {
                node: stray_id,
                sibling: b
            }
        );
        assert!(!err.is_refusal());
        assert_eq!(tree.len(), 3);
        assert!(!tree.contains(stray_id));
    }

    #[test]
    fn given_tree_when_postorder_then_children_before_parent() {
        let mut tree = TreeArena::new(label("r"));
        let root = tree.root_id();
        let a = tree.create_node(label("a"), root).unwrap();
        let a = tree.attach_last(a).unwrap();
        let x = tree.create_node(label("x"), a).unwrap();
        tree.attach_last(x).unwrap();

        let order: Vec<&str> = tree
            .iter_postorder()
            .map(|(_, n)| n.label().as_str())
            .collect();
        assert_eq!(order, vec!["x", "a", "r"]);
    }
}
