//! Edit session: one tree and its selection cursor.
//!
//! Every operation either applies completely or returns a refusal and leaves
//! both the tree and the cursor untouched.

use tracing::{debug, instrument};

use crate::domain::{
    render_lines, DomainError, DomainResult, Label, NodeId, RenderedLine, Style, TreeArena,
    TreeNode,
};

/// Cursor policy knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Move the cursor onto a freshly inserted node instead of keeping it.
    pub follow_insert: bool,
}

#[derive(Debug)]
pub struct EditSession {
    tree: TreeArena,
    cursor: NodeId,
    options: SessionOptions,
}

impl EditSession {
    pub fn new(root_label: Label) -> Self {
        Self::with_options(root_label, SessionOptions::default())
    }

    pub fn with_options(root_label: Label, options: SessionOptions) -> Self {
        let tree = TreeArena::new(root_label);
        let cursor = tree.root_id();
        Self {
            tree,
            cursor,
            options,
        }
    }

    pub fn tree(&self) -> &TreeArena {
        &self.tree
    }

    /// Id under the selection cursor.
    pub fn selected(&self) -> NodeId {
        self.cursor
    }

    pub fn selected_node(&self) -> &TreeNode {
        self.tree
            .find_by_id(self.cursor)
            .unwrap_or_else(|| self.tree.root_node())
    }

    pub fn find_by_id(&self, id: NodeId) -> Option<&TreeNode> {
        self.tree.find_by_id(id)
    }

    /// Move the cursor. A stale or unknown id leaves it where it is.
    #[instrument(level = "debug", skip(self))]
    pub fn select_node(&mut self, id: NodeId) -> DomainResult<()> {
        if !self.tree.contains(id) {
            return Err(DomainError::NodeNotFound(id));
        }
        self.cursor = id;
        Ok(())
    }

    /// Append a node labeled `label` as the last child of `parent`.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_child(&mut self, parent: NodeId, label: &str) -> DomainResult<NodeId> {
        let label = Label::new(label)?;
        let node = self.tree.create_node(label, parent)?;
        let id = self.tree.attach_last(node)?;
        debug!("insert_child: {} under {}", id, parent);
        self.after_insert(id);
        Ok(id)
    }

    /// Insert a node labeled `label` directly after `node` among its siblings.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_sibling(&mut self, node: NodeId, label: &str) -> DomainResult<NodeId> {
        if !self.tree.contains(node) {
            return Err(DomainError::NodeNotFound(node));
        }
        let parent = self
            .tree
            .parent_id(node)
            .ok_or(DomainError::RootHasNoSiblings)?;
        let label = Label::new(label)?;
        let sibling = self.tree.create_node(label, parent)?;
        let id = self.tree.attach_after(sibling, node)?;
        debug!("insert_sibling: {} after {}", id, node);
        self.after_insert(id);
        Ok(id)
    }

    fn after_insert(&mut self, id: NodeId) {
        if self.options.follow_insert {
            self.cursor = id;
        }
    }

    /// Replace the label of `node`, returning the old one.
    ///
    /// An empty label is refused; the old label stays.
    #[instrument(level = "debug", skip(self))]
    pub fn rename(&mut self, node: NodeId, label: &str) -> DomainResult<Label> {
        let label = Label::new(label)?;
        self.tree.set_label(node, label)
    }

    /// Remove `node` and all of its descendants, returning how many nodes went.
    ///
    /// The cursor moves to the former parent, which also covers a cursor that
    /// pointed anywhere inside the removed subtree.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_subtree(&mut self, node: NodeId) -> DomainResult<usize> {
        if !self.tree.contains(node) {
            return Err(DomainError::NodeNotFound(node));
        }
        let parent = self
            .tree
            .parent_id(node)
            .ok_or(DomainError::CannotDeleteRoot)?;
        let removed = self.tree.detach_subtree(node)?;
        self.cursor = parent;
        debug!(
            "delete_subtree: {} gone with {} nodes, cursor -> {}",
            node,
            removed.len(),
            parent
        );
        Ok(removed.len())
    }

    pub fn render(&self, style: &Style) -> Vec<String> {
        crate::domain::render(&self.tree, style)
    }

    pub fn render_lines(&self, style: &Style) -> Vec<RenderedLine> {
        render_lines(&self.tree, style)
    }
}
