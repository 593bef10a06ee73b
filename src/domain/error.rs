//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Domain errors are refusals: the requested edit did not apply and the tree
/// is exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("label must not be empty")]
    EmptyLabel,

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("the root node has no siblings")]
    RootHasNoSiblings,

    #[error("the root node cannot be deleted")]
    CannotDeleteRoot,

    #[error("node {sibling} is not a child of the parent of node {node}")]
    NotASibling { node: NodeId, sibling: NodeId },
}

impl DomainError {
    /// Expected refusals a front end may simply report and move on from.
    ///
    /// `NotASibling` only arises from a caller mixing up references, which a
    /// correct front end never does.
    pub fn is_refusal(&self) -> bool {
        !matches!(self, DomainError::NotASibling { .. })
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
