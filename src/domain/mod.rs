//! Domain layer: tree model, styles and rendering
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod label;
pub mod render;
pub mod style;

pub use arena::{InvalidNodeId, NodeId, PostOrderIterator, TreeArena, TreeIterator, TreeNode};
pub use error::{DomainError, DomainResult};
pub use label::Label;
pub use render::{render, render_lines, render_style_name, render_to_string, RenderedLine};
pub use style::{Style, StyleName};
