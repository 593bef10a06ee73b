//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::domain::{NodeId, RenderedLine};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) -> String {
    msg.to_string().cyan().bold().to_string()
}

/// Decorate a rendered line for the interactive view.
///
/// The selected node is shown bold green, ids are appended dimmed.
pub fn tree_line(
    line: &RenderedLine,
    selected: NodeId,
    highlight_selection: bool,
    show_ids: bool,
) -> String {
    let text = if highlight_selection && line.node == selected {
        line.text.green().bold().to_string()
    } else {
        line.text.clone()
    };
    if show_ids {
        format!("{} {}", text, line.node.to_string().dimmed())
    } else {
        text
    }
}
