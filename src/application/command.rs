//! Line-oriented edit commands
//!
//! One command per line. Structural commands act on the selection cursor
//! unless the first argument is a node reference (`@3` or `#3`).

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::NodeId;

pub const HELP: &str = "\
commands (targets default to the selected node):
  child [@ID] LABEL     append a child            (alias: add)
  sibling [@ID] LABEL   insert a sibling after     (alias: sib)
  rename [@ID] LABEL    change a label             (alias: mv)
  delete [@ID]          remove a node and its subtree (alias: rm)
  select ID             move the selection         (alias: sel)
  style NAME            thin, thick, double or ascii
  show                  print the tree
  info                  print tree statistics
  styles                list glyph styles
  help                  this text
  quit                  leave                      (alias: exit)
lines starting with '#' are comments; a label that starts with @N or #N
is written \\@N or \\#N";

/// Node a structural command applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Cursor,
    Node(NodeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Child { target: Target, label: String },
    Sibling { target: Target, label: String },
    Rename { target: Target, label: String },
    Delete { target: Target },
    Select(NodeId),
    Style(String),
    Show,
    Info,
    Styles,
    Help,
    Quit,
}

impl EditCommand {
    /// Parse one input line. Blank lines and comments yield `None`.
    pub fn parse(line: &str) -> ApplicationResult<Option<EditCommand>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (trimmed, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "child" | "add" => {
                let (target, label) = split_target(rest);
                EditCommand::Child { target, label }
            }
            "sibling" | "sib" => {
                let (target, label) = split_target(rest);
                EditCommand::Sibling { target, label }
            }
            "rename" | "mv" => {
                let (target, label) = split_target(rest);
                EditCommand::Rename { target, label }
            }
            "delete" | "rm" => {
                let (target, extra) = split_target(rest);
                if !extra.is_empty() {
                    return Err(ApplicationError::invalid_command(
                        trimmed,
                        "delete takes no label",
                    ));
                }
                EditCommand::Delete { target }
            }
            "select" | "sel" => {
                let id = parse_id(trimmed, rest)?;
                EditCommand::Select(id)
            }
            "style" => {
                if rest.is_empty() {
                    return Err(ApplicationError::invalid_command(
                        trimmed,
                        "missing style name",
                    ));
                }
                EditCommand::Style(rest.to_string())
            }
            "show" => no_args(trimmed, rest, EditCommand::Show)?,
            "info" => no_args(trimmed, rest, EditCommand::Info)?,
            "styles" => no_args(trimmed, rest, EditCommand::Styles)?,
            "help" | "?" => EditCommand::Help,
            "quit" | "exit" => EditCommand::Quit,
            other => {
                return Err(ApplicationError::invalid_command(
                    trimmed,
                    format!("unknown command '{other}'"),
                ))
            }
        };
        Ok(Some(command))
    }
}

/// A leading `@N`/`#N` is a target only when `N` is a valid id; anything else
/// is label text. `\#` and `\@` escape a label that would read as a target.
fn split_target(rest: &str) -> (Target, String) {
    if let Some(escaped) = rest.strip_prefix('\\') {
        if escaped.starts_with(['@', '#']) {
            return (Target::Cursor, escaped.to_string());
        }
    }
    if !rest.starts_with(['@', '#']) {
        return (Target::Cursor, rest.to_string());
    }
    let (reference, label) = match rest.split_once(char::is_whitespace) {
        Some((reference, label)) => (reference, label.trim()),
        None => (rest, ""),
    };
    match reference.parse::<NodeId>() {
        Ok(id) => (Target::Node(id), label.to_string()),
        Err(_) => (Target::Cursor, rest.to_string()),
    }
}

fn parse_id(input: &str, text: &str) -> ApplicationResult<NodeId> {
    if text.is_empty() {
        return Err(ApplicationError::invalid_command(input, "missing node id"));
    }
    text.parse::<NodeId>()
        .map_err(|e| ApplicationError::invalid_command(input, e.to_string()))
}

fn no_args(input: &str, rest: &str, command: EditCommand) -> ApplicationResult<EditCommand> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(ApplicationError::invalid_command(
            input,
            "command takes no arguments",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_label_with_spaces_when_parsing_child_then_keeps_whole_label() {
        let cmd = EditCommand::parse("child  release notes.md ").unwrap();
        assert_eq!(
            cmd,
            Some(EditCommand::Child {
                target: Target::Cursor,
                label: "release notes.md".into()
            })
        );
    }

    #[test]
    fn given_explicit_target_when_parsing_then_splits_reference() {
        let cmd = EditCommand::parse("sib #4 docs").unwrap();
        assert_eq!(
            cmd,
            Some(EditCommand::Sibling {
                target: Target::Node(NodeId::from(4)),
                label: "docs".into()
            })
        );
        let cmd = EditCommand::parse("rm @2").unwrap();
        assert_eq!(
            cmd,
            Some(EditCommand::Delete {
                target: Target::Node(NodeId::from(2))
            })
        );
    }

    #[test]
    fn given_label_starting_with_hash_when_parsing_child_then_label_kept() {
        for (line, label) in [
            ("child #include", "#include"),
            ("child @home", "@home"),
            ("child #tag list", "#tag list"),
            ("add @#@7", "@#@7"),
        ] {
            assert_eq!(
                EditCommand::parse(line).unwrap(),
                Some(EditCommand::Child {
                    target: Target::Cursor,
                    label: label.into()
                }),
                "{line}"
            );
        }
        assert_eq!(
            EditCommand::parse("rename #tag").unwrap(),
            Some(EditCommand::Rename {
                target: Target::Cursor,
                label: "#tag".into()
            })
        );
    }

    #[test]
    fn given_escaped_sigil_when_parsing_then_numeric_label_kept() {
        assert_eq!(
            EditCommand::parse(r"child \#5 item").unwrap(),
            Some(EditCommand::Child {
                target: Target::Cursor,
                label: "#5 item".into()
            })
        );
        assert_eq!(
            EditCommand::parse("child #5 item").unwrap(),
            Some(EditCommand::Child {
                target: Target::Node(NodeId::from(5)),
                label: "item".into()
            })
        );
    }

    #[test]
    fn given_blank_or_comment_when_parsing_then_none() {
        assert_eq!(EditCommand::parse("   ").unwrap(), None);
        assert_eq!(EditCommand::parse("# build the docs tree").unwrap(), None);
    }

    #[test]
    fn given_bad_input_when_parsing_then_invalid_command() {
        for line in ["frobnicate x", "select", "select abc", "style", "delete @1 x", "show me"] {
            let err = EditCommand::parse(line).unwrap_err();
            assert!(
                matches!(err, ApplicationError::InvalidCommand { .. }),
                "{line}: {err:?}"
            );
        }
    }
}
