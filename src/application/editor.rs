//! Editor: applies edit commands to a session under the active style.

use tracing::{debug, instrument, warn};

use crate::application::command::{EditCommand, Target};
use crate::application::session::{EditSession, SessionOptions};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{DomainError, Label, NodeId, RenderedLine, StyleName};

/// What the front end should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Tree or style changed, render again
    Changed,
    /// Selection moved
    Selected(NodeId),
    Show,
    Info(TreeStats),
    Styles,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub depth: usize,
    pub leaves: usize,
    pub selected: NodeId,
}

#[derive(Debug)]
pub struct Editor {
    session: EditSession,
    style: StyleName,
    /// Label used when a rename comes in empty; `None` refuses such renames
    rename_placeholder: Option<Label>,
}

impl Editor {
    pub fn new(session: EditSession, style: StyleName) -> Self {
        Self {
            session,
            style,
            rename_placeholder: None,
        }
    }

    pub fn with_rename_placeholder(mut self, placeholder: Option<Label>) -> Self {
        self.rename_placeholder = placeholder;
        self
    }

    pub fn from_settings(settings: &Settings) -> ApplicationResult<Self> {
        let root = settings.root_label()?;
        let options = SessionOptions {
            follow_insert: settings.follow_insert,
        };
        let editor = Self::new(
            EditSession::with_options(root, options),
            settings.style_name(),
        )
        .with_rename_placeholder(settings.rename_placeholder()?);
        Ok(editor)
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn style(&self) -> StyleName {
        self.style
    }

    pub fn set_style(&mut self, style: StyleName) {
        self.style = style;
    }

    fn resolve(&self, target: Target) -> NodeId {
        match target {
            Target::Cursor => self.session.selected(),
            Target::Node(id) => id,
        }
    }

    /// Parse and run one input line; blank lines and comments do nothing.
    pub fn execute_line(&mut self, line: &str) -> ApplicationResult<Option<Outcome>> {
        match EditCommand::parse(line)? {
            Some(command) => self.execute(command).map(Some).map_err(|e| {
                debug!("refused {:?}: {}", line.trim(), e);
                e
            }),
            None => Ok(None),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn execute(&mut self, command: EditCommand) -> ApplicationResult<Outcome> {
        let outcome = match command {
            EditCommand::Child { target, label } => {
                let parent = self.resolve(target);
                self.session.insert_child(parent, &label)?;
                Outcome::Changed
            }
            EditCommand::Sibling { target, label } => {
                let node = self.resolve(target);
                self.session.insert_sibling(node, &label)?;
                Outcome::Changed
            }
            EditCommand::Rename { target, label } => {
                let node = self.resolve(target);
                self.rename(node, &label)?;
                Outcome::Changed
            }
            EditCommand::Delete { target } => {
                let node = self.resolve(target);
                self.session.delete_subtree(node)?;
                Outcome::Changed
            }
            EditCommand::Select(id) => {
                self.session.select_node(id)?;
                Outcome::Selected(id)
            }
            EditCommand::Style(name) => {
                let style = StyleName::parse(&name).unwrap_or_else(|| {
                    warn!(
                        "unknown style '{}' (known: {}), using {}",
                        name,
                        StyleName::names(),
                        StyleName::default()
                    );
                    StyleName::default()
                });
                self.set_style(style);
                Outcome::Changed
            }
            EditCommand::Show => Outcome::Show,
            EditCommand::Info => Outcome::Info(self.stats()),
            EditCommand::Styles => Outcome::Styles,
            EditCommand::Help => Outcome::Help,
            EditCommand::Quit => Outcome::Quit,
        };
        debug!("outcome: {:?}", outcome);
        Ok(outcome)
    }

    fn rename(&mut self, node: NodeId, label: &str) -> ApplicationResult<()> {
        match (self.session.rename(node, label), &self.rename_placeholder) {
            (Err(DomainError::EmptyLabel), Some(placeholder)) => {
                debug!("empty rename of {}, using placeholder", node);
                let placeholder = placeholder.as_str().to_string();
                self.session.rename(node, &placeholder)?;
            }
            (result, _) => {
                result.map_err(ApplicationError::from)?;
            }
        }
        Ok(())
    }

    pub fn stats(&self) -> TreeStats {
        let tree = self.session.tree();
        TreeStats {
            nodes: tree.len(),
            depth: tree.depth(),
            leaves: tree.leaf_nodes().len(),
            selected: self.session.selected(),
        }
    }

    pub fn render(&self) -> Vec<String> {
        self.session.render(&self.style.style())
    }

    pub fn render_lines(&self) -> Vec<RenderedLine> {
        self.session.render_lines(&self.style.style())
    }
}
