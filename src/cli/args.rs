//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Edit labeled trees and render them as box-drawing text diagrams
#[derive(Parser, Debug)]
#[command(name = "treesketch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: $XDG_CONFIG_HOME/treesketch/treesketch.toml)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Glyph style: thin, thick, double, ascii
    #[arg(short, long, global = true)]
    pub style: Option<String>,

    /// Label of the root node
    #[arg(short, long, global = true)]
    pub root: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Edit a tree interactively (default)
    Shell,

    /// Apply edit commands from a file and print the final tree
    Run {
        /// Command file, stdin when omitted or '-'
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Stop at the first refused or invalid command
        #[arg(long)]
        strict: bool,
    },

    /// Show a sample tree in every glyph style
    Styles,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective settings as TOML
    Show,
    /// Print a commented config template
    Template,
    /// Print the global config file location
    Path,
}
