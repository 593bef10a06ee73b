use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use clap::CommandFactory;
use colored::Colorize;
use tracing::{debug, instrument};

use crate::application::{
    ApplicationResult, EditSession, Editor, Outcome, TreeStats, HELP,
};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{Label, StyleName};

/// How trees are decorated on output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeView {
    pub highlight_selection: bool,
    pub show_ids: bool,
}

impl TreeView {
    /// Exactly the renderer's lines, nothing added.
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            highlight_selection: settings.highlight_selection,
            show_ids: settings.show_ids,
        }
    }
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    match &cli.command {
        None | Some(Commands::Shell) => _shell(&settings),
        Some(Commands::Run { file, strict }) => _run(&settings, file.as_deref(), *strict),
        Some(Commands::Styles) => _styles(),
        Some(Commands::Config { command }) => _config(&settings, command),
        Some(Commands::Completion { shell }) => _completion(*shell),
    }
}

/// Settings from files and environment, then command line flags on top.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(style) = &cli.style {
        if StyleName::parse(style).is_none() {
            output::warning(&format!(
                "unknown style '{}' (known: {}), using {}",
                style,
                StyleName::names(),
                StyleName::default()
            ));
        }
        settings.style = style.clone();
    }
    if let Some(root) = &cli.root {
        if root.trim().is_empty() {
            return Err(CliError::InvalidArgs("--root must not be empty".into()));
        }
        settings.root_label = root.clone();
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(settings))]
fn _shell(settings: &Settings) -> CliResult<()> {
    let mut editor = Editor::from_settings(settings)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_shell(
        &mut editor,
        stdin.lock(),
        &mut out,
        TreeView::from_settings(settings),
    )
}

#[instrument(skip(settings))]
fn _run(settings: &Settings, file: Option<&Path>, strict: bool) -> CliResult<()> {
    let mut editor = Editor::from_settings(settings)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let refused = match file {
        Some(path) if path != Path::new("-") => {
            let handle = File::open(path)
                .map_err(|e| CliError::io(format!("open {}", path.display()), e))?;
            run_script(&mut editor, BufReader::new(handle), &mut out, strict)?
        }
        _ => {
            let stdin = io::stdin();
            run_script(&mut editor, stdin.lock(), &mut out, strict)?
        }
    };
    if refused > 0 {
        debug!("{} commands refused", refused);
    }

    write_tree(&mut out, &editor, TreeView::plain()).map_err(write_err)
}

#[instrument]
fn _styles() -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_styles(&mut out).map_err(write_err)
}

#[instrument(skip(settings))]
fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => println!("{}", settings.to_toml()?),
        ConfigCommands::Template => print!("{}", Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => println!("{}", path.display()),
            None => output::warning("no config directory available on this system"),
        },
    }
    Ok(())
}

fn _completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    eprintln!("Generating completion file for {shell:?}...");
    clap_complete::generate(shell, &mut cmd, "treesketch", &mut io::stdout());
    Ok(())
}

fn write_err(e: io::Error) -> CliError {
    CliError::io("write output", e)
}

/// Interactive loop: prompt, apply, re-render after every change.
///
/// Refused and invalid commands are reported on stderr and the loop goes on.
pub fn run_shell<R: BufRead, W: Write>(
    editor: &mut Editor,
    mut input: R,
    out: &mut W,
    view: TreeView,
) -> CliResult<()> {
    writeln!(out, "treesketch shell, 'help' lists commands, 'quit' leaves").map_err(write_err)?;
    write_tree(out, editor, view).map_err(write_err)?;

    let mut line = String::new();
    loop {
        write!(out, "{} ", "treesketch>".cyan()).map_err(write_err)?;
        out.flush().map_err(write_err)?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .map_err(|e| CliError::io("read input", e))?;
        if read == 0 {
            writeln!(out).map_err(write_err)?;
            break;
        }

        match editor.execute_line(&line) {
            Ok(Some(Outcome::Quit)) => break,
            Ok(Some(outcome)) => present(out, editor, &outcome, view).map_err(write_err)?,
            Ok(None) => {}
            Err(e) if e.is_refusal() => output::warning(&e),
            Err(e) => output::error(&e),
        }
    }
    Ok(())
}

/// Batch loop: apply every line, returning the number of refused commands.
///
/// With `strict` the first failing line aborts with its line number.
pub fn run_script<R: BufRead, W: Write>(
    editor: &mut Editor,
    input: R,
    out: &mut W,
    strict: bool,
) -> CliResult<usize> {
    let mut refused = 0;
    for (number, line) in input.lines().enumerate() {
        let line = line.map_err(|e| CliError::io("read input", e))?;
        match editor.execute_line(&line) {
            Ok(Some(Outcome::Quit)) => break,
            Ok(Some(outcome)) => {
                // edits are silent in batch mode, only explicit views print
                if !matches!(outcome, Outcome::Changed | Outcome::Selected(_)) {
                    present(out, editor, &outcome, TreeView::plain()).map_err(write_err)?;
                }
            }
            Ok(None) => {}
            Err(source) if strict => {
                return Err(CliError::Script {
                    line: number + 1,
                    source,
                })
            }
            Err(e) => {
                refused += 1;
                output::warning(&format!("line {}: {}", number + 1, e));
            }
        }
    }
    Ok(refused)
}

fn present<W: Write>(
    out: &mut W,
    editor: &Editor,
    outcome: &Outcome,
    view: TreeView,
) -> io::Result<()> {
    match outcome {
        Outcome::Changed | Outcome::Selected(_) | Outcome::Show => write_tree(out, editor, view),
        Outcome::Info(stats) => write_stats(out, editor, stats),
        Outcome::Styles => write_styles(out),
        Outcome::Help => writeln!(out, "{HELP}"),
        Outcome::Quit => Ok(()),
    }
}

pub fn write_tree<W: Write>(out: &mut W, editor: &Editor, view: TreeView) -> io::Result<()> {
    let selected = editor.session().selected();
    for line in editor.render_lines() {
        writeln!(
            out,
            "{}",
            output::tree_line(&line, selected, view.highlight_selection, view.show_ids)
        )?;
    }
    Ok(())
}

fn write_stats<W: Write>(out: &mut W, editor: &Editor, stats: &TreeStats) -> io::Result<()> {
    let selected = editor.session().selected_node();
    writeln!(out, "nodes:    {}", stats.nodes)?;
    writeln!(out, "depth:    {}", stats.depth)?;
    writeln!(out, "leaves:   {}", stats.leaves)?;
    writeln!(out, "selected: {} {}", stats.selected, selected.label())?;
    writeln!(out, "style:    {}", editor.style())
}

/// Sample tree drawn in every registered style.
pub fn write_styles<W: Write>(out: &mut W) -> io::Result<()> {
    let session = sample_session().map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    for (position, name) in StyleName::ALL.into_iter().enumerate() {
        if position > 0 {
            writeln!(out)?;
        }
        let title = if name == StyleName::default() {
            format!("{name} (default)")
        } else {
            name.to_string()
        };
        writeln!(out, "{}", output::header(&title))?;
        for line in session.render(&name.style()) {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn sample_session() -> ApplicationResult<EditSession> {
    let mut session = EditSession::new(Label::new("project")?);
    let root = session.selected();
    let src = session.insert_child(root, "src")?;
    session.insert_child(src, "main.rs")?;
    session.insert_child(src, "lib.rs")?;
    let tests = session.insert_child(root, "tests")?;
    session.insert_child(tests, "render_test.rs")?;
    session.insert_child(root, "Cargo.toml")?;
    Ok(session)
}
