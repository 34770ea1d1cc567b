//! Interactive command loop.
//!
//! Each command mutates the viewer, which re-renders the whole frame.
//!
//! ```text
//! cedar> view hierarchy
//! cedar> toggle App::Group::staff
//! cedar> jump User
//! ```

use crate::loader::{read_source, SampleData};
use crate::render::TerminalRenderer;
use anyhow::{anyhow, Result};
use cedar_core::{EntityUid, SchemaFormat};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use viewer_projection::{UnknownView, View, Viewer};

pub const PROMPT: &str = "cedar> ";

pub const HELP: &str = "\
Commands:
  view <overview|by-type|hierarchy|schema>  switch view
  select <type>                             show entities of a type (by-type view)
  jump <type>                               switch to by-type with a type selected
  back                                      return to the type list
  filter [term]                             filter the type list
  toggle <Type::id>                         collapse or expand a hierarchy node
  prefix <show|hide>                        show or hide namespace prefixes
  load-schema <path>                        load a .cedarschema or .json schema
  load-entities <path>                      load an entities JSON file
  sample                                    load the sample data
  show                                      redraw the current view
  help                                      show this help
  quit                                      leave the REPL";

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    View(View),
    Select(String),
    Jump(String),
    Back,
    Filter(String),
    Toggle(String),
    Prefix(bool),
    LoadSchema(PathBuf),
    LoadEntities(PathBuf),
    Sample,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}' (type `help` for a list)")]
    Unknown(String),

    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Expected `show` or `hide`, got '{0}'")]
    InvalidPrefix(String),

    #[error(transparent)]
    View(#[from] UnknownView),
}

impl Command {
    /// Parse a line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let required = |command: &'static str, argument: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument { command, argument })
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "view" | "v" => Self::View(required("view", "a view name")?.parse()?),
            "select" => Self::Select(required("select", "an entity type")?),
            "jump" => Self::Jump(required("jump", "an entity type")?),
            "back" => Self::Back,
            "filter" => Self::Filter(rest.to_string()),
            "toggle" => Self::Toggle(required("toggle", "a Type::id key")?),
            "prefix" => match required("prefix", "show or hide")?.as_str() {
                "show" | "on" => Self::Prefix(true),
                "hide" | "off" => Self::Prefix(false),
                other => return Err(CommandError::InvalidPrefix(other.to_string())),
            },
            "load-schema" => Self::LoadSchema(PathBuf::from(required("load-schema", "a file path")?)),
            "load-entities" => Self::LoadEntities(PathBuf::from(required("load-entities", "a file path")?)),
            "sample" => Self::Sample,
            "show" | "ls" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

pub enum ReplControl {
    Continue,
    Exit,
}

/// Viewer plus the settings the REPL needs between commands.
pub struct ReplSession<W: Write> {
    viewer: Viewer<TerminalRenderer<W>>,
    sample_dir: Option<PathBuf>,
}

impl<W: Write> ReplSession<W> {
    pub fn new(viewer: Viewer<TerminalRenderer<W>>, sample_dir: Option<PathBuf>) -> Self {
        Self { viewer, sample_dir }
    }

    pub fn viewer(&self) -> &Viewer<TerminalRenderer<W>> {
        &self.viewer
    }

    /// Parse and run one line.
    pub fn dispatch(&mut self, line: &str) -> Result<ReplControl> {
        match Command::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(ReplControl::Continue),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<ReplControl> {
        debug!(?command, "REPL command");
        match command {
            Command::View(view) => self.viewer.switch_view(view),
            Command::Select(name) => {
                if self.viewer.state().view() != View::ByType {
                    return Err(anyhow!("`select` works in the by-type view; use `jump {name}`"));
                }
                let entity_type = self.entity_type(&name);
                self.viewer.select_entity_type(&entity_type);
            }
            Command::Jump(name) => {
                let entity_type = self.entity_type(&name);
                self.viewer.jump_to_entity_type(&entity_type);
            }
            Command::Back => self.viewer.back_to_type_selection(),
            Command::Filter(term) => self.viewer.set_type_filter(&term),
            Command::Toggle(key) => {
                let uid = EntityUid::parse_key(&key)
                    .ok_or_else(|| anyhow!("Expected a Type::id key, got '{key}'"))?;
                self.viewer.toggle_tree_node(&uid.key());
            }
            Command::Prefix(show) => self.viewer.set_show_namespace_prefix(show),
            Command::LoadSchema(path) => {
                let source = read_source(&path)?;
                // Parse errors are reported through the renderer.
                if let Err(e) = self.viewer.load_schema(SchemaFormat::from_path(&path), &source) {
                    debug!(path = %path.display(), code = e.code(), "Schema load rejected");
                }
            }
            Command::LoadEntities(path) => {
                let source = read_source(&path)?;
                if let Err(e) = self.viewer.load_entities(&source) {
                    debug!(path = %path.display(), code = e.code(), "Entity load rejected");
                }
            }
            Command::Sample => {
                let data = SampleData::load(self.sample_dir.as_deref())?;
                self.viewer.replace_data(Some(data.schema), data.entities);
            }
            Command::Show => self.viewer.refresh(),
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(ReplControl::Exit),
        }
        Ok(ReplControl::Continue)
    }

    /// Full type name for what the user typed; unknown names pass through.
    fn entity_type(&self, name: &str) -> String {
        self.viewer
            .state()
            .find_entity_type(name)
            .unwrap_or(name)
            .to_string()
    }
}

/// Run the line-editing loop until `quit` or end of input.
pub fn run<W: Write>(session: &mut ReplSession<W>) -> Result<()> {
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    println!("{}", "Cedar Viewer REPL".green().bold());
    println!("Type `help` for commands. Type `quit` to leave.\n");

    let mut rl = DefaultEditor::new().map_err(|e| anyhow!("failed to init rustyline: {e}"))?;
    session.viewer.refresh();

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(l) => l,
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => continue,
            Err(e) => return Err(anyhow!("readline error: {e}")),
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        rl.add_history_entry(line)
            .map_err(|e| anyhow!("failed to record history: {e}"))?;

        match session.dispatch(line) {
            Ok(ReplControl::Continue) => {}
            Ok(ReplControl::Exit) => break,
            Err(e) => eprintln!("{}: {e:#}", "error".red().bold()),
        }
    }
    Ok(())
}
