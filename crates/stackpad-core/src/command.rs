//! Command parsing for the console loop.
//!
//! ## Learning: Parse, Don't Validate
//!
//! A raw input line is turned into a `Command` exactly once. Everything
//! after parsing works with a typed value: a `Save` knows whether it
//! carries a path, an `Insert` owns its text. Malformed input never
//! reaches the editor; it becomes a `CoreError::InvalidCommand` here.

use std::path::PathBuf;

use crate::{CoreError, CoreResult};

/// One-line summary of the accepted commands.
pub const COMMAND_SUMMARY: &str = "Commands: create <file>, load <file>, save [file], insert <text>, \
     delete <text>, undo, redo, display, help, quit";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // File commands
    Create { path: PathBuf },
    Load { path: PathBuf },
    Save { path: Option<PathBuf> },

    // Edit commands
    Insert { text: String },
    Delete { text: String },
    Undo,
    Redo,

    // Session commands
    Display,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for a blank line. Keywords are case-sensitive
    /// and must match exactly; the argument is everything after the
    /// first space. Text arguments are kept verbatim, paths are trimmed.
    pub fn parse(line: &str) -> CoreResult<Option<Command>> {
        let line = line.trim_end_matches(['\n', '\r']).trim_start();
        if line.trim_end().is_empty() {
            return Ok(None);
        }

        let (keyword, arg) = match line.split_once(' ') {
            Some((keyword, arg)) => (keyword, Some(arg)),
            None => (line, None),
        };
        let invalid = || CoreError::InvalidCommand(line.to_string());
        let no_arg = arg.is_none_or(|a| a.trim().is_empty());

        let command = match keyword {
            "create" => Command::Create {
                path: required_path(arg).ok_or_else(invalid)?,
            },
            "load" => Command::Load {
                path: required_path(arg).ok_or_else(invalid)?,
            },
            "save" => Command::Save {
                path: required_path(arg),
            },
            "insert" => Command::Insert {
                text: arg.unwrap_or_default().to_string(),
            },
            "delete" | "delete_text" => Command::Delete {
                text: arg.unwrap_or_default().to_string(),
            },
            "undo" if no_arg => Command::Undo,
            "redo" if no_arg => Command::Redo,
            "display" if no_arg => Command::Display,
            "help" if no_arg => Command::Help,
            "quit" if no_arg => Command::Quit,
            _ => return Err(invalid()),
        };

        Ok(Some(command))
    }

    /// Returns the command's display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Command::Create { .. } => "Create",
            Command::Load { .. } => "Load",
            Command::Save { .. } => "Save",
            Command::Insert { .. } => "Insert",
            Command::Delete { .. } => "Delete",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Display => "Display",
            Command::Help => "Help",
            Command::Quit => "Quit",
        }
    }
}

fn required_path(arg: Option<&str>) -> Option<PathBuf> {
    arg.map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}
