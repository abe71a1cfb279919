//! The editing session.
//!
//! ## Learning: The Facade Pattern
//!
//! `Editor` acts as a facade over the buffer and the filesystem.
//! The console loop only hands it parsed `Command`s and prints the
//! `Outcome` (or error) it gets back.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use stackpad_buffer::{ActionKind, TextBuffer};

use crate::command::{COMMAND_SUMMARY, Command};
use crate::config::Config;
use crate::{CoreError, CoreResult};

/// What a successful command did.
///
/// ## Learning: Results as Values
///
/// Instead of printing from deep inside the editor, every operation
/// returns a value describing what happened. The caller decides how
/// (and whether) to show it, which keeps the editor testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new empty file was created and became current
    Created(PathBuf),
    /// A file was read into the buffer
    Loaded { path: PathBuf, text: String },
    /// The buffer was written to a file
    Saved(PathBuf),
    /// Text was appended
    Inserted { payload: String, text: String },
    /// Every occurrence of `target` was removed
    Deleted {
        target: String,
        count: usize,
        text: String,
    },
    /// An action was reversed
    Undone { kind: ActionKind, text: String },
    /// An undone action was re-applied
    Redone { kind: ActionKind, text: String },
    /// The current text was requested
    Display(String),
    /// The command list was requested
    Help,
    /// The session is ending
    Quit,
}

impl Outcome {
    /// Renders the message shown to the user.
    ///
    /// With `echo_text` off, edit confirmations leave out the current text.
    pub fn render(&self, echo_text: bool) -> String {
        let current = |text: &str| {
            if echo_text {
                format!(" -> Current Text: '{text}'")
            } else {
                String::new()
            }
        };

        match self {
            Outcome::Created(path) => {
                format!("New file '{}' created and loaded.", path.display())
            }
            Outcome::Loaded { path, text } => {
                format!("Loaded text from '{}':\n{}", path.display(), text)
            }
            Outcome::Saved(path) => format!("Text saved to '{}'", path.display()),
            Outcome::Inserted { payload, text } => {
                format!("Inserted: '{payload}'{}", current(text))
            }
            Outcome::Deleted {
                target,
                count,
                text,
            } => {
                let instances = if *count == 1 { "instance" } else { "instances" };
                format!("Deleted {count} {instances} of: '{target}'{}", current(text))
            }
            Outcome::Undone { kind, text } => format!("Undo {kind}{}", current(text)),
            Outcome::Redone { kind, text } => format!("Redo {kind}{}", current(text)),
            Outcome::Display(text) => format!("Current Text: '{text}'"),
            Outcome::Help => COMMAND_SUMMARY.to_string(),
            Outcome::Quit => String::new(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true))
    }
}

/// The editor state for one console session.
///
/// ## Thread Safety
///
/// `Editor` is owned by the console loop and used from a single
/// thread. Every operation runs to completion before the next
/// command is read, so no locking is involved.
#[derive(Debug)]
pub struct Editor {
    /// The text being edited, with its history
    buffer: TextBuffer,

    /// File used by `save` when no path is given
    current_file: Option<PathBuf>,

    /// Editor configuration
    config: Config,

    /// Whether the session should end
    should_quit: bool,
}

impl Editor {
    /// Creates a new editor instance.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an editor with custom configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            buffer: TextBuffer::with_history_limit(config.editor.undo_limit),
            current_file: None,
            config,
            should_quit: false,
        }
    }

    /// Runs a parsed command.
    pub fn execute(&mut self, command: &Command) -> CoreResult<Outcome> {
        tracing::debug!("Executing {}", command.display_name());

        match command {
            Command::Create { path } => self.create(path),
            Command::Load { path } => self.load(path),
            Command::Save { path } => self.save(path.as_deref()),
            Command::Insert { text } => Ok(self.insert(text)),
            Command::Delete { text } => self.delete(text),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::Display => Ok(self.display()),
            Command::Help => Ok(Outcome::Help),
            Command::Quit => {
                self.quit();
                Ok(Outcome::Quit)
            }
        }
    }

    // ==================== File Operations ====================

    /// Creates an empty file and starts a fresh session on it.
    ///
    /// Fails without touching the buffer if the file already exists.
    pub fn create(&mut self, path: impl AsRef<Path>) -> CoreResult<Outcome> {
        let path = path.as_ref();

        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => CoreError::FileAlreadyExists(path.to_path_buf()),
                _ => CoreError::Io(e),
            })?;

        self.buffer.clear();
        self.current_file = Some(path.to_path_buf());
        tracing::info!("Created {}", path.display());

        Ok(Outcome::Created(path.to_path_buf()))
    }

    /// Replaces the buffer with the content of a file.
    ///
    /// Loaded text has no undo trail: the history is cleared. Bytes that
    /// are not valid UTF-8 are replaced with U+FFFD.
    pub fn load(&mut self, path: impl AsRef<Path>) -> CoreResult<Outcome> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CoreError::FileNotFound(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;

        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                tracing::info!("{} is not valid UTF-8, loading lossily", path.display());
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        self.buffer.replace_content(content);
        self.current_file = Some(path.to_path_buf());
        tracing::info!("Loaded {} ({} bytes)", path.display(), self.buffer.len());

        Ok(Outcome::Loaded {
            path: path.to_path_buf(),
            text: self.buffer.text().to_string(),
        })
    }

    /// Writes the buffer verbatim.
    ///
    /// A given path becomes the current file; without one, the current
    /// file is used.
    pub fn save(&mut self, path: Option<&Path>) -> CoreResult<Outcome> {
        if let Some(path) = path {
            self.current_file = Some(path.to_path_buf());
        }
        let path = self.current_file.clone().ok_or(CoreError::NoFileSpecified)?;

        // Write to a temporary file in the same directory, then rename over
        // the target (atomic write). The temporary file is removed on drop
        // if anything fails before `persist`.
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(self.buffer.text().as_bytes())?;
        temp.persist(&path).map_err(|e| {
            tracing::warn!("Rename to {} failed: {}", path.display(), e.error);
            CoreError::Io(e.error)
        })?;
        tracing::info!("Saved {} ({} bytes)", path.display(), self.buffer.len());

        Ok(Outcome::Saved(path))
    }

    // ==================== Text Editing ====================

    /// Appends text to the buffer.
    pub fn insert(&mut self, text: &str) -> Outcome {
        let payload = self.buffer.insert(text).to_string();
        Outcome::Inserted {
            payload,
            text: self.buffer.text().to_string(),
        }
    }

    /// Removes every occurrence of `target`.
    pub fn delete(&mut self, target: &str) -> CoreResult<Outcome> {
        let count = self.buffer.delete(target)?;
        Ok(Outcome::Deleted {
            target: target.to_string(),
            count,
            text: self.buffer.text().to_string(),
        })
    }

    /// Undoes the last action.
    pub fn undo(&mut self) -> CoreResult<Outcome> {
        let action = self.buffer.undo()?;
        Ok(Outcome::Undone {
            kind: action.kind(),
            text: self.buffer.text().to_string(),
        })
    }

    /// Redoes the last undone action.
    pub fn redo(&mut self) -> CoreResult<Outcome> {
        let action = self.buffer.redo()?;
        Ok(Outcome::Redone {
            kind: action.kind(),
            text: self.buffer.text().to_string(),
        })
    }

    /// Returns the current text.
    pub fn display(&self) -> Outcome {
        Outcome::Display(self.buffer.text().to_string())
    }

    // ==================== State Queries ====================

    /// Returns the buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Returns the file `save` writes to when no path is given.
    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// Returns the editor configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Lifecycle ====================

    /// Signals that the session should end.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Returns true if the session should end.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
