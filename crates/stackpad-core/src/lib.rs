//! # Stackpad Core
//!
//! File session, command parsing and the console loop.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                    Repl                       │
//! │   reads a line ─▶ Command::parse ─▶ execute   │
//! │         ▲                              │      │
//! │         └──── prints Outcome / error ◀─┘      │
//! │                                               │
//! │  ┌─────────────────────────────────────────┐  │
//! │  │                 Editor                   │  │
//! │  │   current file   ┌────────────────────┐  │  │
//! │  │   quit flag      │     TextBuffer     │  │  │
//! │  │                  │  text + History    │  │  │
//! │  │                  └────────────────────┘  │  │
//! │  └─────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Learning: Module Organization
//!
//! Rust modules map to files:
//! - `mod foo;` looks for `foo.rs` or `foo/mod.rs`
//! - `pub use` re-exports items for cleaner public APIs

pub mod command;
pub mod config;
pub mod editor;
pub mod repl;

pub use command::Command;
pub use config::{Config, ConfigError};
pub use editor::{Editor, Outcome};
pub use repl::Repl;

use std::path::PathBuf;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
///
/// None of these end the session: the console loop prints them and
/// reads the next command.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("File '{}' already exists.", .0.display())]
    FileAlreadyExists(PathBuf),

    #[error("File '{}' not found.", .0.display())]
    FileNotFound(PathBuf),

    #[error("No file specified. Use 'save <filename>' to specify a file.")]
    NoFileSpecified,

    #[error("Invalid command '{0}'. Try 'help'.")]
    InvalidCommand(String),

    #[error(transparent)]
    Buffer(#[from] stackpad_buffer::BufferError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl CoreError {
    /// Returns true for errors caused by the command itself rather than
    /// by the environment (filesystem, config).
    pub fn is_informational(&self) -> bool {
        !matches!(self, CoreError::Io(_) | CoreError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackpad_buffer::BufferError;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::FileAlreadyExists(PathBuf::from("a.txt")).to_string(),
            "File 'a.txt' already exists."
        );
        assert_eq!(
            CoreError::from(BufferError::NothingToRedo).to_string(),
            "Nothing to redo!"
        );
    }

    #[test]
    fn test_informational() {
        assert!(CoreError::NoFileSpecified.is_informational());
        assert!(CoreError::from(BufferError::NothingToUndo).is_informational());
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!CoreError::from(io).is_informational());
    }
}
