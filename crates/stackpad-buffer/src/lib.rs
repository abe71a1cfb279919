//! # Stackpad Buffer
//!
//! An append-only text buffer with a linear undo/redo history.
//!
//! ## Key Concepts for Learning Rust
//!
//! ### Ownership & Borrowing
//! - `TextBuffer` owns both its text and its `History`
//! - Methods like `text()` return borrowed references (`&str`)
//! - Mutations require `&mut self` (exclusive access)
//!
//! ### Errors as Values
//! - "Nothing to undo" is not exceptional, it is a `BufferError` variant
//! - Callers decide whether to report it or ignore it

mod buffer;
mod history;

pub use buffer::{DEFAULT_HISTORY_LIMIT, SEPARATOR, TextBuffer};
pub use history::{Action, ActionKind, History};

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Text '{0}' not found in current text.")]
    TextNotFound(String),

    #[error("Nothing to undo!")]
    NothingToUndo,

    #[error("Nothing to redo!")]
    NothingToRedo,
}
