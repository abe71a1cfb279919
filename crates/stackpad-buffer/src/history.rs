//! Undo/redo history management.
//!
//! ## Learning: Two Stacks, One Timeline
//!
//! Every recorded action lives in exactly one of two stacks:
//! - The undo stack holds actions that are currently applied
//! - The redo stack holds actions that were undone and can be re-applied
//!
//! Undo moves the top action from the undo stack to the redo stack,
//! redo moves it back. Recording a new action empties the redo stack:
//! history is linear, there are no branches to return to.

use std::collections::VecDeque;
use std::fmt;

/// The type of a recorded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Text was appended
    Insert,
    /// Every occurrence of a substring was removed
    Delete,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Insert => f.write_str("Insert"),
            ActionKind::Delete => f.write_str("Delete"),
        }
    }
}

/// A single recorded edit.
///
/// ## Learning: Enums Carry Data
///
/// Each variant owns exactly what is needed to reverse it. An insert
/// only appends, so its payload is enough to undo it by truncation.
/// A delete may remove text from many places, so it also keeps the
/// byte offset of every occurrence it removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The exact payload appended, including any leading separator.
    Insert(String),
    /// The removed substring and the offsets, in the pre-delete text,
    /// of each non-overlapping occurrence (ascending).
    Delete { target: String, offsets: Vec<usize> },
}

impl Action {
    /// Creates an insert action.
    pub fn insert(payload: impl Into<String>) -> Self {
        Action::Insert(payload.into())
    }

    /// Creates a delete action.
    pub fn delete(target: impl Into<String>, offsets: Vec<usize>) -> Self {
        Action::Delete {
            target: target.into(),
            offsets,
        }
    }

    /// Returns what kind of action this is.
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Insert(_) => ActionKind::Insert,
            Action::Delete { .. } => ActionKind::Delete,
        }
    }

    /// Returns the text carried by the action.
    pub fn payload(&self) -> &str {
        match self {
            Action::Insert(payload) => payload,
            Action::Delete { target, .. } => target,
        }
    }
}

/// Manages undo/redo history.
///
/// ## Learning: VecDeque
///
/// The undo stack is a `VecDeque` because a bounded history needs to
/// drop its oldest entry from the front while new entries arrive at
/// the back. The redo stack never grows past what was undone, so a
/// plain `Vec` is enough.
#[derive(Debug, Clone)]
pub struct History {
    /// Stack of undoable actions (most recent at the back)
    undo_stack: VecDeque<Action>,
    /// Stack of redoable actions (most recent at the end)
    redo_stack: Vec<Action>,
    /// Maximum number of undoable actions to keep (0 = unbounded)
    max_size: usize,
}

impl History {
    /// Creates a new history with the given capacity.
    ///
    /// A capacity of `0` keeps every action.
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Creates a history that never drops actions.
    pub fn unbounded() -> Self {
        Self::new(0)
    }

    /// Records a newly applied action.
    ///
    /// Clears the redo stack: anything undone before this point is gone.
    pub fn push(&mut self, action: Action) {
        self.redo_stack.clear();
        self.undo_stack.push_back(action);

        if self.max_size > 0 {
            while self.undo_stack.len() > self.max_size {
                self.undo_stack.pop_front();
            }
        }
    }

    /// Moves the most recent applied action onto the redo stack.
    ///
    /// Returns the action so the caller can reverse it.
    pub fn undo(&mut self) -> Option<Action> {
        let action = self.undo_stack.pop_back()?;
        self.redo_stack.push(action.clone());
        Some(action)
    }

    /// Moves the most recent undone action back onto the undo stack.
    ///
    /// Returns the action so the caller can re-apply it.
    pub fn redo(&mut self) -> Option<Action> {
        let action = self.redo_stack.pop()?;
        self.undo_stack.push_back(action.clone());
        Some(action)
    }

    /// Returns true if there are actions to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are actions to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clears all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Returns the number of undo steps available.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Returns the number of redo steps available.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Returns the configured capacity (0 = unbounded).
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for History {
    fn default() -> Self {
        Self::unbounded()
    }
}
