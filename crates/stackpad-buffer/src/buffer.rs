//! History-backed text buffer.
//!
//! ## Why a Plain String?
//!
//! The buffer only ever grows at its end (insert appends) or loses
//! whole occurrences of a substring (delete). Both are single passes
//! over a contiguous `String`, and the documents this editor handles
//! are small, so there is nothing for a rope or gap buffer to win.
//!
//! ## Learning: Ownership in Action
//!
//! ```rust,ignore
//! let mut buffer = TextBuffer::new();   // buffer OWNS the text and history
//! let text = buffer.text();             // text BORROWS from buffer
//! // buffer.insert("x");                // ERROR! Can't mutate while borrowed
//! drop(text);                           // Release borrow
//! buffer.insert("x");                   // Now OK!
//! ```

use crate::history::{Action, History};
use crate::{BufferError, BufferResult};

/// Separator placed between appended segments.
pub const SEPARATOR: &str = " ";

/// Default number of undo steps kept by a new buffer.
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// A text buffer whose every edit is recorded for undo/redo.
///
/// # Invariants
///
/// - The text only changes through `insert`, `delete`, `undo`, `redo`,
///   or a wholesale replacement that also clears the history.
/// - Replaying the undo stack from the last wholesale replacement
///   reproduces the current text exactly.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// The current document content
    text: String,

    /// Edit history for undo/redo
    history: History,
}

impl TextBuffer {
    /// Creates a new empty buffer.
    ///
    /// # Example
    /// ```
    /// use stackpad_buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Creates an empty buffer keeping at most `limit` undo steps
    /// (`0` keeps everything).
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            text: String::new(),
            history: History::new(limit),
        }
    }

    // ==================== Text Access ====================

    /// Returns the entire text content.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the length of the buffer in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Finds all non-overlapping occurrences of a pattern.
    ///
    /// Returns the byte offset of each match start. An empty pattern
    /// matches nothing.
    pub fn find_all(&self, pattern: &str) -> Vec<usize> {
        if pattern.is_empty() {
            return Vec::new();
        }
        self.text
            .match_indices(pattern)
            .map(|(offset, _)| offset)
            .collect()
    }

    // ==================== Mutations ====================

    /// Appends text to the end of the buffer.
    ///
    /// When the buffer already holds text, a single space is placed
    /// before `new_text`. Returns the payload that was actually appended.
    pub fn insert(&mut self, new_text: &str) -> &str {
        let start = self.text.len();
        let payload = if self.text.is_empty() {
            new_text.to_string()
        } else {
            format!("{SEPARATOR}{new_text}")
        };

        self.text.push_str(&payload);
        self.history.push(Action::Insert(payload));

        &self.text[start..]
    }

    /// Removes every occurrence of `target` from the buffer.
    ///
    /// Returns how many occurrences were removed. When `target` is empty
    /// or absent, nothing is recorded and the buffer is left untouched.
    pub fn delete(&mut self, target: &str) -> BufferResult<usize> {
        let offsets = self.find_all(target);
        if offsets.is_empty() {
            return Err(BufferError::TextNotFound(target.to_string()));
        }

        let count = offsets.len();
        let action = Action::delete(target, offsets);
        self.apply(&action);
        self.history.push(action);

        Ok(count)
    }

    /// Replaces the whole content without recording an action.
    ///
    /// The history is cleared: loaded content has no undo trail.
    pub fn replace_content(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.history.clear();
    }

    /// Empties the buffer and its history.
    pub fn clear(&mut self) {
        self.text.clear();
        self.history.clear();
    }

    // ==================== Undo/Redo ====================

    /// Reverses the most recent action.
    ///
    /// Returns the action that was reversed.
    pub fn undo(&mut self) -> BufferResult<Action> {
        let action = self.history.undo().ok_or(BufferError::NothingToUndo)?;
        self.reverse(&action);
        Ok(action)
    }

    /// Re-applies the most recently undone action.
    ///
    /// Returns the action that was re-applied.
    pub fn redo(&mut self) -> BufferResult<Action> {
        let action = self.history.redo().ok_or(BufferError::NothingToRedo)?;
        self.apply(&action);
        Ok(action)
    }

    /// Returns true if there are actions to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true if there are actions to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns the edit history.
    pub fn history(&self) -> &History {
        &self.history
    }

    // ==================== Internals ====================

    /// Applies an action forward WITHOUT recording it.
    fn apply(&mut self, action: &Action) {
        match action {
            Action::Insert(payload) => self.text.push_str(payload),
            Action::Delete { target, offsets } => {
                // Back to front so earlier offsets stay valid
                for &offset in offsets.iter().rev() {
                    debug_assert_eq!(&self.text[offset..offset + target.len()], target);
                    self.text.replace_range(offset..offset + target.len(), "");
                }
            }
        }
    }

    /// Applies the inverse of an action WITHOUT recording it.
    fn reverse(&mut self, action: &Action) {
        match action {
            Action::Insert(payload) => {
                debug_assert!(self.text.ends_with(payload.as_str()));
                let len = self.text.len().saturating_sub(payload.len());
                self.text.truncate(len);
            }
            Action::Delete { target, offsets } => {
                // Offsets refer to the pre-delete text, so restoring front
                // to back puts every occurrence back where it was
                for &offset in offsets {
                    self.text.insert_str(offset, target);
                }
            }
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        let mut buffer = Self::new();
        buffer.text.push_str(s);
        buffer
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self {
            text: s,
            history: History::new(DEFAULT_HISTORY_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActionKind;
    use proptest::prelude::*;

    #[test]
    fn test_insert_separates_segments() {
        let mut buffer = TextBuffer::new();
        assert_eq!(buffer.insert("hello"), "hello");
        assert_eq!(buffer.insert("world"), " world");
        assert_eq!(buffer.text(), "hello world");
    }

    #[test]
    fn test_empty_insert() {
        let mut buffer = TextBuffer::new();
        assert_eq!(buffer.insert(""), "");
        assert!(buffer.is_empty());
        assert!(buffer.can_undo());

        buffer.insert("a");
        assert_eq!(buffer.insert(""), " ");
        assert_eq!(buffer.text(), "a ");
    }

    #[test]
    fn test_insert_clears_redo() {
        let mut buffer = TextBuffer::new();
        buffer.insert("one");
        buffer.undo().unwrap();
        assert!(buffer.can_redo());

        buffer.insert("two");
        assert!(matches!(buffer.redo(), Err(BufferError::NothingToRedo)));
        assert_eq!(buffer.text(), "two");
    }

    #[test]
    fn test_delete_removes_substring_not_characters() {
        let mut buffer = TextBuffer::from("the cat sat on the mat");
        let removed = buffer.delete("at").unwrap();

        assert_eq!(removed, 3);
        assert_eq!(buffer.text(), "the c s on the m");
    }

    #[test]
    fn test_delete_not_found() {
        let mut buffer = TextBuffer::new();
        let err = buffer.delete("xyz").unwrap_err();
        assert!(matches!(err, BufferError::TextNotFound(ref t) if t == "xyz"));
        assert_eq!(buffer.text(), "");
        assert!(!buffer.can_undo());
    }

    #[test]
    fn test_delete_empty_target_is_not_found() {
        let mut buffer = TextBuffer::from("abc");
        assert!(matches!(buffer.delete(""), Err(BufferError::TextNotFound(_))));
        assert_eq!(buffer.text(), "abc");
    }

    #[test]
    fn test_delete_clears_redo() {
        let mut buffer = TextBuffer::new();
        buffer.insert("hello");
        buffer.insert("world");
        buffer.undo().unwrap();

        buffer.delete("ll").unwrap();
        assert!(!buffer.can_redo());
        assert_eq!(buffer.text(), "heo");
    }

    #[test]
    fn test_undo_delete_restores_positions() {
        let mut buffer = TextBuffer::new();
        buffer.insert("ab");
        buffer.insert("cab");
        buffer.insert("d");
        assert_eq!(buffer.text(), "ab cab d");

        buffer.delete("ab").unwrap();
        assert_eq!(buffer.text(), " c d");

        let action = buffer.undo().unwrap();
        assert_eq!(action.kind(), ActionKind::Delete);
        assert_eq!(buffer.text(), "ab cab d");

        buffer.redo().unwrap();
        assert_eq!(buffer.text(), " c d");
    }

    #[test]
    fn test_overlapping_pattern() {
        let mut buffer = TextBuffer::from("aaaaa");
        assert_eq!(buffer.find_all("aa"), vec![0, 2]);

        buffer.delete("aa").unwrap();
        assert_eq!(buffer.text(), "a");

        buffer.undo().unwrap();
        assert_eq!(buffer.text(), "aaaaa");
    }

    #[test]
    fn test_hello_world_scenario() {
        let mut buffer = TextBuffer::new();
        buffer.insert("hello");
        assert_eq!(buffer.text(), "hello");
        buffer.insert("world");
        assert_eq!(buffer.text(), "hello world");
        buffer.undo().unwrap();
        assert_eq!(buffer.text(), "hello");
        buffer.undo().unwrap();
        assert_eq!(buffer.text(), "");
        buffer.redo().unwrap();
        assert_eq!(buffer.text(), "hello");
    }

    #[test]
    fn test_nothing_to_undo_or_redo() {
        let mut buffer = TextBuffer::from("loaded");
        assert!(matches!(buffer.undo(), Err(BufferError::NothingToUndo)));
        assert!(matches!(buffer.redo(), Err(BufferError::NothingToRedo)));
        assert_eq!(buffer.text(), "loaded");
    }

    #[test]
    fn test_replace_content_clears_history() {
        let mut buffer = TextBuffer::new();
        buffer.insert("a long line of text");
        buffer.insert("more");
        buffer.undo().unwrap();

        buffer.replace_content("x");
        assert!(!buffer.can_undo());
        assert!(!buffer.can_redo());
        assert_eq!(buffer.text(), "x");
    }

    #[test]
    fn test_history_limit() {
        let mut buffer = TextBuffer::with_history_limit(1);
        buffer.insert("a");
        buffer.insert("b");
        buffer.undo().unwrap();
        assert_eq!(buffer.text(), "a");
        assert!(buffer.undo().is_err());
    }

    fn segment() -> impl Strategy<Value = String> {
        "[a-z]{1,8}"
    }

    proptest! {
        #[test]
        fn prop_inserts_join_with_spaces(parts in proptest::collection::vec(segment(), 1..10)) {
            let mut buffer = TextBuffer::new();
            for part in &parts {
                buffer.insert(part);
            }
            prop_assert_eq!(buffer.text(), parts.join(" "));
        }

        #[test]
        fn prop_undo_insert_restores_previous(prefix in "[a-z ]{0,20}", new_text in segment()) {
            let mut buffer = TextBuffer::from(prefix.as_str());
            buffer.insert(&new_text);
            buffer.undo().unwrap();
            prop_assert_eq!(buffer.text(), prefix.as_str());
        }

        #[test]
        fn prop_redo_after_undo_restores(parts in proptest::collection::vec(segment(), 1..6), target in "[a-c]{1,2}") {
            let mut buffer = TextBuffer::new();
            for part in &parts {
                buffer.insert(part);
            }
            let _ = buffer.delete(&target);

            let before = buffer.text().to_string();
            buffer.undo().unwrap();
            buffer.redo().unwrap();
            prop_assert_eq!(buffer.text(), before);
        }

        #[test]
        fn prop_undo_delete_is_exact_inverse(text in "[a-c ]{0,30}", target in "[a-c]{1,3}") {
            let mut buffer = TextBuffer::from(text.as_str());
            if buffer.delete(&target).is_ok() {
                prop_assert!(buffer.text().len() < text.len());
                buffer.undo().unwrap();
            }
            prop_assert_eq!(buffer.text(), text.as_str());
        }

        #[test]
        fn prop_mutation_after_undo_drops_redo(parts in proptest::collection::vec(segment(), 1..5), extra in segment()) {
            let mut buffer = TextBuffer::new();
            for part in &parts {
                buffer.insert(part);
            }
            buffer.undo().unwrap();
            buffer.insert(&extra);
            prop_assert!(matches!(buffer.redo(), Err(BufferError::NothingToRedo)));
        }
    }
}
