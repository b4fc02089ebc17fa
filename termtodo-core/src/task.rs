//! Task model and form validation for `TermTodo`.
//!
//! Defines the persisted task record, the timestamp-derived task
//! identifier, and the text validation applied before any mutation
//! is accepted.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Minimum task text length in characters, after trimming.
pub const MIN_TASK_TEXT_LENGTH: usize = 2;

/// Maximum task text length in characters, after trimming.
pub const MAX_TASK_TEXT_LENGTH: usize = 100;

/// Errors produced by task text validation.
///
/// The `Display` messages are surfaced to the user verbatim.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Trimmed text is shorter than [`MIN_TASK_TEXT_LENGTH`].
    #[error("Task must be at least {MIN_TASK_TEXT_LENGTH} characters long")]
    TooShort,
    /// Trimmed text is longer than [`MAX_TASK_TEXT_LENGTH`].
    #[error("Task cannot exceed {MAX_TASK_TEXT_LENGTH} characters")]
    TooLong,
}

/// Validates raw form input and returns the trimmed text.
///
/// Lengths are counted in `char`s, not bytes, so multi-byte text is
/// bounded by what the user actually typed.
///
/// # Errors
///
/// Returns [`ValidationError::TooShort`] or [`ValidationError::TooLong`]
/// if the trimmed length falls outside
/// [`MIN_TASK_TEXT_LENGTH`]..=[`MAX_TASK_TEXT_LENGTH`].
pub fn validate_text(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len < MIN_TASK_TEXT_LENGTH {
        return Err(ValidationError::TooShort);
    }
    if len > MAX_TASK_TEXT_LENGTH {
        return Err(ValidationError::TooLong);
    }
    Ok(trimmed.to_string())
}

/// Unique identifier for a task: milliseconds since the Unix epoch at
/// creation time, so ids are orderable and serialize as bare JSON
/// numbers.
///
/// Uniqueness within a collection is the caller's responsibility
/// (two tasks created in the same millisecond need a bumped id).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates an id from the current wall clock.
    #[must_use]
    pub fn now() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self(u64::try_from(ms).unwrap_or(u64::MAX))
    }

    /// Creates an id from an explicit millisecond value.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Returns the millisecond value of this id.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the next id after this one.
    #[must_use]
    pub const fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do item.
///
/// The serde renames pin the persisted JSON layout:
/// `{"id": number, "val": string, "isDone": boolean}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, orderable identifier.
    pub id: TaskId,
    /// Task text; always satisfies the trimmed 2-100 character bound
    /// because mutations go through [`validate_text`] first.
    #[serde(rename = "val")]
    pub text: String,
    /// Completion flag.
    #[serde(rename = "isDone", default)]
    pub done: bool,
}

impl Task {
    /// Creates a new, not-yet-done task. `text` must already be
    /// validated.
    #[must_use]
    pub const fn new(id: TaskId, text: String) -> Self {
        Self {
            id,
            text,
            done: false,
        }
    }
}
