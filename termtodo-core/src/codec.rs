//! Persistence codec for the stored task collection.
//!
//! The whole collection persists as a single JSON array of
//! `{"id": number, "val": string, "isDone": boolean}` objects under
//! [`TASKS_KEY`]; this module converts between that layout and
//! `Vec<Task>`.

use crate::task::Task;

/// Store key under which the task collection persists.
pub const TASKS_KEY: &str = "todos";

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Encodes a task collection into its persisted JSON form.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the tasks cannot be serialized.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, CodecError> {
    serde_json::to_string(tasks).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes a task collection from its persisted JSON form.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the input is not a valid
/// task array.
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>, CodecError> {
    serde_json::from_str(raw).map_err(|e| CodecError::Serialization(e.to_string()))
}
