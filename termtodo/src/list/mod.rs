//! Task list management.
//!
//! [`TaskList`] holds the ordered task collection and the edit target,
//! mirroring every mutation to the injected key-value store before it
//! is committed in memory.

pub mod manager;

pub use manager::{Notice, TaskList};

use termtodo_core::codec::CodecError;
use termtodo_core::store::StoreError;
use termtodo_core::task::{TaskId, ValidationError};
use thiserror::Error;

/// Errors that can occur during task list operations.
///
/// Everything except `Validation` is an operation failure: defensively
/// handled, surfaced as a transient notice, and guaranteed to leave the
/// in-memory collection unchanged.
#[derive(Debug, Error)]
pub enum ListError {
    /// Text failed form validation; the operation was never invoked.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The persisted collection could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// No task with the given id exists.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}
