//! Task list manager: CRUD over the ordered collection with
//! write-through persistence.
//!
//! `TaskList` is the application-layer interface for adding, editing,
//! completing, and deleting tasks. Every mutation persists the whole
//! collection under [`TASKS_KEY`] before committing, so a store failure
//! leaves the in-memory state untouched.

use termtodo_core::codec::{self, TASKS_KEY};
use termtodo_core::store::KeyValueStore;
use termtodo_core::task::{Task, TaskId, validate_text};

use super::ListError;

/// Outcome of a successful task list operation, surfaced to the user
/// as a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A task was added.
    Added,
    /// A task was edited.
    Updated,
    /// Edit mode was entered for a task.
    EditMode,
    /// A task was marked done.
    Completed,
    /// A task was marked not done.
    Reopened,
    /// A task was deleted.
    Deleted,
    /// All tasks were removed.
    Cleared,
}

impl Notice {
    /// User-facing message for this outcome.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Added => "Task added successfully",
            Self::Updated => "Task updated successfully",
            Self::EditMode => "You can now edit your task",
            Self::Completed => "Task marked as done",
            Self::Reopened => "Task marked as not done",
            Self::Deleted => "Task deleted successfully",
            Self::Cleared => "All tasks have been removed",
        }
    }
}

/// Manages the ordered task collection and the edit target.
///
/// Collection order is insertion order. Editing a task removes the old
/// entry and appends the edited one at the end, preserving the id.
pub struct TaskList {
    tasks: Vec<Task>,
    edit_target: Option<TaskId>,
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for TaskList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskList")
            .field("tasks", &self.tasks)
            .field("edit_target", &self.edit_target)
            .finish_non_exhaustive()
    }
}

impl TaskList {
    /// Creates an empty task list over the given store.
    #[must_use]
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_tasks(store, Vec::new())
    }

    /// Creates a task list seeded with an already-decoded collection.
    #[must_use]
    pub fn with_tasks(store: Box<dyn KeyValueStore>, tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            edit_target: None,
            store,
        }
    }

    /// Loads the persisted collection from the store. An absent entry
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Store`] if the entry cannot be read, or
    /// [`ListError::Codec`] if it is not a valid task array.
    pub fn load(store: Box<dyn KeyValueStore>) -> Result<Self, ListError> {
        let tasks = match store.get(TASKS_KEY)? {
            Some(raw) => codec::decode_tasks(&raw)?,
            None => Vec::new(),
        };
        Ok(Self::with_tasks(store, tasks))
    }

    /// Returns the tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the id of the task currently being edited, if any.
    #[must_use]
    pub const fn edit_target(&self) -> Option<TaskId> {
        self.edit_target
    }

    /// Returns the task with the given id, if present.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Number of tasks in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Validates `raw_text` and appends a new task with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Validation`] if the text fails the length
    /// bound, or a store/codec error if persistence fails (in which
    /// case the collection is unchanged).
    pub fn add(&mut self, raw_text: &str) -> Result<Notice, ListError> {
        let text = validate_text(raw_text)?;
        let mut next = self.tasks.clone();
        next.push(Task::new(self.fresh_id(), text));
        self.persist(next)?;
        tracing::debug!(count = self.tasks.len(), "task added");
        Ok(Notice::Added)
    }

    /// Replaces the task with `id`: removes the old entry and appends a
    /// new one at the end with the same id, the new text, and
    /// `done = false`. Clears the edit target.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::TaskNotFound`] if `id` does not exist,
    /// [`ListError::Validation`] if the text fails the length bound, or
    /// a store/codec error if persistence fails.
    pub fn edit(&mut self, id: TaskId, raw_text: &str) -> Result<Notice, ListError> {
        self.position(id)?;
        let text = validate_text(raw_text)?;
        let mut next: Vec<Task> = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        next.push(Task::new(id, text));
        self.persist(next)?;
        self.edit_target = None;
        tracing::debug!(%id, "task edited");
        Ok(Notice::Updated)
    }

    /// Sets the edit target to `id` and returns the task's current text
    /// so the caller can pre-fill the input field.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::TaskNotFound`] if `id` does not exist.
    pub fn begin_edit(&mut self, id: TaskId) -> Result<(Notice, String), ListError> {
        let task = self.get(id).ok_or(ListError::TaskNotFound(id))?;
        let text = task.text.clone();
        self.edit_target = Some(id);
        Ok((Notice::EditMode, text))
    }

    /// Clears the edit target without mutating the collection.
    pub const fn cancel_edit(&mut self) {
        self.edit_target = None;
    }

    /// Flips the done flag of the task with `id`, leaving its position
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::TaskNotFound`] if `id` does not exist, or a
    /// store/codec error if persistence fails.
    pub fn toggle_done(&mut self, id: TaskId) -> Result<Notice, ListError> {
        let pos = self.position(id)?;
        let mut next = self.tasks.clone();
        next[pos].done = !next[pos].done;
        let now_done = next[pos].done;
        self.persist(next)?;
        tracing::debug!(%id, done = now_done, "task toggled");
        Ok(if now_done {
            Notice::Completed
        } else {
            Notice::Reopened
        })
    }

    /// Removes the task with `id`, leaving all others in their relative
    /// order. Clears the edit target if it pointed at the removed task.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::TaskNotFound`] if `id` does not exist
    /// (collection unchanged), or a store/codec error if persistence
    /// fails.
    pub fn delete(&mut self, id: TaskId) -> Result<Notice, ListError> {
        self.position(id)?;
        let next: Vec<Task> = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        self.persist(next)?;
        if self.edit_target == Some(id) {
            self.edit_target = None;
        }
        tracing::debug!(%id, "task deleted");
        Ok(Notice::Deleted)
    }

    /// Empties the collection, removes the persisted entry entirely,
    /// and clears the edit target.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Store`] if the entry cannot be removed
    /// (collection unchanged).
    pub fn clear_all(&mut self) -> Result<Notice, ListError> {
        self.store.remove(TASKS_KEY)?;
        self.tasks.clear();
        self.edit_target = None;
        tracing::debug!("all tasks cleared");
        Ok(Notice::Cleared)
    }

    /// Persists `next` and commits it only on success, keeping each
    /// operation atomic against the in-memory collection.
    fn persist(&mut self, next: Vec<Task>) -> Result<(), ListError> {
        let encoded = codec::encode_tasks(&next)?;
        self.store.set(TASKS_KEY, &encoded)?;
        self.tasks = next;
        Ok(())
    }

    /// A wall-clock id, bumped past the current maximum when two tasks
    /// land in the same millisecond.
    fn fresh_id(&self) -> TaskId {
        let now = TaskId::now();
        match self.tasks.iter().map(|t| t.id).max() {
            Some(max) if now <= max => max.successor(),
            _ => now,
        }
    }

    fn position(&self, id: TaskId) -> Result<usize, ListError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(ListError::TaskNotFound(id))
    }
}
