//! Application state and event handling.
//!
//! Mutating user actions are not applied immediately: they are queued
//! as [`PendingAction`]s with a simulated latency (standing in for a
//! future backend API) and applied atomically by [`App::tick`] when
//! their deadline passes. While an action is pending, its task row is
//! busy and re-entrant operations on it are ignored.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use termtodo_core::task::{TaskId, validate_text};

use crate::list::{ListError, Notice, TaskList};

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The input form is focused (default).
    Form,
    /// The task list is focused.
    List,
}

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Operation succeeded.
    Success,
    /// Validation or operation failure.
    Error,
}

/// A transient user-visible notification, pruned once expired.
#[derive(Debug, Clone)]
pub struct NoticeEntry {
    /// Message text.
    pub text: String,
    /// Success or error.
    pub kind: NoticeKind,
    /// Formatted creation time (e.g., "14:23").
    pub timestamp: String,
    expires_at: Instant,
}

/// A queued mutating operation.
#[derive(Debug, Clone)]
enum Action {
    /// Add, or edit when `target` is set. Both the text and the edit
    /// target are captured at submission time, so cancelling edit mode
    /// afterwards cannot reroute an in-flight edit into an add.
    Submit {
        text: String,
        target: Option<TaskId>,
    },
    ToggleDone(TaskId),
    BeginEdit(TaskId),
    Delete(TaskId),
    ClearAll,
}

impl Action {
    /// The task id this action holds busy, if any.
    const fn task_id(&self) -> Option<TaskId> {
        match self {
            Self::ToggleDone(id) | Self::BeginEdit(id) | Self::Delete(id) => Some(*id),
            // Submissions hold the whole form busy, not a single row.
            Self::Submit { .. } | Self::ClearAll => None,
        }
    }
}

struct PendingAction {
    action: Action,
    ready_at: Instant,
}

/// Main application state.
pub struct App {
    /// Current form input.
    pub input: String,
    /// Cursor position in the input (character index).
    pub cursor_position: usize,
    /// Which panel is focused.
    pub focus: Focus,
    /// Selected task index in the list panel.
    pub selected: usize,
    /// The task collection and its persistence.
    pub list: TaskList,
    /// Whether the app should quit.
    pub should_quit: bool,

    notices: Vec<NoticeEntry>,
    pending: Vec<PendingAction>,
    submitting: bool,
    latency_min: Duration,
    latency_max: Duration,
    success_ttl: Duration,
    error_ttl: Duration,
}

impl App {
    /// Creates the application over a loaded task list.
    #[must_use]
    pub fn new(list: TaskList) -> Self {
        Self {
            input: String::new(),
            cursor_position: 0,
            focus: Focus::Form,
            selected: 0,
            list,
            should_quit: false,
            notices: Vec::new(),
            pending: Vec::new(),
            submitting: false,
            latency_min: Duration::from_millis(500),
            latency_max: Duration::from_millis(1000),
            success_ttl: Duration::from_secs(2),
            error_ttl: Duration::from_secs(3),
        }
    }

    /// Sets the simulated latency range (zero for deterministic tests).
    #[must_use]
    pub const fn with_latency(mut self, min: Duration, max: Duration) -> Self {
        self.latency_min = min;
        self.latency_max = max;
        self
    }

    /// Sets how long success and error notices stay visible.
    #[must_use]
    pub const fn with_notice_ttls(mut self, success: Duration, error: Duration) -> Self {
        self.success_ttl = success;
        self.error_ttl = error;
        self
    }

    /// Whether a submission or clear-all is in flight (form disabled).
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether an operation on this task is in flight.
    #[must_use]
    pub fn is_busy(&self, id: TaskId) -> bool {
        self.pending.iter().any(|p| p.action.task_id() == Some(id))
    }

    /// Whether clear-all is currently allowed.
    #[must_use]
    pub fn can_clear_all(&self) -> bool {
        !self.list.is_empty() && !self.submitting
    }

    /// Number of queued operations (for tests and the status bar).
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// The most recent live notice, if any.
    #[must_use]
    pub fn active_notice(&self) -> Option<&NoticeEntry> {
        self.notices.last()
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Esc, _) => {
                // Esc leaves edit mode first; a second Esc quits.
                if self.list.edit_target().is_some() {
                    self.list.cancel_edit();
                    self.input.clear();
                    self.cursor_position = 0;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.focus = match self.focus {
                    Focus::Form => Focus::List,
                    Focus::List => Focus::Form,
                };
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Form => self.handle_form_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    /// Applies due pending actions and prunes expired notices.
    ///
    /// Called once per draw cycle with the current instant; tests pass
    /// later instants to fast-forward the simulated latency.
    pub fn tick(&mut self, now: Instant) {
        self.notices.retain(|n| n.expires_at > now);
        let (due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.ready_at <= now);
        self.pending = rest;
        for pending in due {
            self.apply(pending.action);
        }
    }

    /// Pushes a success notice.
    pub fn push_success(&mut self, text: impl Into<String>) {
        self.push_notice(NoticeKind::Success, text.into(), self.success_ttl);
    }

    /// Pushes an error notice.
    pub fn push_error(&mut self, text: impl Into<String>) {
        self.push_notice(NoticeKind::Error, text.into(), self.error_ttl);
    }

    // --- key handling ---

    /// Handle key event when the form is focused. The whole form is
    /// disabled while a submission is in flight.
    fn handle_form_key(&mut self, key: KeyEvent) {
        if self.submitting {
            return;
        }
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => self.enter_char(c),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor_position = 0,
            KeyCode::End => self.cursor_position = self.input.chars().count(),
            _ => {}
        }
    }

    /// Handle key event when the list is focused.
    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Enter | KeyCode::Char(' ') => self.request_toggle(),
            KeyCode::Char('e') => self.request_edit(),
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
            KeyCode::Char('C') => self.request_clear_all(),
            _ => {}
        }
    }

    /// Validates and queues the current input as an Add or Edit.
    ///
    /// Validation runs up front: a failing input produces an error
    /// notice immediately and the operation is never queued.
    fn submit(&mut self) {
        match validate_text(&self.input) {
            Ok(_) => {
                self.submitting = true;
                let text = self.input.clone();
                let target = self.list.edit_target();
                self.queue(Action::Submit { text, target });
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    fn request_toggle(&mut self) {
        if let Some(id) = self.selected_task_id()
            && !self.is_busy(id)
        {
            self.queue(Action::ToggleDone(id));
        }
    }

    fn request_edit(&mut self) {
        if let Some(id) = self.selected_task_id()
            && !self.is_busy(id)
        {
            self.queue(Action::BeginEdit(id));
        }
    }

    fn request_delete(&mut self) {
        if let Some(id) = self.selected_task_id()
            && !self.is_busy(id)
        {
            self.queue(Action::Delete(id));
        }
    }

    fn request_clear_all(&mut self) {
        if self.can_clear_all() {
            self.submitting = true;
            self.queue(Action::ClearAll);
        }
    }

    // --- applying actions ---

    fn queue(&mut self, action: Action) {
        let pending = PendingAction {
            action,
            ready_at: Instant::now() + self.simulated_delay(),
        };
        self.pending.push(pending);
    }

    /// Simulated backend latency, jittered within the configured range.
    fn simulated_delay(&self) -> Duration {
        if self.latency_min >= self.latency_max {
            return self.latency_min;
        }
        let min = u64::try_from(self.latency_min.as_millis()).unwrap_or(u64::MAX);
        let max = u64::try_from(self.latency_max.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(rand::rng().random_range(min..=max))
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Submit { text, target } => {
                self.submitting = false;
                let result = match target {
                    Some(id) => self.list.edit(id, &text),
                    None => self.list.add(&text),
                };
                match result {
                    Ok(notice) => {
                        self.input.clear();
                        self.cursor_position = 0;
                        self.push_success(notice.message());
                    }
                    Err(e) => self.push_error(e.to_string()),
                }
            }
            Action::ToggleDone(id) => {
                let result = self.list.toggle_done(id);
                self.report(result);
            }
            Action::BeginEdit(id) => match self.list.begin_edit(id) {
                Ok((notice, text)) => {
                    self.cursor_position = text.chars().count();
                    self.input = text;
                    self.focus = Focus::Form;
                    self.push_success(notice.message());
                }
                Err(e) => self.push_error(e.to_string()),
            },
            Action::Delete(id) => {
                let result = self.list.delete(id);
                self.report(result);
            }
            Action::ClearAll => {
                self.submitting = false;
                let result = self.list.clear_all();
                if result.is_ok() {
                    self.input.clear();
                    self.cursor_position = 0;
                    self.selected = 0;
                }
                self.report(result);
            }
        }
        self.clamp_selection();
    }

    fn report(&mut self, result: Result<Notice, ListError>) {
        match result {
            Ok(notice) => self.push_success(notice.message()),
            Err(e) => {
                tracing::warn!(error = %e, "operation failed");
                self.push_error(e.to_string());
            }
        }
    }

    fn push_notice(&mut self, kind: NoticeKind, text: String, ttl: Duration) {
        self.notices.push(NoticeEntry {
            text,
            kind,
            timestamp: chrono::Local::now().format("%H:%M").to_string(),
            expires_at: Instant::now() + ttl,
        });
    }

    // --- selection and cursor helpers ---

    fn selected_task_id(&self) -> Option<TaskId> {
        self.list.tasks().get(self.selected).map(|t| t.id)
    }

    fn clamp_selection(&mut self) {
        let last = self.list.len().saturating_sub(1);
        if self.selected > last {
            self.selected = last;
        }
    }

    const fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn select_next(&mut self) {
        if self.selected < self.list.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    /// Byte offset of the character cursor into the input.
    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input.len())
    }

    /// Insert a character at the cursor position.
    fn enter_char(&mut self, c: char) {
        let index = self.byte_index();
        self.input.insert(index, c);
        self.cursor_position += 1;
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let index = self.byte_index();
            self.input.remove(index);
        }
    }

    /// Move cursor left.
    const fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    /// Move cursor right.
    fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }
}
