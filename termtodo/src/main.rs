//! `TermTodo` — terminal-native to-do list.
//!
//! Launches the TUI over a file-backed task store. Configuration via
//! CLI flags, environment variables, or config file
//! (`~/.config/termtodo/config.toml`).
//!
//! ```bash
//! cargo run --bin termtodo
//!
//! # Keep tasks somewhere else
//! cargo run --bin termtodo -- --data-dir /tmp/my-todos
//! ```

use std::io;
use std::path::Path;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use termtodo::app::App;
use termtodo::config::{CliArgs, ClientConfig};
use termtodo::list::TaskList;
use termtodo::ui;
use termtodo_core::codec::{self, TASKS_KEY};
use termtodo_core::store::{FileStore, KeyValueStore, MemoryStore};

fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("termtodo starting");

    let (list, warning) = open_task_list(&config);

    let mut app = App::new(list)
        .with_latency(config.latency_min, config.latency_max)
        .with_notice_ttls(config.notice_success_ttl, config.notice_error_ttl);
    if let Some(text) = warning {
        app.push_error(text);
    }

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, app, &config);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("termtodo exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns a [`WorkerGuard`] that must be held until
/// shutdown to ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("termtodo.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Open the durable store and rehydrate the task list.
///
/// Degrades instead of crashing: if the store cannot be opened the
/// session runs on an in-memory store, and if the persisted entry is
/// unreadable the session starts empty. Either case returns a warning
/// for the user.
fn open_task_list(config: &ClientConfig) -> (TaskList, Option<String>) {
    let store: Box<dyn KeyValueStore> = match config.storage_dir().map(FileStore::new) {
        Ok(Ok(store)) => {
            tracing::debug!(root = %store.root().display(), "file store opened");
            Box::new(store)
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "could not open file store");
            return (
                TaskList::new(Box::new(MemoryStore::new())),
                Some(format!("Tasks will not be saved: {e}")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "no storage directory");
            return (
                TaskList::new(Box::new(MemoryStore::new())),
                Some(format!("Tasks will not be saved: {e}")),
            );
        }
    };

    match store.get(TASKS_KEY) {
        Ok(Some(raw)) => match codec::decode_tasks(&raw) {
            Ok(tasks) => {
                tracing::info!(count = tasks.len(), "tasks rehydrated");
                (TaskList::with_tasks(store, tasks), None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "persisted tasks unreadable, starting empty");
                (
                    TaskList::new(store),
                    Some("Saved tasks were unreadable and were ignored".to_string()),
                )
            }
        },
        Ok(None) => (TaskList::new(store), None),
        Err(e) => {
            tracing::warn!(error = %e, "could not read persisted tasks");
            (
                TaskList::new(store),
                Some(format!("Could not read saved tasks: {e}")),
            )
        }
    }
}

/// Main application loop: draw, apply due simulated operations, poll
/// for input.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    config: &ClientConfig,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        app.tick(Instant::now());

        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key_event(key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
