//! `TermTodo` — terminal-native to-do list library.

pub mod app;
pub mod config;
pub mod list;
pub mod ui;
