//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success notice / completed task color.
pub const SUCCESS: Color = Color::Green;

/// Error notice color.
pub const ERROR: Color = Color::Red;

/// Busy marker color.
pub const BUSY: Color = Color::Yellow;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (placeholders, metadata).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for completed task text (green, struck through).
#[must_use]
pub fn done_text() -> Style {
    Style::default()
        .fg(SUCCESS)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Style for the busy marker on a row with a pending operation.
#[must_use]
pub fn busy_marker() -> Style {
    Style::default().fg(BUSY)
}

/// Style for the status bar background.
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for success notices.
#[must_use]
pub fn notice_success() -> Style {
    Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD)
}

/// Style for error notices.
#[must_use]
pub fn notice_error() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}
