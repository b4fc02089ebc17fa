//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Focus, NoticeKind};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        Focus::Form => "Enter: submit | Tab: switch panel | Esc: quit | ←→: move cursor",
        Focus::List => {
            "Tab: switch panel | ↑↓/jk: navigate | Enter: done/undo | e: edit | d: delete | C: clear all | Esc: quit"
        }
    };

    let mut spans = vec![
        Span::styled("TermTodo v0.1.0", theme::bold()),
        Span::raw(" | "),
    ];

    if let Some(notice) = app.active_notice() {
        let style = match notice.kind {
            NoticeKind::Success => theme::notice_success(),
            NoticeKind::Error => theme::notice_error(),
        };
        spans.push(Span::styled(notice.timestamp.clone(), theme::dimmed()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(notice.text.clone(), style));
    } else {
        let done = app.list.tasks().iter().filter(|t| t.done).count();
        spans.push(Span::styled(
            format!("{} tasks, {done} done", app.list.len()),
            theme::normal(),
        ));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(help_text, theme::dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
