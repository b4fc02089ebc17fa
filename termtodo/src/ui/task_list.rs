//! Task list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::theme;
use crate::app::{App, Focus};

/// Render the task list panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::List;

    let done_count = app.list.tasks().iter().filter(|t| t.done).count();
    let title = format!("Tasks ({done_count}/{})", app.list.len());

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    if app.list.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No tasks yet. Add a task to get started.",
            theme::dimmed(),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .list
        .tasks()
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let checkbox = if task.done { "[x]" } else { "[ ]" };
            let text_style = if task.done {
                theme::done_text()
            } else {
                theme::normal()
            };

            let mut spans = vec![
                Span::styled(checkbox, theme::normal()),
                Span::raw(" "),
                Span::styled(task.text.as_str(), text_style),
            ];
            if app.is_busy(task.id) {
                spans.push(Span::raw(" "));
                spans.push(Span::styled("\u{22ef}", theme::busy_marker()));
            }

            let is_selected = idx == app.selected;
            let style = if is_selected && is_focused {
                theme::selected()
            } else if is_selected {
                theme::highlighted()
            } else {
                theme::normal()
            };

            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
