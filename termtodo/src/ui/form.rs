//! Input form rendering (the single task text field).

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, Focus};

/// Render the input form. The title doubles as the submit label:
/// "Add Task" normally, "Edit Task" while an edit target is set, and a
/// progress label while a submission is in flight.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Form;
    let editing = app.list.edit_target().is_some();

    let title = if app.is_submitting() {
        if editing { "Updating..." } else { "Adding..." }
    } else if editing {
        "Edit Task"
    } else {
        "Add Task"
    };

    let show_cursor = is_focused && !app.is_submitting();

    let input_line = if app.input.is_empty() {
        // Placeholder whenever the field is empty; the cursor block
        // precedes it while the form has focus.
        let mut spans = Vec::new();
        if show_cursor {
            spans.push(Span::styled("█", theme::normal()));
        }
        spans.push(Span::styled(
            "Type your task and press Enter",
            theme::dimmed(),
        ));
        Line::from(spans)
    } else {
        // Input text with a cursor block at the cursor position.
        let mut display_text = app.input.clone();
        if show_cursor {
            let byte_index = display_text
                .char_indices()
                .map(|(i, _)| i)
                .nth(app.cursor_position)
                .unwrap_or(display_text.len());
            display_text.insert(byte_index, '█');
        }
        Line::from(Span::styled(
            display_text,
            if app.is_submitting() {
                theme::dimmed()
            } else {
                theme::normal()
            },
        ))
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    frame.render_widget(Paragraph::new(input_line).block(block), area);
}
