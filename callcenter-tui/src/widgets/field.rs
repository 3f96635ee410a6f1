//! Bordered text field backed by a `TextArea`.

use crate::theme::ConsoleTheme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use tui_textarea::TextArea;

pub fn render_field(
    f: &mut Frame<'_>,
    area: Rect,
    field: &TextArea<'_>,
    title: &str,
    focused: bool,
    theme: &ConsoleTheme,
) {
    let mut field = field.clone();
    let border = if focused {
        theme.border_focus
    } else {
        theme.border
    };
    field.set_block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    field.set_cursor_line_style(Style::default());
    if focused {
        field.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    } else {
        field.set_cursor_style(Style::default());
    }
    f.render_widget(&field, area);
}
