//! Filter bar widget.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone)]
pub struct FilterOption {
    pub key: char,
    pub label: &'static str,
    pub value: String,
    /// Set when the criterion narrows the list.
    pub active: bool,
}

pub struct FilterBar<'a> {
    pub title: &'a str,
    pub filters: &'a [FilterOption],
    pub active_style: Style,
    pub inactive_style: Style,
    pub border_style: Style,
}

impl<'a> FilterBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans: Vec<Span> = Vec::new();
        for (idx, filter) in self.filters.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled(" | ", self.inactive_style));
            }
            let style = if filter.active {
                self.active_style
            } else {
                self.inactive_style
            };
            spans.push(Span::styled(
                format!("[{}] {}: {}", filter.key, filter.label, filter.value),
                style,
            ));
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(self.border_style);
        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}
