//! Centered overlay for alerts and help.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub struct Popup<'a> {
    pub title: &'a str,
    pub lines: Vec<Line<'a>>,
    pub hint: &'a str,
    pub border_style: Style,
    pub hint_style: Style,
}

impl<'a> Popup<'a> {
    pub fn render(self, f: &mut Frame<'_>, area: Rect) {
        let height = (self.lines.len() as u16).saturating_add(4);
        let rect = centered_rect(60, height, area);
        let mut lines = self.lines;
        lines.push(Line::from(""));
        lines.push(Line::styled(self.hint, self.hint_style));
        let widget = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(self.title)
                    .borders(Borders::ALL)
                    .border_style(self.border_style),
            );
        f.render_widget(Clear, rect);
        f.render_widget(widget, rect);
    }
}
