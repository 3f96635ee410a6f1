//! Detail panel widget for showing labelled values.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct DetailField<'a> {
    pub label: &'a str,
    pub value: String,
    /// Overrides the value style, e.g. to flag an error message.
    pub style: Option<Style>,
}

impl<'a> DetailField<'a> {
    pub fn new(label: &'a str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            style: None,
        }
    }

    pub fn flagged(label: &'a str, value: impl Into<String>, style: Style) -> Self {
        Self {
            label,
            value: value.into(),
            style: Some(style),
        }
    }
}

pub struct DetailPanel<'a> {
    pub title: &'a str,
    pub fields: Vec<DetailField<'a>>,
    pub label_style: Style,
    pub placeholder: &'a str,
}

impl<'a> DetailPanel<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let lines: Vec<Line> = if self.fields.is_empty() {
            vec![Line::from(self.placeholder.to_string())]
        } else {
            self.fields
                .iter()
                .flat_map(|field| {
                    let value = match field.style {
                        Some(style) => Span::styled(field.value.clone(), style),
                        None => Span::raw(field.value.clone()),
                    };
                    // Multi-line values (transcripts, settings) go below their label.
                    if field.value.contains('\n') {
                        let mut lines = vec![Line::from(Span::styled(
                            format!("{}:", field.label),
                            self.label_style,
                        ))];
                        lines.extend(
                            field
                                .value
                                .lines()
                                .map(|line| Line::from(format!("  {}", line))),
                        );
                        lines
                    } else {
                        vec![Line::from(vec![
                            Span::styled(format!("{}: ", field.label), self.label_style),
                            value,
                        ])]
                    }
                })
                .collect()
        };

        let widget = Paragraph::new(Text::from(lines))
            .block(Block::default().title(self.title).borders(Borders::ALL))
            .wrap(Wrap { trim: false });

        f.render_widget(widget, area);
    }
}
