//! Status badge widget.

use crate::theme::{status_tone_color, ConsoleTheme};
use callcenter_core::CallStatus;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

/// Call status rendered with its fixed tone color.
pub struct StatusBadge<'a> {
    pub status: &'a CallStatus,
}

impl<'a> StatusBadge<'a> {
    pub fn new(status: &'a CallStatus) -> Self {
        Self { status }
    }

    pub fn style(&self, theme: &ConsoleTheme) -> Style {
        Style::default()
            .fg(status_tone_color(self.status.tone(), theme))
            .add_modifier(Modifier::BOLD)
    }

    pub fn span(&self, theme: &ConsoleTheme) -> Span<'static> {
        Span::styled(format!("[{}]", self.status.label()), self.style(theme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_uses_tone_color_and_label() {
        let theme = ConsoleTheme::dark();
        let status = CallStatus::from("failed");
        let span = StatusBadge::new(&status).span(&theme);
        assert_eq!(span.content, "[Failed]");
        assert_eq!(span.style.fg, Some(theme.error));
    }
}
