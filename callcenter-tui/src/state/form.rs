//! Text field helpers shared by the view forms.

use callcenter_core::SettingsParseError;
use tui_textarea::{CursorMove, TextArea};

/// Build an editable field seeded with `initial`, cursor at the end.
pub fn text_field(initial: &str) -> TextArea<'static> {
    let mut lines: Vec<String> = initial.lines().map(str::to_string).collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    let mut field = TextArea::new(lines);
    field.move_cursor(CursorMove::Bottom);
    field.move_cursor(CursorMove::End);
    field
}

pub fn field_text(field: &TextArea<'_>) -> String {
    field.lines().join("\n")
}

pub fn is_blank(field: &TextArea<'_>) -> bool {
    field.lines().iter().all(|line| line.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{field}: {source}")]
    Settings {
        field: &'static str,
        #[source]
        source: SettingsParseError,
    },
    #[error("{0} must not be empty")]
    MissingValue(&'static str),
    #[error("a request for this form is already pending")]
    InFlight,
    #[error("no form is open")]
    NotOpen,
}
