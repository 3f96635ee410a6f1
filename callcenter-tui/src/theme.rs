//! Console palettes and color utilities.

use crate::notifications::NotificationLevel;
use callcenter_core::StatusTone;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct ConsoleTheme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl ConsoleTheme {
    /// Unknown names fall back to the dark palette; config validation rejects them earlier.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(17, 24, 39),
            bg_highlight: Color::Rgb(55, 65, 81),
            primary: Color::Rgb(96, 165, 250),
            secondary: Color::Rgb(167, 139, 250),
            success: Color::Rgb(74, 222, 128),
            warning: Color::Rgb(250, 204, 21),
            error: Color::Rgb(248, 113, 113),
            info: Color::Rgb(96, 165, 250),
            text: Color::Rgb(243, 244, 246),
            text_dim: Color::Rgb(156, 163, 175),
            text_muted: Color::Rgb(107, 114, 128),
            border: Color::Rgb(75, 85, 99),
            border_focus: Color::Rgb(96, 165, 250),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(249, 250, 251),
            bg_highlight: Color::Rgb(229, 231, 235),
            primary: Color::Rgb(37, 99, 235),
            secondary: Color::Rgb(124, 58, 237),
            success: Color::Rgb(22, 163, 74),
            warning: Color::Rgb(202, 138, 4),
            error: Color::Rgb(220, 38, 38),
            info: Color::Rgb(37, 99, 235),
            text: Color::Rgb(17, 24, 39),
            text_dim: Color::Rgb(75, 85, 99),
            text_muted: Color::Rgb(156, 163, 175),
            border: Color::Rgb(209, 213, 219),
            border_focus: Color::Rgb(37, 99, 235),
        }
    }
}

pub fn status_tone_color(tone: StatusTone, theme: &ConsoleTheme) -> Color {
    match tone {
        StatusTone::Success => theme.success,
        StatusTone::Error => theme.error,
        StatusTone::Info => theme.info,
        StatusTone::Pending => theme.warning,
        StatusTone::Neutral => theme.text_dim,
    }
}

pub fn notification_color(level: NotificationLevel, theme: &ConsoleTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
        NotificationLevel::Success => theme.success,
    }
}

pub fn active_color(is_active: bool, theme: &ConsoleTheme) -> Color {
    if is_active {
        theme.success
    } else {
        theme.text_muted
    }
}
