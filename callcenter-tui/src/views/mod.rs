//! View rendering dispatch.

pub mod agents;
pub mod call;
pub mod history;

use crate::keys::InputMode;
use crate::nav::Route;
use crate::state::App;
use crate::theme::notification_color;
use crate::widgets::Popup;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let screen = f.size();
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.bg).fg(app.theme.text)),
        screen,
    );
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(screen);

    render_header(f, app, layout[0]);

    match app.route {
        Route::Agents => agents::render(f, app, layout[1]),
        Route::Call => call::render(f, app, layout[1]),
        Route::History => history::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);

    if app.show_help {
        render_help(f, app);
    }
    if let Some(modal) = &app.modal {
        let area = f.size();
        Popup {
            title: modal.title.as_str(),
            lines: vec![Line::from(modal.message.as_str())],
            hint: "Enter/Esc to dismiss",
            border_style: Style::default().fg(app.theme.warning),
            hint_style: Style::default().fg(app.theme.text_dim),
        }
        .render(f, area);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let titles: Vec<Line> = Route::all()
        .iter()
        .enumerate()
        .map(|(idx, route)| Line::from(format!("{} {}", idx + 1, route.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.route.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    "AI Call Center",
                    Style::default().fg(app.theme.primary),
                )),
        )
        .style(Style::default().fg(app.theme.text_dim))
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    f.render_widget(tabs, area);
}

fn key_hints(app: &App) -> &'static str {
    match (app.route, app.mode()) {
        (Route::Agents, InputMode::Editing) => {
            "Tab next field • Ctrl-S save • Esc cancel"
        }
        (Route::Agents, InputMode::Normal) => {
            "j/k move • n new • e edit • d delete • r reload agent • ? help • q quit"
        }
        (Route::Call, InputMode::Editing) => {
            "Tab next field • ←/→ pick agent • Enter/Ctrl-S call • Esc done"
        }
        (Route::Call, InputMode::Normal) => {
            "i edit form • a pick agent • s call • r refresh active call • ? help • q quit"
        }
        (Route::History, InputMode::Editing) => "type to edit • Enter apply • Esc close",
        (Route::History, InputMode::Normal) => {
            "/ search • f status • a agent • c clear • u set status • x export • ? help • q quit"
        }
    }
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, style) = match app.notifications.last() {
        Some(note) => (
            format!("{}: {}", note.level.label(), note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        ),
        None => (
            key_hints(app).to_string(),
            Style::default().fg(app.theme.text_dim),
        ),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

const HELP_LINES: &[(&str, &str)] = &[
    ("1 / 2 / 3", "Agents, Make Call, Call History"),
    ("Tab / Shift-Tab", "next / previous view"),
    ("Ctrl-R", "reload the current view"),
    ("j / k", "move selection"),
    ("Agents", "n new, e edit, d delete, r reload selected"),
    ("Make Call", "i edit form, a pick agent, s place call"),
    ("Call History", "/ search, f status, a agent, c clear"),
    ("", "u set status, x export visible calls"),
    ("In fields", "Tab next field, Ctrl-S submit, Esc leave"),
    ("q / Ctrl-C", "quit"),
];

fn render_help(f: &mut Frame<'_>, app: &App) {
    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(keys, description)| {
            Line::from(vec![
                Span::styled(format!("{:<16}", keys), Style::default().fg(app.theme.primary)),
                Span::raw(*description),
            ])
        })
        .collect();
    let area = f.size();
    Popup {
        title: "Keybindings",
        lines,
        hint: "Esc or ? to close",
        border_style: Style::default().fg(app.theme.border_focus),
        hint_style: Style::default().fg(app.theme.text_dim),
    }
    .render(f, area);
}
