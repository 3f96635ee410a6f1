//! Agent management view.

use crate::state::{AgentField, AgentForm, App, FormMode};
use crate::theme::active_color;
use crate::widgets::{render_field, DetailField, DetailPanel};
use callcenter_core::{settings_to_text, Agent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let view = &app.agent_view;
    if let Some(form) = &view.form {
        render_form(f, app, form, area);
        return;
    }
    if view.loading {
        render_message(f, app, area, "Loading agents...", None);
        return;
    }
    if view.agents.is_empty() {
        render_message(
            f,
            app,
            area,
            "No agents created yet",
            Some("Press n to create your first agent"),
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let items: Vec<ListItem> = view
        .agents
        .iter()
        .map(|agent| {
            let badge = if agent.is_active { "Active" } else { "Inactive" };
            ListItem::new(Line::from(vec![
                Span::styled(agent.name.clone(), Style::default().fg(app.theme.text)),
                Span::raw(" "),
                Span::styled(
                    format!("[{}]", badge),
                    Style::default().fg(active_color(agent.is_active, &app.theme)),
                ),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(view.selected);

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("AI Agents ({})", view.agents.len()))
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .bg(app.theme.bg_highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[0], &mut state);

    render_detail_panel(f, app, view.selected_agent(), chunks[1]);
}

fn render_detail_panel(f: &mut Frame<'_>, app: &App, agent: Option<&Agent>, area: Rect) {
    let mut fields = Vec::new();
    if let Some(agent) = agent {
        fields.push(DetailField::new("Name", agent.name.clone()));
        fields.push(DetailField::new(
            "Status",
            if agent.is_active { "Active" } else { "Inactive" },
        ));
        fields.push(DetailField::new(
            "Created",
            agent
                .created_at
                .as_ref()
                .map(callcenter_core::format_date)
                .unwrap_or_else(|| "Unknown".to_string()),
        ));
        if let Some(id) = agent.id {
            fields.push(DetailField::new("ID", id.to_string()));
        }
        fields.push(DetailField::new("Prompt", agent.prompt.clone()));
        if let Some(voice) = agent.voice_settings.as_ref() {
            fields.push(DetailField::new("Voice", settings_to_text(Some(voice))));
        }
        if let Some(personality) = agent.personality_settings.as_ref() {
            fields.push(DetailField::new(
                "Personality",
                settings_to_text(Some(personality)),
            ));
        }
    }

    DetailPanel {
        title: "Details",
        fields,
        label_style: Style::default().fg(app.theme.secondary),
        placeholder: "Select an agent",
    }
    .render(f, area);
}

fn render_form(f: &mut Frame<'_>, app: &App, form: &AgentForm, area: Rect) {
    let title = match form.mode {
        FormMode::Create => "Create New Agent",
        FormMode::Edit(_) => "Edit Agent",
    };
    let title = if form.is_submitting() {
        format!("{} (saving...)", title)
    } else {
        title.to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.primary));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(5),
            Constraint::Length(5),
        ])
        .split(inner);

    for (field, rect) in AgentField::all().iter().zip(chunks.iter()) {
        render_field(
            f,
            *rect,
            form.field(*field),
            field.label(),
            form.focus == *field,
            &app.theme,
        );
    }
}

fn render_message(f: &mut Frame<'_>, app: &App, area: Rect, message: &str, hint: Option<&str>) {
    let mut lines = vec![Line::styled(
        message.to_string(),
        Style::default().fg(app.theme.text),
    )];
    if let Some(hint) = hint {
        lines.push(Line::styled(
            hint.to_string(),
            Style::default().fg(app.theme.text_dim),
        ));
    }
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title("AI Agents").borders(Borders::ALL));
    f.render_widget(widget, area);
}
