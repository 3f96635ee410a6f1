//! Call initiation view.

use crate::state::{App, CallField, CallViewState};
use crate::widgets::{render_field, DetailField, DetailPanel, StatusBadge};
use callcenter_core::{
    format_datetime, format_duration, format_time, resolve_agent_name, CallRecord,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(14), Constraint::Min(0)])
        .split(columns[0]);

    render_form(f, app, &app.call_view, left[0]);
    render_active_call(f, app, app.call_view.active_call.as_ref(), left[1]);
    render_recent_calls(f, app, &app.call_view, columns[1]);
}

fn render_form(f: &mut Frame<'_>, app: &App, view: &CallViewState, area: Rect) {
    let block = Block::default()
        .title("Initiate Call")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if view.form.editing {
            app.theme.primary
        } else {
            app.theme.border
        }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    let focused = |field: CallField| view.form.editing && view.form.focus == field;

    let agent_label = if view.agents_loading {
        "Loading agents...".to_string()
    } else {
        match view.selected_agent() {
            Some(agent) => format!("◀ {} ▶", agent.name),
            None => "Choose an agent...".to_string(),
        }
    };
    let agent_border = if focused(CallField::Agent) {
        app.theme.border_focus
    } else {
        app.theme.border
    };
    let picker = Paragraph::new(agent_label).block(
        Block::default()
            .title(CallField::Agent.label())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(agent_border)),
    );
    f.render_widget(picker, rows[0]);

    render_field(
        f,
        rows[1],
        &view.form.from_number,
        CallField::From.label(),
        focused(CallField::From),
        &app.theme,
    );
    render_field(
        f,
        rows[2],
        &view.form.to_number,
        CallField::To.label(),
        focused(CallField::To),
        &app.theme,
    );

    let action = if view.submitting {
        Span::styled(
            "Initiating Call...",
            Style::default()
                .fg(app.theme.warning)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            "[s] Initiate Call",
            Style::default().fg(app.theme.primary),
        )
    };
    f.render_widget(Paragraph::new(Line::from(action)), rows[3]);
}

fn render_active_call(f: &mut Frame<'_>, app: &App, call: Option<&CallRecord>, area: Rect) {
    let mut fields = Vec::new();
    if let Some(call) = call {
        fields.push(DetailField::flagged(
            "Status",
            call.status.label(),
            StatusBadge::new(&call.status).style(&app.theme),
        ));
        fields.push(DetailField::new("From", call.from_number.clone()));
        fields.push(DetailField::new("To", call.to_number.clone()));
        if let Some(started) = call.started_at.as_ref() {
            fields.push(DetailField::new("Started", format_datetime(started)));
        }
        if let Some(provider_id) = call.provider_call_id.as_ref() {
            fields.push(DetailField::new("Call ID", provider_id.clone()));
        }
    }
    DetailPanel {
        title: "Active Call",
        fields,
        label_style: Style::default().fg(app.theme.secondary),
        placeholder: "No active call",
    }
    .render(f, area);
}

fn render_recent_calls(f: &mut Frame<'_>, app: &App, view: &CallViewState, area: Rect) {
    let block = Block::default().title("Recent Calls").borders(Borders::ALL);
    if view.calls_loading {
        f.render_widget(Paragraph::new("Loading calls...").block(block), area);
        return;
    }
    if view.recent_calls.is_empty() {
        f.render_widget(
            Paragraph::new("No calls yet")
                .style(Style::default().fg(app.theme.text_dim))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = view
        .recent_calls
        .iter()
        .map(|call| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        resolve_agent_name(&view.agents, call.agent_id).to_string(),
                        Style::default().fg(app.theme.text),
                    ),
                    Span::raw(" "),
                    StatusBadge::new(&call.status).span(&app.theme),
                    Span::raw(" "),
                    Span::styled(
                        call.started_at.as_ref().map(format_time).unwrap_or_default(),
                        Style::default().fg(app.theme.text_muted),
                    ),
                ]),
                Line::from(vec![
                    Span::styled(
                        format!("{} → {}", call.from_number, call.to_number),
                        Style::default().fg(app.theme.text_dim),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format_duration(call.duration_seconds),
                        Style::default().fg(app.theme.text_muted),
                    ),
                ]),
            ])
        })
        .collect();

    let mut state = ListState::default();
    state.select(view.selected);
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .bg(app.theme.bg_highlight),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut state);
}
