//! Call history view.

use crate::state::{App, HistoryViewState};
use crate::widgets::{render_field, DetailField, DetailPanel, FilterBar, FilterOption, StatusBadge};
use callcenter_core::{format_datetime, format_duration, format_optional_datetime, CallRecord};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let view = &app.history_view;
    let prompt_height = if view.status_prompt.is_some() { 3 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(prompt_height),
            Constraint::Min(0),
        ])
        .split(area);

    render_field(
        f,
        rows[0],
        &view.search_input,
        "[/] Search by phone number or agent name",
        view.search_focused,
        &app.theme,
    );
    render_filters(f, app, view, rows[1]);
    if let Some(prompt) = &view.status_prompt {
        let title = if prompt.submitting {
            "New status (saving...)"
        } else {
            "New status (Enter to apply, Esc to cancel)"
        };
        render_field(f, rows[2], &prompt.input, title, true, &app.theme);
    }

    let title = format!("Call History ({})", view.calls.len());
    if let Some(empty) = view.empty_state() {
        let widget = Paragraph::new(empty.message())
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.text_dim))
            .block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(widget, rows[3]);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);

    let visible = view.visible();
    let items: Vec<ListItem> = visible
        .iter()
        .map(|call| {
            let started = call
                .started_at
                .as_ref()
                .map(format_datetime)
                .unwrap_or_default();
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        view.agent_name(call.agent_id).to_string(),
                        Style::default().fg(app.theme.text),
                    ),
                    Span::raw(" "),
                    StatusBadge::new(&call.status).span(&app.theme),
                    Span::raw(" "),
                    Span::styled(
                        format_duration(call.duration_seconds),
                        Style::default().fg(app.theme.text_muted),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("{} → {}  {}", call.from_number, call.to_number, started),
                    Style::default().fg(app.theme.text_dim),
                )),
            ])
        })
        .collect();

    let mut state = ListState::default();
    state.select(view.selected);
    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("{} • showing {}", title, visible.len()))
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .bg(app.theme.bg_highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, columns[0], &mut state);

    render_detail_panel(f, app, view, view.selected_call(), columns[1]);
}

fn render_filters(f: &mut Frame<'_>, app: &App, view: &HistoryViewState, area: Rect) {
    let filters = [
        FilterOption {
            key: '/',
            label: "Search",
            value: if view.filter.search.is_empty() {
                "none".to_string()
            } else {
                format!("\"{}\"", view.filter.search)
            },
            active: !view.filter.search.is_empty(),
        },
        FilterOption {
            key: 'f',
            label: "Status",
            value: view.status_filter_label(),
            active: !view.filter.status.is_all(),
        },
        FilterOption {
            key: 'a',
            label: "Agent",
            value: view.agent_filter_label(),
            active: !view.filter.agent.is_all(),
        },
    ];
    FilterBar {
        title: "Filters ([c] clear)",
        filters: &filters,
        active_style: Style::default().fg(app.theme.primary),
        inactive_style: Style::default().fg(app.theme.text_dim),
        border_style: Style::default().fg(app.theme.border),
    }
    .render(f, area);
}

fn render_detail_panel(
    f: &mut Frame<'_>,
    app: &App,
    view: &HistoryViewState,
    call: Option<&CallRecord>,
    area: Rect,
) {
    let mut fields = Vec::new();
    if let Some(call) = call {
        fields.push(DetailField::new("Agent", view.agent_name(call.agent_id)));
        fields.push(DetailField::flagged(
            "Status",
            call.status.label(),
            StatusBadge::new(&call.status).style(&app.theme),
        ));
        fields.push(DetailField::new("From", call.from_number.clone()));
        fields.push(DetailField::new("To", call.to_number.clone()));
        fields.push(DetailField::new(
            "Duration",
            format_duration(call.duration_seconds),
        ));
        fields.push(DetailField::new(
            "Started",
            format_optional_datetime(call.started_at.as_ref()),
        ));
        fields.push(DetailField::new(
            "Ended",
            format_optional_datetime(call.ended_at.as_ref()),
        ));
        if let Some(provider_id) = call.provider_call_id.as_ref() {
            fields.push(DetailField::new("Call ID", provider_id.clone()));
        }
        if let Some(error) = call.error_message.as_ref() {
            fields.push(DetailField::flagged(
                "Error",
                error.clone(),
                Style::default()
                    .fg(app.theme.error)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(transcript) = call.transcript.as_ref() {
            fields.push(DetailField::new("Transcript", transcript.clone()));
        }
    }

    DetailPanel {
        title: "Call Details",
        fields,
        label_style: Style::default().fg(app.theme.secondary),
        placeholder: "Select a call",
    }
    .render(f, area);
}
