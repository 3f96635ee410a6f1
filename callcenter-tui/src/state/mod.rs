//! Application state and per-view state definitions.

pub mod agents;
pub mod call;
pub mod form;
pub mod history;

pub use agents::{AgentField, AgentForm, AgentViewState, FormMode};
pub use call::{CallField, CallForm, CallViewState, SubmitBlocked};
pub use form::FormError;
pub use history::{EmptyState, HistoryViewState, StatusPrompt};

use crate::config::TuiConfig;
use crate::dispatch::Command;
use crate::events::{ApiEvent, Ticket};
use crate::export;
use crate::keys::{map_key, Action, InputMode};
use crate::nav::Route;
use crate::notifications::{Modal, Notification, NotificationLevel};
use crate::theme::ConsoleTheme;
use chrono::{Duration, Utc};
use crossterm::event::{KeyCode, KeyEvent};

/// Footer notifications older than this are pruned on tick.
const NOTIFICATION_TTL_SECS: i64 = 6;
const MAX_NOTIFICATIONS: usize = 5;

/// User-facing outcome of applying a backend result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Notice(NotificationLevel, String),
    Alert(Modal),
}

pub struct App {
    pub config: TuiConfig,
    pub theme: ConsoleTheme,
    pub route: Route,
    /// Bumped on every activation; results for older tickets are dropped.
    pub ticket: Ticket,

    pub agent_view: AgentViewState,
    pub call_view: CallViewState,
    pub history_view: HistoryViewState,

    pub notifications: Vec<Notification>,
    pub modal: Option<Modal>,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: TuiConfig) -> Self {
        let theme = ConsoleTheme::from_name(&config.theme.name);
        Self {
            config,
            theme,
            route: Route::default(),
            ticket: 0,
            agent_view: AgentViewState::new(),
            call_view: CallViewState::new(),
            history_view: HistoryViewState::new(),
            notifications: Vec::new(),
            modal: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Enter `route` with fresh state and return the fetches it needs.
    pub fn activate(&mut self, route: Route) -> Vec<Command> {
        self.ticket = self.ticket.wrapping_add(1);
        self.route = route;
        self.agent_view = AgentViewState::new();
        self.call_view = CallViewState::new();
        self.history_view = HistoryViewState::new();
        tracing::info!(route = route.path(), ticket = self.ticket, "activating view");
        match route {
            Route::Agents => vec![self.agent_view.begin_load()],
            Route::Call => self.call_view.begin_load(self.config.recent_calls_limit),
            Route::History => self.history_view.begin_load(self.config.history_limit),
        }
    }

    pub fn mode(&self) -> InputMode {
        if self.modal.is_some() || self.show_help {
            return InputMode::Normal;
        }
        let editing = match self.route {
            Route::Agents => self.agent_view.form.is_some(),
            Route::Call => self.call_view.form.editing,
            Route::History => {
                self.history_view.search_focused || self.history_view.status_prompt.is_some()
            }
        };
        if editing {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let excess = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..excess);
        }
    }

    pub fn on_tick(&mut self) {
        let cutoff = Utc::now() - Duration::seconds(NOTIFICATION_TTL_SECS);
        self.notifications.retain(|n| n.created_at > cutoff);
    }

    fn feedback(&mut self, feedback: Option<Feedback>) {
        match feedback {
            Some(Feedback::Notice(level, message)) => self.notify(level, message),
            Some(Feedback::Alert(modal)) => self.modal = Some(modal),
            None => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let Some(action) = map_key(key, self.mode()) else {
            return Vec::new();
        };
        if self.modal.is_some() {
            match action {
                Action::Quit => self.should_quit = true,
                Action::Confirm | Action::Cancel => self.modal = None,
                _ => {}
            }
            return Vec::new();
        }
        if self.show_help {
            match action {
                Action::Quit => self.should_quit = true,
                Action::Confirm | Action::Cancel | Action::OpenHelp => self.show_help = false,
                _ => {}
            }
            return Vec::new();
        }
        self.handle_action(action)
    }

    pub fn handle_action(&mut self, action: Action) -> Vec<Command> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return Vec::new();
            }
            Action::NextView => return self.activate(self.route.next()),
            Action::PrevView => return self.activate(self.route.previous()),
            Action::SwitchView(index) => {
                return match Route::from_index(index) {
                    Some(route) => self.activate(route),
                    None => Vec::new(),
                };
            }
            Action::Refresh => return self.activate(self.route),
            Action::OpenHelp => {
                self.show_help = true;
                return Vec::new();
            }
            _ => {}
        }
        match self.route {
            Route::Agents => self.handle_agents_action(action),
            Route::Call => self.handle_call_action(action),
            Route::History => self.handle_history_action(action),
        }
    }

    fn handle_agents_action(&mut self, action: Action) -> Vec<Command> {
        let view = &mut self.agent_view;
        if let Some(form) = view.form.as_mut() {
            match action {
                Action::Cancel => view.cancel_form(),
                Action::NextField => form.focus = form.focus.next(),
                Action::PrevField => form.focus = form.focus.previous(),
                Action::Confirm if !form.focus.is_multiline() => form.focus = form.focus.next(),
                Action::Confirm => form.input(KeyEvent::from(KeyCode::Enter)),
                Action::Input(key) => form.input(key),
                Action::Submit => return self.submit_agent_form(),
                _ => {}
            }
            return Vec::new();
        }
        match action {
            Action::MoveDown => view.select_next(),
            Action::MoveUp => view.select_previous(),
            Action::NewItem => {
                view.open_create();
            }
            Action::EditItem | Action::Confirm => {
                view.open_edit();
            }
            Action::DeleteItem => return view.delete_selected().into_iter().collect(),
            Action::RefreshItem => return view.refresh_selected().into_iter().collect(),
            _ => {}
        }
        Vec::new()
    }

    fn submit_agent_form(&mut self) -> Vec<Command> {
        match self.agent_view.submit_form() {
            Ok(command) => vec![command],
            Err(FormError::InFlight) | Err(FormError::NotOpen) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "agent draft rejected");
                self.notify(NotificationLevel::Warning, err.to_string());
                Vec::new()
            }
        }
    }

    fn handle_call_action(&mut self, action: Action) -> Vec<Command> {
        let view = &mut self.call_view;
        if view.form.editing {
            match action {
                Action::Cancel => view.form.editing = false,
                Action::NextField => view.form.focus = view.form.focus.next(),
                Action::PrevField => view.form.focus = view.form.focus.previous(),
                Action::Submit => return self.submit_call(),
                Action::Confirm if view.form.focus == CallField::To => return self.submit_call(),
                Action::Confirm => view.form.focus = view.form.focus.next(),
                Action::Input(key) if !view.form.focus.is_text() => match key.code {
                    KeyCode::Left | KeyCode::Up => view.cycle_agent(false),
                    KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => view.cycle_agent(true),
                    _ => {}
                },
                Action::Input(key) => view.form.input(key),
                _ => {}
            }
            return Vec::new();
        }
        match action {
            Action::BeginEdit | Action::Confirm => view.form.editing = true,
            Action::CycleAgent | Action::MoveRight => view.cycle_agent(true),
            Action::MoveLeft => view.cycle_agent(false),
            Action::MoveDown => view.select_next(),
            Action::MoveUp => view.select_previous(),
            Action::Submit => return self.submit_call(),
            Action::RefreshItem => return view.refresh_active().into_iter().collect(),
            _ => {}
        }
        Vec::new()
    }

    fn submit_call(&mut self) -> Vec<Command> {
        match self.call_view.submit() {
            Ok(command) => vec![command],
            Err(SubmitBlocked::InFlight) => Vec::new(),
            Err(SubmitBlocked::MissingFields) => {
                self.modal = Some(call::missing_fields_alert());
                Vec::new()
            }
        }
    }

    fn handle_history_action(&mut self, action: Action) -> Vec<Command> {
        let view = &mut self.history_view;
        if view.status_prompt.is_some() {
            match action {
                Action::Cancel => view.cancel_status_prompt(),
                Action::Confirm | Action::Submit => match view.submit_status() {
                    Ok(command) => return vec![command],
                    Err(FormError::InFlight) => {}
                    Err(err) => self.notify(NotificationLevel::Warning, err.to_string()),
                },
                Action::Input(key) => view.status_prompt_input(key),
                _ => {}
            }
            return Vec::new();
        }
        if view.search_focused {
            match action {
                Action::Cancel | Action::Confirm | Action::NextField | Action::PrevField => {
                    view.blur_search()
                }
                Action::Input(key) => view.input_search(key),
                _ => {}
            }
            return Vec::new();
        }
        match action {
            Action::OpenSearch => view.focus_search(),
            Action::CycleStatus => view.cycle_status(),
            Action::CycleAgent => view.cycle_agent(),
            Action::ClearFilters => view.clear_filters(),
            Action::MoveDown => view.select_next(),
            Action::MoveUp => view.select_previous(),
            Action::UpdateStatus => {
                view.open_status_prompt();
            }
            Action::Export => self.export_history(),
            _ => {}
        }
        Vec::new()
    }

    /// Write the visible history records to the export directory.
    pub fn export_history(&mut self) {
        let outcome = {
            let visible = self.history_view.visible();
            export::export_calls(&self.config.export_dir, &visible, Utc::now())
        };
        match outcome {
            Ok(path) => {
                tracing::info!(path = %path.display(), "call history exported");
                self.notify(
                    NotificationLevel::Success,
                    format!("Exported to {}", path.display()),
                );
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to export call history");
                self.notify(NotificationLevel::Error, format!("Export failed: {}", err));
            }
        }
    }

    /// Apply one backend result. Results from an earlier activation are dropped.
    pub fn apply_api_event(&mut self, ticket: Ticket, event: ApiEvent) {
        if ticket != self.ticket {
            tracing::debug!(ticket, current = self.ticket, "dropping stale result");
            return;
        }
        let feedback = match (self.route, event) {
            (Route::Agents, ApiEvent::AgentsLoaded(result)) => {
                self.agent_view.apply_loaded(result);
                None
            }
            (Route::Agents, ApiEvent::AgentFetched { agent_id, result }) => {
                self.agent_view.apply_fetched(agent_id, result)
            }
            (Route::Agents, ApiEvent::AgentCreated { submission, result }) => {
                self.agent_view.apply_created(submission, result)
            }
            (
                Route::Agents,
                ApiEvent::AgentUpdated {
                    submission,
                    agent_id,
                    result,
                },
            ) => self.agent_view.apply_updated(submission, agent_id, result),
            (Route::Agents, ApiEvent::AgentDeleted { agent_id, result }) => {
                self.agent_view.apply_deleted(agent_id, result)
            }
            (Route::Call, ApiEvent::AgentsLoaded(result)) => {
                self.call_view.apply_agents_loaded(result);
                None
            }
            (Route::Call, ApiEvent::CallsLoaded(result)) => {
                self.call_view.apply_calls_loaded(result);
                None
            }
            (Route::Call, ApiEvent::CallInitiated(result)) => self.call_view.apply_initiated(result),
            (Route::Call, ApiEvent::CallFetched { call_id, result }) => {
                self.call_view.apply_fetched(call_id, result);
                None
            }
            (Route::History, ApiEvent::AgentsLoaded(result)) => {
                self.history_view.apply_agents_loaded(result);
                None
            }
            (Route::History, ApiEvent::CallsLoaded(result)) => {
                self.history_view.apply_calls_loaded(result);
                None
            }
            (Route::History, ApiEvent::CallStatusUpdated { call_id, result }) => {
                self.history_view.apply_status_updated(call_id, result)
            }
            (route, event) => {
                tracing::warn!(route = route.path(), ?event, "unexpected result for view");
                None
            }
        };
        self.feedback(feedback);
    }
}
