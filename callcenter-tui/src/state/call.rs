//! Call initiation view state.

use super::agents::{next_index, previous_index};
use super::form::{field_text, text_field};
use super::Feedback;
use crate::api_client::ApiClientError;
use crate::dispatch::Command;
use crate::notifications::{Modal, NotificationLevel};
use callcenter_core::{Agent, AgentId, CallId, CallRecord, InitiateCallRequest};
use crossterm::event::KeyEvent;
use tui_textarea::TextArea;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const INITIATE_FAILED_MESSAGE: &str =
    "Failed to initiate call. Please check your configuration.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallField {
    Agent,
    From,
    To,
}

impl CallField {
    pub fn label(&self) -> &'static str {
        match self {
            CallField::Agent => "Select Agent",
            CallField::From => "From Number",
            CallField::To => "To Number",
        }
    }

    pub fn next(&self) -> CallField {
        match self {
            CallField::Agent => CallField::From,
            CallField::From => CallField::To,
            CallField::To => CallField::Agent,
        }
    }

    pub fn previous(&self) -> CallField {
        match self {
            CallField::Agent => CallField::To,
            CallField::From => CallField::Agent,
            CallField::To => CallField::From,
        }
    }

    /// The agent field is a picker, not free text.
    pub fn is_text(&self) -> bool {
        !matches!(self, CallField::Agent)
    }
}

#[derive(Debug, Clone)]
pub struct CallForm {
    pub agent_id: Option<AgentId>,
    pub from_number: TextArea<'static>,
    pub to_number: TextArea<'static>,
    pub focus: CallField,
    pub editing: bool,
}

impl CallForm {
    pub fn new() -> Self {
        Self {
            agent_id: None,
            from_number: text_field(""),
            to_number: text_field(""),
            focus: CallField::Agent,
            editing: false,
        }
    }

    pub fn input(&mut self, key: KeyEvent) {
        match self.focus {
            CallField::From => {
                self.from_number.input(key);
            }
            CallField::To => {
                self.to_number.input(key);
            }
            CallField::Agent => {}
        }
    }

    pub fn set_number(&mut self, field: CallField, text: &str) {
        match field {
            CallField::From => self.from_number = text_field(text),
            CallField::To => self.to_number = text_field(text),
            CallField::Agent => {}
        }
    }

    /// Numbers are sent exactly as typed; only empty fields are missing.
    fn request(&self) -> Option<InitiateCallRequest> {
        let agent_id = self.agent_id?;
        let from_number = field_text(&self.from_number);
        let to_number = field_text(&self.to_number);
        if from_number.is_empty() || to_number.is_empty() {
            return None;
        }
        Some(InitiateCallRequest {
            agent_id,
            from_number,
            to_number,
        })
    }
}

impl Default for CallForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a submit produced no request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    InFlight,
    MissingFields,
}

#[derive(Debug, Clone)]
pub struct CallViewState {
    pub agents: Vec<Agent>,
    pub recent_calls: Vec<CallRecord>,
    pub agents_loading: bool,
    pub calls_loading: bool,
    pub form: CallForm,
    pub submitting: bool,
    pub active_call: Option<CallRecord>,
    pub selected: Option<usize>,
}

impl CallViewState {
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            recent_calls: Vec::new(),
            agents_loading: false,
            calls_loading: false,
            form: CallForm::new(),
            submitting: false,
            active_call: None,
            selected: None,
        }
    }

    /// Agents and recent calls load in parallel.
    pub fn begin_load(&mut self, limit: u32) -> Vec<Command> {
        self.agents_loading = true;
        self.calls_loading = true;
        vec![Command::LoadAgents, Command::LoadCalls { limit }]
    }

    pub fn is_loading(&self) -> bool {
        self.agents_loading || self.calls_loading
    }

    pub fn apply_agents_loaded(&mut self, result: Result<Vec<Agent>, ApiClientError>) {
        self.agents_loading = false;
        match result {
            Ok(agents) => self.agents = agents,
            Err(err) => tracing::error!(error = %err, "Failed to load agents"),
        }
    }

    pub fn apply_calls_loaded(&mut self, result: Result<Vec<CallRecord>, ApiClientError>) {
        self.calls_loading = false;
        match result {
            Ok(calls) => {
                self.recent_calls = calls;
                self.selected = (!self.recent_calls.is_empty()).then_some(0);
            }
            Err(err) => tracing::error!(error = %err, "Failed to load recent calls"),
        }
    }

    pub fn selected_agent(&self) -> Option<&Agent> {
        let agent_id = self.form.agent_id?;
        self.agents.iter().find(|agent| agent.id == Some(agent_id))
    }

    /// Step the agent picker through agents that have an identifier.
    pub fn cycle_agent(&mut self, forward: bool) {
        let ids: Vec<AgentId> = self.agents.iter().filter_map(|agent| agent.id).collect();
        if ids.is_empty() {
            self.form.agent_id = None;
            return;
        }
        let current = self
            .form
            .agent_id
            .and_then(|id| ids.iter().position(|candidate| *candidate == id));
        let next = if forward {
            next_index(current, ids.len())
        } else {
            previous_index(current, ids.len())
        };
        self.form.agent_id = next.map(|idx| ids[idx]);
    }

    pub fn select_next(&mut self) {
        self.selected = next_index(self.selected, self.recent_calls.len());
    }

    pub fn select_previous(&mut self) {
        self.selected = previous_index(self.selected, self.recent_calls.len());
    }

    pub fn submit(&mut self) -> Result<Command, SubmitBlocked> {
        if self.submitting {
            return Err(SubmitBlocked::InFlight);
        }
        let request = self.form.request().ok_or(SubmitBlocked::MissingFields)?;
        self.submitting = true;
        self.form.editing = false;
        Ok(Command::InitiateCall(request))
    }

    pub fn apply_initiated(&mut self, result: Result<CallRecord, ApiClientError>) -> Option<Feedback> {
        self.submitting = false;
        match result {
            Ok(call) => {
                tracing::info!(call_id = ?call.id, status = %call.status, "call initiated");
                self.recent_calls.insert(0, call.clone());
                self.selected = Some(0);
                self.active_call = Some(call);
                let focus = self.form.focus;
                self.form = CallForm::new();
                self.form.focus = focus;
                Some(Feedback::Notice(
                    NotificationLevel::Success,
                    "Call initiated".to_string(),
                ))
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to initiate call");
                Some(Feedback::Alert(Modal::new("Call Failed", INITIATE_FAILED_MESSAGE)))
            }
        }
    }

    pub fn refresh_active(&self) -> Option<Command> {
        self.active_call
            .as_ref()
            .and_then(|call| call.id)
            .map(Command::FetchCall)
    }

    pub fn apply_fetched(
        &mut self,
        call_id: CallId,
        result: Result<Option<CallRecord>, ApiClientError>,
    ) {
        match result {
            Ok(Some(call)) => {
                if let Some(existing) = self
                    .recent_calls
                    .iter_mut()
                    .find(|existing| existing.id == Some(call_id))
                {
                    *existing = call.clone();
                }
                if self.active_call.as_ref().and_then(|c| c.id) == Some(call_id) {
                    self.active_call = Some(call);
                }
            }
            Ok(None) => tracing::warn!(%call_id, "call record not found"),
            Err(err) => tracing::error!(%call_id, error = %err, "Failed to fetch call record"),
        }
    }
}

impl Default for CallViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Modal shown when submit is attempted with empty fields.
pub fn missing_fields_alert() -> Modal {
    Modal::new("Missing Fields", MISSING_FIELDS_MESSAGE)
}
