//! Call history view state.

use super::agents::{next_index, previous_index};
use super::form::{field_text, is_blank, text_field, FormError};
use super::Feedback;
use crate::api_client::ApiClientError;
use crate::dispatch::Command;
use crate::notifications::NotificationLevel;
use callcenter_core::{
    agent_options, cycle, resolve_agent_name, status_options, Agent, AgentId, CallFilter, CallId,
    CallRecord, CallStatus, Selection, UpdateCallStatusRequest,
};
use crossterm::event::KeyEvent;
use tui_textarea::TextArea;

pub const ALL_STATUSES: &str = "All Statuses";
pub const ALL_AGENTS: &str = "All Agents";

/// What the list area shows when there is nothing to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    Loading,
    NoCalls,
    NoMatches,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::Loading => "Loading call history...",
            EmptyState::NoCalls => "No calls yet",
            EmptyState::NoMatches => "No matching calls",
        }
    }
}

/// Inline prompt for a new status on one record.
#[derive(Debug, Clone)]
pub struct StatusPrompt {
    pub call_id: CallId,
    pub input: TextArea<'static>,
    pub submitting: bool,
}

#[derive(Debug, Clone)]
pub struct HistoryViewState {
    pub calls: Vec<CallRecord>,
    pub agents: Vec<Agent>,
    pub calls_loading: bool,
    pub agents_loading: bool,
    pub filter: CallFilter,
    pub search_input: TextArea<'static>,
    pub search_focused: bool,
    pub selected: Option<usize>,
    pub status_prompt: Option<StatusPrompt>,
}

impl HistoryViewState {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            agents: Vec::new(),
            calls_loading: false,
            agents_loading: false,
            filter: CallFilter::new(),
            search_input: text_field(""),
            search_focused: false,
            selected: None,
            status_prompt: None,
        }
    }

    pub fn begin_load(&mut self, limit: u32) -> Vec<Command> {
        self.calls_loading = true;
        self.agents_loading = true;
        vec![Command::LoadCalls { limit }, Command::LoadAgents]
    }

    /// Loading ends only when both fetches have resolved.
    pub fn is_loading(&self) -> bool {
        self.calls_loading || self.agents_loading
    }

    pub fn apply_calls_loaded(&mut self, result: Result<Vec<CallRecord>, ApiClientError>) {
        self.calls_loading = false;
        match result {
            Ok(calls) => {
                tracing::debug!(count = calls.len(), "call history loaded");
                self.calls = calls;
            }
            Err(err) => tracing::error!(error = %err, "Failed to load call history"),
        }
        self.clamp_selection();
    }

    pub fn apply_agents_loaded(&mut self, result: Result<Vec<Agent>, ApiClientError>) {
        self.agents_loading = false;
        match result {
            Ok(agents) => self.agents = agents,
            Err(err) => tracing::error!(error = %err, "Failed to load agents"),
        }
        self.clamp_selection();
    }

    pub fn visible(&self) -> Vec<&CallRecord> {
        self.filter.apply(&self.calls, &self.agents)
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.is_loading() {
            return Some(EmptyState::Loading);
        }
        if self.calls.is_empty() {
            return Some(EmptyState::NoCalls);
        }
        if self.visible().is_empty() {
            return Some(EmptyState::NoMatches);
        }
        None
    }

    pub fn agent_name(&self, agent_id: AgentId) -> &str {
        resolve_agent_name(&self.agents, agent_id)
    }

    pub fn status_options(&self) -> Vec<Selection<CallStatus>> {
        status_options(&self.calls)
    }

    pub fn agent_options(&self) -> Vec<Selection<AgentId>> {
        agent_options(&self.agents)
    }

    pub fn status_filter_label(&self) -> String {
        match &self.filter.status {
            Selection::All => ALL_STATUSES.to_string(),
            Selection::Only(status) => status.label(),
        }
    }

    pub fn agent_filter_label(&self) -> String {
        match self.filter.agent {
            Selection::All => ALL_AGENTS.to_string(),
            Selection::Only(agent_id) => self.agent_name(agent_id).to_string(),
        }
    }

    pub fn cycle_status(&mut self) {
        self.filter.status = cycle(&self.status_options(), &self.filter.status);
        self.clamp_selection();
    }

    pub fn cycle_agent(&mut self) {
        self.filter.agent = cycle(&self.agent_options(), &self.filter.agent);
        self.clamp_selection();
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.search_input = text_field("");
        self.search_focused = false;
        self.clamp_selection();
    }

    pub fn focus_search(&mut self) {
        self.search_focused = true;
    }

    pub fn blur_search(&mut self) {
        self.search_focused = false;
    }

    /// Feed a key to the search box and re-filter.
    pub fn input_search(&mut self, key: KeyEvent) {
        self.search_input.input(key);
        self.set_search(&field_text(&self.search_input));
    }

    pub fn set_search(&mut self, text: &str) {
        if field_text(&self.search_input) != text {
            self.search_input = text_field(text);
        }
        self.filter.search = text.to_string();
        self.clamp_selection();
    }

    pub fn select_next(&mut self) {
        self.selected = next_index(self.selected, self.visible().len());
    }

    pub fn select_previous(&mut self) {
        self.selected = previous_index(self.selected, self.visible().len());
    }

    pub fn selected_call(&self) -> Option<&CallRecord> {
        let visible = self.visible();
        self.selected.and_then(|idx| visible.get(idx).copied())
    }

    pub fn open_status_prompt(&mut self) -> bool {
        let Some(call) = self.selected_call() else {
            return false;
        };
        let Some(call_id) = call.id else {
            return false;
        };
        let current = call.status.to_string();
        self.status_prompt = Some(StatusPrompt {
            call_id,
            input: text_field(&current),
            submitting: false,
        });
        true
    }

    pub fn cancel_status_prompt(&mut self) {
        self.status_prompt = None;
    }

    pub fn status_prompt_input(&mut self, key: KeyEvent) {
        if let Some(prompt) = self.status_prompt.as_mut() {
            prompt.input.input(key);
        }
    }

    pub fn submit_status(&mut self) -> Result<Command, FormError> {
        let prompt = self.status_prompt.as_mut().ok_or(FormError::NotOpen)?;
        if prompt.submitting {
            return Err(FormError::InFlight);
        }
        if is_blank(&prompt.input) {
            return Err(FormError::MissingValue("status"));
        }
        prompt.submitting = true;
        Ok(Command::UpdateCallStatus(UpdateCallStatusRequest {
            call_id: prompt.call_id,
            status: CallStatus::new(field_text(&prompt.input).trim()),
            metadata: None,
        }))
    }

    pub fn apply_status_updated(
        &mut self,
        call_id: CallId,
        result: Result<Option<CallRecord>, ApiClientError>,
    ) -> Option<Feedback> {
        let feedback = match result {
            Ok(Some(call)) => {
                let label = call.status.label();
                if let Some(existing) = self.calls.iter_mut().find(|c| c.id == Some(call_id)) {
                    *existing = call;
                }
                Some(Feedback::Notice(
                    NotificationLevel::Success,
                    format!("Call status set to {}", label),
                ))
            }
            Ok(None) => {
                tracing::warn!(%call_id, "status update returned no record");
                None
            }
            Err(err) => {
                tracing::error!(%call_id, error = %err, "Failed to update call status");
                None
            }
        };
        if self.status_prompt.as_ref().map(|p| p.call_id) == Some(call_id) {
            self.status_prompt = None;
        }
        self.clamp_selection();
        feedback
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = match (self.selected, len) {
            (_, 0) => None,
            (Some(idx), len) => Some(idx.min(len - 1)),
            (None, _) => Some(0),
        };
    }
}

impl Default for HistoryViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn agent(name: &str) -> Agent {
        Agent {
            id: Some(Uuid::new_v4()),
            name: name.to_string(),
            prompt: String::new(),
            voice_settings: None,
            personality_settings: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn record(agent_id: AgentId, from: &str, status: &str) -> CallRecord {
        CallRecord {
            id: Some(Uuid::new_v4()),
            agent_id,
            provider_call_id: None,
            from_number: from.to_string(),
            to_number: "+10000000000".to_string(),
            status: CallStatus::from(status),
            duration_seconds: Some(30),
            transcript: None,
            metadata: None,
            error_message: None,
            started_at: None,
            ended_at: None,
            created_at: None,
        }
    }

    fn loaded() -> HistoryViewState {
        let sales = agent("Sales Bot");
        let support = agent("Support");
        let mut state = HistoryViewState::new();
        state.begin_load(100);
        state.apply_calls_loaded(Ok(vec![
            record(sales.id.unwrap(), "+14155550100", "completed"),
            record(support.id.unwrap(), "+12125550100", "failed"),
            record(Uuid::new_v4(), "+13105550100", "completed"),
        ]));
        state.apply_agents_loaded(Ok(vec![sales, support]));
        state
    }

    #[test]
    fn loading_ends_when_both_resolve() {
        let mut state = HistoryViewState::new();
        assert_eq!(
            state.begin_load(100),
            vec![Command::LoadCalls { limit: 100 }, Command::LoadAgents]
        );
        state.apply_agents_loaded(Ok(Vec::new()));
        assert_eq!(state.empty_state(), Some(EmptyState::Loading));
        state.apply_calls_loaded(Ok(Vec::new()));
        assert_eq!(state.empty_state(), Some(EmptyState::NoCalls));
    }

    #[test]
    fn no_matches_is_distinct_from_no_calls() {
        let mut state = loaded();
        state.set_search("no such number");
        assert_eq!(state.empty_state(), Some(EmptyState::NoMatches));
        state.clear_filters();
        assert_eq!(state.empty_state(), None);
        assert_eq!(state.visible().len(), 3);
    }

    #[test]
    fn status_cycle_walks_distinct_statuses() {
        let mut state = loaded();
        assert_eq!(state.status_filter_label(), ALL_STATUSES);
        state.cycle_status();
        assert_eq!(state.status_filter_label(), "Completed");
        assert_eq!(state.visible().len(), 2);
        state.cycle_status();
        assert_eq!(state.status_filter_label(), "Failed");
        state.cycle_status();
        assert_eq!(state.status_filter_label(), ALL_STATUSES);
    }

    #[test]
    fn agent_filter_and_unknown_agent_name() {
        let mut state = loaded();
        let orphan = state.calls[2].agent_id;
        assert_eq!(state.agent_name(orphan), callcenter_core::UNKNOWN_AGENT);
        state.cycle_agent();
        assert_eq!(state.agent_filter_label(), "Sales Bot");
        assert_eq!(state.visible().len(), 1);
    }

    #[test]
    fn search_matches_agent_name_case_insensitively() {
        let mut state = loaded();
        state.set_search("sales");
        assert_eq!(state.visible().len(), 1);
        state.set_search("415");
        assert_eq!(state.visible().len(), 1);
    }

    #[test]
    fn status_update_replaces_entry() {
        let mut state = loaded();
        assert!(state.open_status_prompt());
        let call_id = state.status_prompt.as_ref().unwrap().call_id;
        state.status_prompt.as_mut().unwrap().input = text_field("answered");
        let command = state.submit_status().unwrap();
        let Command::UpdateCallStatus(request) = command else {
            panic!("expected status update");
        };
        assert_eq!(request.status.as_str(), "answered");

        let mut updated = state.calls[0].clone();
        updated.status = CallStatus::from("answered");
        state.apply_status_updated(call_id, Ok(Some(updated)));
        assert_eq!(state.calls[0].status.as_str(), "answered");
        assert!(state.status_prompt.is_none());
    }

    #[test]
    fn blank_status_is_rejected() {
        let mut state = loaded();
        state.open_status_prompt();
        state.status_prompt.as_mut().unwrap().input = text_field("  ");
        assert_eq!(state.submit_status(), Err(FormError::MissingValue("status")));
    }

    #[test]
    fn failed_status_update_changes_nothing() {
        let mut state = loaded();
        let before = state.calls.clone();
        let call_id = before[0].id.unwrap();
        state.apply_status_updated(call_id, Ok(None));
        assert_eq!(state.calls, before);
    }
}
