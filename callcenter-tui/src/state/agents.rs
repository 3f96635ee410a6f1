//! Agent management view state.

use super::form::{field_text, text_field, FormError};
use super::Feedback;
use crate::api_client::ApiClientError;
use crate::dispatch::Command;
use crate::events::Submission;
use crate::notifications::NotificationLevel;
use callcenter_core::{parse_settings, settings_to_text, Agent, AgentDraft, AgentId};
use crossterm::event::KeyEvent;
use tui_textarea::TextArea;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentField {
    Name,
    Prompt,
    VoiceSettings,
    PersonalitySettings,
}

impl AgentField {
    pub fn all() -> &'static [AgentField] {
        &[
            AgentField::Name,
            AgentField::Prompt,
            AgentField::VoiceSettings,
            AgentField::PersonalitySettings,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgentField::Name => "Agent Name",
            AgentField::Prompt => "Agent Prompt",
            AgentField::VoiceSettings => "Voice Settings (JSON)",
            AgentField::PersonalitySettings => "Personality Settings (JSON)",
        }
    }

    /// Single-line fields treat Enter as "next field".
    pub fn is_multiline(&self) -> bool {
        !matches!(self, AgentField::Name)
    }

    pub fn next(&self) -> AgentField {
        let all = Self::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn previous(&self) -> AgentField {
        let all = Self::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(AgentId),
}

/// Open create/edit form. At most one exists at a time.
#[derive(Debug, Clone)]
pub struct AgentForm {
    pub mode: FormMode,
    pub name: TextArea<'static>,
    pub prompt: TextArea<'static>,
    pub voice_settings: TextArea<'static>,
    pub personality_settings: TextArea<'static>,
    pub focus: AgentField,
    /// Submission awaiting a backend response, if any.
    pub pending: Option<Submission>,
}

impl AgentForm {
    pub fn blank() -> Self {
        Self::with_draft(FormMode::Create, &AgentDraft::default())
    }

    pub fn for_agent(agent_id: AgentId, agent: &Agent) -> Self {
        Self::with_draft(FormMode::Edit(agent_id), &AgentDraft::from_agent(agent))
    }

    fn with_draft(mode: FormMode, draft: &AgentDraft) -> Self {
        Self {
            mode,
            name: text_field(&draft.name),
            prompt: text_field(&draft.prompt),
            voice_settings: text_field(&settings_to_text(draft.voice_settings.as_ref())),
            personality_settings: text_field(&settings_to_text(
                draft.personality_settings.as_ref(),
            )),
            focus: AgentField::Name,
            pending: None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn field(&self, field: AgentField) -> &TextArea<'static> {
        match field {
            AgentField::Name => &self.name,
            AgentField::Prompt => &self.prompt,
            AgentField::VoiceSettings => &self.voice_settings,
            AgentField::PersonalitySettings => &self.personality_settings,
        }
    }

    pub fn field_mut(&mut self, field: AgentField) -> &mut TextArea<'static> {
        match field {
            AgentField::Name => &mut self.name,
            AgentField::Prompt => &mut self.prompt,
            AgentField::VoiceSettings => &mut self.voice_settings,
            AgentField::PersonalitySettings => &mut self.personality_settings,
        }
    }

    pub fn set_text(&mut self, field: AgentField, text: &str) {
        *self.field_mut(field) = text_field(text);
    }

    pub fn input(&mut self, key: KeyEvent) {
        let focus = self.focus;
        self.field_mut(focus).input(key);
    }

    /// Collect the form into a draft, parsing the settings fields.
    pub fn draft(&self) -> Result<AgentDraft, FormError> {
        let voice_settings =
            parse_settings(&field_text(&self.voice_settings)).map_err(|source| {
                FormError::Settings {
                    field: "voice settings",
                    source,
                }
            })?;
        let personality_settings = parse_settings(&field_text(&self.personality_settings))
            .map_err(|source| FormError::Settings {
                field: "personality settings",
                source,
            })?;
        Ok(AgentDraft {
            name: field_text(&self.name),
            prompt: field_text(&self.prompt),
            voice_settings,
            personality_settings,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AgentViewState {
    pub agents: Vec<Agent>,
    pub selected: Option<usize>,
    pub form: Option<AgentForm>,
    pub loading: bool,
    next_submission: Submission,
}

impl AgentViewState {
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            selected: None,
            form: None,
            loading: false,
            next_submission: 0,
        }
    }

    pub fn begin_load(&mut self) -> Command {
        self.loading = true;
        Command::LoadAgents
    }

    pub fn apply_loaded(&mut self, result: Result<Vec<Agent>, ApiClientError>) {
        self.loading = false;
        match result {
            Ok(agents) => {
                tracing::debug!(count = agents.len(), "agents loaded");
                self.agents = agents;
                self.clamp_selection();
            }
            Err(err) => tracing::error!(error = %err, "Failed to load agents"),
        }
    }

    pub fn selected_agent(&self) -> Option<&Agent> {
        self.selected.and_then(|idx| self.agents.get(idx))
    }

    pub fn select_next(&mut self) {
        self.selected = next_index(self.selected, self.agents.len());
    }

    pub fn select_previous(&mut self) {
        self.selected = previous_index(self.selected, self.agents.len());
    }

    /// Create/edit/delete are disabled while any form is open.
    pub fn actions_enabled(&self) -> bool {
        self.form.is_none()
    }

    pub fn open_create(&mut self) -> bool {
        if !self.actions_enabled() {
            return false;
        }
        self.form = Some(AgentForm::blank());
        true
    }

    pub fn open_edit(&mut self) -> bool {
        if !self.actions_enabled() {
            return false;
        }
        let Some(agent) = self.selected_agent() else {
            return false;
        };
        let Some(agent_id) = agent.id else {
            return false;
        };
        self.form = Some(AgentForm::for_agent(agent_id, agent));
        true
    }

    /// Drop the form without contacting the backend.
    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    pub fn submit_form(&mut self) -> Result<Command, FormError> {
        let form = self.form.as_mut().ok_or(FormError::NotOpen)?;
        if form.is_submitting() {
            return Err(FormError::InFlight);
        }
        let draft = form.draft()?;
        self.next_submission += 1;
        let submission = self.next_submission;
        form.pending = Some(submission);
        Ok(match form.mode {
            FormMode::Create => Command::CreateAgent {
                submission,
                request: draft.to_create_request(),
            },
            FormMode::Edit(agent_id) => Command::UpdateAgent {
                submission,
                request: draft.to_update_request(agent_id),
            },
        })
    }

    /// Apply a create response. Only the form that sent `submission` is closed.
    pub fn apply_created(
        &mut self,
        submission: Submission,
        result: Result<Agent, ApiClientError>,
    ) -> Option<Feedback> {
        match result {
            Ok(agent) => {
                let name = agent.name.clone();
                self.agents.insert(0, agent);
                self.selected = Some(0);
                if self.owns_form(submission) {
                    self.form = None;
                }
                tracing::info!(agent = %name, "agent created");
                Some(Feedback::Notice(
                    NotificationLevel::Success,
                    format!("Agent '{}' created", name),
                ))
            }
            Err(err) => {
                self.release_form(submission);
                tracing::error!(error = %err, "Failed to create agent");
                None
            }
        }
    }

    pub fn apply_updated(
        &mut self,
        submission: Submission,
        agent_id: AgentId,
        result: Result<Option<Agent>, ApiClientError>,
    ) -> Option<Feedback> {
        match result {
            Ok(Some(agent)) => {
                let name = agent.name.clone();
                if let Some(existing) = self.agents.iter_mut().find(|a| a.id == Some(agent_id)) {
                    *existing = agent;
                }
                if self.owns_form(submission) {
                    self.form = None;
                }
                Some(Feedback::Notice(
                    NotificationLevel::Success,
                    format!("Agent '{}' updated", name),
                ))
            }
            Ok(None) => {
                self.release_form(submission);
                tracing::warn!(%agent_id, "update returned no agent");
                None
            }
            Err(err) => {
                self.release_form(submission);
                tracing::error!(%agent_id, error = %err, "Failed to update agent");
                None
            }
        }
    }

    /// Delete the selected agent. Unsaved agents are never sent.
    pub fn delete_selected(&self) -> Option<Command> {
        if !self.actions_enabled() {
            return None;
        }
        self.selected_agent()
            .and_then(|agent| agent.id)
            .map(Command::DeleteAgent)
    }

    pub fn apply_deleted(
        &mut self,
        agent_id: AgentId,
        result: Result<bool, ApiClientError>,
    ) -> Option<Feedback> {
        match result {
            Ok(deleted) => {
                if !deleted {
                    tracing::warn!(%agent_id, "backend reported agent already gone");
                }
                self.agents.retain(|agent| agent.id != Some(agent_id));
                self.clamp_selection();
                Some(Feedback::Notice(NotificationLevel::Info, "Agent deleted".to_string()))
            }
            Err(err) => {
                tracing::error!(%agent_id, error = %err, "Failed to delete agent");
                None
            }
        }
    }

    pub fn refresh_selected(&self) -> Option<Command> {
        if !self.actions_enabled() {
            return None;
        }
        self.selected_agent()
            .and_then(|agent| agent.id)
            .map(Command::FetchAgent)
    }

    pub fn apply_fetched(
        &mut self,
        agent_id: AgentId,
        result: Result<Option<Agent>, ApiClientError>,
    ) -> Option<Feedback> {
        match result {
            Ok(Some(agent)) => {
                if let Some(existing) = self.agents.iter_mut().find(|a| a.id == Some(agent_id)) {
                    *existing = agent;
                }
                None
            }
            Ok(None) => {
                tracing::warn!(%agent_id, "agent no longer available");
                Some(Feedback::Notice(
                    NotificationLevel::Warning,
                    "Agent is no longer available".to_string(),
                ))
            }
            Err(err) => {
                tracing::error!(%agent_id, error = %err, "Failed to fetch agent");
                None
            }
        }
    }

    fn owns_form(&self, submission: Submission) -> bool {
        self.form
            .as_ref()
            .is_some_and(|form| form.pending == Some(submission))
    }

    /// Re-enable the form that sent `submission`; newer forms keep their guard.
    fn release_form(&mut self, submission: Submission) {
        if let Some(form) = self.form.as_mut() {
            if form.pending == Some(submission) {
                form.pending = None;
            }
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = match (self.selected, self.agents.len()) {
            (_, 0) => None,
            (Some(idx), len) => Some(idx.min(len - 1)),
            (None, _) => Some(0),
        };
    }
}

impl Default for AgentViewState {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn next_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(idx) if idx < len => (idx + 1) % len,
        _ => 0,
    })
}

pub(crate) fn previous_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(idx) if idx > 0 && idx < len => idx - 1,
        _ => len - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn agent(name: &str) -> Agent {
        Agent {
            id: Some(Uuid::new_v4()),
            name: name.to_string(),
            prompt: format!("{} prompt", name),
            voice_settings: None,
            personality_settings: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn loaded(names: &[&str]) -> AgentViewState {
        let mut state = AgentViewState::new();
        let _ = state.begin_load();
        state.apply_loaded(Ok(names.iter().map(|n| agent(n)).collect()));
        state
    }

    fn submitted(command: Command) -> Submission {
        match command {
            Command::CreateAgent { submission, .. } | Command::UpdateAgent { submission, .. } => {
                submission
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    fn server_error() -> ApiClientError {
        ApiClientError::Status {
            status: 500,
            body: "boom".to_string(),
        }
    }

    #[test]
    fn load_populates_in_backend_order() {
        let mut state = AgentViewState::new();
        assert_eq!(state.begin_load(), Command::LoadAgents);
        assert!(state.loading);
        state.apply_loaded(Ok(vec![agent("b"), agent("a")]));
        assert!(!state.loading);
        let names: Vec<&str> = state.agents.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(state.selected, Some(0));
    }

    #[test]
    fn failed_load_leaves_list_empty() {
        let mut state = AgentViewState::new();
        let _ = state.begin_load();
        state.apply_loaded(Err(server_error()));
        assert!(!state.loading);
        assert!(state.agents.is_empty());
    }

    #[test]
    fn create_prepends_returned_agent_and_closes_form() {
        let mut state = loaded(&["Existing"]);
        assert!(state.open_create());
        assert!(!state.open_create(), "create is disabled while the form is open");

        let form = state.form.as_mut().unwrap();
        form.set_text(AgentField::Name, "Sales Bot");
        form.set_text(AgentField::Prompt, "Help with sales");
        let command = state.submit_form().unwrap();
        let submission = match &command {
            Command::CreateAgent {
                submission,
                request,
            } => {
                assert_eq!(request.name, "Sales Bot");
                assert_eq!(request.prompt, "Help with sales");
                assert!(request.voice_settings.is_none());
                assert!(request.personality_settings.is_none());
                *submission
            }
            other => panic!("unexpected command {other:?}"),
        };

        let mut created = agent("Sales Bot");
        created.prompt = "Help with sales".to_string();
        let feedback = state.apply_created(submission, Ok(created.clone()));
        assert!(matches!(feedback, Some(Feedback::Notice(NotificationLevel::Success, _))));
        assert_eq!(state.agents[0], created);
        assert_eq!(state.agents.len(), 2);
        assert!(state.form.is_none());
    }

    #[test]
    fn failed_create_keeps_draft_editable() {
        let mut state = loaded(&["Existing"]);
        state.open_create();
        state.form.as_mut().unwrap().set_text(AgentField::Name, "Draft");
        let submission = submitted(state.submit_form().unwrap());
        assert_eq!(state.submit_form(), Err(FormError::InFlight));

        assert!(state.apply_created(submission, Err(server_error())).is_none());
        assert_eq!(state.agents.len(), 1);
        let form = state.form.as_ref().unwrap();
        assert!(!form.is_submitting());
        assert_eq!(field_text(&form.name), "Draft");
    }

    #[test]
    fn invalid_settings_block_submission() {
        let mut state = loaded(&[]);
        state.open_create();
        state
            .form
            .as_mut()
            .unwrap()
            .set_text(AgentField::VoiceSettings, "[1,2]");
        assert!(matches!(state.submit_form(), Err(FormError::Settings { .. })));
        assert!(!state.form.as_ref().unwrap().is_submitting());
    }

    #[test]
    fn empty_settings_object_is_sent_as_absent() {
        let mut state = loaded(&["A"]);
        state.agents[0].voice_settings = Some(serde_json::Map::new());
        assert!(state.open_edit());
        state
            .form
            .as_mut()
            .unwrap()
            .set_text(AgentField::PersonalitySettings, "{}");
        match state.submit_form().unwrap() {
            Command::UpdateAgent { request, .. } => {
                assert!(request.voice_settings.is_none());
                assert!(request.personality_settings.is_none());
                let body = serde_json::to_value(&request).unwrap();
                assert!(body.get("voice_settings").is_none());
                assert!(body.get("personality_settings").is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn edit_replaces_matching_entry_only() {
        let mut state = loaded(&["A", "B"]);
        state.select_next();
        let target = state.agents[1].id.unwrap();
        assert!(state.open_edit());
        assert!(state.delete_selected().is_none(), "delete disabled while editing");

        let form = state.form.as_mut().unwrap();
        assert_eq!(field_text(&form.name), "B");
        form.set_text(AgentField::VoiceSettings, r#"{"voice": "alloy"}"#);
        let command = state.submit_form().unwrap();
        let Command::UpdateAgent {
            submission,
            request,
        } = command
        else {
            panic!("expected update");
        };
        assert_eq!(request.agent_id, target);
        assert_eq!(request.voice_settings.unwrap()["voice"], json!("alloy"));

        let mut updated = state.agents[1].clone();
        updated.name = "B2".to_string();
        state.apply_updated(submission, target, Ok(Some(updated)));
        assert_eq!(state.agents[0].name, "A");
        assert_eq!(state.agents[1].name, "B2");
        assert!(state.form.is_none());
    }

    #[test]
    fn absent_update_response_leaves_list_unchanged() {
        let mut state = loaded(&["A"]);
        let id = state.agents[0].id.unwrap();
        state.open_edit();
        state.form.as_mut().unwrap().set_text(AgentField::Name, "Changed");
        let submission = submitted(state.submit_form().unwrap());
        state.apply_updated(submission, id, Ok(None));
        assert_eq!(state.agents[0].name, "A");
        assert!(!state.form.as_ref().unwrap().is_submitting());
    }

    #[test]
    fn late_create_success_keeps_newer_draft() {
        let mut state = loaded(&[]);
        state.open_create();
        state.form.as_mut().unwrap().set_text(AgentField::Name, "First");
        let first = submitted(state.submit_form().unwrap());
        state.cancel_form();

        state.open_create();
        state
            .form
            .as_mut()
            .unwrap()
            .set_text(AgentField::Name, "Second draft");
        state.apply_created(first, Ok(agent("First")));

        assert_eq!(state.agents[0].name, "First");
        let form = state.form.as_ref().expect("newer draft stays open");
        assert_eq!(field_text(&form.name), "Second draft");
        assert!(!form.is_submitting());
    }

    #[test]
    fn late_create_failure_keeps_newer_submission_guarded() {
        let mut state = loaded(&[]);
        state.open_create();
        state.form.as_mut().unwrap().set_text(AgentField::Name, "A");
        let first = submitted(state.submit_form().unwrap());
        state.cancel_form();

        state.open_create();
        state.form.as_mut().unwrap().set_text(AgentField::Name, "B");
        let second = submitted(state.submit_form().unwrap());
        assert_ne!(first, second);

        state.apply_created(first, Err(server_error()));
        assert_eq!(state.submit_form(), Err(FormError::InFlight));

        state.apply_created(second, Err(server_error()));
        assert!(matches!(
            state.submit_form(),
            Ok(Command::CreateAgent { .. })
        ));
    }

    #[test]
    fn late_update_response_leaves_newer_edit_open() {
        let mut state = loaded(&["A"]);
        let id = state.agents[0].id.unwrap();
        state.open_edit();
        let first = submitted(state.submit_form().unwrap());
        state.cancel_form();

        state.open_edit();
        state.form.as_mut().unwrap().set_text(AgentField::Name, "Renamed");
        let second = submitted(state.submit_form().unwrap());

        state.apply_updated(first, id, Err(server_error()));
        assert!(state.form.as_ref().unwrap().is_submitting());

        let mut updated = state.agents[0].clone();
        updated.prompt = "new prompt".to_string();
        state.apply_updated(first, id, Ok(Some(updated)));
        assert_eq!(state.agents[0].prompt, "new prompt");
        assert!(state.form.is_some());

        state.apply_updated(second, id, Ok(Some(agent("Renamed"))));
        assert!(state.form.is_none());
    }

    #[test]
    fn unsaved_agents_are_never_sent_for_update_or_delete() {
        let mut state = loaded(&["Draft"]);
        state.agents[0].id = None;
        assert!(!state.open_edit());
        assert!(state.delete_selected().is_none());
        assert!(state.refresh_selected().is_none());
    }

    #[test]
    fn delete_removes_exactly_the_matching_identifier() {
        let mut state = loaded(&["A", "B", "C"]);
        state.select_next();
        let target = state.agents[1].id.unwrap();
        assert_eq!(state.delete_selected(), Some(Command::DeleteAgent(target)));

        state.apply_deleted(target, Ok(true));
        let names: Vec<&str> = state.agents.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
        assert_eq!(state.selected, Some(1));
    }

    #[test]
    fn failed_delete_keeps_entry() {
        let mut state = loaded(&["A"]);
        let id = state.agents[0].id.unwrap();
        state.apply_deleted(id, Err(server_error()));
        assert_eq!(state.agents.len(), 1);
    }

    #[test]
    fn cancel_clears_form_without_command() {
        let mut state = loaded(&["A"]);
        state.open_edit();
        state.cancel_form();
        assert!(state.form.is_none());
        assert!(state.actions_enabled());
    }

    #[test]
    fn field_focus_cycles_both_ways() {
        let mut field = AgentField::Name;
        for _ in 0..AgentField::all().len() {
            field = field.next();
        }
        assert_eq!(field, AgentField::Name);
        assert_eq!(AgentField::Name.previous(), AgentField::PersonalitySettings);
    }

    #[test]
    fn selection_wraps() {
        assert_eq!(next_index(None, 3), Some(0));
        assert_eq!(next_index(Some(2), 3), Some(0));
        assert_eq!(previous_index(Some(0), 3), Some(2));
        assert_eq!(previous_index(None, 0), None);
    }
}
