//! Agent entity and the request bodies that manage it.

use crate::identity::{lenient_timestamp, AgentId, Timestamp};
use crate::settings::{normalize_settings, SettingsMap};
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// A configured AI persona as returned by the backend.
///
/// `id` is `None` only for an unsaved draft; such an agent must never be sent
/// to update or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AgentId>,
    pub name: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_settings: Option<SettingsMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_settings: Option<SettingsMap>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Timestamp>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Timestamp>,
}

/// In-progress create/edit form contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentDraft {
    pub name: String,
    pub prompt: String,
    pub voice_settings: Option<SettingsMap>,
    pub personality_settings: Option<SettingsMap>,
}

impl AgentDraft {
    /// Seed a draft from an existing agent for editing.
    pub fn from_agent(agent: &Agent) -> Self {
        Self {
            name: agent.name.clone(),
            prompt: agent.prompt.clone(),
            voice_settings: agent.voice_settings.clone(),
            personality_settings: agent.personality_settings.clone(),
        }
    }

    pub fn to_create_request(&self) -> CreateAgentRequest {
        CreateAgentRequest {
            name: self.name.clone(),
            prompt: self.prompt.clone(),
            voice_settings: normalize_settings(self.voice_settings.clone()),
            personality_settings: normalize_settings(self.personality_settings.clone()),
        }
    }

    pub fn to_update_request(&self, agent_id: AgentId) -> UpdateAgentRequest {
        UpdateAgentRequest {
            agent_id,
            name: Some(self.name.clone()),
            prompt: Some(self.prompt.clone()),
            voice_settings: normalize_settings(self.voice_settings.clone()),
            personality_settings: normalize_settings(self.personality_settings.clone()),
        }
    }
}

/// Request body for `create_agent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAgentRequest {
    pub name: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_settings: Option<SettingsMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_settings: Option<SettingsMap>,
}

/// Request body for `update_agent`. Absent fields are left unchanged by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAgentRequest {
    pub agent_id: AgentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_settings: Option<SettingsMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_settings: Option<SettingsMap>,
}

/// Request body for `delete_agent` and `get_agent_by_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdRequest {
    pub agent_id: AgentId,
}
