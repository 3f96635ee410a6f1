//! Call records and call-service request bodies.

use crate::identity::{lenient_timestamp, AgentId, CallId, Timestamp};
use crate::settings::SettingsMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status tag reported by the backend.
///
/// The set is open-ended; unknown tags are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallStatus(String);

impl CallStatus {
    pub const INITIATING: &'static str = "initiating";
    pub const INITIATED: &'static str = "initiated";
    pub const ANSWERED: &'static str = "answered";
    pub const COMPLETED: &'static str = "completed";
    pub const FAILED: &'static str = "failed";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fixed style lookup for status badges.
    pub fn tone(&self) -> StatusTone {
        match self.0.as_str() {
            Self::COMPLETED => StatusTone::Success,
            Self::FAILED => StatusTone::Error,
            Self::ANSWERED => StatusTone::Info,
            Self::INITIATING | Self::INITIATED => StatusTone::Pending,
            _ => StatusTone::Neutral,
        }
    }

    /// Display label with the first character upper-cased.
    pub fn label(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CallStatus {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Visual category of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Success,
    Error,
    Info,
    Pending,
    Neutral,
}

/// One outbound call attempt and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CallId>,
    pub agent_id: AgentId,
    #[serde(default, rename = "plivo_call_id", skip_serializing_if = "Option::is_none")]
    pub provider_call_id: Option<String>,
    pub from_number: String,
    pub to_number: String,
    #[serde(rename = "call_status")]
    pub status: CallStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, rename = "call_metadata", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SettingsMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_at: Option<Timestamp>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub ended_at: Option<Timestamp>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Timestamp>,
}

/// Request body for `initiate_call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiateCallRequest {
    pub agent_id: AgentId,
    pub from_number: String,
    pub to_number: String,
}

/// Request body for `get_call_records`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCallRecordsRequest {
    pub limit: u32,
}

/// Request body for `get_call_record_by_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallIdRequest {
    pub call_id: CallId,
}

/// Request body for `update_call_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCallStatusRequest {
    pub call_id: CallId,
    pub status: CallStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SettingsMap>,
}
