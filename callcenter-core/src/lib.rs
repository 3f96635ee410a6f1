//! Call Center Core - Entity Types
//!
//! Data types shared by the console: agents, call records, the request bodies
//! of the backend API, and the pure display/filter logic the views build on.
//! No I/O happens in this crate.

pub mod agent;
pub mod call;
pub mod error;
pub mod filter;
pub mod format;
pub mod identity;
pub mod settings;

pub use agent::{Agent, AgentDraft, AgentIdRequest, CreateAgentRequest, UpdateAgentRequest};
pub use call::{
    CallIdRequest, CallRecord, CallStatus, InitiateCallRequest, ListCallRecordsRequest,
    StatusTone, UpdateCallStatusRequest,
};
pub use error::{LocationSegment, ValidationError, ValidationErrorBody};
pub use filter::{
    agent_options, cycle, resolve_agent_name, status_options, CallFilter, Selection,
    UNKNOWN_AGENT,
};
pub use format::{
    format_date, format_datetime, format_duration, format_optional_datetime, format_time,
    NOT_AVAILABLE,
};
pub use identity::{parse_timestamp, AgentId, CallId, Timestamp};
pub use settings::{
    normalize_settings, parse_settings, settings_to_text, SettingsMap, SettingsParseError,
};
