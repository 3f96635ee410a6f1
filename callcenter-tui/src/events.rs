//! Event types for the TUI event loop.

use crate::api_client::ApiClientError;
use callcenter_core::{Agent, AgentId, CallId, CallRecord};
use crossterm::event::KeyEvent;

/// Identifies one activation of a view. Results carrying an older ticket are stale.
pub type Ticket = u64;

/// Identifies one agent form submission within a view activation.
pub type Submission = u64;

#[derive(Debug)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    Api { ticket: Ticket, event: ApiEvent },
}

/// Outcome of one backend request.
#[derive(Debug)]
pub enum ApiEvent {
    AgentsLoaded(Result<Vec<Agent>, ApiClientError>),
    AgentFetched {
        agent_id: AgentId,
        result: Result<Option<Agent>, ApiClientError>,
    },
    AgentCreated {
        submission: Submission,
        result: Result<Agent, ApiClientError>,
    },
    AgentUpdated {
        submission: Submission,
        agent_id: AgentId,
        result: Result<Option<Agent>, ApiClientError>,
    },
    AgentDeleted {
        agent_id: AgentId,
        result: Result<bool, ApiClientError>,
    },
    CallsLoaded(Result<Vec<CallRecord>, ApiClientError>),
    CallInitiated(Result<CallRecord, ApiClientError>),
    CallFetched {
        call_id: CallId,
        result: Result<Option<CallRecord>, ApiClientError>,
    },
    CallStatusUpdated {
        call_id: CallId,
        result: Result<Option<CallRecord>, ApiClientError>,
    },
}
