//! Backend commands and their execution.
//!
//! View state transitions describe the requests they need as [`Command`]s.
//! The event loop spawns each command as its own task, so independent fetches
//! run in parallel and resolve independently.

use crate::api_client::CallCenterApi;
use crate::events::{ApiEvent, Submission, Ticket, TuiEvent};
use callcenter_core::{
    AgentId, CallId, CreateAgentRequest, InitiateCallRequest, UpdateAgentRequest,
    UpdateCallStatusRequest,
};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadAgents,
    FetchAgent(AgentId),
    CreateAgent {
        submission: Submission,
        request: CreateAgentRequest,
    },
    UpdateAgent {
        submission: Submission,
        request: UpdateAgentRequest,
    },
    DeleteAgent(AgentId),
    LoadCalls { limit: u32 },
    InitiateCall(InitiateCallRequest),
    FetchCall(CallId),
    UpdateCallStatus(UpdateCallStatusRequest),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::LoadAgents => "load_agents",
            Command::FetchAgent(_) => "fetch_agent",
            Command::CreateAgent { .. } => "create_agent",
            Command::UpdateAgent { .. } => "update_agent",
            Command::DeleteAgent(_) => "delete_agent",
            Command::LoadCalls { .. } => "load_calls",
            Command::InitiateCall(_) => "initiate_call",
            Command::FetchCall(_) => "fetch_call",
            Command::UpdateCallStatus(_) => "update_call_status",
        }
    }
}

/// Run one command against the backend.
pub async fn execute(api: &dyn CallCenterApi, command: Command) -> ApiEvent {
    match command {
        Command::LoadAgents => ApiEvent::AgentsLoaded(api.list_agents().await),
        Command::FetchAgent(agent_id) => ApiEvent::AgentFetched {
            agent_id,
            result: api.get_agent(agent_id).await,
        },
        Command::CreateAgent {
            submission,
            request,
        } => ApiEvent::AgentCreated {
            submission,
            result: api.create_agent(&request).await,
        },
        Command::UpdateAgent {
            submission,
            request,
        } => ApiEvent::AgentUpdated {
            submission,
            agent_id: request.agent_id,
            result: api.update_agent(&request).await,
        },
        Command::DeleteAgent(agent_id) => ApiEvent::AgentDeleted {
            agent_id,
            result: api.delete_agent(agent_id).await,
        },
        Command::LoadCalls { limit } => ApiEvent::CallsLoaded(api.list_call_records(limit).await),
        Command::InitiateCall(request) => {
            ApiEvent::CallInitiated(api.initiate_call(&request).await)
        }
        Command::FetchCall(call_id) => ApiEvent::CallFetched {
            call_id,
            result: api.get_call_record(call_id).await,
        },
        Command::UpdateCallStatus(request) => ApiEvent::CallStatusUpdated {
            call_id: request.call_id,
            result: api.update_call_status(&request).await,
        },
    }
}

/// Spawn a command; its result comes back through `sender` tagged with `ticket`.
pub fn spawn(
    api: Arc<dyn CallCenterApi>,
    ticket: Ticket,
    command: Command,
    sender: mpsc::Sender<TuiEvent>,
) {
    tokio::spawn(async move {
        let name = command.name();
        tracing::debug!(command = name, ticket, "dispatching");
        let event = execute(api.as_ref(), command).await;
        if sender.send(TuiEvent::Api { ticket, event }).await.is_err() {
            tracing::debug!(command = name, "event loop closed before result arrived");
        }
    });
}
