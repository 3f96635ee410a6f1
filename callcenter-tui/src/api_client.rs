//! API client layer for the call center backend.
//!
//! Every backend operation is a `POST` with a JSON body under `/api/`.
//! Views never talk to HTTP directly; they go through [`CallCenterApi`] so the
//! console can be driven by an in-memory backend in tests.

use crate::config::TuiConfig;
use async_trait::async_trait;
use callcenter_core::{
    Agent, AgentId, AgentIdRequest, CallId, CallIdRequest, CallRecord, CreateAgentRequest,
    InitiateCallRequest, ListCallRecordsRequest, UpdateAgentRequest, UpdateCallStatusRequest,
    ValidationError, ValidationErrorBody,
};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Validation failed: {}", join_validation(.0))]
    Validation(Vec<ValidationError>),
    #[error("Unexpected response: HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Config error: {0}")]
    Config(String),
}

fn join_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Backend operations consumed by the console.
#[async_trait]
pub trait CallCenterApi: Send + Sync {
    async fn list_agents(&self) -> Result<Vec<Agent>, ApiClientError>;

    async fn get_agent(&self, agent_id: AgentId) -> Result<Option<Agent>, ApiClientError>;

    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<Agent, ApiClientError>;

    async fn update_agent(
        &self,
        request: &UpdateAgentRequest,
    ) -> Result<Option<Agent>, ApiClientError>;

    async fn delete_agent(&self, agent_id: AgentId) -> Result<bool, ApiClientError>;

    async fn list_call_records(&self, limit: u32) -> Result<Vec<CallRecord>, ApiClientError>;

    async fn initiate_call(
        &self,
        request: &InitiateCallRequest,
    ) -> Result<CallRecord, ApiClientError>;

    async fn get_call_record(&self, call_id: CallId)
        -> Result<Option<CallRecord>, ApiClientError>;

    async fn update_call_status(
        &self,
        request: &UpdateCallStatusRequest,
    ) -> Result<Option<CallRecord>, ApiClientError>;
}

pub type SharedApi = Arc<dyn CallCenterApi>;

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// No client-side timeout is set; the transport defaults apply.
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let base_url = config.api_base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiClientError::Config("api_base_url is empty".to_string()));
        }
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        tracing::debug!(path, "POST");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        parse_response(response).await
    }

    async fn post_empty<T>(&self, path: &str) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!(path, "POST");
        let response = self.client.post(self.url(path)).send().await?;
        parse_response(response).await
    }
}

#[async_trait]
impl CallCenterApi for RestClient {
    async fn list_agents(&self) -> Result<Vec<Agent>, ApiClientError> {
        self.post_empty("agent_service/get_all_agents").await
    }

    async fn get_agent(&self, agent_id: AgentId) -> Result<Option<Agent>, ApiClientError> {
        self.post_json("agent_service/get_agent_by_id", &AgentIdRequest { agent_id })
            .await
    }

    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<Agent, ApiClientError> {
        self.post_json("agent_service/create_agent", request).await
    }

    async fn update_agent(
        &self,
        request: &UpdateAgentRequest,
    ) -> Result<Option<Agent>, ApiClientError> {
        self.post_json("agent_service/update_agent", request).await
    }

    async fn delete_agent(&self, agent_id: AgentId) -> Result<bool, ApiClientError> {
        self.post_json("agent_service/delete_agent", &AgentIdRequest { agent_id })
            .await
    }

    async fn list_call_records(&self, limit: u32) -> Result<Vec<CallRecord>, ApiClientError> {
        self.post_json(
            "call_service/get_call_records",
            &ListCallRecordsRequest { limit },
        )
        .await
    }

    async fn initiate_call(
        &self,
        request: &InitiateCallRequest,
    ) -> Result<CallRecord, ApiClientError> {
        self.post_json("call_service/initiate_call", request).await
    }

    async fn get_call_record(
        &self,
        call_id: CallId,
    ) -> Result<Option<CallRecord>, ApiClientError> {
        self.post_json("call_service/get_call_record_by_id", &CallIdRequest { call_id })
            .await
    }

    async fn update_call_status(
        &self,
        request: &UpdateCallStatusRequest,
    ) -> Result<Option<CallRecord>, ApiClientError> {
        self.post_json("call_service/update_call_status", request)
            .await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        let bytes = response.bytes().await?;
        return Ok(serde_json::from_slice::<T>(&bytes)?);
    }
    let text = response.text().await?;
    Err(error_from_body(status, &text))
}

/// Map a non-success response body to a client error.
pub fn error_from_body(status: StatusCode, body: &str) -> ApiClientError {
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        if let Ok(parsed) = serde_json::from_str::<ValidationErrorBody>(body) {
            if !parsed.detail.is_empty() {
                return ApiClientError::Validation(parsed.detail);
            }
        }
    }
    ApiClientError::Status {
        status: status.as_u16(),
        body: body.to_string(),
    }
}
