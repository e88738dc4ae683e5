pub mod http;
#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use log::info;
use reqwest::Method;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Endpoints;
use crate::models::chat::{ ChatRequest, CompareReplies, CompareResponse, ChatResponse, Provider, Query };
use crate::models::history::{
    Conversation,
    ConversationEnvelope,
    ConversationId,
    DeleteEnvelope,
    HistoryEnvelope,
    SearchEnvelope,
    Statistics,
    StatsEnvelope,
};

pub use self::http::HttpTransport;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error {status} from {path}")]
    Status {
        status: u16,
        path: String,
    },

    #[error("Invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend answered with `success: false`.
    #[error("{}", .0.as_deref().unwrap_or("request was not successful"))]
    Application(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<JsonValue>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: JsonValue) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

/// Moves JSON between the client and the backend. Any non-2xx status is an
/// error; the body of a 2xx answer is returned as-is.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<JsonValue, ApiError>;
}

/// Successful answer to a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Single(String),
    Compare(CompareReplies),
}

/// Builds the endpoint and body for a query. Only groq carries a model.
pub fn request_for(endpoints: &Endpoints, query: &Query) -> (String, ChatRequest) {
    let endpoint = endpoints.for_provider(query.provider).to_string();
    let model = match query.provider {
        Provider::Groq => Some(query.groq_model.clone()),
        _ => None,
    };
    (endpoint, ChatRequest {
        prompt: query.prompt.clone(),
        model,
    })
}

/// Typed access to the backend endpoints.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn ApiTransport>,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn ApiTransport>, endpoints: Endpoints) -> Self {
        Self { transport, endpoints }
    }

    pub async fn submit(&self, query: &Query) -> Result<Reply, ApiError> {
        let (endpoint, body) = request_for(&self.endpoints, query);
        info!("Submitting prompt to {} ({})", endpoint, query.provider);
        let raw = self.transport.send(ApiRequest::post(endpoint, serde_json::to_value(&body)?)).await?;

        if query.provider == Provider::Compare {
            let resp: CompareResponse = serde_json::from_value(raw)?;
            match (resp.success, resp.responses) {
                (true, Some(replies)) => Ok(Reply::Compare(replies)),
                (_, _) => Err(ApiError::Application(resp.error)),
            }
        } else {
            let resp: ChatResponse = serde_json::from_value(raw)?;
            match (resp.success, resp.text) {
                (true, Some(text)) => Ok(Reply::Single(text)),
                (_, _) => Err(ApiError::Application(resp.error)),
            }
        }
    }

    pub async fn history(&self) -> Result<Vec<Conversation>, ApiError> {
        let raw = self.transport.send(ApiRequest::get(self.endpoints.history.clone())).await?;
        let envelope: HistoryEnvelope = serde_json::from_value(raw)?;
        if !envelope.success {
            return Err(ApiError::Application(envelope.error));
        }
        Ok(envelope.history)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Conversation>, ApiError> {
        let request = ApiRequest::get(self.endpoints.history_search.clone()).with_query("q", term);
        let raw = self.transport.send(request).await?;
        let envelope: SearchEnvelope = serde_json::from_value(raw)?;
        if !envelope.success {
            return Err(ApiError::Application(envelope.error));
        }
        Ok(envelope.results)
    }

    pub async fn conversation(&self, id: ConversationId) -> Result<Conversation, ApiError> {
        let raw = self.transport.send(ApiRequest::get(self.endpoints.conversation(id))).await?;
        let envelope: ConversationEnvelope = serde_json::from_value(raw)?;
        match (envelope.success, envelope.conversation) {
            (true, Some(conversation)) => Ok(conversation),
            (_, _) => Err(ApiError::Application(envelope.error)),
        }
    }

    pub async fn delete(&self, id: ConversationId) -> Result<(), ApiError> {
        let raw = self.transport.send(ApiRequest::delete(self.endpoints.conversation(id))).await?;
        let envelope: DeleteEnvelope = serde_json::from_value(raw)?;
        if !envelope.success {
            return Err(ApiError::Application(envelope.error));
        }
        Ok(())
    }

    pub async fn stats(&self) -> Result<Statistics, ApiError> {
        let raw = self.transport.send(ApiRequest::get(self.endpoints.stats.clone())).await?;
        let envelope: StatsEnvelope = serde_json::from_value(raw)?;
        match (envelope.success, envelope.statistics) {
            (true, Some(statistics)) => Ok(statistics),
            (_, _) => Err(ApiError::Application(envelope.error)),
        }
    }
}
