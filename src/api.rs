use crate::config::ChatConfig;
use crate::errors::{ParleyError, ParleyResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request body for the chat endpoint.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub query: &'a str,
}

/// Reply from the chat endpoint. A missing or empty `response` field is not
/// an error; the handler substitutes a fallback string.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
}

/// The injected HTTP collaborator of the submission handler. Swappable with a
/// test double.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_query(&self, query: &str) -> ParleyResult<ChatResponse>;
}

#[async_trait]
impl<B: ChatBackend + ?Sized> ChatBackend for Arc<B> {
    async fn send_query(&self, query: &str) -> ParleyResult<ChatResponse> {
        (**self).send_query(query).await
    }
}

/// Talks to the real backend: a single `POST <endpoint_url>` with a JSON
/// body, one attempt, no timeout beyond what the transport imposes.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: Client,
    endpoint_url: String,
}

impl HttpChatBackend {
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint_url: config.endpoint_url.clone(),
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send_query(&self, query: &str) -> ParleyResult<ChatResponse> {
        log::debug!("POST {} ({} byte query)", self.endpoint_url, query.len());

        let response = self
            .client
            .post(&self.endpoint_url)
            .json(&ChatRequest { query })
            .send()
            .await
            .map_err(|e| ParleyError::network(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            log::warn!("chat endpoint returned {}", status);
            return Err(ParleyError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ParleyError::malformed(format!("failed to parse response body: {}", e)))
    }
}
