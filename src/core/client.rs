//! HTTP client for the assistant platform: session listing and chat commands.

use crate::config::ApiConfig;
use crate::core::session::Session;
use crate::utils::{LeadSyncError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Source of truth for sessions. Returns the complete first page or fails.
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn fetch_sessions(&self) -> Result<Vec<Session>>;
}

/// Chat-style command endpoint the delivery channel listens on.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    async fn submit(&self, channel_id: &str, instruction: &str) -> Result<ChatResponse>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    #[serde(default)]
    pub output: Vec<ChatOutput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatOutput {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: serde_json::Value,
}

impl ChatOutput {
    pub fn text(&self) -> Option<&str> {
        self.content.as_str()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest<'a> {
    session_id: &'a str,
    input: &'a str,
}

/// The listing endpoint answers with either a bare array or a `results` page.
/// Entries are decoded one by one so a single odd record cannot sink the listing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SessionListResponse {
    List(Vec<serde_json::Value>),
    Page {
        #[serde(default)]
        results: Vec<serde_json::Value>,
    },
}

impl SessionListResponse {
    fn into_sessions(self) -> Vec<Session> {
        let entries = match self {
            SessionListResponse::List(entries) => entries,
            SessionListResponse::Page { results } => results,
        };

        entries
            .into_iter()
            .filter_map(|entry| {
                let id = entry.get("id").and_then(|id| id.as_str()).map(str::to_string);
                serde_json::from_value::<Session>(entry)
                    .map_err(|e| {
                        warn!(session_id = ?id, error = %e, "dropping undecodable session");
                    })
                    .ok()
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct VapiClient {
    base_url: String,
    api_key: String,
    page_limit: u32,
    http_client: Client,
}

impl VapiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("leadsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LeadSyncError::config_error(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_http_client(config, http_client))
    }

    pub fn with_http_client(config: &ApiConfig, http_client: Client) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            page_limit: config.session_page_limit,
            http_client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl SessionSource for VapiClient {
    async fn fetch_sessions(&self) -> Result<Vec<Session>> {
        // Only the first page is read; older sessions beyond it are not synced.
        let response = self
            .http_client
            .get(self.url("session"))
            .query(&[("limit", self.page_limit)])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| LeadSyncError::fetch_error(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LeadSyncError::fetch_error(format!("{} {}", status, body)));
        }

        let listing: SessionListResponse = response
            .json()
            .await
            .map_err(|e| LeadSyncError::fetch_error(format!("invalid session listing: {e}")))?;

        let sessions = listing.into_sessions();
        debug!(count = sessions.len(), "fetched sessions");
        Ok(sessions)
    }
}

#[async_trait]
impl DeliverySink for VapiClient {
    async fn submit(&self, channel_id: &str, instruction: &str) -> Result<ChatResponse> {
        let response = self
            .http_client
            .post(self.url("chat"))
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                session_id: channel_id,
                input: instruction,
            })
            .send()
            .await
            .map_err(|e| LeadSyncError::delivery_error(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LeadSyncError::delivery_error(format!("{} {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| LeadSyncError::delivery_error(format!("invalid chat response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_accepts_bare_array() {
        let listing: SessionListResponse = serde_json::from_value(json!([
            { "id": "a", "createdAt": "2026-03-01T00:00:00Z" },
            { "id": "b", "createdAt": "2026-03-02T00:00:00Z" }
        ]))
        .unwrap();
        let ids: Vec<_> = listing.into_sessions().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_listing_accepts_results_page() {
        let listing: SessionListResponse = serde_json::from_value(json!({
            "results": [{ "id": "a", "createdAt": "2026-03-01T00:00:00Z" }],
            "metadata": { "itemsPerPage": 100 }
        }))
        .unwrap();
        assert_eq!(listing.into_sessions().len(), 1);
    }

    #[test]
    fn test_listing_drops_only_undecodable_sessions() {
        let listing: SessionListResponse = serde_json::from_value(json!([
            {
                "id": "good",
                "createdAt": "2026-03-01T00:00:00Z",
                "messages": [{ "role": "tool", "content": "{\"updatedRows\":1}" }]
            },
            {
                "id": "multipart",
                "createdAt": "2026-03-01T00:00:00Z",
                "messages": [{ "role": "user", "content": [{ "type": "text", "text": "hi" }] }]
            },
            { "id": "no-timestamp" },
            "not even an object"
        ]))
        .unwrap();

        let ids: Vec<_> = listing.into_sessions().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["good", "multipart"]);
    }

    #[test]
    fn test_listing_without_results_is_empty() {
        let listing: SessionListResponse =
            serde_json::from_value(json!({ "metadata": {} })).unwrap();
        assert!(listing.into_sessions().is_empty());
    }

    #[test]
    fn test_chat_request_uses_camel_case() {
        let body = serde_json::to_value(ChatRequest {
            session_id: "chat-1",
            input: "hello",
        })
        .unwrap();
        assert_eq!(body, json!({ "sessionId": "chat-1", "input": "hello" }));
    }

    #[test]
    fn test_chat_output_text() {
        let response: ChatResponse = serde_json::from_value(json!({
            "output": [
                { "role": "assistant", "content": "Row saved successfully" },
                { "role": "tool", "content": { "updatedRows": 1 } }
            ]
        }))
        .unwrap();
        assert_eq!(response.output[0].text(), Some("Row saved successfully"));
        assert_eq!(response.output[1].text(), None);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let mut api = crate::config::defaults::default_api_config();
        api.base_url = "http://localhost:1234/".to_string();
        let client = VapiClient::with_http_client(&api, Client::new());
        assert_eq!(client.url("/session"), "http://localhost:1234/session");
    }
}
