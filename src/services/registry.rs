// src/services/registry.rs

//! Client for the link-aggregation API.
//!
//! Two endpoints are used, both authenticated with the `x-api-key` header:
//! - `POST {base}/links/check {url}` answers `{ "exists": bool }`
//! - `POST {base}/links {url, title?, description?, thumbnail?, tags?}`
//!   answers 2xx on success and 409 when the link is already known

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, LinkPayload};
use crate::utils::http::create_api_client;

const API_KEY_HEADER: &str = "x-api-key";

/// Result of a registration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// 2xx response
    Registered,
    /// 409: the API already has this link
    DuplicateRejected,
    /// Transport failure or any other status
    Failed(String),
}

impl RegisterOutcome {
    /// Whether the API now holds the item (new or pre-existing).
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Registered | Self::DuplicateRejected)
    }
}

/// Remote registry of known links.
#[async_trait]
pub trait LinkRegistry: Send + Sync {
    /// Ask whether `url` is already registered.
    async fn exists(&self, url: &str) -> Result<bool>;

    /// Register one record.
    async fn register(&self, payload: &LinkPayload) -> RegisterOutcome;
}

#[derive(Serialize)]
struct CheckRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct CheckResponse {
    #[serde(default)]
    exists: bool,
}

/// HTTP client for the registration API.
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: create_api_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl LinkRegistry for ApiClient {
    async fn exists(&self, url: &str) -> Result<bool> {
        let response = self
            .client
            .post(self.endpoint("links/check"))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&CheckRequest { url })
            .send()
            .await
            .map_err(|e| AppError::transport("links/check", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api(status.as_u16(), body));
        }

        let parsed: CheckResponse = response
            .json()
            .await
            .map_err(|e| AppError::transport("links/check", e))?;
        Ok(parsed.exists)
    }

    async fn register(&self, payload: &LinkPayload) -> RegisterOutcome {
        let response = match self
            .client
            .post(self.endpoint("links"))
            .header(API_KEY_HEADER, &self.api_key)
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return RegisterOutcome::Failed(e.to_string()),
        };

        let status = response.status();
        if status.is_success() {
            log::debug!("links → {}", status);
            RegisterOutcome::Registered
        } else if status == StatusCode::CONFLICT {
            RegisterOutcome::DuplicateRejected
        } else {
            let body = response.text().await.unwrap_or_default();
            RegisterOutcome::Failed(AppError::api(status.as_u16(), body).to_string())
        }
    }
}

/// Registry that never touches the network.
///
/// Reports every link as unknown and every registration as successful.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRegistry;

#[async_trait]
impl LinkRegistry for DryRunRegistry {
    async fn exists(&self, _url: &str) -> Result<bool> {
        Ok(false)
    }

    async fn register(&self, payload: &LinkPayload) -> RegisterOutcome {
        log::info!("[dry-run] would register {}", payload.url);
        RegisterOutcome::Registered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ApiClient {
        let config = ApiConfig {
            base_url: format!("{}/api/", server.uri()),
            ..ApiConfig::default()
        };
        ApiClient::new(&config, "secret").unwrap()
    }

    fn payload() -> LinkPayload {
        LinkPayload {
            url: "https://event.example.com/a".to_string(),
            tags: vec!["NPay적립".to_string()],
            ..LinkPayload::default()
        }
    }

    #[tokio::test]
    async fn test_exists_sends_key_and_parses_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/links/check"))
            .and(header("x-api-key", "secret"))
            .and(body_json(serde_json::json!({ "url": "https://x.test/1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "exists": true })))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client(&server).exists("https://x.test/1").await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_non_success_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/links/check"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client(&server).exists("https://x.test/1").await;
        assert!(matches!(result, Err(AppError::Api { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_register_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/links"))
            .and(header("x-api-key", "secret"))
            .and(body_json(serde_json::json!({
                "url": "https://event.example.com/a",
                "tags": ["NPay적립"]
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(
            client(&server).register(&payload()).await,
            RegisterOutcome::Registered
        );
    }

    #[tokio::test]
    async fn test_register_conflict_is_duplicate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/links"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let outcome = client(&server).register(&payload()).await;
        assert_eq!(outcome, RegisterOutcome::DuplicateRejected);
        assert!(outcome.is_accepted());
    }

    #[tokio::test]
    async fn test_register_other_status_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/links"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad url"))
            .mount(&server)
            .await;

        let outcome = client(&server).register(&payload()).await;
        assert!(matches!(outcome, RegisterOutcome::Failed(ref reason) if reason.contains("400")));
        assert!(!outcome.is_accepted());
    }

    #[tokio::test]
    async fn test_register_unreachable_fails() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config, "secret").unwrap();
        assert!(matches!(
            client.register(&payload()).await,
            RegisterOutcome::Failed(_)
        ));
    }
}
