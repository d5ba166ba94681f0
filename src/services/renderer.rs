// src/services/renderer.rs

//! Page rendering backends.
//!
//! The crawler only needs the final HTML of a page. [`PageRenderer`] is the
//! seam where a headless browser could be plugged in; [`HttpRenderer`] fetches
//! the server-rendered markup directly.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;
use crate::utils::http::{create_page_client, pick_user_agent};

/// When a navigation counts as finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// The document has been parsed
    DomContentLoaded,
    /// No outstanding network activity
    NetworkIdle,
}

/// Per-navigation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub timeout: Duration,
    pub wait_until: WaitUntil,
}

impl RenderOptions {
    pub fn new(timeout: Duration, wait_until: WaitUntil) -> Self {
        Self {
            timeout,
            wait_until,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(Duration::from_secs(15), WaitUntil::DomContentLoaded)
    }
}

/// Produces the HTML of a page.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Navigate to `url` and return the page markup.
    ///
    /// Fails with [`AppError::Transport`] on timeout or navigation error.
    async fn render(&self, url: &str, options: &RenderOptions) -> Result<String>;
}

/// Renderer backed by plain HTTP requests.
///
/// Every request carries a User-Agent picked at random from the pool and a
/// fixed Accept-Language header. A static fetch has no script phase, so both
/// [`WaitUntil`] conditions are met once the body has been read.
pub struct HttpRenderer {
    client: Client,
    user_agents: Vec<String>,
    accept_language: String,
}

impl HttpRenderer {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: create_page_client(config)?,
            user_agents: config.user_agents.clone(),
            accept_language: config.accept_language.clone(),
        })
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str, options: &RenderOptions) -> Result<String> {
        let mut request = self
            .client
            .get(url)
            .timeout(options.timeout)
            .header(ACCEPT_LANGUAGE, &self.accept_language);
        if let Some(ua) = pick_user_agent(&self.user_agents) {
            request = request.header(USER_AGENT, ua);
        }

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::transport(url, e))?;

        // Decodes with the charset the server declares (the forum serves EUC-KR).
        response.text().await.map_err(|e| AppError::transport(url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, headers, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn options() -> RenderOptions {
        RenderOptions::new(Duration::from_secs(5), WaitUntil::NetworkIdle)
    }

    #[tokio::test]
    async fn test_render_sends_browser_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zboard/zboard.php"))
            .and(headers(
                "accept-language",
                vec!["ko-KR", "ko;q=0.9", "en-US;q=0.8", "en;q=0.7"],
            ))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let renderer = HttpRenderer::new(&CrawlerConfig::default()).unwrap();
        let html = renderer
            .render(&format!("{}/zboard/zboard.php", server.uri()), &options())
            .await
            .unwrap();
        assert_eq!(html, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_render_maps_status_to_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let renderer = HttpRenderer::new(&CrawlerConfig::default()).unwrap();
        let result = renderer.render(&server.uri(), &options()).await;
        assert!(matches!(result, Err(AppError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_render_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let renderer = HttpRenderer::new(&CrawlerConfig::default()).unwrap();
        let opts = RenderOptions::new(Duration::from_millis(50), WaitUntil::DomContentLoaded);
        assert!(renderer.render(&server.uri(), &opts).await.is_err());
    }
}
