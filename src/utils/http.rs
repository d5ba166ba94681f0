// src/utils/http.rs

//! HTTP client utilities.

use crate::error::Result;
use crate::models::{ApiConfig, CrawlerConfig};

/// Create the client used for forum page requests.
///
/// No default User-Agent is set; callers pick one per request.
pub fn create_page_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(config.listing_timeout().max(config.post_timeout()))
        .build()?;
    Ok(client)
}

/// Create the client used for registration API calls.
pub fn create_api_client(config: &ApiConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout())
        .build()?;
    Ok(client)
}

/// Pick a User-Agent from the pool at random.
pub fn pick_user_agent(pool: &[String]) -> Option<&str> {
    if pool.is_empty() {
        return None;
    }
    Some(pool[fastrand::usize(..pool.len())].as_str())
}
