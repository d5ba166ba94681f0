//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{ListingSelectors, Target};
use crate::models::selectors::parse_selector;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Registration API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Filesystem locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Pass-through crawler (board posts registered as links)
    #[serde(default)]
    pub passthrough: PassThroughConfig,

    /// URL-harvest crawler (links found inside post bodies)
    #[serde(default)]
    pub harvest: HarvestConfig,

    /// Quiz crawler (daily answers published as one digest)
    #[serde(default)]
    pub quiz: QuizConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agents.iter().all(|ua| ua.trim().is_empty()) {
            return Err(AppError::validation("crawler.user_agents is empty"));
        }
        if self.crawler.listing_timeout_secs == 0 || self.crawler.post_timeout_secs == 0 {
            return Err(AppError::validation("crawler timeouts must be > 0"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.api.base_url)?;

        if self.passthrough.targets.is_empty() {
            return Err(AppError::validation("passthrough.targets is empty"));
        }
        for target in &self.passthrough.targets {
            validate_target(target)?;
        }
        validate_target(&self.harvest.target)?;
        validate_target(&self.quiz.target)?;

        if self.harvest.title_marker.trim().is_empty() {
            return Err(AppError::validation("harvest.title_marker is empty"));
        }
        validate_body_selectors("harvest", &self.harvest.body_selectors)?;
        validate_body_selectors("quiz", &self.quiz.body_selectors)?;

        if !(-12..=14).contains(&self.quiz.utc_offset_hours) {
            return Err(AppError::validation(
                "quiz.utc_offset_hours must be within -12..=14",
            ));
        }
        Ok(())
    }

    /// Directory holding the history files.
    pub fn data_dir(&self) -> &Path {
        &self.paths.data_dir
    }
}

fn validate_target(target: &Target) -> Result<()> {
    let parsed = url::Url::parse(&target.url)?;
    if parsed.host_str().is_none() {
        return Err(AppError::validation(format!(
            "target '{}' has no host",
            target.name
        )));
    }
    target.selectors.compile()?;
    Ok(())
}

fn validate_body_selectors(section: &str, selectors: &[String]) -> Result<()> {
    if selectors.is_empty() {
        return Err(AppError::validation(format!(
            "{section}.body_selectors is empty"
        )));
    }
    for selector in selectors {
        parse_selector(selector)?;
    }
    Ok(())
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent pool; one is picked at random per request
    #[serde(default = "defaults::user_agents")]
    pub user_agents: Vec<String>,

    /// Accept-Language header sent with every page request
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Navigation timeout for listing pages in seconds
    #[serde(default = "defaults::listing_timeout")]
    pub listing_timeout_secs: u64,

    /// Navigation timeout for post pages in seconds
    #[serde(default = "defaults::post_timeout")]
    pub post_timeout_secs: u64,

    /// Delay after each registration call within one post, in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl CrawlerConfig {
    pub fn listing_timeout(&self) -> Duration {
        Duration::from_secs(self.listing_timeout_secs)
    }

    pub fn post_timeout(&self) -> Duration {
        Duration::from_secs(self.post_timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agents: defaults::user_agents(),
            accept_language: defaults::accept_language(),
            listing_timeout_secs: defaults::listing_timeout(),
            post_timeout_secs: defaults::post_timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Registration API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; `/links` and `/links/check` are appended
    #[serde(default = "defaults::api_base_url")]
    pub base_url: String,

    /// Environment variable holding the API secret
    #[serde(default = "defaults::api_key_env")]
    pub key_env: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::api_timeout")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Read the API secret from the environment.
    pub fn resolve_key(&self) -> Result<String> {
        match std::env::var(&self.key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AppError::config(format!(
                "{} environment variable is not set",
                self.key_env
            ))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::api_base_url(),
            key_env: defaults::api_key_env(),
            timeout_secs: defaults::api_timeout(),
        }
    }
}

/// Filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the crawl history files
    #[serde(default = "defaults::data_dir")]
    pub data_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir(),
        }
    }
}

/// Pass-through crawler settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassThroughConfig {
    /// History file name inside `paths.data_dir`
    #[serde(default = "defaults::passthrough_history")]
    pub history_file: String,

    /// Boards to crawl, in order
    #[serde(default = "defaults::passthrough_targets")]
    pub targets: Vec<Target>,

    /// Appended to the board display name to form the description
    #[serde(default = "defaults::description_suffix")]
    pub description_suffix: String,

    /// Thumbnail path sent with every registration
    #[serde(default = "defaults::thumbnail")]
    pub thumbnail: Option<String>,

    /// Links containing any of these substrings are never registered
    #[serde(default = "defaults::blocklist")]
    pub blocklist: Vec<String>,

    /// Delay after each post that reached the API, in milliseconds
    #[serde(default = "defaults::passthrough_delay")]
    pub item_delay_ms: u64,
}

impl Default for PassThroughConfig {
    fn default() -> Self {
        Self {
            history_file: defaults::passthrough_history(),
            targets: defaults::passthrough_targets(),
            description_suffix: defaults::description_suffix(),
            thumbnail: defaults::thumbnail(),
            blocklist: defaults::blocklist(),
            item_delay_ms: defaults::passthrough_delay(),
        }
    }
}

/// URL-harvest crawler settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    #[serde(default = "defaults::harvest_history")]
    pub history_file: String,

    #[serde(default = "defaults::coupon_target")]
    pub target: Target,

    /// Only titles containing this marker are considered
    #[serde(default = "defaults::harvest_marker")]
    pub title_marker: String,

    /// Body selectors tried in order
    #[serde(default = "defaults::harvest_body_selectors")]
    pub body_selectors: Vec<String>,

    /// URLs containing any of these hosts are skipped (tracking redirects)
    #[serde(default = "defaults::excluded_hosts")]
    pub excluded_hosts: Vec<String>,

    /// Tag attached to every harvested URL
    #[serde(default = "defaults::harvest_tag")]
    pub tag: String,

    #[serde(default = "defaults::post_delay")]
    pub item_delay_ms: u64,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            history_file: defaults::harvest_history(),
            target: defaults::coupon_target(),
            title_marker: defaults::harvest_marker(),
            body_selectors: defaults::harvest_body_selectors(),
            excluded_hosts: defaults::excluded_hosts(),
            tag: defaults::harvest_tag(),
            item_delay_ms: defaults::post_delay(),
        }
    }
}

/// Quiz crawler settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default = "defaults::quiz_history")]
    pub history_file: String,

    #[serde(default = "defaults::coupon_target")]
    pub target: Target,

    /// Body selectors tried in order
    #[serde(default = "defaults::quiz_body_selectors")]
    pub body_selectors: Vec<String>,

    /// Tag attached to the digest card
    #[serde(default = "defaults::quiz_tag")]
    pub tag: String,

    /// Offset used to compute "today" for title dates
    #[serde(default = "defaults::utc_offset")]
    pub utc_offset_hours: i32,

    /// Accept titles that carry no date at all
    #[serde(default)]
    pub allow_undated_titles: bool,

    #[serde(default = "defaults::post_delay")]
    pub item_delay_ms: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            history_file: defaults::quiz_history(),
            target: defaults::coupon_target(),
            body_selectors: defaults::quiz_body_selectors(),
            tag: defaults::quiz_tag(),
            utc_offset_hours: defaults::utc_offset(),
            allow_undated_titles: false,
            item_delay_ms: defaults::post_delay(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    use crate::models::{ListingSelectors, Target};

    // Crawler defaults
    pub fn user_agents() -> Vec<String> {
        vec![
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".into(),
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15".into(),
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36".into(),
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:120.0) Gecko/20100101 Firefox/120.0".into(),
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.5993.70 Safari/537.36".into(),
        ]
    }
    pub fn accept_language() -> String {
        "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7".into()
    }
    pub fn listing_timeout() -> u64 {
        30
    }
    pub fn post_timeout() -> u64 {
        15
    }
    pub fn request_delay() -> u64 {
        1000
    }
    pub fn post_delay() -> u64 {
        2000
    }

    // API defaults
    pub fn api_base_url() -> String {
        "https://linkhub-dev.vercel.app/api".into()
    }
    pub fn api_key_env() -> String {
        "API_SECRET_KEY".into()
    }
    pub fn api_timeout() -> u64 {
        15
    }

    pub fn data_dir() -> PathBuf {
        PathBuf::from(".")
    }

    // Pass-through defaults
    pub fn passthrough_history() -> String {
        "crawled_posts_jjizzle.json".into()
    }
    pub fn passthrough_targets() -> Vec<Target> {
        vec![
            Target {
                name: "phone".to_string(),
                display_name: "휴대폰포럼".to_string(),
                url: "https://www.ppomppu.co.kr/zboard/zboard.php?search_type=name&id=phone&page_num=30&keyword=%C1%E3%C1%F1".to_string(),
                selectors: ListingSelectors::title_anchor(),
            },
            Target {
                name: "money".to_string(),
                display_name: "재테크포럼".to_string(),
                url: "https://www.ppomppu.co.kr/zboard/zboard.php?search_type=name&id=money&page_num=30&keyword=%C1%E3%C1%F1".to_string(),
                selectors: ListingSelectors::title_anchor(),
            },
        ]
    }
    pub fn description_suffix() -> String {
        "쥐즐".into()
    }
    pub fn thumbnail() -> Option<String> {
        Some("/icon_app_20160427.png".into())
    }
    pub fn blocklist() -> Vec<String> {
        vec!["sponsor".into(), "consulting".into()]
    }
    pub fn passthrough_delay() -> u64 {
        1000
    }

    // Coupon board, shared by harvest and quiz
    pub fn coupon_target() -> Target {
        Target {
            name: "coupon".to_string(),
            display_name: "쿠폰게시판".to_string(),
            url: "https://www.ppomppu.co.kr/zboard/zboard.php?id=coupon".to_string(),
            selectors: ListingSelectors::title_span(),
        }
    }

    // Harvest defaults
    pub fn harvest_history() -> String {
        "crawled_posts.json".into()
    }
    pub fn harvest_marker() -> String {
        "네이버페이".into()
    }
    pub fn harvest_body_selectors() -> Vec<String> {
        vec!["td.board-contents".into()]
    }
    pub fn excluded_hosts() -> Vec<String> {
        vec!["s.ppomppu.co.kr".into()]
    }
    pub fn harvest_tag() -> String {
        "NPay적립".into()
    }

    // Quiz defaults
    pub fn quiz_history() -> String {
        "crawled_quiz_posts.json".into()
    }
    pub fn quiz_body_selectors() -> Vec<String> {
        vec![
            "td.board-contents".into(),
            "#readArea".into(),
            ".board-contents".into(),
            ".content".into(),
        ]
    }
    pub fn quiz_tag() -> String {
        "퀴즈".into()
    }
    pub fn utc_offset() -> i32 {
        9
    }
}
