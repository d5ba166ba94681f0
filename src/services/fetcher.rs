// src/services/fetcher.rs

//! Listing and post fetcher.
//!
//! Turns rendered pages into [`CandidatePost`]s and [`PostBody`]s using the
//! configured CSS selectors. Page-load failures never propagate: a listing
//! that cannot be loaded yields no candidates and a post that cannot be loaded
//! yields no body.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::Result;
use crate::models::selectors::parse_selector;
use crate::models::{Anchor, CandidatePost, CompiledSelectors, CrawlerConfig, PostBody, Target};
use crate::services::renderer::{PageRenderer, RenderOptions, WaitUntil};
use crate::utils::resolve_url;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("static selector"));

/// Service for reading listing pages and post bodies.
pub struct Fetcher {
    renderer: Arc<dyn PageRenderer>,
    listing: RenderOptions,
    post: RenderOptions,
}

impl Fetcher {
    /// Create a fetcher with explicit navigation options.
    pub fn new(renderer: Arc<dyn PageRenderer>, listing: RenderOptions, post: RenderOptions) -> Self {
        Self {
            renderer,
            listing,
            post,
        }
    }

    /// Create a fetcher with the timeouts from the crawler configuration.
    pub fn from_config(renderer: Arc<dyn PageRenderer>, config: &CrawlerConfig) -> Self {
        Self::new(
            renderer,
            RenderOptions::new(config.listing_timeout(), WaitUntil::NetworkIdle),
            RenderOptions::new(config.post_timeout(), WaitUntil::DomContentLoaded),
        )
    }

    /// Fetch the candidates listed on a board page, in page order.
    ///
    /// Returns an empty list when the page cannot be loaded or parsed.
    pub async fn list_candidates(&self, target: &Target) -> Vec<CandidatePost> {
        let html = match self.renderer.render(&target.url, &self.listing).await {
            Ok(html) => html,
            Err(e) => {
                log::error!("Failed to load listing {} ({}): {}", target.display_name, target.url, e);
                return Vec::new();
            }
        };

        match parse_listing(&html, target) {
            Ok(posts) => posts,
            Err(e) => {
                log::error!("Failed to parse listing {}: {}", target.display_name, e);
                Vec::new()
            }
        }
    }

    /// Fetch a post and return the content of the first selector with text.
    ///
    /// `None` means the body is unavailable for this run.
    pub async fn fetch_body(&self, link: &str, selectors: &[String]) -> Option<PostBody> {
        let html = match self.renderer.render(link, &self.post).await {
            Ok(html) => html,
            Err(e) => {
                log::warn!("Failed to load post {}: {}", link, e);
                return None;
            }
        };

        let body = extract_body(&html, selectors);
        if body.is_none() {
            log::info!("No body selector matched for {}", link);
        }
        body
    }
}

/// Parse a rendered listing into candidate posts.
///
/// Links are resolved against the listing URL; rows whose link leaves the
/// listing's host are dropped.
pub fn parse_listing(html: &str, target: &Target) -> Result<Vec<CandidatePost>> {
    let selectors = target.selectors.compile()?;
    let base_url = Url::parse(&target.url)?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selectors.row)
        .filter_map(|row| parse_row(&row, &selectors, &base_url))
        .collect())
}

fn parse_row(row: &ElementRef, selectors: &CompiledSelectors, base_url: &Url) -> Option<CandidatePost> {
    let title_elem = row.select(&selectors.title).next()?;
    let title = normalize_whitespace(&title_elem.text().collect::<String>());
    if title.is_empty() {
        return None;
    }

    let link_elem = match &selectors.link {
        Some(sel) => row.select(sel).next()?,
        None => title_elem,
    };
    let raw_link = link_elem.value().attr(&selectors.attr_name)?.trim();
    if raw_link.is_empty() {
        return None;
    }

    let link = resolve_url(base_url, raw_link);
    let same_host = Url::parse(&link)
        .ok()
        .is_some_and(|u| u.host_str() == base_url.host_str());
    if !same_host {
        log::debug!("Skipping off-site link {}", link);
        return None;
    }

    Some(CandidatePost { title, link })
}

/// Find the first selector whose element has non-empty text.
pub fn extract_body(html: &str, selectors: &[String]) -> Option<PostBody> {
    let document = Html::parse_document(html);

    selectors.iter().find_map(|raw| {
        let selector = match parse_selector(raw) {
            Ok(selector) => selector,
            Err(e) => {
                log::warn!("{}", e);
                return None;
            }
        };
        let element = document.select(&selector).next()?;
        let text: String = element.text().collect();
        if text.trim().is_empty() {
            return None;
        }
        Some(PostBody {
            text,
            anchors: collect_anchors(&element),
        })
    })
}

fn collect_anchors(element: &ElementRef) -> Vec<Anchor> {
    let mut seen = HashSet::new();
    element
        .select(&ANCHOR)
        .map(|a| Anchor {
            text: a.text().collect::<String>().trim().to_string(),
            href: a.value().attr("href").map(|h| h.trim().to_string()),
        })
        .filter(|anchor| seen.insert(anchor.clone()))
        .collect()
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
