// src/extract/harvest.rs

//! Collects outbound URLs from posts whose title carries a marker.
//!
//! Every anchor in the post body is inspected twice, once for its visible text
//! and once for its `href`; whichever looks like an absolute http(s) URL is
//! kept. URLs on excluded (tracking redirect) hosts are skipped.

use std::collections::HashSet;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::extract::{Extraction, Extractor};
use crate::models::{CandidatePost, ExtractedItem, HarvestConfig, HarvestedUrl, PostBody, Target};
use crate::pipeline::Disposition;
use crate::services::Fetcher;

static ABSOLUTE_HTTP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("static regex"));

pub struct HarvestExtractor {
    title_marker: String,
    body_selectors: Vec<String>,
    excluded_hosts: Vec<String>,
    tag: String,
}

impl HarvestExtractor {
    pub fn new(config: &HarvestConfig) -> Self {
        Self {
            title_marker: config.title_marker.clone(),
            body_selectors: config.body_selectors.clone(),
            excluded_hosts: config.excluded_hosts.clone(),
            tag: config.tag.clone(),
        }
    }
}

/// Unique URLs referenced by the anchors of `body`, in document order.
pub fn harvest_urls(body: &PostBody, excluded_hosts: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    let candidates = body
        .anchors
        .iter()
        .flat_map(|a| [Some(a.text.as_str()), a.href.as_deref()])
        .flatten()
        .map(str::trim);

    for candidate in candidates {
        if !ABSOLUTE_HTTP.is_match(candidate) {
            continue;
        }
        if excluded_hosts.iter().any(|host| candidate.contains(host.as_str())) {
            continue;
        }
        if seen.insert(candidate) {
            urls.push(candidate.to_string());
        }
    }
    urls
}

#[async_trait]
impl Extractor for HarvestExtractor {
    fn name(&self) -> &'static str {
        "harvest"
    }

    fn screen(&self, post: &CandidatePost) -> Option<Disposition> {
        if post.title.contains(&self.title_marker) {
            None
        } else {
            Some(Disposition::CategoryUnmatched)
        }
    }

    async fn extract(&self, _target: &Target, post: &CandidatePost, fetcher: &Fetcher) -> Extraction {
        let Some(body) = fetcher.fetch_body(&post.link, &self.body_selectors).await else {
            return Extraction::Unavailable;
        };

        let urls = harvest_urls(&body, &self.excluded_hosts);
        log::info!("Found {} URLs in '{}'", urls.len(), post.short_title());
        if urls.is_empty() {
            return Extraction::Unavailable;
        }

        Extraction::Items(
            urls.into_iter()
                .map(|url| {
                    ExtractedItem::Harvested(HarvestedUrl {
                        url,
                        tag: self.tag.clone(),
                    })
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Anchor;

    fn anchor(text: &str, href: Option<&str>) -> Anchor {
        Anchor {
            text: text.to_string(),
            href: href.map(str::to_string),
        }
    }

    #[test]
    fn test_harvest_text_and_href() {
        let body = PostBody {
            text: "본문".to_string(),
            anchors: vec![
                anchor("https://a.example.com/x", Some("https://s.ppomppu.co.kr/?target=abc")),
                anchor("여기", Some("https://b.example.com/y")),
                anchor(" https://a.example.com/x ", None),
                anchor("mailto:me@example.com", Some("/relative/path")),
            ],
        };

        let urls = harvest_urls(&body, &["s.ppomppu.co.kr".to_string()]);
        assert_eq!(urls, vec!["https://a.example.com/x", "https://b.example.com/y"]);
    }

    #[test]
    fn test_harvest_empty_body() {
        assert!(harvest_urls(&PostBody::default(), &[]).is_empty());
    }

    #[test]
    fn test_marker_screen() {
        let extractor = HarvestExtractor::new(&HarvestConfig::default());
        let hit = CandidatePost::new("[네이버페이] 10원 적립", "https://www.ppomppu.co.kr/zboard/view.php?id=coupon&no=1");
        let miss = CandidatePost::new("[KB Pay] 퀴즈", "https://www.ppomppu.co.kr/zboard/view.php?id=coupon&no=2");

        assert_eq!(extractor.screen(&hit), None);
        assert_eq!(extractor.screen(&miss), Some(Disposition::CategoryUnmatched));
    }
}
