// src/extract/passthrough.rs

//! Registers listing entries as they are, without opening the post.

use async_trait::async_trait;

use crate::extract::{Extraction, Extractor};
use crate::models::{CandidatePost, ExtractedItem, LinkItem, PassThroughConfig, Target};
use crate::pipeline::Disposition;
use crate::services::Fetcher;

pub struct PassThroughExtractor {
    blocklist: Vec<String>,
    description_suffix: String,
    thumbnail: Option<String>,
}

impl PassThroughExtractor {
    pub fn new(config: &PassThroughConfig) -> Self {
        Self {
            blocklist: config.blocklist.clone(),
            description_suffix: config.description_suffix.clone(),
            thumbnail: config.thumbnail.clone(),
        }
    }

    /// First blocklist entry contained in `link`.
    fn blocked_by(&self, link: &str) -> Option<&str> {
        self.blocklist
            .iter()
            .map(String::as_str)
            .find(|needle| !needle.is_empty() && link.contains(needle))
    }

    fn description(&self, target: &Target) -> String {
        format!("{} - {}", target.display_name, self.description_suffix)
    }
}

#[async_trait]
impl Extractor for PassThroughExtractor {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn screen(&self, post: &CandidatePost) -> Option<Disposition> {
        let needle = self.blocked_by(&post.link)?;
        log::debug!("Blocked '{}' ({})", post.short_title(), needle);
        Some(Disposition::Blocklisted)
    }

    async fn extract(&self, target: &Target, post: &CandidatePost, _fetcher: &Fetcher) -> Extraction {
        Extraction::Items(vec![ExtractedItem::Link(LinkItem {
            url: post.link.clone(),
            title: post.title.clone(),
            description: self.description(target),
            thumbnail: self.thumbnail.clone(),
        })])
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{AppError, Result};
    use crate::models::ListingSelectors;
    use crate::services::{PageRenderer, RenderOptions};

    struct Offline;

    #[async_trait]
    impl PageRenderer for Offline {
        async fn render(&self, url: &str, _options: &RenderOptions) -> Result<String> {
            Err(AppError::transport(url, "offline"))
        }
    }

    fn target() -> Target {
        Target {
            name: "phone".to_string(),
            display_name: "휴대폰포럼".to_string(),
            url: "https://www.ppomppu.co.kr/zboard/zboard.php?id=phone".to_string(),
            selectors: ListingSelectors::default(),
        }
    }

    #[test]
    fn test_blocklist_screen() {
        let extractor = PassThroughExtractor::new(&PassThroughConfig::default());
        let sponsored = CandidatePost::new("광고", "https://www.ppomppu.co.kr/zboard/view.php?id=sponsor&no=1");
        let normal = CandidatePost::new("일반", "https://www.ppomppu.co.kr/zboard/view.php?id=phone&no=2");

        assert_eq!(extractor.screen(&sponsored), Some(Disposition::Blocklisted));
        assert_eq!(extractor.screen(&normal), None);
    }

    #[tokio::test]
    async fn test_extract_builds_link_item_without_fetch() {
        let extractor = PassThroughExtractor::new(&PassThroughConfig::default());
        let fetcher = Fetcher::new(
            Arc::new(Offline),
            RenderOptions::default(),
            RenderOptions::default(),
        );
        let post = CandidatePost::new("새 폰 후기", "https://www.ppomppu.co.kr/zboard/view.php?id=phone&no=2");

        let Extraction::Items(items) = extractor.extract(&target(), &post, &fetcher).await else {
            panic!("expected items");
        };
        assert_eq!(
            items,
            vec![ExtractedItem::Link(LinkItem {
                url: post.link.clone(),
                title: "새 폰 후기".to_string(),
                description: "휴대폰포럼 - 쥐즐".to_string(),
                thumbnail: Some("/icon_app_20160427.png".to_string()),
            })]
        );
    }
}
