//! Utility functions and helpers.

pub mod http;
pub mod pacing;

use chrono::{FixedOffset, NaiveDate, Utc};
use unicode_segmentation::UnicodeSegmentation;
use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Shorten text to at most `max` grapheme clusters, appending "..." when cut.
pub fn shorten(text: &str, max: usize) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(max).collect();
    if graphemes.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Today's calendar date at a fixed UTC offset.
pub fn date_at_offset(offset_hours: i32) -> NaiveDate {
    match FixedOffset::east_opt(offset_hours * 3600) {
        Some(offset) => Utc::now().with_timezone(&offset).date_naive(),
        None => Utc::now().date_naive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://www.ppomppu.co.kr/zboard/zboard.php?id=coupon").unwrap();
        assert_eq!(
            resolve_url(&base, "view.php?id=coupon&no=1"),
            "https://www.ppomppu.co.kr/zboard/view.php?id=coupon&no=1"
        );
        assert_eq!(
            resolve_url(&base, "/zboard/view.php?id=phone&no=2"),
            "https://www.ppomppu.co.kr/zboard/view.php?id=phone&no=2"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_shorten_counts_graphemes() {
        assert_eq!(shorten("[Hpoint] 퀴즈", 30), "[Hpoint] 퀴즈");
        assert_eq!(shorten("가나다라마", 3), "가나다...");
    }
}
