// src/models/item.rs

//! Records produced by the extractors.

use serde::Serialize;

use crate::models::QuizCategory;

/// A post ready for direct registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkItem {
    pub url: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
}

/// A URL found inside a post body, tagged with a fixed label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestedUrl {
    pub url: String,
    pub tag: String,
}

/// A quiz answer parsed from a post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAnswer {
    pub category: QuizCategory,
    pub answer: String,
    pub original_title: String,
    pub post_link: String,
}

/// Output of an extractor for one candidate post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedItem {
    Link(LinkItem),
    Harvested(HarvestedUrl),
    Quiz(QuizAnswer),
}

/// Request body for `POST /links`.
///
/// Text-only cards carry their text in `url`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct LinkPayload {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl From<&LinkItem> for LinkPayload {
    fn from(item: &LinkItem) -> Self {
        Self {
            url: item.url.clone(),
            title: Some(item.title.clone()),
            description: Some(item.description.clone()),
            thumbnail: item.thumbnail.clone(),
            tags: Vec::new(),
        }
    }
}

impl From<&HarvestedUrl> for LinkPayload {
    fn from(item: &HarvestedUrl) -> Self {
        Self {
            url: item.url.clone(),
            tags: vec![item.tag.clone()],
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_payload_skips_empty_fields() {
        let payload = LinkPayload::from(&HarvestedUrl {
            url: "https://event.example.com/a".to_string(),
            tag: "NPay적립".to_string(),
        });
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "url": "https://event.example.com/a", "tags": ["NPay적립"] })
        );
    }

    #[test]
    fn test_link_item_payload_has_no_tags() {
        let payload = LinkPayload::from(&LinkItem {
            url: "https://www.ppomppu.co.kr/zboard/view.php?id=phone&no=1".to_string(),
            title: "title".to_string(),
            description: "휴대폰포럼 - 쥐즐".to_string(),
            thumbnail: Some("/icon_app_20160427.png".to_string()),
        });
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("tags").is_none());
        assert_eq!(json["thumbnail"], "/icon_app_20160427.png");
    }
}
