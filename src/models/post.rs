// src/models/post.rs

//! Listing entries and post bodies.

use serde::{Deserialize, Serialize};

use crate::models::ListingSelectors;
use crate::utils::shorten;

/// A board listing to crawl.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Target {
    /// Short identifier (e.g. "phone")
    pub name: String,

    /// Human-readable board name used in descriptions and logs
    pub display_name: String,

    /// Listing page URL
    pub url: String,

    /// Selectors for this listing
    #[serde(default)]
    pub selectors: ListingSelectors,
}

/// A listing entry that has not been evaluated yet.
///
/// `link` is absolute and doubles as the dedup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePost {
    pub title: String,
    pub link: String,
}

impl CandidatePost {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }

    /// Dedup key for this post.
    pub fn key(&self) -> &str {
        &self.link
    }

    /// Title shortened for log lines.
    pub fn short_title(&self) -> String {
        shorten(&self.title, 30)
    }
}

/// An anchor found inside a post body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub text: String,
    pub href: Option<String>,
}

/// Content of a single post as matched by a body selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostBody {
    pub text: String,
    pub anchors: Vec<Anchor>,
}
