// src/models/selectors.rs

//! CSS selectors for scraping a forum listing page.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// CSS selectors for scraping a board listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingSelectors {
    /// Selector for each row/item in the listing
    pub row_selector: String,

    /// Selector for the title element within a row
    pub title_selector: String,

    /// Optional selector for the link element (if different from title)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_selector: Option<String>,

    /// HTML attribute name for extracting links (usually "href")
    #[serde(default = "default_attr_name")]
    pub attr_name: String,
}

fn default_attr_name() -> String {
    "href".to_string()
}

impl ListingSelectors {
    /// Selectors for boards whose title anchor carries both text and link.
    pub fn title_anchor() -> Self {
        Self {
            row_selector: "#revolution_main_table tr".to_string(),
            title_selector: "a.baseList-title".to_string(),
            link_selector: None,
            attr_name: default_attr_name(),
        }
    }

    /// Selectors for boards where the title text sits in a span inside the anchor.
    pub fn title_span() -> Self {
        Self {
            row_selector: "#revolution_main_table tr".to_string(),
            title_selector: "td.baseList-space.title a span".to_string(),
            link_selector: Some("td.baseList-space.title a".to_string()),
            attr_name: default_attr_name(),
        }
    }

    /// Parse every selector, failing on the first invalid one.
    pub fn compile(&self) -> Result<CompiledSelectors> {
        Ok(CompiledSelectors {
            row: parse_selector(&self.row_selector)?,
            title: parse_selector(&self.title_selector)?,
            link: self
                .link_selector
                .as_deref()
                .map(parse_selector)
                .transpose()?,
            attr_name: self.attr_name.clone(),
        })
    }
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self::title_anchor()
    }
}

/// Parsed form of [`ListingSelectors`].
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub row: Selector,
    pub title: Selector,
    pub link: Option<Selector>,
    pub attr_name: String,
}

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
