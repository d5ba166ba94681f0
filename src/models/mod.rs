// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod category;
mod config;
mod item;
mod post;
pub(crate) mod selectors;

// Re-export all public types
pub use category::QuizCategory;
pub use config::{
    ApiConfig, Config, CrawlerConfig, HarvestConfig, PassThroughConfig, PathsConfig, QuizConfig,
};
pub use item::{ExtractedItem, HarvestedUrl, LinkItem, LinkPayload, QuizAnswer};
pub use post::{Anchor, CandidatePost, PostBody, Target};
pub use selectors::{CompiledSelectors, ListingSelectors};
