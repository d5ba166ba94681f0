// src/extract/mod.rs

//! Per-crawler content rules.
//!
//! An [`Extractor`] decides which candidates are worth the network and turns
//! the survivors into [`ExtractedItem`]s. The coordinator calls it in three
//! places:
//! - [`Extractor::screen`] before any dedup lookup (title and link only)
//! - [`Extractor::gate`] after dedup, before any body fetch
//! - [`Extractor::extract`] for candidates that passed both

pub mod answer;
pub mod harvest;
pub mod passthrough;
pub mod quiz;

use async_trait::async_trait;

use crate::models::{CandidatePost, ExtractedItem, Target};
use crate::pipeline::{Digest, Disposition};
use crate::services::Fetcher;

pub use answer::{AnswerRule, AnswerRules};
pub use harvest::HarvestExtractor;
pub use passthrough::PassThroughExtractor;
pub use quiz::QuizExtractor;

/// Result of running an extractor on one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// At least one record to register or aggregate
    Items(Vec<ExtractedItem>),
    /// Body missing or no rule matched; the candidate may be retried later
    Unavailable,
}

/// Content rules for one crawler variant.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Cheap title and link checks. Returning a disposition drops the
    /// candidate before dedup is consulted.
    fn screen(&self, _post: &CandidatePost) -> Option<Disposition> {
        None
    }

    /// Checks that depend on run state, applied to candidates that are new.
    fn gate(&self, _post: &CandidatePost, _digest: &Digest) -> Option<Disposition> {
        None
    }

    /// Produce records for a candidate.
    async fn extract(&self, target: &Target, post: &CandidatePost, fetcher: &Fetcher) -> Extraction;
}
