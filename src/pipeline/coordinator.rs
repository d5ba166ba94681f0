// src/pipeline/coordinator.rs

//! Sequential crawl loop shared by all crawler variants.
//!
//! For every candidate of every target, in listing order:
//! 1. `screen` (title/link rules, no dedup lookup)
//! 2. local dedup
//! 3. remote existence check
//! 4. `gate` (run-state rules)
//! 5. extraction
//! 6. registration, or acceptance into the digest
//!
//! The history snapshot is written once, after every candidate is settled.

use crate::error::Result;
use crate::extract::{Extraction, Extractor};
use crate::models::{CandidatePost, ExtractedItem, LinkPayload, Target};
use crate::pipeline::aggregate::Digest;
use crate::pipeline::dedup::DedupStore;
use crate::pipeline::state::{Disposition, RunStats};
use crate::services::{Fetcher, LinkRegistry, RegisterOutcome};
use crate::storage::HistoryStorage;
use crate::utils::pacing::Pacing;

/// One crawler run: where to read, how to judge, where to remember.
pub struct Job<'a> {
    pub history_file: &'a str,
    pub targets: &'a [Target],
    pub extractor: &'a dyn Extractor,
    /// Tag for the digest card; `None` for crawlers that register directly
    pub digest_tag: Option<&'a str>,
}

/// What a run did.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub stats: RunStats,
    /// Digest text published at the end of the run, if any
    pub digest: Option<String>,
}

/// Mutable state of one run.
#[derive(Debug, Default)]
struct RunState {
    stats: RunStats,
    /// Accepted answers; their post keys settle with the digest registration
    digest: Digest,
}

/// Drives candidates through the pipeline.
pub struct Coordinator<'a> {
    fetcher: &'a Fetcher,
    registry: &'a dyn LinkRegistry,
    storage: &'a dyn HistoryStorage,
    pacing: Pacing,
    persist: bool,
}

impl<'a> Coordinator<'a> {
    pub fn new(
        fetcher: &'a Fetcher,
        registry: &'a dyn LinkRegistry,
        storage: &'a dyn HistoryStorage,
        pacing: Pacing,
    ) -> Self {
        Self {
            fetcher,
            registry,
            storage,
            pacing,
            persist: true,
        }
    }

    /// Keep the history snapshot untouched (dry runs).
    pub fn without_persist(mut self) -> Self {
        self.persist = false;
        self
    }

    pub async fn run(&self, job: &Job<'_>) -> Result<RunReport> {
        let name = job.extractor.name();
        let mut store = DedupStore::load(self.storage, job.history_file).await;
        let mut state = RunState::default();

        for target in job.targets {
            let candidates = self.fetcher.list_candidates(target).await;
            log::info!("[{}] {}: {} candidates", name, target.display_name, candidates.len());

            for post in &candidates {
                state.stats.candidates += 1;
                if let Some(disposition) = self
                    .process(target, post, job.extractor, &mut store, &mut state)
                    .await
                {
                    settle(&mut store, &mut state.stats, post, disposition);
                }
            }
        }

        let digest = match job.digest_tag {
            Some(tag) => self.publish_digest(tag, &mut store, &mut state).await,
            None => None,
        };

        if self.persist {
            match store.persist(self.storage, job.history_file).await {
                Ok(true) => {
                    state.stats.persisted = true;
                    log::info!("Saved {} processed posts to {}", store.len(), job.history_file);
                }
                Ok(false) => log::info!("No new posts, {} unchanged", job.history_file),
                Err(e) => log::error!("Failed to save {}: {}", job.history_file, e),
            }
        }

        log_summary(name, &state.stats);
        Ok(RunReport {
            stats: state.stats,
            digest,
        })
    }

    /// Returns `None` when the outcome is deferred to the digest.
    async fn process(
        &self,
        target: &Target,
        post: &CandidatePost,
        extractor: &dyn Extractor,
        store: &mut DedupStore,
        state: &mut RunState,
    ) -> Option<Disposition> {
        if let Some(disposition) = extractor.screen(post) {
            return Some(disposition);
        }
        if store.seen_locally(post.key()) {
            return Some(Disposition::LocallyDuplicate);
        }

        let outcome = self.evaluate(target, post, extractor, store, state).await;
        self.pacing.after_item().await;
        outcome
    }

    async fn evaluate(
        &self,
        target: &Target,
        post: &CandidatePost,
        extractor: &dyn Extractor,
        store: &DedupStore,
        state: &mut RunState,
    ) -> Option<Disposition> {
        if store.exists_remotely(post.key(), self.registry).await {
            return Some(Disposition::RemoteDuplicate);
        }
        if let Some(disposition) = extractor.gate(post, &state.digest) {
            return Some(disposition);
        }

        let items = match extractor.extract(target, post, self.fetcher).await {
            Extraction::Items(items) => items,
            Extraction::Unavailable => return Some(Disposition::ExtractionUnavailable),
        };

        let mut disposition = Disposition::Registered;
        for item in items {
            let payload = match item {
                ExtractedItem::Quiz(answer) => {
                    return if state.digest.accept(answer) {
                        None
                    } else {
                        Some(Disposition::CategorySatisfied)
                    };
                }
                ExtractedItem::Link(link) => LinkPayload::from(&link),
                ExtractedItem::Harvested(harvested) => LinkPayload::from(&harvested),
            };

            if !self.register(&payload, &mut state.stats).await {
                disposition = Disposition::RegistrationFailed;
            }
            self.pacing.after_request().await;
        }
        Some(disposition)
    }

    /// Register one payload. Returns whether the API holds it afterwards.
    async fn register(&self, payload: &LinkPayload, stats: &mut RunStats) -> bool {
        stats.api_calls += 1;
        let outcome = self.registry.register(payload).await;
        match &outcome {
            RegisterOutcome::Registered => log::info!("Registered {}", payload.url),
            RegisterOutcome::DuplicateRejected => {
                stats.duplicates_rejected += 1;
                log::info!("Already registered {}", payload.url);
            }
            RegisterOutcome::Failed(reason) => {
                log::error!("Registration failed for {}: {}", payload.url, reason);
            }
        }
        outcome.is_accepted()
    }

    async fn publish_digest(
        &self,
        tag: &str,
        store: &mut DedupStore,
        state: &mut RunState,
    ) -> Option<String> {
        let payload = state.digest.payload(tag)?;
        log::info!("Publishing digest with {} answers:\n{}", state.digest.len(), payload.url);

        let disposition = if self.register(&payload, &mut state.stats).await {
            Disposition::Registered
        } else {
            Disposition::RegistrationFailed
        };

        for key in state.digest.post_links() {
            state.stats.record(disposition);
            if disposition.marks_seen() {
                store.mark_seen(key);
            }
        }
        Some(payload.url)
    }
}

fn settle(store: &mut DedupStore, stats: &mut RunStats, post: &CandidatePost, disposition: Disposition) {
    stats.record(disposition);
    if disposition.marks_seen() {
        store.mark_seen(post.key());
    }

    match disposition {
        Disposition::CategoryUnmatched | Disposition::Blocklisted => {
            log::debug!("[{}] {}", disposition, post.short_title());
        }
        _ => log::info!("[{}] {}", disposition, post.short_title()),
    }
}

fn log_summary(name: &str, stats: &RunStats) {
    log::info!(
        "[{}] done: {} candidates, {} new, {} failed, {} local-skip, {} remote-skip",
        name,
        stats.candidates,
        stats.registered,
        stats.registration_failed,
        stats.locally_duplicate,
        stats.remote_duplicate
    );
    log::info!(
        "[{}] filtered: {} blocklisted, {} unmatched, {} satisfied, {} date, {} unavailable; {} API calls ({} already known)",
        name,
        stats.blocklisted,
        stats.category_unmatched,
        stats.category_satisfied,
        stats.date_mismatched,
        stats.extraction_unavailable,
        stats.api_calls,
        stats.duplicates_rejected
    );
}
