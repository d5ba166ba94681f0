// src/pipeline/run.rs

//! Entry points for the three crawler variants.

use std::time::Duration;

use crate::error::Result;
use crate::extract::{HarvestExtractor, PassThroughExtractor, QuizExtractor};
use crate::models::Config;
use crate::pipeline::coordinator::{Coordinator, Job, RunReport};
use crate::services::{Fetcher, LinkRegistry};
use crate::storage::HistoryStorage;
use crate::utils::date_at_offset;
use crate::utils::pacing::Pacing;

/// Shared I/O handles for a run.
pub struct RunContext<'a> {
    pub fetcher: &'a Fetcher,
    pub registry: &'a dyn LinkRegistry,
    pub storage: &'a dyn HistoryStorage,
    /// Leave history files untouched
    pub dry_run: bool,
}

impl RunContext<'_> {
    fn coordinator(&self, config: &Config, item_delay_ms: u64) -> Coordinator<'_> {
        let pacing = Pacing::new(
            Duration::from_millis(item_delay_ms),
            config.crawler.request_delay(),
        );
        let coordinator = Coordinator::new(self.fetcher, self.registry, self.storage, pacing);
        if self.dry_run {
            coordinator.without_persist()
        } else {
            coordinator
        }
    }
}

/// Register new posts from the configured boards as links.
pub async fn run_passthrough(config: &Config, ctx: &RunContext<'_>) -> Result<RunReport> {
    let section = &config.passthrough;
    log::info!("Pass-through crawler: {} boards", section.targets.len());

    let extractor = PassThroughExtractor::new(section);
    let job = Job {
        history_file: &section.history_file,
        targets: &section.targets,
        extractor: &extractor,
        digest_tag: None,
    };
    ctx.coordinator(config, section.item_delay_ms).run(&job).await
}

/// Register every outbound URL found in marked posts.
pub async fn run_harvest(config: &Config, ctx: &RunContext<'_>) -> Result<RunReport> {
    let section = &config.harvest;
    log::info!("Harvest crawler: titles containing '{}'", section.title_marker);

    let extractor = HarvestExtractor::new(section);
    let targets = std::slice::from_ref(&section.target);
    let job = Job {
        history_file: &section.history_file,
        targets,
        extractor: &extractor,
        digest_tag: None,
    };
    ctx.coordinator(config, section.item_delay_ms).run(&job).await
}

/// Collect today's quiz answers and publish them as one digest.
pub async fn run_quiz(config: &Config, ctx: &RunContext<'_>) -> Result<RunReport> {
    let section = &config.quiz;
    let today = date_at_offset(section.utc_offset_hours);
    log::info!(
        "Quiz crawler: {} (UTC{:+})",
        today.format("%Y-%m-%d"),
        section.utc_offset_hours
    );

    let extractor = QuizExtractor::new(section, today);
    let targets = std::slice::from_ref(&section.target);
    let job = Job {
        history_file: &section.history_file,
        targets,
        extractor: &extractor,
        digest_tag: Some(section.tag.as_str()),
    };
    ctx.coordinator(config, section.item_delay_ms).run(&job).await
}
