//! Crawl pipeline.
//!
//! - `run_passthrough`: register board posts as links
//! - `run_harvest`: register URLs found inside marked posts
//! - `run_quiz`: publish today's quiz answers as one digest

pub mod aggregate;
pub mod coordinator;
pub mod dedup;
pub mod run;
pub mod state;

pub use aggregate::Digest;
pub use coordinator::{Coordinator, Job, RunReport};
pub use dedup::DedupStore;
pub use run::{RunContext, run_harvest, run_passthrough, run_quiz};
pub use state::{Disposition, RunStats};
