//! Service layer for the crawler application.
//!
//! This module contains the I/O-facing pieces:
//! - Page rendering (`PageRenderer`, `HttpRenderer`)
//! - Listing and body fetching (`Fetcher`)
//! - The registration API client (`LinkRegistry`, `ApiClient`)

pub mod fetcher;
pub mod registry;
pub mod renderer;

pub use fetcher::Fetcher;
pub use registry::{ApiClient, DryRunRegistry, LinkRegistry, RegisterOutcome};
pub use renderer::{HttpRenderer, PageRenderer, RenderOptions, WaitUntil};
