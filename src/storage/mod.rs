//! Storage abstractions for crawl history.
//!
//! Each crawler keeps one history file: a JSON array of the dedup keys it has
//! already processed. The file is read once at start and rewritten wholesale
//! at the end of a run.
//!
//! ## Directory Structure
//!
//! ```text
//! {data_dir}/
//! ├── crawled_posts_jjizzle.json   # pass-through
//! ├── crawled_posts.json           # URL harvest
//! └── crawled_quiz_posts.json      # quiz
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for history storage backends.
#[async_trait]
pub trait HistoryStorage: Send + Sync {
    /// Load a history snapshot. `Ok(None)` when it does not exist yet.
    async fn load_history(&self, name: &str) -> Result<Option<Vec<String>>>;

    /// Replace a history snapshot with `keys`.
    async fn save_history(&self, name: &str, keys: &[String]) -> Result<()>;
}
