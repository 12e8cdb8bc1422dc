pub mod bookmarks;
pub mod error;
pub mod model;
pub mod views;

pub use bookmarks::BookmarkTracker;
pub use error::InteractionError;
pub use model::{Bookmark, ViewOutcome, WriteOutcome};
pub use views::ViewTracker;

use crate::error::AppResult;
use async_trait::async_trait;

/// Keyed bookmark store
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    async fn list_for_user(&self, user_key: &str) -> AppResult<Vec<Bookmark>>;

    /// Insert, or overwrite the metadata of the existing `(user_key, article_key)` row
    async fn upsert(&self, bookmark: &Bookmark) -> AppResult<()>;

    /// Remove the row if present; a missing row is not an error
    async fn delete(&self, user_key: &str, article_key: &str) -> AppResult<()>;
}

/// Per-article view counters
#[async_trait]
pub trait ViewCountRepository: Send + Sync {
    /// Add one view and return the new total
    async fn increment(&self, article_key: &str) -> AppResult<i64>;

    /// Current total, 0 for unknown keys
    async fn get(&self, article_key: &str) -> AppResult<i64>;
}
