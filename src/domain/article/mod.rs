pub mod dedup;
pub mod model;
pub mod search;

pub use dedup::dedup_by_canonical_key;
pub use model::{ArticleBatch, ArticleQuery, SourceRecord};
pub use search::{normalize_search_hits, SearchHit};

use crate::error::AppResult;
use async_trait::async_trait;

/// Read side of the remote article store
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch `[offset, offset + limit)` of the (optionally category-filtered)
    /// collection ordered by `created_at` descending
    async fn query(&self, query: &ArticleQuery) -> AppResult<ArticleBatch>;
}

/// Derive the key used for deduplication, bookmarks and view counts.
///
/// Prefers the explicit source URL and falls back to the generic link.
/// Surrounding whitespace is ignored; an empty key means the article is not
/// trackable.
pub fn canonical_key<'a>(source_url: Option<&'a str>, link: Option<&'a str>) -> Option<&'a str> {
    source_url
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| link.map(str::trim).filter(|s| !s.is_empty()))
}
