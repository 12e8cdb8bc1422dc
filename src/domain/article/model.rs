use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ingested article, normalized from whichever path produced it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct SourceRecord {
    pub id: String,
    /// Explicit source URL; the preferred canonical key
    pub canonical_url: Option<String>,
    /// Generic link, used as the key only when `canonical_url` is missing
    pub link: Option<String>,
    pub title: String,
    pub summary: Option<String>,
    pub image_url: Option<String>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SourceRecord {
    pub fn canonical_key(&self) -> Option<&str> {
        super::canonical_key(self.canonical_url.as_deref(), self.link.as_deref())
    }
}

/// Window request against the article store, always ordered newest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub category: Option<String>,
    pub offset: u64,
    pub limit: u32,
}

/// Raw window returned by the article store
#[derive(Debug, Clone, Default)]
pub struct ArticleBatch {
    pub records: Vec<SourceRecord>,
    /// Exact size of the filtered collection, when the store can report it
    pub exact_count: Option<u64>,
}
