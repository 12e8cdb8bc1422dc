use crate::domain::article::SourceRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user's saved article, unique per `(user_key, article_key)`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Bookmark {
    pub user_key: String,
    pub article_key: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub source: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl Bookmark {
    /// `None` when the article has no canonical key
    pub fn from_article(user_key: &str, article: &SourceRecord, saved_at: DateTime<Utc>) -> Option<Self> {
        let article_key = article.canonical_key()?;
        Some(Self {
            user_key: user_key.to_string(),
            article_key: article_key.to_string(),
            title: article.title.clone(),
            description: article.summary.clone(),
            image_url: article.image_url.clone(),
            source: article.source.clone(),
            saved_at,
        })
    }
}

/// Whether an interaction write was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    /// The article has no canonical key, nothing was written
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    /// Counter incremented; carries the count the store reported
    Counted(i64),
    /// Already counted during this session
    AlreadyCounted,
    NotTrackable,
}
