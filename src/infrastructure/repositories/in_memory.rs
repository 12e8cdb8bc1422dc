//! Process-local implementations of the store traits, used by tests and local
//! runs without Postgres.

use crate::domain::article::{ArticleBatch, ArticleQuery, ArticleSource, SourceRecord};
use crate::domain::interaction::{Bookmark, BookmarkRepository, ViewCountRepository};
use crate::domain::spotlight::{prefer_latest_created, SpotlightRecord, SpotlightSource};
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
pub struct InMemoryArticleRepository {
    records: RwLock<Vec<SourceRecord>>,
    exact_counts: bool,
}

impl InMemoryArticleRepository {
    pub fn new(records: Vec<SourceRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            exact_counts: false,
        }
    }

    pub fn with_exact_counts(mut self) -> Self {
        self.exact_counts = true;
        self
    }

    pub fn insert(&self, record: SourceRecord) {
        self.records.write().push(record);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl ArticleSource for InMemoryArticleRepository {
    async fn query(&self, query: &ArticleQuery) -> AppResult<ArticleBatch> {
        let mut matching: Vec<SourceRecord> = self
            .records
            .read()
            .iter()
            .filter(|r| query.category.is_none() || r.category == query.category)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let exact_count = self.exact_counts.then_some(matching.len() as u64);
        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let records = matching
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .collect();

        Ok(ArticleBatch {
            records,
            exact_count,
        })
    }
}

#[derive(Default)]
pub struct InMemorySpotlightRepository {
    records: RwLock<Vec<SpotlightRecord>>,
}

impl InMemorySpotlightRepository {
    pub fn new(records: Vec<SpotlightRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn insert(&self, record: SpotlightRecord) {
        self.records.write().push(record);
    }
}

#[async_trait]
impl SpotlightSource for InMemorySpotlightRepository {
    async fn get_by_date(&self, date: NaiveDate) -> AppResult<Option<SpotlightRecord>> {
        let records = self.records.read();
        Ok(prefer_latest_created(
            records.iter().filter(|r| r.date == date).cloned(),
        ))
    }

    async fn get_latest_before(&self, date: NaiveDate) -> AppResult<Option<SpotlightRecord>> {
        let records = self.records.read();
        let Some(latest_date) = records.iter().map(|r| r.date).filter(|d| *d < date).max() else {
            return Ok(None);
        };
        Ok(prefer_latest_created(
            records.iter().filter(|r| r.date == latest_date).cloned(),
        ))
    }
}

#[derive(Default)]
pub struct InMemoryBookmarkRepository {
    entries: RwLock<HashMap<(String, String), Bookmark>>,
}

impl InMemoryBookmarkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn get(&self, user_key: &str, article_key: &str) -> Option<Bookmark> {
        self.entries
            .read()
            .get(&(user_key.to_string(), article_key.to_string()))
            .cloned()
    }
}

#[async_trait]
impl BookmarkRepository for InMemoryBookmarkRepository {
    async fn list_for_user(&self, user_key: &str) -> AppResult<Vec<Bookmark>> {
        let mut bookmarks: Vec<Bookmark> = self
            .entries
            .read()
            .values()
            .filter(|b| b.user_key == user_key)
            .cloned()
            .collect();
        bookmarks.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(bookmarks)
    }

    async fn upsert(&self, bookmark: &Bookmark) -> AppResult<()> {
        self.entries.write().insert(
            (bookmark.user_key.clone(), bookmark.article_key.clone()),
            bookmark.clone(),
        );
        Ok(())
    }

    async fn delete(&self, user_key: &str, article_key: &str) -> AppResult<()> {
        self.entries
            .write()
            .remove(&(user_key.to_string(), article_key.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryViewCountRepository {
    counts: RwLock<HashMap<String, i64>>,
}

impl InMemoryViewCountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ViewCountRepository for InMemoryViewCountRepository {
    async fn increment(&self, article_key: &str) -> AppResult<i64> {
        let mut counts = self.counts.write();
        let count = counts.entry(article_key.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn get(&self, article_key: &str) -> AppResult<i64> {
        Ok(self.counts.read().get(article_key).copied().unwrap_or(0))
    }
}
