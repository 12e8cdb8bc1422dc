use super::error::FeedError;
use super::window::{estimate_total_count, page_offset};
use crate::domain::article::{dedup_by_canonical_key, ArticleQuery, ArticleSource, SourceRecord};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// One fetched, deduplicated page of the article feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedPage {
    pub page_number: u32,
    pub category: Option<String>,
    pub records: Vec<SourceRecord>,
    pub total_count: u64,
}

pub struct FeedService {
    source: Arc<dyn ArticleSource>,
    page_size: u32,
}

impl FeedService {
    pub fn new(source: Arc<dyn ArticleSource>, page_size: u32) -> Self {
        Self { source, page_size }
    }
}

#[async_trait]
pub trait FeedServiceApi: Send + Sync {
    fn page_size(&self) -> u32;

    /// Fetch the window for `page_number` (1-based) in `category`.
    ///
    /// Records come back deduplicated. `total_count` is the store's exact
    /// count when available, otherwise an estimate from the window fill.
    async fn fetch_page(
        &self,
        page_number: u32,
        category: Option<&str>,
    ) -> Result<FeedPage, FeedError>;
}

#[async_trait]
impl FeedServiceApi for FeedService {
    fn page_size(&self) -> u32 {
        self.page_size
    }

    async fn fetch_page(
        &self,
        page_number: u32,
        category: Option<&str>,
    ) -> Result<FeedPage, FeedError> {
        if page_number == 0 {
            return Err(FeedError::Invalid("page number must be at least 1".to_string()));
        }

        let query = ArticleQuery {
            category: category.map(str::to_string),
            offset: page_offset(page_number, self.page_size),
            limit: self.page_size,
        };

        let batch = self.source.query(&query).await.map_err(|e| {
            tracing::warn!(
                error = %e,
                transient = e.is_transient(),
                page_number,
                category = ?category,
                "Article query failed"
            );
            FeedError::from(e)
        })?;

        // fullness is judged on the raw window, before duplicates are dropped
        let returned = batch.records.len();
        let total_count =
            estimate_total_count(page_number, self.page_size, returned, batch.exact_count);
        let records = dedup_by_canonical_key(batch.records);

        tracing::info!(
            page_number,
            category = ?category,
            returned,
            kept = records.len(),
            total_count,
            exact = batch.exact_count.is_some(),
            "Fetched feed page"
        );

        Ok(FeedPage {
            page_number,
            category: query.category,
            records,
            total_count,
        })
    }
}
