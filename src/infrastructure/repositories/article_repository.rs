use crate::domain::article::{ArticleBatch, ArticleQuery, ArticleSource, SourceRecord};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;

pub struct PostgresArticleRepository {
    pool: Arc<DbPool>,
    exact_counts: bool,
}

impl PostgresArticleRepository {
    /// With `exact_counts` off, batches carry no count and totals are estimated
    pub fn new(pool: Arc<DbPool>, exact_counts: bool) -> Self {
        Self { pool, exact_counts }
    }

    /// Count articles, optionally within one category
    pub async fn count(&self, category: Option<&str>) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM articles
            WHERE ($1::text IS NULL OR category = $1)
            "#,
        )
        .bind(category)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}

#[async_trait]
impl ArticleSource for PostgresArticleRepository {
    async fn query(&self, query: &ArticleQuery) -> AppResult<ArticleBatch> {
        let pool = self.pool.as_ref();
        let records = sqlx::query_as::<_, SourceRecord>(
            r#"
            SELECT id, canonical_url, link, title, summary, image_url, source, category, created_at
            FROM articles
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query.category.as_deref())
        .bind(i64::from(query.limit))
        .bind(i64::try_from(query.offset).unwrap_or(i64::MAX))
        .fetch_all(pool)
        .await?;

        let exact_count = if self.exact_counts {
            let count = self.count(query.category.as_deref()).await?;
            Some(u64::try_from(count).unwrap_or(0))
        } else {
            None
        };

        Ok(ArticleBatch {
            records,
            exact_count,
        })
    }
}
