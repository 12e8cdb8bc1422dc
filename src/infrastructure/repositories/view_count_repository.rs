use crate::domain::interaction::ViewCountRepository;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

pub struct PostgresViewCountRepository {
    pool: Arc<DbPool>,
}

impl PostgresViewCountRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ViewCountRepository for PostgresViewCountRepository {
    async fn increment(&self, article_key: &str) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO article_views (article_key, view_count, updated_at)
            VALUES ($1, 1, $2)
            ON CONFLICT (article_key)
            DO UPDATE SET
                view_count = article_views.view_count + 1,
                updated_at = $2
            RETURNING view_count
            "#,
        )
        .bind(article_key)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    async fn get(&self, article_key: &str) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT view_count
            FROM article_views
            WHERE article_key = $1
            "#,
        )
        .bind(article_key)
        .fetch_optional(pool)
        .await?;

        Ok(count.unwrap_or(0))
    }
}
