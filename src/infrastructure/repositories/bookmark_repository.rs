use crate::domain::interaction::{Bookmark, BookmarkRepository};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;

pub struct PostgresBookmarkRepository {
    pool: Arc<DbPool>,
}

impl PostgresBookmarkRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkRepository for PostgresBookmarkRepository {
    async fn list_for_user(&self, user_key: &str) -> AppResult<Vec<Bookmark>> {
        let pool = self.pool.as_ref();
        let bookmarks = sqlx::query_as::<_, Bookmark>(
            r#"
            SELECT user_key, article_key, title, description, image_url, source, saved_at
            FROM bookmarks
            WHERE user_key = $1
            ORDER BY saved_at DESC
            "#,
        )
        .bind(user_key)
        .fetch_all(pool)
        .await?;

        Ok(bookmarks)
    }

    async fn upsert(&self, bookmark: &Bookmark) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            INSERT INTO bookmarks (user_key, article_key, title, description, image_url, source, saved_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_key, article_key)
            DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                image_url = EXCLUDED.image_url,
                source = EXCLUDED.source,
                saved_at = EXCLUDED.saved_at
            "#,
        )
        .bind(&bookmark.user_key)
        .bind(&bookmark.article_key)
        .bind(&bookmark.title)
        .bind(&bookmark.description)
        .bind(&bookmark.image_url)
        .bind(&bookmark.source)
        .bind(bookmark.saved_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user_key: &str, article_key: &str) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            DELETE FROM bookmarks
            WHERE user_key = $1 AND article_key = $2
            "#,
        )
        .bind(user_key)
        .bind(article_key)
        .execute(pool)
        .await?;

        Ok(())
    }
}
