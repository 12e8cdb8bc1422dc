use crate::domain::spotlight::{SpotlightPayload, SpotlightRecord, SpotlightSource};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct SpotlightRow {
    id: Uuid,
    date: NaiveDate,
    payload: Json<SpotlightPayload>,
    created_at: DateTime<Utc>,
}

impl From<SpotlightRow> for SpotlightRecord {
    fn from(row: SpotlightRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            payload: row.payload.0,
            created_at: row.created_at,
        }
    }
}

pub struct PostgresSpotlightRepository {
    pool: Arc<DbPool>,
}

impl PostgresSpotlightRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SpotlightSource for PostgresSpotlightRepository {
    async fn get_by_date(&self, date: NaiveDate) -> AppResult<Option<SpotlightRecord>> {
        let pool = self.pool.as_ref();
        let row = sqlx::query_as::<_, SpotlightRow>(
            r#"
            SELECT id, date, payload, created_at
            FROM spotlights
            WHERE date = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(date)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(SpotlightRecord::from))
    }

    async fn get_latest_before(&self, date: NaiveDate) -> AppResult<Option<SpotlightRecord>> {
        let pool = self.pool.as_ref();
        let row = sqlx::query_as::<_, SpotlightRow>(
            r#"
            SELECT id, date, payload, created_at
            FROM spotlights
            WHERE date < $1
            ORDER BY date DESC, created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(date)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(SpotlightRecord::from))
    }
}
