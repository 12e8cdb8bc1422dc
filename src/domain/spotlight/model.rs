use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display content of a spotlight; opaque to the engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpotlightPayload {
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub body: String,
}

/// One featured breaking-event entry, keyed by calendar date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpotlightRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub payload: SpotlightPayload,
    pub created_at: DateTime<Utc>,
}

/// Pick one record among several sharing a date: latest `created_at`, then
/// greatest id
pub fn prefer_latest_created<I>(candidates: I) -> Option<SpotlightRecord>
where
    I: IntoIterator<Item = SpotlightRecord>,
{
    candidates
        .into_iter()
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
}
