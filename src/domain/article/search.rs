use super::{canonical_key, dedup_by_canonical_key, SourceRecord};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)</?[^>]+>").expect("valid tag pattern"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// One result as returned by the search integration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl SearchHit {
    /// Normalize into a source record. `ingested_at` stands in for the
    /// publication time when `date` is missing or not a parseable timestamp.
    pub fn into_record(self, category: Option<&str>, ingested_at: DateTime<Utc>) -> SourceRecord {
        let created_at = self
            .date
            .as_deref()
            .and_then(parse_published_at)
            .unwrap_or(ingested_at);

        let canonical_url = canonical_key(Some(&self.link), None).map(str::to_string);
        let id = canonical_url
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let summary = clean_snippet(&self.snippet);

        SourceRecord {
            id,
            canonical_url,
            link: None,
            title: clean_snippet(&self.title).unwrap_or_default(),
            summary,
            image_url: self.thumbnail.filter(|t| !t.trim().is_empty()),
            source: self.source.filter(|s| !s.trim().is_empty()),
            category: category.map(str::to_string),
            created_at,
        }
    }
}

/// Normalize a whole search response into a deduplicated, newest-first batch
pub fn normalize_search_hits(
    hits: Vec<SearchHit>,
    category: Option<&str>,
    ingested_at: DateTime<Utc>,
) -> Vec<SourceRecord> {
    let mut records: Vec<SourceRecord> = hits
        .into_iter()
        .map(|hit| hit.into_record(category, ingested_at))
        .collect();

    // stable sort keeps provider rank among equal timestamps
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total = records.len();
    let kept = dedup_by_canonical_key(records);

    tracing::debug!(
        hits = total,
        kept = kept.len(),
        "Normalized search hits"
    );

    kept
}

fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

fn clean_snippet(text: &str) -> Option<String> {
    let without_tags = HTML_TAG.replace_all(text, "");
    let normalized = WHITESPACE.replace_all(&without_tags, " ");
    let trimmed = normalized.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
