use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use newsfeed_engine::domain::article::SourceRecord;
use newsfeed_engine::domain::feed::FeedSettings;
use newsfeed_engine::domain::spotlight::{SpotlightPayload, SpotlightRecord};
use newsfeed_engine::infrastructure::repositories::{
    InMemoryBookmarkRepository, InMemorySpotlightRepository, InMemoryViewCountRepository,
};
use newsfeed_engine::{EngineDeps, FeedEngine};
use std::sync::Arc;
use uuid::Uuid;

use super::fakes::ScriptedArticleSource;

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
}

/// Article created `minutes_ago` minutes before `base_time`
pub fn article(id: &str, canonical_url: Option<&str>, minutes_ago: i64) -> SourceRecord {
    SourceRecord {
        id: id.to_string(),
        canonical_url: canonical_url.map(str::to_string),
        link: None,
        title: format!("Headline {id}"),
        summary: Some(format!("Summary {id}")),
        image_url: None,
        source: Some("Wire".to_string()),
        category: None,
        created_at: base_time() - Duration::minutes(minutes_ago),
    }
}

/// `count` distinct articles, newest first, ids `{prefix}-0..`
pub fn articles(prefix: &str, count: usize, category: Option<&str>) -> Vec<SourceRecord> {
    (0..count)
        .map(|i| {
            let id = format!("{prefix}-{i}");
            let url = format!("https://news.example/{id}");
            let mut record = article(&id, Some(&url), i as i64);
            record.category = category.map(str::to_string);
            record
        })
        .collect()
}

pub fn spotlight(date: NaiveDate, title: &str, created_at: DateTime<Utc>) -> SpotlightRecord {
    SpotlightRecord {
        id: Uuid::new_v4(),
        date,
        payload: SpotlightPayload {
            title: title.to_string(),
            summary: format!("{title} summary"),
            image_url: None,
            body: format!("{title} body"),
        },
        created_at,
    }
}

pub fn settings(page_size: u32) -> FeedSettings {
    FeedSettings::from_millis(page_size, 60_000, 300_000, 300_000)
}

/// Engine over in-memory stores, with handles kept for assertions
pub struct TestEngine {
    pub engine: FeedEngine,
    pub articles: Arc<ScriptedArticleSource>,
    pub spotlights: Arc<InMemorySpotlightRepository>,
    pub bookmarks: Arc<InMemoryBookmarkRepository>,
    pub views: Arc<InMemoryViewCountRepository>,
}

impl TestEngine {
    pub fn new(records: Vec<SourceRecord>, settings: FeedSettings) -> Self {
        let articles = Arc::new(ScriptedArticleSource::new(records));
        let spotlights = Arc::new(InMemorySpotlightRepository::default());
        let bookmarks = Arc::new(InMemoryBookmarkRepository::new());
        let views = Arc::new(InMemoryViewCountRepository::new());

        let deps = EngineDeps {
            articles: articles.clone(),
            spotlights: spotlights.clone(),
            bookmarks: bookmarks.clone(),
            views: views.clone(),
        };
        let engine = FeedEngine::new(deps, settings).expect("valid test settings");

        Self {
            engine,
            articles,
            spotlights,
            bookmarks,
            views,
        }
    }
}
