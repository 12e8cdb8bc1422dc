use super::error::InteractionError;
use super::model::ViewOutcome;
use super::ViewCountRepository;
use crate::domain::article::SourceRecord;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// View counting for one session: each article is counted at most once per
/// tracker. Delivery to the store is at-least-once; a retried request upstream
/// may count twice.
pub struct ViewTracker {
    repo: Arc<dyn ViewCountRepository>,
    counted: Mutex<HashSet<String>>,
}

impl ViewTracker {
    pub fn new(repo: Arc<dyn ViewCountRepository>) -> Self {
        Self {
            repo,
            counted: Mutex::new(HashSet::new()),
        }
    }

    pub async fn record_view(&self, article: &SourceRecord) -> Result<ViewOutcome, InteractionError> {
        let Some(key) = article.canonical_key() else {
            return Ok(ViewOutcome::NotTrackable);
        };

        if !self.counted.lock().insert(key.to_string()) {
            return Ok(ViewOutcome::AlreadyCounted);
        }

        match self.repo.increment(key).await {
            Ok(count) => {
                tracing::debug!(article_key = key, count, "View recorded");
                Ok(ViewOutcome::Counted(count))
            }
            Err(e) => {
                // not retried; a later display in this session may try again
                self.counted.lock().remove(key);
                tracing::warn!(error = %e, article_key = key, "Failed to record view");
                Err(InteractionError::write(e))
            }
        }
    }

    /// Stored count, `None` for articles without a key
    pub async fn view_count(&self, article: &SourceRecord) -> Result<Option<i64>, InteractionError> {
        let Some(key) = article.canonical_key() else {
            return Ok(None);
        };

        self.repo
            .get(key)
            .await
            .map(Some)
            .map_err(InteractionError::read)
    }

    pub fn has_counted(&self, article_key: &str) -> bool {
        self.counted.lock().contains(article_key)
    }
}
