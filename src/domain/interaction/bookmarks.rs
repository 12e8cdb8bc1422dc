use super::error::InteractionError;
use super::model::{Bookmark, WriteOutcome};
use super::BookmarkRepository;
use crate::domain::article::{canonical_key, SourceRecord};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
struct LoadedBookmarks {
    user_key: Option<String>,
    entries: HashMap<String, Bookmark>,
}

/// Bookmark writes plus the loaded set of the active user
pub struct BookmarkTracker {
    repo: Arc<dyn BookmarkRepository>,
    loaded: RwLock<LoadedBookmarks>,
}

impl BookmarkTracker {
    pub fn new(repo: Arc<dyn BookmarkRepository>) -> Self {
        Self {
            repo,
            loaded: RwLock::new(LoadedBookmarks::default()),
        }
    }

    /// Replace the loaded set with `user_key`'s bookmarks
    pub async fn load_for_user(&self, user_key: &str) -> Result<usize, InteractionError> {
        let bookmarks = self.repo.list_for_user(user_key).await.map_err(|e| {
            tracing::warn!(error = %e, user_key, "Failed to load bookmarks");
            InteractionError::read(e)
        })?;

        let count = bookmarks.len();
        let mut loaded = self.loaded.write();
        loaded.user_key = Some(user_key.to_string());
        loaded.entries = bookmarks
            .into_iter()
            .map(|b| (b.article_key.clone(), b))
            .collect();

        tracing::debug!(user_key, count, "Bookmarks loaded");
        Ok(count)
    }

    /// Save `article` for `user_key`. Saving it again updates the metadata.
    pub async fn add(
        &self,
        user_key: &str,
        article: &SourceRecord,
    ) -> Result<WriteOutcome, InteractionError> {
        let Some(bookmark) = Bookmark::from_article(user_key, article, Utc::now()) else {
            tracing::debug!(article_id = %article.id, "Article not trackable, bookmark skipped");
            return Ok(WriteOutcome::Skipped);
        };

        self.repo.upsert(&bookmark).await.map_err(|e| {
            tracing::warn!(
                error = %e,
                user_key,
                article_key = %bookmark.article_key,
                "Failed to save bookmark"
            );
            InteractionError::write(e)
        })?;

        let mut loaded = self.loaded.write();
        if loaded.user_key.as_deref() == Some(user_key) {
            loaded
                .entries
                .insert(bookmark.article_key.clone(), bookmark);
        }

        Ok(WriteOutcome::Applied)
    }

    /// Delete the bookmark; deleting one that does not exist succeeds
    pub async fn remove(
        &self,
        user_key: &str,
        article_key: &str,
    ) -> Result<WriteOutcome, InteractionError> {
        let Some(article_key) = canonical_key(Some(article_key), None) else {
            return Ok(WriteOutcome::Skipped);
        };

        self.repo.delete(user_key, article_key).await.map_err(|e| {
            tracing::warn!(error = %e, user_key, article_key, "Failed to remove bookmark");
            InteractionError::write(e)
        })?;

        let mut loaded = self.loaded.write();
        if loaded.user_key.as_deref() == Some(user_key) {
            loaded.entries.remove(article_key);
        }

        Ok(WriteOutcome::Applied)
    }

    /// Membership in the loaded set; never hits the store
    pub fn is_bookmarked(&self, article_key: &str) -> bool {
        canonical_key(Some(article_key), None)
            .is_some_and(|key| self.loaded.read().entries.contains_key(key))
    }

    pub fn active_user(&self) -> Option<String> {
        self.loaded.read().user_key.clone()
    }

    /// Loaded bookmarks, most recently saved first
    pub fn bookmarks(&self) -> Vec<Bookmark> {
        let mut bookmarks: Vec<Bookmark> = self.loaded.read().entries.values().cloned().collect();
        bookmarks.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        bookmarks
    }
}
