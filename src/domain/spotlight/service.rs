use super::error::SpotlightError;
use super::selector::select_spotlight;
use super::{SpotlightRecord, SpotlightSource};
use chrono::{DateTime, Local, TimeZone};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Result of one spotlight evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct SpotlightView {
    /// `None` without an error means there is nothing to feature
    pub record: Option<SpotlightRecord>,
    pub error: Option<SpotlightError>,
}

#[derive(Debug, Default)]
struct LastGood {
    /// Sequence number of the evaluation that produced `record`
    evaluation: u64,
    record: Option<SpotlightRecord>,
}

pub struct SpotlightService {
    source: Arc<dyn SpotlightSource>,
    next_evaluation: AtomicU64,
    last_good: Mutex<LastGood>,
}

impl SpotlightService {
    pub fn new(source: Arc<dyn SpotlightSource>) -> Self {
        Self {
            source,
            next_evaluation: AtomicU64::new(1),
            last_good: Mutex::new(LastGood::default()),
        }
    }

    /// Evaluate against the local wall clock
    pub async fn current(&self) -> SpotlightView {
        self.at(&Local::now()).await
    }

    /// Evaluate at `now`. On a fetch failure the previously selected record is
    /// returned alongside the error. When evaluations overlap, only the most
    /// recently started one that succeeded is remembered.
    pub async fn at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> SpotlightView {
        let evaluation = self.next_evaluation.fetch_add(1, Ordering::Relaxed);
        match select_spotlight(now, self.source.as_ref()).await {
            Ok(record) => {
                match &record {
                    Some(r) => tracing::info!(id = %r.id, date = %r.date, "Spotlight selected"),
                    None => tracing::info!(date = %now.date_naive(), "No spotlight available"),
                }
                let mut last_good = self.last_good.lock();
                if evaluation > last_good.evaluation {
                    last_good.evaluation = evaluation;
                    last_good.record = record.clone();
                } else {
                    tracing::debug!(evaluation, "Superseded spotlight result not retained");
                }
                SpotlightView {
                    record,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Spotlight fetch failed");
                SpotlightView {
                    record: self.last_good.lock().record.clone(),
                    error: Some(SpotlightError::from(e)),
                }
            }
        }
    }

    pub fn last_selected(&self) -> Option<SpotlightRecord> {
        self.last_good.lock().record.clone()
    }
}
