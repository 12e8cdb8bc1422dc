use crate::error::AppError;

/// Failure attached to a page state; the previous records stay visible
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedError {
    #[error("transient fetch error: {0}")]
    TransientFetch(String),
    #[error("invalid page request: {0}")]
    Invalid(String),
}

impl From<AppError> for FeedError {
    fn from(err: AppError) -> Self {
        FeedError::TransientFetch(err.to_string())
    }
}
