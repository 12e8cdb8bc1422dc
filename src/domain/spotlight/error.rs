use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpotlightError {
    #[error("transient fetch error: {0}")]
    TransientFetch(String),
}

impl From<AppError> for SpotlightError {
    fn from(err: AppError) -> Self {
        SpotlightError::TransientFetch(err.to_string())
    }
}
