use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InteractionError {
    #[error("write failed: {0}")]
    WriteFailure(String),
    #[error("read failed: {0}")]
    ReadFailure(String),
}

impl InteractionError {
    pub fn write(err: AppError) -> Self {
        InteractionError::WriteFailure(err.to_string())
    }

    pub fn read(err: AppError) -> Self {
        InteractionError::ReadFailure(err.to_string())
    }
}
