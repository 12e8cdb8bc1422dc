/// Infrastructure-level error shared by every repository and the config loader
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether retrying the same call later could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Database(err) => !matches!(err, sqlx::Error::RowNotFound | sqlx::Error::ColumnNotFound(_)),
            Self::Internal(_) => true,
            Self::Migration(_) | Self::Config(_) => false,
        }
    }
}

/// Custom result type for the crate
pub type AppResult<T> = Result<T, AppError>;
