pub mod domain;
pub mod engine;
pub mod error;
pub mod infrastructure;

pub use engine::{EngineDeps, FeedEngine};
pub use error::{AppError, AppResult};
