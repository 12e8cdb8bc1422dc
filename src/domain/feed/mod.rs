pub mod cache;
pub mod error;
pub mod paginator;
pub mod refresh;
pub mod service;
pub mod settings;
pub mod window;

pub use cache::{PageCache, PageKey};
pub use error::FeedError;
pub use paginator::{PageState, Paginator};
pub use refresh::RefreshTask;
pub use service::{FeedPage, FeedService, FeedServiceApi};
pub use settings::FeedSettings;
