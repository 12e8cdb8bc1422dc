pub mod article_repository;
pub mod bookmark_repository;
pub mod in_memory;
pub mod spotlight_repository;
pub mod view_count_repository;

pub use article_repository::PostgresArticleRepository;
pub use bookmark_repository::PostgresBookmarkRepository;
pub use in_memory::{
    InMemoryArticleRepository, InMemoryBookmarkRepository, InMemorySpotlightRepository,
    InMemoryViewCountRepository,
};
pub use spotlight_repository::PostgresSpotlightRepository;
pub use view_count_repository::PostgresViewCountRepository;
