use newsfeed_engine::infrastructure::config::{Config, LogFormat};
use newsfeed_engine::infrastructure::db::{check_connection, create_pool, run_migrations};
use newsfeed_engine::infrastructure::repositories::{
    PostgresArticleRepository, PostgresBookmarkRepository, PostgresSpotlightRepository,
    PostgresViewCountRepository,
};
use newsfeed_engine::{EngineDeps, FeedEngine};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        development = config.is_development(),
        page_size = config.feed.page_size,
        "Starting feed engine"
    );

    // Create database connection pool
    let pool = create_pool(config.require_database_url()?).await?;
    check_connection(&pool).await?;
    run_migrations(&pool).await?;
    tracing::info!("Database connection verified");

    let pool = Arc::new(pool);

    // === DEPENDENCY INJECTION SETUP ===
    let deps = EngineDeps {
        articles: Arc::new(PostgresArticleRepository::new(
            pool.clone(),
            config.exact_counts,
        )),
        spotlights: Arc::new(PostgresSpotlightRepository::new(pool.clone())),
        bookmarks: Arc::new(PostgresBookmarkRepository::new(pool.clone())),
        views: Arc::new(PostgresViewCountRepository::new(pool.clone())),
    };
    let engine = FeedEngine::new(deps, config.feed.clone())?;

    let spotlight = engine.spotlight().current().await;
    match (&spotlight.record, &spotlight.error) {
        (Some(record), _) => tracing::info!(
            date = %record.date,
            title = %record.payload.title,
            "Current spotlight"
        ),
        (None, None) => tracing::info!("No spotlight to feature"),
        (None, Some(err)) => tracing::warn!(error = %err, "Spotlight unavailable"),
    }

    let page = engine.paginator().load().await;
    tracing::info!(
        page_number = page.page_number,
        records = page.records.len(),
        total_pages = page.total_pages(),
        has_more = page.has_more(),
        "First feed page loaded"
    );

    engine.start_background_refresh();

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    engine.shutdown();

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "newsfeed_engine=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
