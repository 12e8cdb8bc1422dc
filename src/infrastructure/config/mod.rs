use crate::domain::feed::settings::{
    FeedSettings, DEFAULT_BACKGROUND_REFRESH_INTERVAL, DEFAULT_FRESHNESS_WINDOW,
    DEFAULT_PAGE_SIZE, DEFAULT_RETENTION_WINDOW,
};
use crate::error::{AppError, AppResult};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    /// Only the Postgres-backed runner needs this
    pub database_url: Option<String>,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub feed: FeedSettings,
    /// Ask the article store for `COUNT(*)` instead of estimating totals
    pub exact_counts: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let feed = FeedSettings {
            page_size: parse_var("FEED_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            freshness_window: millis_var("FEED_FRESHNESS_WINDOW_MS", DEFAULT_FRESHNESS_WINDOW)?,
            retention_window: millis_var("FEED_RETENTION_WINDOW_MS", DEFAULT_RETENTION_WINDOW)?,
            background_refresh_interval: millis_var(
                "FEED_BACKGROUND_REFRESH_INTERVAL_MS",
                DEFAULT_BACKGROUND_REFRESH_INTERVAL,
            )?,
        };
        feed.validate()?;

        let config = Config {
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty()),
            environment: match env::var("ENVIRONMENT").unwrap_or_default().as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").unwrap_or_default().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            feed,
            exact_counts: env::var("FEED_EXACT_COUNTS")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn require_database_url(&self) -> AppResult<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| AppError::Config("DATABASE_URL is not set".to_string()))
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{name} has an invalid value: {raw:?}"))),
        Err(_) => Ok(default),
    }
}

fn millis_var(name: &str, default: std::time::Duration) -> AppResult<std::time::Duration> {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    parse_var(name, default_ms).map(std::time::Duration::from_millis)
}
