use std::env;

use anyhow::Context;

/// Feeds fetched when `FEED_IDS` is not set
const DEFAULT_FEED_IDS: &[&str] = &[
    "108089472890519702166", // Consumer Surveys
    "109695781128233963799", // Andrew Jackson
];

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Base URL of the activity API, without trailing slash
    pub activity_api_url: String,
    pub activity_api_key: String,
    /// Feeds fetched by each fetch cycle, in order
    pub feed_ids: Vec<String>,
    /// Number of fetches listed on the front page
    pub recent_limit: u64,
    /// Seconds between in-process fetch cycles; 0 disables the loop
    pub refresh_interval_secs: u64,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            activity_api_url: env::var("ACTIVITY_API_URL")
                .unwrap_or_else(|_| "https://www.googleapis.com/plus/v1".to_string()),
            activity_api_key: env::var("ACTIVITY_API_KEY").unwrap_or_default(),
            feed_ids: env::var("FEED_IDS")
                .map(|v| parse_feed_ids(&v))
                .unwrap_or_else(|_| DEFAULT_FEED_IDS.iter().map(|s| s.to_string()).collect()),
            recent_limit: parse_or("RECENT_LIMIT", 100)?,
            refresh_interval_secs: parse_or("REFRESH_INTERVAL_SECS", 0)?,
            port: parse_or("PORT", 8080)?,
        })
    }

    /// Check if the in-process refresh loop should run
    pub fn refresh_enabled(&self) -> bool {
        self.refresh_interval_secs > 0
    }
}

/// Split a comma separated list, dropping blanks
fn parse_feed_ids(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got {:?}", key, v)),
        Err(_) => Ok(default),
    }
}
