use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// `ANTHROPIC_API_KEY` is optional: without it the service runs on the
/// deterministic keyword analyst and template cover letters.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub default_location: String,
    pub max_jobs_per_search: usize,
    pub analyst_timeout: Duration,
    /// Postings analysed concurrently across all requests.
    pub max_concurrent_scoring: usize,
    pub alert_max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            port: 8080,
            rust_log: "info".to_string(),
            default_location: "Dallas, TX".to_string(),
            max_jobs_per_search: 50,
            analyst_timeout: Duration::from_secs(20),
            max_concurrent_scoring: 8,
            alert_max_results: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            default_location: std::env::var("DEFAULT_LOCATION")
                .unwrap_or(defaults.default_location),
            max_jobs_per_search: parse_env("MAX_JOBS_PER_SEARCH", defaults.max_jobs_per_search)?,
            analyst_timeout: Duration::from_secs(parse_env(
                "ANALYST_TIMEOUT_SECS",
                defaults.analyst_timeout.as_secs(),
            )?),
            max_concurrent_scoring: parse_env(
                "MAX_CONCURRENT_SCORING",
                defaults.max_concurrent_scoring,
            )?,
            alert_max_results: parse_env("ALERT_MAX_RESULTS", defaults.alert_max_results)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid value, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
