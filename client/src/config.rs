//! Client configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_EMOTION_INTERVAL_MS: u64 = 3000;
pub const DEFAULT_STATS_REFRESH_SECS: u64 = 10;
pub const DEFAULT_QUESTION_COUNT: u32 = game::consts::QUESTIONS_PER_SESSION;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash.
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Period of the emotion detection task.
    pub emotion_interval: Duration,
    /// Period of the session stats refresh while a game is running.
    pub stats_refresh: Duration,
    /// Questions requested per game.
    pub question_count: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            emotion_interval: Duration::from_millis(DEFAULT_EMOTION_INTERVAL_MS),
            stats_refresh: Duration::from_secs(DEFAULT_STATS_REFRESH_SECS),
            question_count: DEFAULT_QUESTION_COUNT,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `CODERUNNER_API_BASE_URL`: default `http://localhost:8000`
    /// - `CODERUNNER_REQUEST_TIMEOUT_SECS`: default 30
    /// - `CODERUNNER_CONNECT_TIMEOUT_SECS`: default 10
    /// - `CODERUNNER_EMOTION_INTERVAL_MS`: default 3000
    /// - `CODERUNNER_STATS_REFRESH_SECS`: default 10
    /// - `CODERUNNER_QUESTION_COUNT`: default 5
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an explicit variable source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = lookup("CODERUNNER_API_BASE_URL")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_owned(),
            request_timeout: Duration::from_secs(env_parse(
                &lookup,
                "CODERUNNER_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            connect_timeout: Duration::from_secs(env_parse(
                &lookup,
                "CODERUNNER_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )),
            emotion_interval: Duration::from_millis(
                env_parse(&lookup, "CODERUNNER_EMOTION_INTERVAL_MS", DEFAULT_EMOTION_INTERVAL_MS).max(1),
            ),
            stats_refresh: Duration::from_secs(
                env_parse(&lookup, "CODERUNNER_STATS_REFRESH_SECS", DEFAULT_STATS_REFRESH_SECS).max(1),
            ),
            question_count: env_parse(&lookup, "CODERUNNER_QUESTION_COUNT", DEFAULT_QUESTION_COUNT).max(1),
        }
    }

    /// Replace the base URL, normalising the trailing slash.
    #[must_use]
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.api_base_url = url.trim().trim_end_matches('/').to_owned();
        self
    }
}

fn env_parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
