//! Configuration
//!
//! Plain structs with `Default` plus `with_*` builders. Validation that can
//! fail lives in the constructors of the types being configured
//! ([`RetryPolicy::new`]).

use std::time::Duration;

use crate::path::cache::DEFAULT_CAPACITY;
use crate::source::RetryPolicy;

/// Default `User-Agent` header for HTTP fetches
pub const DEFAULT_USER_AGENT: &str = concat!("rustyscrape/", env!("CARGO_PKG_VERSION"));

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for fetching documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub retry: RetryPolicy,
    pub user_agent: String,
    /// `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            retry: RetryPolicy::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

impl FetchConfig {
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Settings for a [`crate::Scraper`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    /// Parsed paths kept in the LRU; 0 disables caching
    pub path_cache_capacity: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        ScraperConfig {
            path_cache_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl ScraperConfig {
    pub fn with_path_cache_capacity(mut self, capacity: usize) -> Self {
        self.path_cache_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let fetch = FetchConfig::default();
        assert_eq!(fetch.retry.attempts(), 3);
        assert_eq!(fetch.retry.backoff(), Duration::from_secs(30));
        assert!(fetch.user_agent.starts_with("rustyscrape/"));
        assert_eq!(fetch.request_timeout, Some(Duration::from_secs(60)));

        assert_eq!(ScraperConfig::default().path_cache_capacity, 128);
    }

    #[test]
    fn test_builders() {
        let fetch = FetchConfig::default()
            .with_retry(RetryPolicy::no_retry())
            .with_user_agent("bot")
            .with_request_timeout(None);
        assert_eq!(fetch.retry.attempts(), 1);
        assert_eq!(fetch.user_agent, "bot");
        assert_eq!(fetch.request_timeout, None);

        let scraper = ScraperConfig::default().with_path_cache_capacity(0);
        assert_eq!(scraper.path_cache_capacity, 0);
    }
}
