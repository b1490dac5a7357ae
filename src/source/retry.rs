//! Bounded retry with fixed backoff
//!
//! `attempts` counts every try, the first one included: a policy of 3
//! attempts calls the transport at most three times and waits between
//! them, never after the last one.

use std::time::Duration;

use super::{parse_resource, CancellationToken, DocumentSource, Transport};
use crate::error::{ConfigError, FetchError};

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    backoff: Duration,
}

impl Default for RetryPolicy {
    /// 3 attempts, 30 seconds apart
    fn default() -> Self {
        RetryPolicy {
            attempts: 3,
            backoff: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, backoff: Duration) -> Result<Self, ConfigError> {
        if attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(RetryPolicy { attempts, backoff })
    }

    /// Build from a backoff in seconds, rejecting negative or non-finite values
    pub fn from_secs_f64(attempts: u32, backoff_secs: f64) -> Result<Self, ConfigError> {
        if !backoff_secs.is_finite() || backoff_secs < 0.0 {
            return Err(ConfigError::NegativeBackoff(backoff_secs));
        }
        Self::new(attempts, Duration::from_secs_f64(backoff_secs))
    }

    /// Single attempt, no waiting
    pub fn no_retry() -> Self {
        RetryPolicy {
            attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }
}

/// Document source retrying a [`Transport`] under a [`RetryPolicy`]
#[derive(Debug)]
pub struct RetryingSource<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> RetryingSource<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        RetryingSource { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> DocumentSource for RetryingSource<T> {
    fn fetch(&self, resource: &str, cancel: &CancellationToken) -> Result<Vec<u8>, FetchError> {
        let url = parse_resource(resource)?;
        let attempts = self.policy.attempts;

        let mut attempt = 0;
        loop {
            attempt += 1;
            if cancel.is_cancelled() {
                return Err(FetchError::Cancelled);
            }

            let err = match self.transport.get(&url) {
                Ok(body) => {
                    if attempt > 1 {
                        log::info!("fetched {url} on attempt {attempt}/{attempts}");
                    }
                    return Ok(body);
                }
                Err(err) => err,
            };

            if !err.is_retryable() {
                return Err(err);
            }
            log::warn!("fetch {url} attempt {attempt}/{attempts} failed: {err}");

            if attempt >= attempts {
                return Err(FetchError::ExhaustedRetries {
                    attempts,
                    source: Box::new(err),
                });
            }

            if cancel.wait(self.policy.backoff) {
                return Err(FetchError::Cancelled);
            }
        }
    }
}

impl FetchError {
    /// Whether another attempt could succeed
    ///
    /// Transport failures and 5xx/429 statuses are retried; any other
    /// status, an invalid resource or a cancellation is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport { .. } => true,
            FetchError::Status { status, .. } => *status >= 500 || *status == 429,
            FetchError::InvalidResource { .. }
            | FetchError::Cancelled
            | FetchError::ExhaustedRetries { .. } => false,
        }
    }
}
