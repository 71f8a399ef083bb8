use crate::config::RetryConfig;
use serde::Serialize;
use std::time::Duration;

/// Body sent to the provider's model endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest<'a> {
    pub inputs: &'a str,
    pub wait_for_model: bool,
    pub max_new_tokens: u32,
}

/// Attempt budget and waits applied around provider calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Timeout for a single attempt. Cold starts can take tens of seconds.
    pub request_timeout: Duration,
    /// Wait after a transport failure.
    pub transport_retry_delay: Duration,
    /// Wait after a 503 without a usable `Retry-After`.
    pub default_busy_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            transport_retry_delay: Duration::from_secs(config.transport_retry_delay_secs),
            default_busy_wait: Duration::from_secs(config.default_busy_wait_secs),
        }
    }
}
