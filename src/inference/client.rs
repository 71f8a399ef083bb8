use super::types::{InferenceRequest, RetryPolicy};
use crate::{Error, Result, config::InferenceConfig};
use async_trait::async_trait;
use reqwest::{
    StatusCode,
    header::{HeaderMap, RETRY_AFTER},
};
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Sends `message` to the model and returns the provider's raw body.
    async fn infer(&self, message: &str) -> Result<Vec<u8>>;
}

/// Client for the Hugging Face hosted inference API.
///
/// Retries transport failures and 503 "model loading" responses according to
/// its [`RetryPolicy`]. Any other status ends the loop and its body is
/// returned unmodified, whatever the status code.
pub struct HuggingFaceClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    max_new_tokens: u32,
    wait_for_model: bool,
    policy: RetryPolicy,
}

impl HuggingFaceClient {
    pub fn new(config: &InferenceConfig, policy: RetryPolicy) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(policy.request_timeout)
            .build()?;

        Ok(Self {
            http,
            url: config.model_url(),
            api_key: config.api_key.clone(),
            max_new_tokens: config.max_new_tokens,
            wait_for_model: config.wait_for_model,
            policy,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl InferenceClient for HuggingFaceClient {
    async fn infer(&self, message: &str) -> Result<Vec<u8>> {
        let body = InferenceRequest {
            inputs: message,
            wait_for_model: self.wait_for_model,
            max_new_tokens: self.max_new_tokens,
        };

        for attempt in 1..=self.policy.max_attempts {
            debug!(attempt, url = %self.url, "Sending inference request");

            let response = match self
                .http
                .post(&self.url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    warn!(
                        attempt,
                        error = %e,
                        delay_secs = self.policy.transport_retry_delay.as_secs_f64(),
                        "Inference request failed, retrying"
                    );
                    tokio::time::sleep(self.policy.transport_retry_delay).await;
                    continue;
                }
            };

            if response.status() == StatusCode::SERVICE_UNAVAILABLE {
                let wait = busy_wait(response.headers(), self.policy.default_busy_wait);
                // Release the connection before waiting.
                drop(response);

                warn!(
                    attempt,
                    wait_secs = wait.as_secs_f64(),
                    "Model is loading, waiting before retry"
                );
                tokio::time::sleep(wait).await;
                continue;
            }

            let status = response.status();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| Error::decode(format!("failed to read provider response: {}", e)))?;

            debug!(
                attempt,
                status = status.as_u16(),
                len = bytes.len(),
                "Received inference response"
            );

            return Ok(bytes.to_vec());
        }

        Err(Error::ModelLoadTimeout {
            attempts: self.policy.max_attempts,
        })
    }
}

/// Wait requested by a 503 response: `Retry-After` in whole seconds, or
/// `default` when the header is missing or not an integer.
pub fn busy_wait(headers: &HeaderMap, default: Duration) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_retry_after)
        .unwrap_or(default)
}

fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
