use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served for every path other than the chat API.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
    #[serde(default = "default_wait_for_model")]
    pub wait_for_model: bool,
}

/// Retry and timeout values for provider calls, in whole seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_transport_retry_delay_secs")]
    pub transport_retry_delay_secs: u64,
    #[serde(default = "default_busy_wait_secs")]
    pub default_busy_wait_secs: u64,
}

impl InferenceConfig {
    /// Full URL of the model endpoint, `<base_url>/models/<model>`.
    pub fn model_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            self.model.trim_start_matches('/')
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: String::new(),
            max_new_tokens: default_max_new_tokens(),
            wait_for_model: default_wait_for_model(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            request_timeout_secs: default_request_timeout_secs(),
            transport_retry_delay_secs: default_transport_retry_delay_secs(),
            default_busy_wait_secs: default_busy_wait_secs(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "frontend".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_model() -> String {
    "mistralai/Mistral-7B-Instruct-v0.1".to_string()
}

fn default_max_new_tokens() -> u32 {
    500
}

fn default_wait_for_model() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    2
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_transport_retry_delay_secs() -> u64 {
    2
}

fn default_busy_wait_secs() -> u64 {
    10
}
