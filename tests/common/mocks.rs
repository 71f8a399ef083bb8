use async_trait::async_trait;
use chat_relay::{Error, Result, inference::InferenceClient};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Mock inference client that echoes the message back as provider JSON
#[derive(Debug, Default)]
pub struct MockInferenceClient {
    pub messages: Mutex<Vec<String>>,
    pub response: Option<Vec<u8>>,
    pub error: bool,
    pub delays: HashMap<String, Duration>,
}

impl MockInferenceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, response: impl Into<Vec<u8>>) -> Self {
        self.response = Some(response.into());
        self
    }

    pub fn with_error(mut self) -> Self {
        self.error = true;
        self
    }

    pub fn with_delay(mut self, message: &str, delay: Duration) -> Self {
        self.delays.insert(message.to_string(), delay);
        self
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn echo_body(message: &str) -> Vec<u8> {
        json!([{ "generated_text": message }]).to_string().into_bytes()
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn infer(&self, message: &str) -> Result<Vec<u8>> {
        self.messages.lock().unwrap().push(message.to_string());

        if let Some(delay) = self.delays.get(message) {
            tokio::time::sleep(*delay).await;
        }

        if self.error {
            return Err(Error::ModelLoadTimeout { attempts: 2 });
        }

        Ok(self
            .response
            .clone()
            .unwrap_or_else(|| Self::echo_body(message)))
    }
}
