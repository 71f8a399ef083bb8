use axum::{Router, body::Body, http::Request, response::Response};
use chat_relay::{
    config::InferenceConfig,
    inference::{HuggingFaceClient, RetryPolicy},
};
use std::time::Duration;

pub const TEST_MODEL: &str = "test-model";
pub const TEST_API_KEY: &str = "test-api-key";
pub const MODEL_PATH: &str = "/models/test-model";

/// Inference configuration pointing at a mock provider
pub fn test_inference_config(base_url: &str) -> InferenceConfig {
    InferenceConfig {
        base_url: base_url.to_string(),
        model: TEST_MODEL.to_string(),
        api_key: TEST_API_KEY.to_string(),
        max_new_tokens: 500,
        wait_for_model: true,
    }
}

/// Retry policy with the default attempt budget and short waits
pub fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 2,
        request_timeout: Duration::from_millis(500),
        transport_retry_delay: Duration::from_millis(200),
        default_busy_wait: Duration::from_millis(300),
    }
}

pub fn test_client(base_url: &str, policy: RetryPolicy) -> HuggingFaceClient {
    HuggingFaceClient::new(&test_inference_config(base_url), policy)
        .expect("Failed to build inference client")
}

/// Base URL of a local port with nothing listening on it
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub fn chat_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    use tower::ServiceExt; // for `oneshot`

    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
