use super::types::{ChatRequest, ErrorResponse};
use crate::inference::InferenceClient;
use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn InferenceClient>,
}

impl AppState {
    pub fn new(client: impl InferenceClient + 'static) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// `POST /api/chat`. The body is decoded whatever its `Content-Type`.
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match ChatRequest::from_body(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected chat request: {}", e);
            return error_response(StatusCode::BAD_REQUEST, ErrorResponse::INVALID_REQUEST);
        }
    };

    info!("Received chat request ({} chars)", request.message.len());

    match state.client.infer(&request.message).await {
        Ok(output) => {
            info!("Relaying {} byte inference response", output.len());
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                output,
            )
                .into_response()
        }
        Err(e) => {
            error!("Inference failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::SERVICE_UNAVAILABLE,
            )
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}
