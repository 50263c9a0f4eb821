//! Advisory chat endpoint.

use axum::{extract::State, response::Json, routing::post, Router};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{ChatRequest, ChatResponse};

/// Create chat routes
pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/", post(chat))
}

/// Ask the orientation advisor
///
/// Vendor failures are reported inside `reply`, so the endpoint answers 200
/// whenever the body is valid.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Advisor reply", body = ChatResponse),
        (status = 400, description = "Validation error"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ChatRequest>,
) -> Json<ChatResponse> {
    Json(state.chat_service.chat(payload).await)
}
