//! Authentication handlers.

use axum::{
    extract::{Query, State},
    http::{header::HOST, HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::errors::AppResult;
use crate::services::AuthResponse;
use crate::types::{Created, MessageResponse};

const VERIFIED_MESSAGE: &str = "Email verified successfully! You can now log in.";
const VERIFY_FAILED_MESSAGE: &str = "Invalid or expired verification token.";

#[derive(Debug, Deserialize, IntoParams)]
pub struct VerifyEmailQuery {
    /// Token from the verification mail
    pub token: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/verify-email", get(verify_email))
        .route("/test", get(test))
}

/// Scheme and host the client used to reach us, so mailed links point back
/// at the same origin. Falls back to the configured base URL.
fn request_base_url(headers: &HeaderMap, fallback: &str) -> String {
    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .filter(|h| !h.is_empty());
    let Some(host) = host else {
        return fallback.trim_end_matches('/').to_string();
    };
    let scheme = headers
        .get("X-Forwarded-Proto")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("http");
    format!("{}://{}", scheme, host)
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, verification mail queued", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<AuthResponse>> {
    let base_url = request_base_url(&headers, &state.base_url);
    let response = state.auth_service.register(payload, &base_url).await?;
    Ok(Created(response))
}

/// Login and get a token pair
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Email not verified")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    Ok(Json(state.auth_service.login(payload).await?))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "Authentication",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed", body = AuthResponse),
        (status = 401, description = "Invalid refresh token")
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Json<AuthResponse>> {
    Ok(Json(state.auth_service.refresh(&payload.refresh_token).await?))
}

/// Follow the link from the verification mail
#[utoipa::path(
    get,
    path = "/api/auth/verify-email",
    tag = "Authentication",
    params(VerifyEmailQuery),
    responses(
        (status = 200, description = "Account enabled", body = MessageResponse),
        (status = 400, description = "Unknown, expired or already used token", body = MessageResponse)
    )
)]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let outcome = state.auth_service.verify_email(&query.token).await?;
    if outcome.is_verified() {
        Ok((StatusCode::OK, Json(MessageResponse::new(VERIFIED_MESSAGE))))
    } else {
        tracing::info!(?outcome, "Email verification rejected");
        Ok((
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new(VERIFY_FAILED_MESSAGE)),
        ))
    }
}

/// Liveness check for the auth routes
#[utoipa::path(
    get,
    path = "/api/auth/test",
    tag = "Authentication",
    responses((status = 200, description = "Service is up", body = MessageResponse))
)]
pub async fn test() -> Json<MessageResponse> {
    Json(MessageResponse::new("Authentication service is running!"))
}
