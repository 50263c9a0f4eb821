//! User management handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{BasicInfoRequest, StudyLevel, User, UserRequest, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::UserFilter;
use crate::types::{Created, NoContent};

#[derive(Debug, Deserialize, IntoParams)]
pub struct AgeRangeQuery {
    pub min_age: i32,
    pub max_age: i32,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/enable", patch(enable_user))
        .route("/:id/disable", patch(disable_user))
        .route("/:id/basic", patch(update_basic_info))
        .route("/email/:email", get(get_user_by_email))
        .route("/username/:username", get(get_user_by_username))
        .route("/enabled/:enabled", get(list_by_enabled))
        .route("/age", get(list_by_age))
        .route("/study-level/:level", get(list_by_study_level))
        .route("/exists/email/:email", get(email_exists))
}

fn responses(users: Vec<User>) -> Json<Vec<UserResponse>> {
    Json(users.into_iter().map(UserResponse::from).collect())
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already in use")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state.user_service.create_user(payload).await?;
    Ok(Created(user.into()))
}

/// List every user
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses((status = 200, description = "All users", body = Vec<UserResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    Ok(responses(state.user_service.list_users(UserFilter::All).await?))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(state.user_service.get_user(id).await?.into()))
}

/// Replace a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(state.user_service.update_user(id, payload).await?.into()))
}

/// Update first name, last name and age
#[utoipa::path(
    patch,
    path = "/api/users/{id}/basic",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    request_body = BasicInfoRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_basic_info(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<BasicInfoRequest>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(state.user_service.update_basic_info(id, payload).await?.into()))
}

/// Enable an account
#[utoipa::path(
    patch,
    path = "/api/users/{id}/enable",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User enabled", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn enable_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(state.user_service.set_enabled(id, true).await?.into()))
}

/// Disable an account
#[utoipa::path(
    patch,
    path = "/api/users/{id}/disable",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User disabled", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn disable_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(state.user_service.set_enabled(id, false).await?.into()))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<NoContent> {
    state.user_service.delete_user(id).await?;
    Ok(NoContent)
}

/// Get a user by email
#[utoipa::path(
    get,
    path = "/api/users/email/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Email address")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(state.user_service.get_user_by_email(&email).await?.into()))
}

/// Get a user by username
#[utoipa::path(
    get,
    path = "/api/users/username/{username}",
    tag = "Users",
    params(("username" = String, Path, description = "Generated username")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(state.user_service.get_user_by_username(&username).await?.into()))
}

/// List users by account state
#[utoipa::path(
    get,
    path = "/api/users/enabled/{enabled}",
    tag = "Users",
    params(("enabled" = bool, Path, description = "Account enabled flag")),
    responses((status = 200, description = "Matching users", body = Vec<UserResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_by_enabled(
    State(state): State<AppState>,
    Path(enabled): Path<bool>,
) -> AppResult<Json<Vec<UserResponse>>> {
    Ok(responses(
        state.user_service.list_users(UserFilter::Enabled(enabled)).await?,
    ))
}

/// List users whose age lies in an inclusive range
#[utoipa::path(
    get,
    path = "/api/users/age",
    tag = "Users",
    params(AgeRangeQuery),
    responses(
        (status = 200, description = "Matching users", body = Vec<UserResponse>),
        (status = 400, description = "min_age greater than max_age")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_by_age(
    State(state): State<AppState>,
    Query(range): Query<AgeRangeQuery>,
) -> AppResult<Json<Vec<UserResponse>>> {
    if range.min_age > range.max_age {
        return Err(AppError::bad_request("min_age must not exceed max_age"));
    }
    Ok(responses(
        state
            .user_service
            .list_users(UserFilter::AgeBetween(range.min_age, range.max_age))
            .await?,
    ))
}

/// List users at a study level
#[utoipa::path(
    get,
    path = "/api/users/study-level/{level}",
    tag = "Users",
    params(("level" = StudyLevel, Path, description = "BAC, BAC2, PREPA, LICENCE or MASTER")),
    responses(
        (status = 200, description = "Matching users", body = Vec<UserResponse>),
        (status = 400, description = "Unknown study level")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_by_study_level(
    State(state): State<AppState>,
    Path(level): Path<String>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let level: StudyLevel = level.parse().map_err(AppError::bad_request)?;
    Ok(responses(
        state.user_service.list_users(UserFilter::StudyLevel(level)).await?,
    ))
}

/// Whether an account uses this email
#[utoipa::path(
    get,
    path = "/api/users/exists/email/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Email address")),
    responses((status = 200, description = "true when taken", body = bool)),
    security(("bearer_auth" = []))
)]
pub async fn email_exists(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<bool>> {
    Ok(Json(state.user_service.email_exists(&email).await?))
}
