//! Orientation preference handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{PreferenceRequest, PreferenceResponse};
use crate::errors::AppResult;
use crate::infra::PreferenceFilter;
use crate::types::{Created, NoContent};

/// Create preference routes
pub fn preference_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_preferences).post(create_preference))
        .route(
            "/:id",
            get(get_preference)
                .put(update_preference)
                .delete(delete_preference),
        )
        .route(
            "/user/:user_id",
            get(get_by_user).delete(delete_by_user),
        )
        .route("/exists/user/:user_id", get(exists_for_user))
        .route("/budget/:budget_range", get(list_by_budget))
        .route("/city/:city", get(list_by_city))
        .route("/interest/:interest", get(list_by_interest))
        .route("/language/:language", get(list_by_language))
}

async fn list(
    state: &AppState,
    filter: PreferenceFilter,
) -> AppResult<Json<Vec<PreferenceResponse>>> {
    Ok(Json(state.preference_service.list_preferences(filter).await?))
}

/// Record a user's preferences
#[utoipa::path(
    post,
    path = "/api/preferences",
    tag = "Preferences",
    request_body = PreferenceRequest,
    responses(
        (status = 201, description = "Preference created", body = PreferenceResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "User already has preferences")
    )
)]
pub async fn create_preference(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PreferenceRequest>,
) -> AppResult<Created<PreferenceResponse>> {
    Ok(Created(state.preference_service.create_preference(payload).await?))
}

/// List every preference
#[utoipa::path(
    get,
    path = "/api/preferences",
    tag = "Preferences",
    responses((status = 200, description = "All preferences", body = Vec<PreferenceResponse>))
)]
pub async fn list_preferences(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PreferenceResponse>>> {
    list(&state, PreferenceFilter::All).await
}

/// Get a preference by id
#[utoipa::path(
    get,
    path = "/api/preferences/{id}",
    tag = "Preferences",
    params(("id" = i64, Path, description = "Preference id")),
    responses(
        (status = 200, description = "Preference found", body = PreferenceResponse),
        (status = 404, description = "Preference not found")
    )
)]
pub async fn get_preference(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PreferenceResponse>> {
    Ok(Json(state.preference_service.get_preference(id).await?))
}

/// Replace a preference
#[utoipa::path(
    put,
    path = "/api/preferences/{id}",
    tag = "Preferences",
    params(("id" = i64, Path, description = "Preference id")),
    request_body = PreferenceRequest,
    responses(
        (status = 200, description = "Preference updated", body = PreferenceResponse),
        (status = 404, description = "Preference not found")
    )
)]
pub async fn update_preference(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<PreferenceRequest>,
) -> AppResult<Json<PreferenceResponse>> {
    Ok(Json(
        state.preference_service.update_preference(id, payload).await?,
    ))
}

/// Delete a preference
#[utoipa::path(
    delete,
    path = "/api/preferences/{id}",
    tag = "Preferences",
    params(("id" = i64, Path, description = "Preference id")),
    responses(
        (status = 204, description = "Preference deleted"),
        (status = 404, description = "Preference not found")
    )
)]
pub async fn delete_preference(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    state.preference_service.delete_preference(id).await?;
    Ok(NoContent)
}

/// Get the preferences of a user
#[utoipa::path(
    get,
    path = "/api/preferences/user/{user_id}",
    tag = "Preferences",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Preference found", body = PreferenceResponse),
        (status = 404, description = "Preference not found")
    )
)]
pub async fn get_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<PreferenceResponse>> {
    Ok(Json(
        state.preference_service.get_preference_by_user(user_id).await?,
    ))
}

/// Delete the preferences of a user
#[utoipa::path(
    delete,
    path = "/api/preferences/user/{user_id}",
    tag = "Preferences",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "Preference deleted"),
        (status = 404, description = "Preference not found")
    )
)]
pub async fn delete_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<NoContent> {
    state
        .preference_service
        .delete_preference_by_user(user_id)
        .await?;
    Ok(NoContent)
}

/// Whether a user has recorded preferences
#[utoipa::path(
    get,
    path = "/api/preferences/exists/user/{user_id}",
    tag = "Preferences",
    params(("user_id" = i64, Path, description = "User id")),
    responses((status = 200, description = "true when present", body = bool))
)]
pub async fn exists_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<bool>> {
    Ok(Json(
        state
            .preference_service
            .preference_exists_for_user(user_id)
            .await?,
    ))
}

/// Preferences with a budget range
#[utoipa::path(
    get,
    path = "/api/preferences/budget/{budget_range}",
    tag = "Preferences",
    params(("budget_range" = String, Path, description = "Budget range")),
    responses((status = 200, description = "Matching preferences", body = Vec<PreferenceResponse>))
)]
pub async fn list_by_budget(
    State(state): State<AppState>,
    Path(budget_range): Path<String>,
) -> AppResult<Json<Vec<PreferenceResponse>>> {
    list(&state, PreferenceFilter::Budget(budget_range)).await
}

/// Preferences mentioning a city
#[utoipa::path(
    get,
    path = "/api/preferences/city/{city}",
    tag = "Preferences",
    params(("city" = String, Path, description = "City fragment")),
    responses((status = 200, description = "Matching preferences", body = Vec<PreferenceResponse>))
)]
pub async fn list_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> AppResult<Json<Vec<PreferenceResponse>>> {
    list(&state, PreferenceFilter::CityContains(city)).await
}

/// Preferences mentioning an interest
#[utoipa::path(
    get,
    path = "/api/preferences/interest/{interest}",
    tag = "Preferences",
    params(("interest" = String, Path, description = "Interest fragment")),
    responses((status = 200, description = "Matching preferences", body = Vec<PreferenceResponse>))
)]
pub async fn list_by_interest(
    State(state): State<AppState>,
    Path(interest): Path<String>,
) -> AppResult<Json<Vec<PreferenceResponse>>> {
    list(&state, PreferenceFilter::InterestContains(interest)).await
}

/// Preferences mentioning a language
#[utoipa::path(
    get,
    path = "/api/preferences/language/{language}",
    tag = "Preferences",
    params(("language" = String, Path, description = "Language fragment")),
    responses((status = 200, description = "Matching preferences", body = Vec<PreferenceResponse>))
)]
pub async fn list_by_language(
    State(state): State<AppState>,
    Path(language): Path<String>,
) -> AppResult<Json<Vec<PreferenceResponse>>> {
    list(&state, PreferenceFilter::LanguageContains(language)).await
}
