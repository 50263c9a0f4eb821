//! Filière (study program) handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{FiliereRequest, FiliereResponse};
use crate::errors::AppResult;
use crate::infra::FiliereFilter;
use crate::types::{Created, NoContent};

#[derive(Debug, Deserialize, IntoParams)]
pub struct DeadlineQuery {
    /// Earliest deadline, `YYYY-MM-DD`
    #[param(value_type = String, example = "2026-06-01")]
    pub date: NaiveDate,
}

/// Create filière routes
pub fn filiere_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_filieres).post(create_filiere))
        .route(
            "/:id",
            get(get_filiere).put(update_filiere).delete(delete_filiere),
        )
        .route("/university/:university_id", get(list_by_university))
        .route(
            "/university/:university_id/admission-type/:admission_type",
            get(list_by_university_and_admission_type),
        )
        .route("/admission-type/:admission_type", get(list_by_admission_type))
        .route("/language/:language", get(list_by_language))
        .route("/deadline-after", get(list_by_deadline))
        .route("/available", get(list_available))
}

async fn list(state: &AppState, filter: FiliereFilter) -> AppResult<Json<Vec<FiliereResponse>>> {
    Ok(Json(state.filiere_service.list_filieres(filter).await?))
}

/// Create a filière
#[utoipa::path(
    post,
    path = "/api/filieres",
    tag = "Filieres",
    request_body = FiliereRequest,
    responses(
        (status = 201, description = "Filière created", body = FiliereResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "University not found")
    )
)]
pub async fn create_filiere(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<FiliereRequest>,
) -> AppResult<Created<FiliereResponse>> {
    Ok(Created(state.filiere_service.create_filiere(payload).await?))
}

/// List every filière
#[utoipa::path(
    get,
    path = "/api/filieres",
    tag = "Filieres",
    responses((status = 200, description = "All filières", body = Vec<FiliereResponse>))
)]
pub async fn list_filieres(State(state): State<AppState>) -> AppResult<Json<Vec<FiliereResponse>>> {
    list(&state, FiliereFilter::All).await
}

/// Get a filière by id
#[utoipa::path(
    get,
    path = "/api/filieres/{id}",
    tag = "Filieres",
    params(("id" = i64, Path, description = "Filière id")),
    responses(
        (status = 200, description = "Filière found", body = FiliereResponse),
        (status = 404, description = "Filière not found")
    )
)]
pub async fn get_filiere(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<FiliereResponse>> {
    Ok(Json(state.filiere_service.get_filiere(id).await?))
}

/// Replace a filière
#[utoipa::path(
    put,
    path = "/api/filieres/{id}",
    tag = "Filieres",
    params(("id" = i64, Path, description = "Filière id")),
    request_body = FiliereRequest,
    responses(
        (status = 200, description = "Filière updated", body = FiliereResponse),
        (status = 404, description = "Filière or university not found")
    )
)]
pub async fn update_filiere(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<FiliereRequest>,
) -> AppResult<Json<FiliereResponse>> {
    Ok(Json(state.filiere_service.update_filiere(id, payload).await?))
}

/// Delete a filière
#[utoipa::path(
    delete,
    path = "/api/filieres/{id}",
    tag = "Filieres",
    params(("id" = i64, Path, description = "Filière id")),
    responses(
        (status = 204, description = "Filière deleted"),
        (status = 404, description = "Filière not found")
    )
)]
pub async fn delete_filiere(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<NoContent> {
    state.filiere_service.delete_filiere(id).await?;
    Ok(NoContent)
}

/// Filières offered by a university
#[utoipa::path(
    get,
    path = "/api/filieres/university/{university_id}",
    tag = "Filieres",
    params(("university_id" = i64, Path, description = "University id")),
    responses((status = 200, description = "Matching filières", body = Vec<FiliereResponse>))
)]
pub async fn list_by_university(
    State(state): State<AppState>,
    Path(university_id): Path<i64>,
) -> AppResult<Json<Vec<FiliereResponse>>> {
    list(&state, FiliereFilter::University(university_id)).await
}

/// Filières of a university with a given admission type
#[utoipa::path(
    get,
    path = "/api/filieres/university/{university_id}/admission-type/{admission_type}",
    tag = "Filieres",
    params(
        ("university_id" = i64, Path, description = "University id"),
        ("admission_type" = String, Path, description = "Admission type")
    ),
    responses((status = 200, description = "Matching filières", body = Vec<FiliereResponse>))
)]
pub async fn list_by_university_and_admission_type(
    State(state): State<AppState>,
    Path((university_id, admission_type)): Path<(i64, String)>,
) -> AppResult<Json<Vec<FiliereResponse>>> {
    list(
        &state,
        FiliereFilter::UniversityAndAdmissionType(university_id, admission_type),
    )
    .await
}

/// Filières with a given admission type
#[utoipa::path(
    get,
    path = "/api/filieres/admission-type/{admission_type}",
    tag = "Filieres",
    params(("admission_type" = String, Path, description = "Admission type")),
    responses((status = 200, description = "Matching filières", body = Vec<FiliereResponse>))
)]
pub async fn list_by_admission_type(
    State(state): State<AppState>,
    Path(admission_type): Path<String>,
) -> AppResult<Json<Vec<FiliereResponse>>> {
    list(&state, FiliereFilter::AdmissionType(admission_type)).await
}

/// Filières taught in a language
#[utoipa::path(
    get,
    path = "/api/filieres/language/{language}",
    tag = "Filieres",
    params(("language" = String, Path, description = "Teaching language")),
    responses((status = 200, description = "Matching filières", body = Vec<FiliereResponse>))
)]
pub async fn list_by_language(
    State(state): State<AppState>,
    Path(language): Path<String>,
) -> AppResult<Json<Vec<FiliereResponse>>> {
    list(&state, FiliereFilter::Language(language)).await
}

/// Filières whose application deadline is on or after a date
#[utoipa::path(
    get,
    path = "/api/filieres/deadline-after",
    tag = "Filieres",
    params(DeadlineQuery),
    responses(
        (status = 200, description = "Matching filières", body = Vec<FiliereResponse>),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn list_by_deadline(
    State(state): State<AppState>,
    Query(query): Query<DeadlineQuery>,
) -> AppResult<Json<Vec<FiliereResponse>>> {
    list(&state, FiliereFilter::DeadlineFrom(query.date)).await
}

/// Filières with seats left
#[utoipa::path(
    get,
    path = "/api/filieres/available",
    tag = "Filieres",
    responses((status = 200, description = "Filières with seats available", body = Vec<FiliereResponse>))
)]
pub async fn list_available(State(state): State<AppState>) -> AppResult<Json<Vec<FiliereResponse>>> {
    list(&state, FiliereFilter::Available).await
}
