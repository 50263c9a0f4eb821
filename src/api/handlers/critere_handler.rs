//! Admission criteria handlers. A critère is addressed by its filière id.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CritereRequest, CritereResponse};
use crate::errors::AppResult;
use crate::infra::CritereFilter;
use crate::types::{Created, NoContent};

/// Create critère routes
pub fn critere_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_criteres).post(create_critere))
        .route(
            "/:filiere_id",
            get(get_critere).put(update_critere).delete(delete_critere),
        )
        .route("/annee/:annee", get(list_by_annee))
        .route("/type-candidat/:type_candidat", get(list_by_type_candidat))
        .route("/serie-bac/:serie", get(list_by_serie_bac))
        .route("/seuil-min/:seuil", get(list_by_seuil_min))
        .route("/with-entretien", get(list_with_entretien))
        .route("/age-max/:age", get(list_by_age_max))
        .route("/exists/:filiere_id", get(critere_exists))
}

async fn list(state: &AppState, filter: CritereFilter) -> AppResult<Json<Vec<CritereResponse>>> {
    Ok(Json(state.critere_service.list_criteres(filter).await?))
}

/// Attach admission criteria to a filière
#[utoipa::path(
    post,
    path = "/api/criteres",
    tag = "Criteres",
    request_body = CritereRequest,
    responses(
        (status = 201, description = "Critère created", body = CritereResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Filière not found"),
        (status = 409, description = "Filière already has criteria")
    )
)]
pub async fn create_critere(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CritereRequest>,
) -> AppResult<Created<CritereResponse>> {
    Ok(Created(state.critere_service.create_critere(payload).await?))
}

/// List every critère
#[utoipa::path(
    get,
    path = "/api/criteres",
    tag = "Criteres",
    responses((status = 200, description = "All critères", body = Vec<CritereResponse>))
)]
pub async fn list_criteres(State(state): State<AppState>) -> AppResult<Json<Vec<CritereResponse>>> {
    list(&state, CritereFilter::All).await
}

/// Get the criteria of a filière
#[utoipa::path(
    get,
    path = "/api/criteres/{filiere_id}",
    tag = "Criteres",
    params(("filiere_id" = i64, Path, description = "Filière id")),
    responses(
        (status = 200, description = "Critère found", body = CritereResponse),
        (status = 404, description = "Critère not found")
    )
)]
pub async fn get_critere(
    State(state): State<AppState>,
    Path(filiere_id): Path<i64>,
) -> AppResult<Json<CritereResponse>> {
    Ok(Json(state.critere_service.get_critere(filiere_id).await?))
}

/// Replace the criteria of a filière
#[utoipa::path(
    put,
    path = "/api/criteres/{filiere_id}",
    tag = "Criteres",
    params(("filiere_id" = i64, Path, description = "Filière id")),
    request_body = CritereRequest,
    responses(
        (status = 200, description = "Critère updated", body = CritereResponse),
        (status = 404, description = "Critère not found")
    )
)]
pub async fn update_critere(
    State(state): State<AppState>,
    Path(filiere_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<CritereRequest>,
) -> AppResult<Json<CritereResponse>> {
    Ok(Json(
        state.critere_service.update_critere(filiere_id, payload).await?,
    ))
}

/// Remove the criteria of a filière
#[utoipa::path(
    delete,
    path = "/api/criteres/{filiere_id}",
    tag = "Criteres",
    params(("filiere_id" = i64, Path, description = "Filière id")),
    responses(
        (status = 204, description = "Critère deleted"),
        (status = 404, description = "Critère not found")
    )
)]
pub async fn delete_critere(
    State(state): State<AppState>,
    Path(filiere_id): Path<i64>,
) -> AppResult<NoContent> {
    state.critere_service.delete_critere(filiere_id).await?;
    Ok(NoContent)
}

/// Critères for an academic year
#[utoipa::path(
    get,
    path = "/api/criteres/annee/{annee}",
    tag = "Criteres",
    params(("annee" = String, Path, description = "Academic year, e.g. 2025-2026")),
    responses((status = 200, description = "Matching critères", body = Vec<CritereResponse>))
)]
pub async fn list_by_annee(
    State(state): State<AppState>,
    Path(annee): Path<String>,
) -> AppResult<Json<Vec<CritereResponse>>> {
    list(&state, CritereFilter::AnneeAcademique(annee)).await
}

/// Critères targeting a candidate type
#[utoipa::path(
    get,
    path = "/api/criteres/type-candidat/{type_candidat}",
    tag = "Criteres",
    params(("type_candidat" = String, Path, description = "Candidate type")),
    responses((status = 200, description = "Matching critères", body = Vec<CritereResponse>))
)]
pub async fn list_by_type_candidat(
    State(state): State<AppState>,
    Path(type_candidat): Path<String>,
) -> AppResult<Json<Vec<CritereResponse>>> {
    list(&state, CritereFilter::TypeCandidat(type_candidat)).await
}

/// Critères targeting a bac series
#[utoipa::path(
    get,
    path = "/api/criteres/serie-bac/{serie}",
    tag = "Criteres",
    params(("serie" = String, Path, description = "Bac series")),
    responses((status = 200, description = "Matching critères", body = Vec<CritereResponse>))
)]
pub async fn list_by_serie_bac(
    State(state): State<AppState>,
    Path(serie): Path<String>,
) -> AppResult<Json<Vec<CritereResponse>>> {
    list(&state, CritereFilter::SerieBac(serie)).await
}

/// Critères whose threshold is at least a value
#[utoipa::path(
    get,
    path = "/api/criteres/seuil-min/{seuil}",
    tag = "Criteres",
    params(("seuil" = f64, Path, description = "Minimum threshold")),
    responses((status = 200, description = "Matching critères", body = Vec<CritereResponse>))
)]
pub async fn list_by_seuil_min(
    State(state): State<AppState>,
    Path(seuil): Path<f64>,
) -> AppResult<Json<Vec<CritereResponse>>> {
    list(&state, CritereFilter::SeuilAtLeast(seuil)).await
}

/// Critères that include an interview
#[utoipa::path(
    get,
    path = "/api/criteres/with-entretien",
    tag = "Criteres",
    responses((status = 200, description = "Matching critères", body = Vec<CritereResponse>))
)]
pub async fn list_with_entretien(State(state): State<AppState>) -> AppResult<Json<Vec<CritereResponse>>> {
    list(&state, CritereFilter::WithEntretien).await
}

/// Critères whose age limit is at most a value
#[utoipa::path(
    get,
    path = "/api/criteres/age-max/{age}",
    tag = "Criteres",
    params(("age" = i32, Path, description = "Age limit")),
    responses((status = 200, description = "Matching critères", body = Vec<CritereResponse>))
)]
pub async fn list_by_age_max(
    State(state): State<AppState>,
    Path(age): Path<i32>,
) -> AppResult<Json<Vec<CritereResponse>>> {
    list(&state, CritereFilter::AgeMaxAtMost(age)).await
}

/// Whether a filière has criteria
#[utoipa::path(
    get,
    path = "/api/criteres/exists/{filiere_id}",
    tag = "Criteres",
    params(("filiere_id" = i64, Path, description = "Filière id")),
    responses((status = 200, description = "true when present", body = bool))
)]
pub async fn critere_exists(
    State(state): State<AppState>,
    Path(filiere_id): Path<i64>,
) -> AppResult<Json<bool>> {
    Ok(Json(state.critere_service.critere_exists(filiere_id).await?))
}
