//! University catalog handlers, including image upload.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::MAX_UPLOAD_BYTES;
use crate::domain::{University, UniversityRequest};
use crate::errors::{AppError, AppResult};
use crate::infra::UniversityFilter;
use crate::types::{Created, NoContent};

const IMAGE_FIELD: &str = "file";

#[derive(Debug, Deserialize, IntoParams)]
pub struct NameSearchQuery {
    /// Case-insensitive fragment of the name
    pub name: String,
}

/// Multipart body of the image upload
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageUpload {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Create university routes
pub fn university_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_universities).post(create_university))
        .route(
            "/:id",
            get(get_university)
                .put(update_university)
                .delete(delete_university),
        )
        .route(
            "/:id/image",
            post(upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/location/:location", get(list_by_location))
        .route("/type/:kind", get(list_by_type))
        .route("/accreditation/:status", get(list_by_accreditation))
        .route("/slug/:slug", get(get_by_slug))
        .route("/search", get(search_by_name))
        .route("/exists/:name", get(exists_by_name))
}

/// Create a university
#[utoipa::path(
    post,
    path = "/api/universities",
    tag = "Universities",
    request_body = UniversityRequest,
    responses(
        (status = 201, description = "University created", body = University),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name or slug already taken")
    )
)]
pub async fn create_university(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UniversityRequest>,
) -> AppResult<Created<University>> {
    Ok(Created(state.university_service.create_university(payload).await?))
}

/// List every university
#[utoipa::path(
    get,
    path = "/api/universities",
    tag = "Universities",
    responses((status = 200, description = "All universities", body = Vec<University>))
)]
pub async fn list_universities(State(state): State<AppState>) -> AppResult<Json<Vec<University>>> {
    Ok(Json(
        state
            .university_service
            .list_universities(UniversityFilter::All)
            .await?,
    ))
}

/// Get a university by id
#[utoipa::path(
    get,
    path = "/api/universities/{id}",
    tag = "Universities",
    params(("id" = i64, Path, description = "University id")),
    responses(
        (status = 200, description = "University found", body = University),
        (status = 404, description = "University not found")
    )
)]
pub async fn get_university(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<University>> {
    Ok(Json(state.university_service.get_university(id).await?))
}

/// Replace a university
#[utoipa::path(
    put,
    path = "/api/universities/{id}",
    tag = "Universities",
    params(("id" = i64, Path, description = "University id")),
    request_body = UniversityRequest,
    responses(
        (status = 200, description = "University updated", body = University),
        (status = 404, description = "University not found"),
        (status = 409, description = "Name or slug already taken")
    )
)]
pub async fn update_university(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UniversityRequest>,
) -> AppResult<Json<University>> {
    Ok(Json(
        state.university_service.update_university(id, payload).await?,
    ))
}

/// Delete a university with its filières and critères
#[utoipa::path(
    delete,
    path = "/api/universities/{id}",
    tag = "Universities",
    params(("id" = i64, Path, description = "University id")),
    responses(
        (status = 204, description = "University deleted"),
        (status = 404, description = "University not found")
    )
)]
pub async fn delete_university(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    state.university_service.delete_university(id).await?;
    Ok(NoContent)
}

/// Upload or replace the university image
#[utoipa::path(
    post,
    path = "/api/universities/{id}/image",
    tag = "Universities",
    params(("id" = i64, Path, description = "University id")),
    request_body(content = ImageUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = University),
        (status = 400, description = "Missing, empty or non-image file"),
        (status = 404, description = "University not found")
    )
)]
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> AppResult<Json<University>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let is_image = field
            .content_type()
            .is_some_and(|ct| ct.starts_with("image/"));
        if !is_image {
            return Err(AppError::bad_request("Only image files are allowed"));
        }

        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;
        if data.is_empty() {
            return Err(AppError::bad_request("Uploaded file is empty"));
        }

        let university = state
            .university_service
            .upload_image(id, file_name, data.to_vec())
            .await?;
        return Ok(Json(university));
    }

    Err(AppError::bad_request("Missing multipart field 'file'"))
}

/// List universities in a city
#[utoipa::path(
    get,
    path = "/api/universities/location/{location}",
    tag = "Universities",
    params(("location" = String, Path, description = "City")),
    responses((status = 200, description = "Matching universities", body = Vec<University>))
)]
pub async fn list_by_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> AppResult<Json<Vec<University>>> {
    Ok(Json(
        state
            .university_service
            .list_universities(UniversityFilter::Location(location))
            .await?,
    ))
}

/// List universities of a type
#[utoipa::path(
    get,
    path = "/api/universities/type/{kind}",
    tag = "Universities",
    params(("kind" = String, Path, description = "Institution type")),
    responses((status = 200, description = "Matching universities", body = Vec<University>))
)]
pub async fn list_by_type(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<Json<Vec<University>>> {
    Ok(Json(
        state
            .university_service
            .list_universities(UniversityFilter::Kind(kind))
            .await?,
    ))
}

/// List universities by accreditation status
#[utoipa::path(
    get,
    path = "/api/universities/accreditation/{status}",
    tag = "Universities",
    params(("status" = String, Path, description = "Accreditation status")),
    responses((status = 200, description = "Matching universities", body = Vec<University>))
)]
pub async fn list_by_accreditation(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<University>>> {
    Ok(Json(
        state
            .university_service
            .list_universities(UniversityFilter::Accreditation(status))
            .await?,
    ))
}

/// Get a university by slug
#[utoipa::path(
    get,
    path = "/api/universities/slug/{slug}",
    tag = "Universities",
    params(("slug" = String, Path, description = "URL slug")),
    responses(
        (status = 200, description = "University found", body = University),
        (status = 404, description = "University not found")
    )
)]
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<University>> {
    Ok(Json(state.university_service.get_university_by_slug(&slug).await?))
}

/// Search universities by name
#[utoipa::path(
    get,
    path = "/api/universities/search",
    tag = "Universities",
    params(NameSearchQuery),
    responses((status = 200, description = "Matching universities", body = Vec<University>))
)]
pub async fn search_by_name(
    State(state): State<AppState>,
    Query(query): Query<NameSearchQuery>,
) -> AppResult<Json<Vec<University>>> {
    Ok(Json(
        state
            .university_service
            .list_universities(UniversityFilter::NameContains(query.name))
            .await?,
    ))
}

/// Whether a university with this exact name exists
#[utoipa::path(
    get,
    path = "/api/universities/exists/{name}",
    tag = "Universities",
    params(("name" = String, Path, description = "University name")),
    responses((status = 200, description = "true when present", body = bool))
)]
pub async fn exists_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<bool>> {
    Ok(Json(state.university_service.exists_by_name(&name).await?))
}
