//! Student profile handlers for the bac, bac+2 and prepa tracks.
//!
//! Profiles are addressed by the id of the user they belong to.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{
    Bac2StudentRequest, Bac2StudentResponse, BacStudentRequest, BacStudentResponse,
    PrepaStudentRequest, PrepaStudentResponse,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{Bac2StudentFilter, BacStudentFilter, PrepaStudentFilter};
use crate::types::{Created, NoContent};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CncRangeQuery {
    pub min_rating: f64,
    pub max_rating: f64,
}

/// Create bac student routes
pub fn bac_student_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bac_students).post(create_bac_student))
        .route(
            "/:user_id",
            get(get_bac_student)
                .put(update_bac_student)
                .delete(delete_bac_student),
        )
        .route("/major/:major", get(list_bac_by_major))
        .route("/major/:major/grade-min/:grade", get(list_bac_by_major_and_grade))
        .route("/degree/:degree", get(list_bac_by_degree))
        .route("/year/:year", get(list_bac_by_year))
        .route("/grade-min/:grade", get(list_bac_by_grade))
}

/// Create bac+2 student routes
pub fn bac2_student_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bac2_students).post(create_bac2_student))
        .route(
            "/:user_id",
            get(get_bac2_student)
                .put(update_bac2_student)
                .delete(delete_bac2_student),
        )
        .route("/diploma/:diploma", get(list_bac2_by_diploma))
        .route(
            "/diploma/:diploma/institution/:institution",
            get(list_bac2_by_diploma_and_institution),
        )
        .route("/major/:major", get(list_bac2_by_major))
        .route("/major/:major/overall-min/:avg", get(list_bac2_by_major_and_overall))
        .route("/institution/:institution", get(list_bac2_by_institution))
        .route("/overall-min/:avg", get(list_bac2_by_overall))
        .route("/avg-s1-min/:avg", get(list_bac2_by_avg_s1))
}

/// Create prepa student routes
pub fn prepa_student_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_prepa_students).post(create_prepa_student))
        .route(
            "/:user_id",
            get(get_prepa_student)
                .put(update_prepa_student)
                .delete(delete_prepa_student),
        )
        .route("/major/:major", get(list_prepa_by_major))
        .route("/major/:major/cnc-min/:rating", get(list_prepa_by_major_and_cnc))
        .route("/annee-bac/:annee", get(list_prepa_by_annee_bac))
        .route("/cnc-min/:rating", get(list_prepa_by_cnc))
        .route("/cnc-range", get(list_prepa_by_cnc_range))
}

// Bac

async fn bac_list(
    state: &AppState,
    filter: BacStudentFilter,
) -> AppResult<Json<Vec<BacStudentResponse>>> {
    Ok(Json(state.bac_student_service.list_bac_students(filter).await?))
}

/// Create a bac profile
#[utoipa::path(
    post,
    path = "/api/bac-students",
    tag = "Bac students",
    request_body = BacStudentRequest,
    responses(
        (status = 201, description = "Profile created", body = BacStudentResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "User already has a bac profile")
    )
)]
pub async fn create_bac_student(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BacStudentRequest>,
) -> AppResult<Created<BacStudentResponse>> {
    Ok(Created(state.bac_student_service.create_bac_student(payload).await?))
}

/// List every bac profile
#[utoipa::path(
    get,
    path = "/api/bac-students",
    tag = "Bac students",
    responses((status = 200, description = "All bac profiles", body = Vec<BacStudentResponse>))
)]
pub async fn list_bac_students(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BacStudentResponse>>> {
    bac_list(&state, BacStudentFilter::All).await
}

/// Get a bac profile
#[utoipa::path(
    get,
    path = "/api/bac-students/{user_id}",
    tag = "Bac students",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Profile found", body = BacStudentResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_bac_student(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<BacStudentResponse>> {
    Ok(Json(state.bac_student_service.get_bac_student(user_id).await?))
}

/// Replace a bac profile
#[utoipa::path(
    put,
    path = "/api/bac-students/{user_id}",
    tag = "Bac students",
    params(("user_id" = i64, Path, description = "User id")),
    request_body = BacStudentRequest,
    responses(
        (status = 200, description = "Profile updated", body = BacStudentResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn update_bac_student(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<BacStudentRequest>,
) -> AppResult<Json<BacStudentResponse>> {
    Ok(Json(
        state
            .bac_student_service
            .update_bac_student(user_id, payload)
            .await?,
    ))
}

/// Delete a bac profile
#[utoipa::path(
    delete,
    path = "/api/bac-students/{user_id}",
    tag = "Bac students",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn delete_bac_student(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<NoContent> {
    state.bac_student_service.delete_bac_student(user_id).await?;
    Ok(NoContent)
}

/// Bac profiles in a major
#[utoipa::path(
    get,
    path = "/api/bac-students/major/{major}",
    tag = "Bac students",
    params(("major" = String, Path, description = "Bac major")),
    responses((status = 200, description = "Matching profiles", body = Vec<BacStudentResponse>))
)]
pub async fn list_bac_by_major(
    State(state): State<AppState>,
    Path(major): Path<String>,
) -> AppResult<Json<Vec<BacStudentResponse>>> {
    bac_list(&state, BacStudentFilter::Major(major)).await
}

/// Bac profiles in a major with at least a grade
#[utoipa::path(
    get,
    path = "/api/bac-students/major/{major}/grade-min/{grade}",
    tag = "Bac students",
    params(
        ("major" = String, Path, description = "Bac major"),
        ("grade" = f64, Path, description = "Minimum grade")
    ),
    responses((status = 200, description = "Matching profiles", body = Vec<BacStudentResponse>))
)]
pub async fn list_bac_by_major_and_grade(
    State(state): State<AppState>,
    Path((major, grade)): Path<(String, f64)>,
) -> AppResult<Json<Vec<BacStudentResponse>>> {
    bac_list(&state, BacStudentFilter::MajorAndGradeAtLeast(major, grade)).await
}

/// Bac profiles with a degree
#[utoipa::path(
    get,
    path = "/api/bac-students/degree/{degree}",
    tag = "Bac students",
    params(("degree" = String, Path, description = "Degree")),
    responses((status = 200, description = "Matching profiles", body = Vec<BacStudentResponse>))
)]
pub async fn list_bac_by_degree(
    State(state): State<AppState>,
    Path(degree): Path<String>,
) -> AppResult<Json<Vec<BacStudentResponse>>> {
    bac_list(&state, BacStudentFilter::Degree(degree)).await
}

/// Bac profiles by graduation year
#[utoipa::path(
    get,
    path = "/api/bac-students/year/{year}",
    tag = "Bac students",
    params(("year" = i32, Path, description = "Graduation year")),
    responses((status = 200, description = "Matching profiles", body = Vec<BacStudentResponse>))
)]
pub async fn list_bac_by_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> AppResult<Json<Vec<BacStudentResponse>>> {
    bac_list(&state, BacStudentFilter::GraduationYear(year)).await
}

/// Bac profiles with at least a grade
#[utoipa::path(
    get,
    path = "/api/bac-students/grade-min/{grade}",
    tag = "Bac students",
    params(("grade" = f64, Path, description = "Minimum grade")),
    responses((status = 200, description = "Matching profiles", body = Vec<BacStudentResponse>))
)]
pub async fn list_bac_by_grade(
    State(state): State<AppState>,
    Path(grade): Path<f64>,
) -> AppResult<Json<Vec<BacStudentResponse>>> {
    bac_list(&state, BacStudentFilter::GradeAtLeast(grade)).await
}

// Bac+2

async fn bac2_list(
    state: &AppState,
    filter: Bac2StudentFilter,
) -> AppResult<Json<Vec<Bac2StudentResponse>>> {
    Ok(Json(state.bac2_student_service.list_bac2_students(filter).await?))
}

/// Create a bac+2 profile
#[utoipa::path(
    post,
    path = "/api/bac2-students",
    tag = "Bac+2 students",
    request_body = Bac2StudentRequest,
    responses(
        (status = 201, description = "Profile created", body = Bac2StudentResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "User already has a bac+2 profile")
    )
)]
pub async fn create_bac2_student(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<Bac2StudentRequest>,
) -> AppResult<Created<Bac2StudentResponse>> {
    Ok(Created(
        state.bac2_student_service.create_bac2_student(payload).await?,
    ))
}

/// List every bac+2 profile
#[utoipa::path(
    get,
    path = "/api/bac2-students",
    tag = "Bac+2 students",
    responses((status = 200, description = "All bac+2 profiles", body = Vec<Bac2StudentResponse>))
)]
pub async fn list_bac2_students(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Bac2StudentResponse>>> {
    bac2_list(&state, Bac2StudentFilter::All).await
}

/// Get a bac+2 profile
#[utoipa::path(
    get,
    path = "/api/bac2-students/{user_id}",
    tag = "Bac+2 students",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Profile found", body = Bac2StudentResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_bac2_student(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Bac2StudentResponse>> {
    Ok(Json(state.bac2_student_service.get_bac2_student(user_id).await?))
}

/// Replace a bac+2 profile
#[utoipa::path(
    put,
    path = "/api/bac2-students/{user_id}",
    tag = "Bac+2 students",
    params(("user_id" = i64, Path, description = "User id")),
    request_body = Bac2StudentRequest,
    responses(
        (status = 200, description = "Profile updated", body = Bac2StudentResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn update_bac2_student(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<Bac2StudentRequest>,
) -> AppResult<Json<Bac2StudentResponse>> {
    Ok(Json(
        state
            .bac2_student_service
            .update_bac2_student(user_id, payload)
            .await?,
    ))
}

/// Delete a bac+2 profile
#[utoipa::path(
    delete,
    path = "/api/bac2-students/{user_id}",
    tag = "Bac+2 students",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn delete_bac2_student(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<NoContent> {
    state.bac2_student_service.delete_bac2_student(user_id).await?;
    Ok(NoContent)
}

/// Bac+2 profiles with a diploma type
#[utoipa::path(
    get,
    path = "/api/bac2-students/diploma/{diploma}",
    tag = "Bac+2 students",
    params(("diploma" = String, Path, description = "Diploma type")),
    responses((status = 200, description = "Matching profiles", body = Vec<Bac2StudentResponse>))
)]
pub async fn list_bac2_by_diploma(
    State(state): State<AppState>,
    Path(diploma): Path<String>,
) -> AppResult<Json<Vec<Bac2StudentResponse>>> {
    bac2_list(&state, Bac2StudentFilter::Diploma(diploma)).await
}

/// Bac+2 profiles with a diploma type from an institution
#[utoipa::path(
    get,
    path = "/api/bac2-students/diploma/{diploma}/institution/{institution}",
    tag = "Bac+2 students",
    params(
        ("diploma" = String, Path, description = "Diploma type"),
        ("institution" = String, Path, description = "Institution")
    ),
    responses((status = 200, description = "Matching profiles", body = Vec<Bac2StudentResponse>))
)]
pub async fn list_bac2_by_diploma_and_institution(
    State(state): State<AppState>,
    Path((diploma, institution)): Path<(String, String)>,
) -> AppResult<Json<Vec<Bac2StudentResponse>>> {
    bac2_list(
        &state,
        Bac2StudentFilter::DiplomaAndInstitution(diploma, institution),
    )
    .await
}

/// Bac+2 profiles in a major
#[utoipa::path(
    get,
    path = "/api/bac2-students/major/{major}",
    tag = "Bac+2 students",
    params(("major" = String, Path, description = "Major")),
    responses((status = 200, description = "Matching profiles", body = Vec<Bac2StudentResponse>))
)]
pub async fn list_bac2_by_major(
    State(state): State<AppState>,
    Path(major): Path<String>,
) -> AppResult<Json<Vec<Bac2StudentResponse>>> {
    bac2_list(&state, Bac2StudentFilter::Major(major)).await
}

/// Bac+2 profiles in a major with at least an overall average
#[utoipa::path(
    get,
    path = "/api/bac2-students/major/{major}/overall-min/{avg}",
    tag = "Bac+2 students",
    params(
        ("major" = String, Path, description = "Major"),
        ("avg" = f64, Path, description = "Minimum overall average")
    ),
    responses((status = 200, description = "Matching profiles", body = Vec<Bac2StudentResponse>))
)]
pub async fn list_bac2_by_major_and_overall(
    State(state): State<AppState>,
    Path((major, avg)): Path<(String, f64)>,
) -> AppResult<Json<Vec<Bac2StudentResponse>>> {
    Ok(Json(
        state
            .bac2_student_service
            .list_bac2_by_overall_min(avg, Some(major))
            .await?,
    ))
}

/// Bac+2 profiles from an institution
#[utoipa::path(
    get,
    path = "/api/bac2-students/institution/{institution}",
    tag = "Bac+2 students",
    params(("institution" = String, Path, description = "Institution")),
    responses((status = 200, description = "Matching profiles", body = Vec<Bac2StudentResponse>))
)]
pub async fn list_bac2_by_institution(
    State(state): State<AppState>,
    Path(institution): Path<String>,
) -> AppResult<Json<Vec<Bac2StudentResponse>>> {
    bac2_list(&state, Bac2StudentFilter::Institution(institution)).await
}

/// Bac+2 profiles with at least an overall average
#[utoipa::path(
    get,
    path = "/api/bac2-students/overall-min/{avg}",
    tag = "Bac+2 students",
    params(("avg" = f64, Path, description = "Minimum overall average")),
    responses((status = 200, description = "Matching profiles", body = Vec<Bac2StudentResponse>))
)]
pub async fn list_bac2_by_overall(
    State(state): State<AppState>,
    Path(avg): Path<f64>,
) -> AppResult<Json<Vec<Bac2StudentResponse>>> {
    Ok(Json(
        state
            .bac2_student_service
            .list_bac2_by_overall_min(avg, None)
            .await?,
    ))
}

/// Bac+2 profiles with at least a first-semester average
#[utoipa::path(
    get,
    path = "/api/bac2-students/avg-s1-min/{avg}",
    tag = "Bac+2 students",
    params(("avg" = f64, Path, description = "Minimum S1 average")),
    responses((status = 200, description = "Matching profiles", body = Vec<Bac2StudentResponse>))
)]
pub async fn list_bac2_by_avg_s1(
    State(state): State<AppState>,
    Path(avg): Path<f64>,
) -> AppResult<Json<Vec<Bac2StudentResponse>>> {
    bac2_list(&state, Bac2StudentFilter::AvgS1AtLeast(avg)).await
}

// Prepa

async fn prepa_list(
    state: &AppState,
    filter: PrepaStudentFilter,
) -> AppResult<Json<Vec<PrepaStudentResponse>>> {
    Ok(Json(state.prepa_student_service.list_prepa_students(filter).await?))
}

/// Create a prepa profile
#[utoipa::path(
    post,
    path = "/api/prepa-students",
    tag = "Prepa students",
    request_body = PrepaStudentRequest,
    responses(
        (status = 201, description = "Profile created", body = PrepaStudentResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "User already has a prepa profile")
    )
)]
pub async fn create_prepa_student(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PrepaStudentRequest>,
) -> AppResult<Created<PrepaStudentResponse>> {
    Ok(Created(
        state.prepa_student_service.create_prepa_student(payload).await?,
    ))
}

/// List every prepa profile
#[utoipa::path(
    get,
    path = "/api/prepa-students",
    tag = "Prepa students",
    responses((status = 200, description = "All prepa profiles", body = Vec<PrepaStudentResponse>))
)]
pub async fn list_prepa_students(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PrepaStudentResponse>>> {
    prepa_list(&state, PrepaStudentFilter::All).await
}

/// Get a prepa profile
#[utoipa::path(
    get,
    path = "/api/prepa-students/{user_id}",
    tag = "Prepa students",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Profile found", body = PrepaStudentResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_prepa_student(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<PrepaStudentResponse>> {
    Ok(Json(state.prepa_student_service.get_prepa_student(user_id).await?))
}

/// Replace a prepa profile
#[utoipa::path(
    put,
    path = "/api/prepa-students/{user_id}",
    tag = "Prepa students",
    params(("user_id" = i64, Path, description = "User id")),
    request_body = PrepaStudentRequest,
    responses(
        (status = 200, description = "Profile updated", body = PrepaStudentResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn update_prepa_student(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<PrepaStudentRequest>,
) -> AppResult<Json<PrepaStudentResponse>> {
    Ok(Json(
        state
            .prepa_student_service
            .update_prepa_student(user_id, payload)
            .await?,
    ))
}

/// Delete a prepa profile
#[utoipa::path(
    delete,
    path = "/api/prepa-students/{user_id}",
    tag = "Prepa students",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn delete_prepa_student(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<NoContent> {
    state.prepa_student_service.delete_prepa_student(user_id).await?;
    Ok(NoContent)
}

/// Prepa profiles in a track
#[utoipa::path(
    get,
    path = "/api/prepa-students/major/{major}",
    tag = "Prepa students",
    params(("major" = String, Path, description = "Prepa track, e.g. MP")),
    responses((status = 200, description = "Matching profiles", body = Vec<PrepaStudentResponse>))
)]
pub async fn list_prepa_by_major(
    State(state): State<AppState>,
    Path(major): Path<String>,
) -> AppResult<Json<Vec<PrepaStudentResponse>>> {
    prepa_list(&state, PrepaStudentFilter::Major(major)).await
}

/// Prepa profiles in a track with at least a CNC rating
#[utoipa::path(
    get,
    path = "/api/prepa-students/major/{major}/cnc-min/{rating}",
    tag = "Prepa students",
    params(
        ("major" = String, Path, description = "Prepa track"),
        ("rating" = f64, Path, description = "Minimum CNC rating")
    ),
    responses((status = 200, description = "Matching profiles", body = Vec<PrepaStudentResponse>))
)]
pub async fn list_prepa_by_major_and_cnc(
    State(state): State<AppState>,
    Path((major, rating)): Path<(String, f64)>,
) -> AppResult<Json<Vec<PrepaStudentResponse>>> {
    prepa_list(&state, PrepaStudentFilter::MajorAndCncAtLeast(major, rating)).await
}

/// Prepa profiles by bac year
#[utoipa::path(
    get,
    path = "/api/prepa-students/annee-bac/{annee}",
    tag = "Prepa students",
    params(("annee" = String, Path, description = "Bac year")),
    responses((status = 200, description = "Matching profiles", body = Vec<PrepaStudentResponse>))
)]
pub async fn list_prepa_by_annee_bac(
    State(state): State<AppState>,
    Path(annee): Path<String>,
) -> AppResult<Json<Vec<PrepaStudentResponse>>> {
    prepa_list(&state, PrepaStudentFilter::AnneeBac(annee)).await
}

/// Prepa profiles with at least a CNC rating
#[utoipa::path(
    get,
    path = "/api/prepa-students/cnc-min/{rating}",
    tag = "Prepa students",
    params(("rating" = f64, Path, description = "Minimum CNC rating")),
    responses((status = 200, description = "Matching profiles", body = Vec<PrepaStudentResponse>))
)]
pub async fn list_prepa_by_cnc(
    State(state): State<AppState>,
    Path(rating): Path<f64>,
) -> AppResult<Json<Vec<PrepaStudentResponse>>> {
    prepa_list(&state, PrepaStudentFilter::CncAtLeast(rating)).await
}

/// Prepa profiles with a CNC rating in an inclusive range
#[utoipa::path(
    get,
    path = "/api/prepa-students/cnc-range",
    tag = "Prepa students",
    params(CncRangeQuery),
    responses(
        (status = 200, description = "Matching profiles", body = Vec<PrepaStudentResponse>),
        (status = 400, description = "min_rating greater than max_rating")
    )
)]
pub async fn list_prepa_by_cnc_range(
    State(state): State<AppState>,
    Query(range): Query<CncRangeQuery>,
) -> AppResult<Json<Vec<PrepaStudentResponse>>> {
    if range.min_rating > range.max_rating {
        return Err(AppError::bad_request("min_rating must not exceed max_rating"));
    }
    prepa_list(
        &state,
        PrepaStudentFilter::CncBetween(range.min_rating, range.max_rating),
    )
    .await
}
