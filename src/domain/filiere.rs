//! Filière (academic program) domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::critere::CritereResponse;

/// Program offered by a university
#[derive(Debug, Clone, PartialEq)]
pub struct Filiere {
    pub id: i64,
    pub name: String,
    pub university_id: i64,
    pub critere_admission: Option<String>,
    pub duration_years: Option<i32>,
    pub tuition_fee: Option<f64>,
    pub admission_type: Option<String>,
    pub language: Option<String>,
    pub seats_available: Option<i32>,
    pub application_deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable filière fields
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct FiliereRequest {
    #[validate(length(min = 1, max = 255, message = "Filiere name is required and must not exceed 255 characters"))]
    #[schema(example = "Génie Informatique")]
    pub name: String,
    #[schema(example = 1)]
    pub university_id: i64,
    #[validate(length(max = 500, message = "Critere d'admission must not exceed 500 characters"))]
    pub critere_admission: Option<String>,
    #[validate(range(min = 1, message = "Duration must be positive"))]
    #[schema(example = 3)]
    pub duration_years: Option<i32>,
    #[validate(range(min = 0.0, message = "Tuition fee must not be negative"))]
    pub tuition_fee: Option<f64>,
    #[validate(length(max = 100, message = "Admission type must not exceed 100 characters"))]
    #[schema(example = "CNC")]
    pub admission_type: Option<String>,
    #[validate(length(max = 50, message = "Language must not exceed 50 characters"))]
    #[schema(example = "Français")]
    pub language: Option<String>,
    #[validate(range(min = 1, message = "Seats available must be positive"))]
    pub seats_available: Option<i32>,
    #[schema(value_type = Option<String>, format = Date, example = "2026-06-15")]
    pub application_deadline: Option<NaiveDate>,
}

/// Filière with its university name and admission criteria
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FiliereResponse {
    pub id_filiere: i64,
    pub name: String,
    pub university_id: i64,
    pub university_name: Option<String>,
    pub critere_admission: Option<String>,
    pub duration_years: Option<i32>,
    pub tuition_fee: Option<f64>,
    pub admission_type: Option<String>,
    pub language: Option<String>,
    pub seats_available: Option<i32>,
    #[schema(value_type = Option<String>, format = Date)]
    pub application_deadline: Option<NaiveDate>,
    pub critere: Option<CritereResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FiliereResponse {
    pub fn new(
        filiere: Filiere,
        university_name: Option<String>,
        critere: Option<CritereResponse>,
    ) -> Self {
        Self {
            id_filiere: filiere.id,
            name: filiere.name,
            university_id: filiere.university_id,
            university_name,
            critere_admission: filiere.critere_admission,
            duration_years: filiere.duration_years,
            tuition_fee: filiere.tuition_fee,
            admission_type: filiere.admission_type,
            language: filiere.language,
            seats_available: filiere.seats_available,
            application_deadline: filiere.application_deadline,
            critere,
            created_at: filiere.created_at,
            updated_at: filiere.updated_at,
        }
    }
}
