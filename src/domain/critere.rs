//! Critère d'admission domain types. A critère is keyed by its filière, so a
//! filière has at most one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq)]
pub struct Critere {
    pub filiere_id: i64,
    pub annee_academique: String,
    pub type_candidat: String,
    pub serie_bac_cible: Option<String>,
    pub seuil_calcul: Option<f64>,
    pub note_concours_ecrit: Option<f64>,
    pub a_entretien: bool,
    pub age_max: Option<i32>,
    pub seuil_matieres_specifiques: Option<String>,
    pub score_prepa: Option<f64>,
    pub classement_cnc: Option<i32>,
    pub diplomes_requis: Option<String>,
    pub notes_semestres: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable critère fields
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CritereRequest {
    #[schema(example = 1)]
    pub filiere_id: i64,
    #[validate(length(min = 1, max = 20, message = "Annee academique is required and must not exceed 20 characters"))]
    #[schema(example = "2025-2026")]
    pub annee_academique: String,
    #[validate(length(min = 1, max = 100, message = "Type candidat is required and must not exceed 100 characters"))]
    #[schema(example = "Lauréat CPGE")]
    pub type_candidat: String,
    #[validate(length(max = 100, message = "Serie bac cible must not exceed 100 characters"))]
    pub serie_bac_cible: Option<String>,
    #[validate(range(min = 0.0, max = 20.0, message = "Seuil must be between 0 and 20"))]
    pub seuil_calcul: Option<f64>,
    #[validate(range(min = 0.0, max = 20.0, message = "Note concours must be between 0 and 20"))]
    pub note_concours_ecrit: Option<f64>,
    #[serde(default)]
    pub a_entretien: bool,
    #[validate(range(min = 1, message = "Age max must be positive"))]
    pub age_max: Option<i32>,
    pub seuil_matieres_specifiques: Option<String>,
    pub score_prepa: Option<f64>,
    #[validate(range(min = 1, message = "Classement CNC must be positive"))]
    pub classement_cnc: Option<i32>,
    pub diplomes_requis: Option<String>,
    pub notes_semestres: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CritereResponse {
    pub filiere_id: i64,
    pub filiere_name: Option<String>,
    pub annee_academique: String,
    pub type_candidat: String,
    pub serie_bac_cible: Option<String>,
    pub seuil_calcul: Option<f64>,
    pub note_concours_ecrit: Option<f64>,
    pub a_entretien: bool,
    pub age_max: Option<i32>,
    pub seuil_matieres_specifiques: Option<String>,
    pub score_prepa: Option<f64>,
    pub classement_cnc: Option<i32>,
    pub diplomes_requis: Option<String>,
    pub notes_semestres: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CritereResponse {
    pub fn new(critere: Critere, filiere_name: Option<String>) -> Self {
        Self {
            filiere_id: critere.filiere_id,
            filiere_name,
            annee_academique: critere.annee_academique,
            type_candidat: critere.type_candidat,
            serie_bac_cible: critere.serie_bac_cible,
            seuil_calcul: critere.seuil_calcul,
            note_concours_ecrit: critere.note_concours_ecrit,
            a_entretien: critere.a_entretien,
            age_max: critere.age_max,
            seuil_matieres_specifiques: critere.seuil_matieres_specifiques,
            score_prepa: critere.score_prepa,
            classement_cnc: critere.classement_cnc,
            diplomes_requis: critere.diplomes_requis,
            notes_semestres: critere.notes_semestres,
            created_at: critere.created_at,
            updated_at: critere.updated_at,
        }
    }
}
