//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, chat_handler, critere_handler, filiere_handler, preference_handler,
    student_handler, university_handler, user_handler,
};
use crate::domain::{
    Bac2StudentRequest, Bac2StudentResponse, BacStudentRequest, BacStudentResponse,
    BasicInfoRequest, ChatRequest, ChatResponse, CritereRequest, CritereResponse, FiliereRequest,
    FiliereResponse, HistoryItem, LoginRequest, PreferenceRequest, PreferenceResponse,
    PrepaStudentRequest, PrepaStudentResponse, RefreshTokenRequest, RegisterRequest, StudyLevel,
    University, UniversityRequest, UserRequest, UserResponse, UserType,
};
use crate::services::AuthResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the orientation API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Orientation API",
        version = "0.1.0",
        description = "Catalog of Moroccan higher-education programs, student profiles and an orientation advisor chat"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::refresh,
        auth_handler::verify_email,
        auth_handler::test,
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::update_basic_info,
        user_handler::enable_user,
        user_handler::disable_user,
        user_handler::delete_user,
        user_handler::get_user_by_email,
        user_handler::get_user_by_username,
        user_handler::list_by_enabled,
        user_handler::list_by_age,
        user_handler::list_by_study_level,
        user_handler::email_exists,
        university_handler::create_university,
        university_handler::list_universities,
        university_handler::get_university,
        university_handler::update_university,
        university_handler::delete_university,
        university_handler::upload_image,
        university_handler::list_by_location,
        university_handler::list_by_type,
        university_handler::list_by_accreditation,
        university_handler::get_by_slug,
        university_handler::search_by_name,
        university_handler::exists_by_name,
        filiere_handler::create_filiere,
        filiere_handler::list_filieres,
        filiere_handler::get_filiere,
        filiere_handler::update_filiere,
        filiere_handler::delete_filiere,
        filiere_handler::list_by_university,
        filiere_handler::list_by_university_and_admission_type,
        filiere_handler::list_by_admission_type,
        filiere_handler::list_by_language,
        filiere_handler::list_by_deadline,
        filiere_handler::list_available,
        critere_handler::create_critere,
        critere_handler::list_criteres,
        critere_handler::get_critere,
        critere_handler::update_critere,
        critere_handler::delete_critere,
        critere_handler::list_by_annee,
        critere_handler::list_by_type_candidat,
        critere_handler::list_by_serie_bac,
        critere_handler::list_by_seuil_min,
        critere_handler::list_with_entretien,
        critere_handler::list_by_age_max,
        critere_handler::critere_exists,
        preference_handler::create_preference,
        preference_handler::list_preferences,
        preference_handler::get_preference,
        preference_handler::update_preference,
        preference_handler::delete_preference,
        preference_handler::get_by_user,
        preference_handler::delete_by_user,
        preference_handler::exists_for_user,
        preference_handler::list_by_budget,
        preference_handler::list_by_city,
        preference_handler::list_by_interest,
        preference_handler::list_by_language,
        student_handler::create_bac_student,
        student_handler::list_bac_students,
        student_handler::get_bac_student,
        student_handler::update_bac_student,
        student_handler::delete_bac_student,
        student_handler::list_bac_by_major,
        student_handler::list_bac_by_major_and_grade,
        student_handler::list_bac_by_degree,
        student_handler::list_bac_by_year,
        student_handler::list_bac_by_grade,
        student_handler::create_bac2_student,
        student_handler::list_bac2_students,
        student_handler::get_bac2_student,
        student_handler::update_bac2_student,
        student_handler::delete_bac2_student,
        student_handler::list_bac2_by_diploma,
        student_handler::list_bac2_by_diploma_and_institution,
        student_handler::list_bac2_by_major,
        student_handler::list_bac2_by_major_and_overall,
        student_handler::list_bac2_by_institution,
        student_handler::list_bac2_by_overall,
        student_handler::list_bac2_by_avg_s1,
        student_handler::create_prepa_student,
        student_handler::list_prepa_students,
        student_handler::get_prepa_student,
        student_handler::update_prepa_student,
        student_handler::delete_prepa_student,
        student_handler::list_prepa_by_major,
        student_handler::list_prepa_by_major_and_cnc,
        student_handler::list_prepa_by_annee_bac,
        student_handler::list_prepa_by_cnc,
        student_handler::list_prepa_by_cnc_range,
        chat_handler::chat,
    ),
    components(
        schemas(
            // Auth
            RegisterRequest,
            LoginRequest,
            RefreshTokenRequest,
            AuthResponse,
            MessageResponse,
            // Users
            UserType,
            StudyLevel,
            UserRequest,
            BasicInfoRequest,
            UserResponse,
            // Catalog
            University,
            UniversityRequest,
            university_handler::ImageUpload,
            FiliereRequest,
            FiliereResponse,
            CritereRequest,
            CritereResponse,
            // Profiles
            PreferenceRequest,
            PreferenceResponse,
            BacStudentRequest,
            BacStudentResponse,
            Bac2StudentRequest,
            Bac2StudentResponse,
            PrepaStudentRequest,
            PrepaStudentResponse,
            // Chat
            ChatRequest,
            ChatResponse,
            HistoryItem,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and email verification"),
        (name = "Users", description = "User management operations"),
        (name = "Universities", description = "Institutions and their images"),
        (name = "Filieres", description = "Study programs"),
        (name = "Criteres", description = "Admission criteria per program"),
        (name = "Preferences", description = "Orientation preferences"),
        (name = "Bac students", description = "Bac track profiles"),
        (name = "Bac+2 students", description = "Bac+2 track profiles"),
        (name = "Prepa students", description = "Preparatory class profiles"),
        (name = "Chat", description = "Orientation advisor")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/register",
            "/api/users/{id}",
            "/api/universities/{id}/image",
            "/api/filieres/deadline-after",
            "/api/criteres/exists/{filiere_id}",
            "/api/preferences/user/{user_id}",
            "/api/bac2-students/major/{major}/overall-min/{avg}",
            "/api/prepa-students/cnc-range",
            "/api/chat",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
