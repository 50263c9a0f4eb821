//! Authentication request payloads.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::StudyLevel;

/// Self-registration; the account stays disabled until the emailed link is followed.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "First name is required"))]
    #[schema(example = "Salma")]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name is required"))]
    #[schema(example = "Bennani")]
    pub last_name: String,
    #[validate(email(message = "Email should be valid"))]
    #[schema(example = "salma.bennani@example.ma")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret123", min_length = 6)]
    pub password: String,
    pub current_study_level: StudyLevel,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email should be valid"))]
    #[schema(example = "salma.bennani@example.ma")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}
