//! User orientation preferences (one record per user).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq)]
pub struct Preference {
    pub id: i64,
    pub user_id: i64,
    pub desired_cities: Option<String>,
    pub budget_range: Option<String>,
    pub interests: Option<String>,
    pub career_goals: Option<String>,
    pub language_preferences: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PreferenceRequest {
    #[schema(example = 1)]
    pub user_id: i64,
    #[schema(example = "Rabat, Casablanca")]
    pub desired_cities: Option<String>,
    #[validate(length(max = 100, message = "Budget range must not exceed 100 characters"))]
    #[schema(example = "0-20000 MAD")]
    pub budget_range: Option<String>,
    pub interests: Option<String>,
    pub career_goals: Option<String>,
    #[validate(length(max = 255, message = "Language preferences must not exceed 255 characters"))]
    pub language_preferences: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PreferenceResponse {
    pub id_preference: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub user_email: Option<String>,
    pub desired_cities: Option<String>,
    pub budget_range: Option<String>,
    pub interests: Option<String>,
    pub career_goals: Option<String>,
    pub language_preferences: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PreferenceResponse {
    pub fn new(preference: Preference, username: Option<String>, user_email: Option<String>) -> Self {
        Self {
            id_preference: preference.id,
            user_id: preference.user_id,
            username,
            user_email,
            desired_cities: preference.desired_cities,
            budget_range: preference.budget_range,
            interests: preference.interests,
            career_goals: preference.career_goals,
            language_preferences: preference.language_preferences,
            created_at: preference.created_at,
            updated_at: preference.updated_at,
        }
    }
}
