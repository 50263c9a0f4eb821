//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{USER_TYPE_ADMIN, USER_TYPE_STUDENT};

/// Account type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserType {
    Student,
    Admin,
}

impl UserType {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserType::Admin)
    }
}

impl From<&str> for UserType {
    fn from(s: &str) -> Self {
        match s {
            USER_TYPE_ADMIN => UserType::Admin,
            _ => UserType::Student,
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Admin => write!(f, "{}", USER_TYPE_ADMIN),
            UserType::Student => write!(f, "{}", USER_TYPE_STUDENT),
        }
    }
}

/// Where the user currently is in their studies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudyLevel {
    Bac,
    Bac2,
    Prepa,
    Licence,
    Master,
}

impl StudyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyLevel::Bac => "BAC",
            StudyLevel::Bac2 => "BAC2",
            StudyLevel::Prepa => "PREPA",
            StudyLevel::Licence => "LICENCE",
            StudyLevel::Master => "MASTER",
        }
    }
}

impl std::str::FromStr for StudyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BAC" => Ok(StudyLevel::Bac),
            "BAC2" => Ok(StudyLevel::Bac2),
            "PREPA" => Ok(StudyLevel::Prepa),
            "LICENCE" => Ok(StudyLevel::Licence),
            "MASTER" => Ok(StudyLevel::Master),
            other => Err(format!("Unknown study level: {}", other)),
        }
    }
}

impl std::fmt::Display for StudyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub age: Option<i32>,
    pub study_level: Option<StudyLevel>,
    pub user_type: UserType,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Fields needed to insert a user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub age: Option<i32>,
    pub study_level: Option<StudyLevel>,
    pub user_type: UserType,
    pub enabled: bool,
}

/// Full replacement of a user's editable fields
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<String>,
    pub age: Option<Option<i32>>,
    pub study_level: Option<Option<StudyLevel>>,
    pub enabled: Option<bool>,
}

/// Build the base username from first and last name: `first.last`, lowercased,
/// whitespace removed.
pub fn base_username(first_name: &str, last_name: &str) -> String {
    let clean = |s: &str| -> String {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    };
    let (first, last) = (clean(first_name), clean(last_name));
    match (first.is_empty(), last.is_empty()) {
        (false, false) => format!("{}.{}", first, last),
        (false, true) => first,
        (true, false) => last,
        (true, true) => "user".to_string(),
    }
}

/// User creation / replacement request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[validate(email(message = "Email should be valid"))]
    #[schema(example = "amine.alaoui@example.ma")]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    #[schema(example = "Amine")]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    #[schema(example = "Alaoui")]
    pub last_name: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret123", min_length = 6)]
    pub password: String,
    #[validate(range(min = 10, max = 120, message = "Age must be between 10 and 120"))]
    pub age: Option<i32>,
    pub current_study_level: Option<StudyLevel>,
}

/// Partial update of the profile basics
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BasicInfoRequest {
    #[validate(length(min = 1, max = 100, message = "First name must not be blank"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Last name must not be blank"))]
    pub last_name: Option<String>,
    #[validate(range(min = 10, max = 120, message = "Age must be between 10 and 120"))]
    pub age: Option<i32>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id_user: i64,
    #[schema(example = "amine.alaoui@example.ma")]
    pub email: String,
    #[schema(example = "amine.alaoui")]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "STUDENT")]
    pub user_type: String,
    pub age: Option<i32>,
    pub current_study_level: Option<StudyLevel>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id_user: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            user_type: user.user_type.to_string(),
            age: user.age,
            current_study_level: user.study_level,
            enabled: user.enabled,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
