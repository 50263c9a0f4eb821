//! Hand-written service fakes for router tests.
//!
//! Every service slot defaults to `Unwired`, which fails loudly, so each
//! test only swaps in the fakes its routes need.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use orientation_api::api::{AppState, Probe};
use orientation_api::domain::{
    Bac2StudentRequest, Bac2StudentResponse, BacStudentRequest, BacStudentResponse,
    BasicInfoRequest, ChatRequest, ChatResponse, CritereRequest, CritereResponse, FiliereRequest,
    FiliereResponse, LoginRequest, PreferenceRequest, PreferenceResponse, PrepaStudentRequest,
    PrepaStudentResponse, RegisterRequest, StudyLevel, University, UniversityRequest, User,
    UserRequest, UserType, VerificationOutcome,
};
use orientation_api::errors::{AppError, AppResult};
use orientation_api::infra::{
    Bac2StudentFilter, BacStudentFilter, CacheStore, CritereFilter, FiliereFilter,
    PreferenceFilter, PrepaStudentFilter, UniversityFilter, UserFilter,
};
use orientation_api::services::{
    AuthResponse, AuthService, Bac2StudentService, BacStudentService, ChatService, Claims,
    CritereService, FiliereService, PreferenceService, PrepaStudentService, UniversityService,
    UserService,
};

pub const VALID_TOKEN: &str = "valid-token";

fn unwired<T>() -> AppResult<T> {
    Err(AppError::internal("service not wired in this test"))
}

// =============================================================================
// Unwired services
// =============================================================================

pub struct Unwired;

#[async_trait]
impl AuthService for Unwired {
    async fn register(&self, _req: RegisterRequest, _base_url: &str) -> AppResult<AuthResponse> {
        unwired()
    }
    async fn login(&self, _req: LoginRequest) -> AppResult<AuthResponse> {
        unwired()
    }
    async fn refresh(&self, _refresh_token: &str) -> AppResult<AuthResponse> {
        unwired()
    }
    async fn verify_email(&self, _token: &str) -> AppResult<VerificationOutcome> {
        unwired()
    }
    fn verify_token(&self, _token: &str) -> AppResult<Claims> {
        Err(AppError::Unauthorized)
    }
    async fn cleanup_expired_tokens(&self) -> AppResult<u64> {
        unwired()
    }
}

#[async_trait]
impl UserService for Unwired {
    async fn create_user(&self, _req: UserRequest) -> AppResult<User> {
        unwired()
    }
    async fn get_user(&self, _id: i64) -> AppResult<User> {
        unwired()
    }
    async fn get_user_by_email(&self, _email: &str) -> AppResult<User> {
        unwired()
    }
    async fn get_user_by_username(&self, _username: &str) -> AppResult<User> {
        unwired()
    }
    async fn list_users(&self, _filter: UserFilter) -> AppResult<Vec<User>> {
        unwired()
    }
    async fn update_user(&self, _id: i64, _req: UserRequest) -> AppResult<User> {
        unwired()
    }
    async fn update_basic_info(&self, _id: i64, _req: BasicInfoRequest) -> AppResult<User> {
        unwired()
    }
    async fn set_enabled(&self, _id: i64, _enabled: bool) -> AppResult<User> {
        unwired()
    }
    async fn delete_user(&self, _id: i64) -> AppResult<()> {
        unwired()
    }
    async fn email_exists(&self, _email: &str) -> AppResult<bool> {
        unwired()
    }
}

#[async_trait]
impl UniversityService for Unwired {
    async fn create_university(&self, _req: UniversityRequest) -> AppResult<University> {
        unwired()
    }
    async fn get_university(&self, _id: i64) -> AppResult<University> {
        unwired()
    }
    async fn get_university_by_slug(&self, _slug: &str) -> AppResult<University> {
        unwired()
    }
    async fn list_universities(&self, _filter: UniversityFilter) -> AppResult<Vec<University>> {
        unwired()
    }
    async fn update_university(&self, _id: i64, _req: UniversityRequest) -> AppResult<University> {
        unwired()
    }
    async fn delete_university(&self, _id: i64) -> AppResult<()> {
        unwired()
    }
    async fn exists_by_name(&self, _name: &str) -> AppResult<bool> {
        unwired()
    }
    async fn upload_image(
        &self,
        _id: i64,
        _file_name: Option<String>,
        _data: Vec<u8>,
    ) -> AppResult<University> {
        unwired()
    }
}

#[async_trait]
impl FiliereService for Unwired {
    async fn create_filiere(&self, _req: FiliereRequest) -> AppResult<FiliereResponse> {
        unwired()
    }
    async fn get_filiere(&self, _id: i64) -> AppResult<FiliereResponse> {
        unwired()
    }
    async fn list_filieres(&self, _filter: FiliereFilter) -> AppResult<Vec<FiliereResponse>> {
        unwired()
    }
    async fn update_filiere(&self, _id: i64, _req: FiliereRequest) -> AppResult<FiliereResponse> {
        unwired()
    }
    async fn delete_filiere(&self, _id: i64) -> AppResult<()> {
        unwired()
    }
}

#[async_trait]
impl CritereService for Unwired {
    async fn create_critere(&self, _req: CritereRequest) -> AppResult<CritereResponse> {
        unwired()
    }
    async fn get_critere(&self, _filiere_id: i64) -> AppResult<CritereResponse> {
        unwired()
    }
    async fn list_criteres(&self, _filter: CritereFilter) -> AppResult<Vec<CritereResponse>> {
        unwired()
    }
    async fn update_critere(&self, _filiere_id: i64, _req: CritereRequest) -> AppResult<CritereResponse> {
        unwired()
    }
    async fn delete_critere(&self, _filiere_id: i64) -> AppResult<()> {
        unwired()
    }
    async fn critere_exists(&self, _filiere_id: i64) -> AppResult<bool> {
        unwired()
    }
}

#[async_trait]
impl PreferenceService for Unwired {
    async fn create_preference(&self, _req: PreferenceRequest) -> AppResult<PreferenceResponse> {
        unwired()
    }
    async fn get_preference(&self, _id: i64) -> AppResult<PreferenceResponse> {
        unwired()
    }
    async fn get_preference_by_user(&self, _user_id: i64) -> AppResult<PreferenceResponse> {
        unwired()
    }
    async fn list_preferences(&self, _filter: PreferenceFilter) -> AppResult<Vec<PreferenceResponse>> {
        unwired()
    }
    async fn update_preference(&self, _id: i64, _req: PreferenceRequest) -> AppResult<PreferenceResponse> {
        unwired()
    }
    async fn delete_preference(&self, _id: i64) -> AppResult<()> {
        unwired()
    }
    async fn delete_preference_by_user(&self, _user_id: i64) -> AppResult<()> {
        unwired()
    }
    async fn preference_exists_for_user(&self, _user_id: i64) -> AppResult<bool> {
        unwired()
    }
}

#[async_trait]
impl BacStudentService for Unwired {
    async fn create_bac_student(&self, _req: BacStudentRequest) -> AppResult<BacStudentResponse> {
        unwired()
    }
    async fn get_bac_student(&self, _user_id: i64) -> AppResult<BacStudentResponse> {
        unwired()
    }
    async fn list_bac_students(&self, _filter: BacStudentFilter) -> AppResult<Vec<BacStudentResponse>> {
        unwired()
    }
    async fn update_bac_student(&self, _user_id: i64, _req: BacStudentRequest) -> AppResult<BacStudentResponse> {
        unwired()
    }
    async fn delete_bac_student(&self, _user_id: i64) -> AppResult<()> {
        unwired()
    }
}

#[async_trait]
impl Bac2StudentService for Unwired {
    async fn create_bac2_student(&self, _req: Bac2StudentRequest) -> AppResult<Bac2StudentResponse> {
        unwired()
    }
    async fn get_bac2_student(&self, _user_id: i64) -> AppResult<Bac2StudentResponse> {
        unwired()
    }
    async fn list_bac2_students(&self, _filter: Bac2StudentFilter) -> AppResult<Vec<Bac2StudentResponse>> {
        unwired()
    }
    async fn list_bac2_by_overall_min(
        &self,
        _min: f64,
        _major: Option<String>,
    ) -> AppResult<Vec<Bac2StudentResponse>> {
        unwired()
    }
    async fn update_bac2_student(&self, _user_id: i64, _req: Bac2StudentRequest) -> AppResult<Bac2StudentResponse> {
        unwired()
    }
    async fn delete_bac2_student(&self, _user_id: i64) -> AppResult<()> {
        unwired()
    }
}

#[async_trait]
impl PrepaStudentService for Unwired {
    async fn create_prepa_student(&self, _req: PrepaStudentRequest) -> AppResult<PrepaStudentResponse> {
        unwired()
    }
    async fn get_prepa_student(&self, _user_id: i64) -> AppResult<PrepaStudentResponse> {
        unwired()
    }
    async fn list_prepa_students(&self, _filter: PrepaStudentFilter) -> AppResult<Vec<PrepaStudentResponse>> {
        unwired()
    }
    async fn update_prepa_student(&self, _user_id: i64, _req: PrepaStudentRequest) -> AppResult<PrepaStudentResponse> {
        unwired()
    }
    async fn delete_prepa_student(&self, _user_id: i64) -> AppResult<()> {
        unwired()
    }
}

#[async_trait]
impl ChatService for Unwired {
    async fn chat(&self, _req: ChatRequest) -> ChatResponse {
        ChatResponse::new("unwired")
    }
}

// =============================================================================
// Fakes
// =============================================================================

pub fn user(id: i64) -> User {
    User {
        id,
        email: "salma.bennani@example.ma".to_string(),
        username: "salma.bennani".to_string(),
        first_name: "Salma".to_string(),
        last_name: "Bennani".to_string(),
        password_hash: "hashed".to_string(),
        age: Some(18),
        study_level: Some(StudyLevel::Bac),
        user_type: UserType::Student,
        enabled: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn university(id: i64, name: &str) -> University {
    University {
        id_university: id,
        name: name.to_string(),
        location: Some("Rabat".to_string()),
        kind: Some("Grande École Publique".to_string()),
        description: None,
        website: None,
        contact_email: None,
        phone: None,
        accreditation_status: None,
        programs: None,
        image_url: None,
        slug: None,
        header_image_url: None,
        earth_view_url: None,
        gallery_images: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Auth fake: accepts `VALID_TOKEN`, verifies token `good`, records the
/// base URL handed to `register`.
#[derive(Default)]
pub struct FakeAuth {
    pub base_urls: Mutex<Vec<String>>,
}

fn auth_response(email: &str, message: &str) -> AuthResponse {
    AuthResponse {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        email: email.to_string(),
        name: "Salma Bennani".to_string(),
        message: message.to_string(),
    }
}

#[async_trait]
impl AuthService for FakeAuth {
    async fn register(&self, req: RegisterRequest, base_url: &str) -> AppResult<AuthResponse> {
        if let Ok(mut urls) = self.base_urls.lock() {
            urls.push(base_url.to_string());
        }
        Ok(auth_response(
            &req.email,
            "Registration successful. Please check your email to verify your account.",
        ))
    }

    async fn login(&self, req: LoginRequest) -> AppResult<AuthResponse> {
        if req.email.starts_with("pending") {
            return Err(AppError::EmailNotVerified);
        }
        Ok(auth_response(&req.email, "Login successful"))
    }

    async fn refresh(&self, _refresh_token: &str) -> AppResult<AuthResponse> {
        Err(AppError::InvalidToken("Invalid refresh token".to_string()))
    }

    async fn verify_email(&self, token: &str) -> AppResult<VerificationOutcome> {
        Ok(match token {
            "good" => VerificationOutcome::Verified,
            "old" => VerificationOutcome::Expired,
            "used" => VerificationOutcome::AlreadyVerified,
            _ => VerificationOutcome::Unknown,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token != VALID_TOKEN {
            return Err(AppError::Unauthorized);
        }
        Ok(Claims {
            sub: 1,
            email: "salma.bennani@example.ma".to_string(),
            role: "STUDENT".to_string(),
            kind: "access".to_string(),
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        })
    }

    async fn cleanup_expired_tokens(&self) -> AppResult<u64> {
        Ok(0)
    }
}

/// Only user 1 exists
pub struct FakeUsers;

#[async_trait]
impl UserService for FakeUsers {
    async fn create_user(&self, _req: UserRequest) -> AppResult<User> {
        unwired()
    }
    async fn get_user(&self, id: i64) -> AppResult<User> {
        if id == 1 {
            Ok(user(1))
        } else {
            Err(AppError::not_found("User", id))
        }
    }
    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        Err(AppError::NotFound(format!("User not found with email: {}", email)))
    }
    async fn get_user_by_username(&self, _username: &str) -> AppResult<User> {
        unwired()
    }
    async fn list_users(&self, filter: UserFilter) -> AppResult<Vec<User>> {
        match filter {
            UserFilter::StudyLevel(StudyLevel::Bac) | UserFilter::All => Ok(vec![user(1)]),
            _ => Ok(vec![]),
        }
    }
    async fn update_user(&self, _id: i64, _req: UserRequest) -> AppResult<User> {
        unwired()
    }
    async fn update_basic_info(&self, _id: i64, _req: BasicInfoRequest) -> AppResult<User> {
        unwired()
    }
    async fn set_enabled(&self, id: i64, enabled: bool) -> AppResult<User> {
        let mut user = self.get_user(id).await?;
        user.enabled = enabled;
        Ok(user)
    }
    async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.get_user(id).await.map(|_| ())
    }
    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(email == "salma.bennani@example.ma")
    }
}

/// "EMI" (id 1) is the only university; uploads are recorded
#[derive(Default)]
pub struct FakeUniversities {
    pub uploads: Mutex<Vec<(i64, Option<String>, usize)>>,
}

#[async_trait]
impl UniversityService for FakeUniversities {
    async fn create_university(&self, req: UniversityRequest) -> AppResult<University> {
        if req.name == "EMI" {
            return Err(AppError::conflict("University with name EMI already exists"));
        }
        Ok(university(2, &req.name))
    }
    async fn get_university(&self, id: i64) -> AppResult<University> {
        if id == 1 {
            Ok(university(1, "EMI"))
        } else {
            Err(AppError::not_found("University", id))
        }
    }
    async fn get_university_by_slug(&self, slug: &str) -> AppResult<University> {
        Err(AppError::NotFound(format!("University not found with slug: {}", slug)))
    }
    async fn list_universities(&self, filter: UniversityFilter) -> AppResult<Vec<University>> {
        match filter {
            UniversityFilter::NameContains(name) if "emi".contains(&name.to_lowercase()) => {
                Ok(vec![university(1, "EMI")])
            }
            _ => Ok(vec![]),
        }
    }
    async fn update_university(&self, _id: i64, _req: UniversityRequest) -> AppResult<University> {
        unwired()
    }
    async fn delete_university(&self, id: i64) -> AppResult<()> {
        self.get_university(id).await.map(|_| ())
    }
    async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        Ok(name == "EMI")
    }
    async fn upload_image(
        &self,
        id: i64,
        file_name: Option<String>,
        data: Vec<u8>,
    ) -> AppResult<University> {
        let mut university = self.get_university(id).await?;
        if let Ok(mut uploads) = self.uploads.lock() {
            uploads.push((id, file_name, data.len()));
        }
        university.image_url = Some(format!(
            "http://localhost:8080/uploads/universities/{}/image.png",
            id
        ));
        Ok(university)
    }
}

/// Echoes the message and the selected provider flag
pub struct EchoChat;

#[async_trait]
impl ChatService for EchoChat {
    async fn chat(&self, req: ChatRequest) -> ChatResponse {
        ChatResponse::new(format!(
            "[{}] {}",
            req.provider.unwrap_or_else(|| "groq".to_string()),
            req.message
        ))
    }
}

/// Rate limiter that always answers with the configured verdict
pub struct FixedRateLimit {
    pub allowed: bool,
}

#[async_trait]
impl CacheStore for FixedRateLimit {
    async fn get_string(&self, _key: &str) -> AppResult<Option<String>> {
        Ok(None)
    }
    async fn set_string_with_ttl(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> AppResult<()> {
        Ok(())
    }
    async fn delete(&self, _key: &str) -> AppResult<()> {
        Ok(())
    }
    async fn exists(&self, _key: &str) -> AppResult<bool> {
        Ok(false)
    }
    async fn check_rate_limit(
        &self,
        _identifier: &str,
        max_requests: u64,
        _window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        if self.allowed {
            Ok((1, true))
        } else {
            Ok((max_requests + 1, false))
        }
    }
}

pub struct FixedProbe(pub Result<(), &'static str>);

#[async_trait]
impl Probe for FixedProbe {
    async fn ping(&self) -> AppResult<()> {
        self.0.map_err(|e| AppError::internal(e))
    }
}

// =============================================================================
// State builder
// =============================================================================

pub struct TestState {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UserService>,
    pub universities: Arc<dyn UniversityService>,
    pub chat: Arc<dyn ChatService>,
    pub cache: Arc<dyn CacheStore>,
    pub database_probe: Arc<dyn Probe>,
    pub cache_probe: Arc<dyn Probe>,
    pub upload_dir: PathBuf,
}

impl Default for TestState {
    fn default() -> Self {
        Self {
            auth: Arc::new(Unwired),
            users: Arc::new(Unwired),
            universities: Arc::new(Unwired),
            chat: Arc::new(Unwired),
            cache: Arc::new(FixedRateLimit { allowed: true }),
            database_probe: Arc::new(FixedProbe(Ok(()))),
            cache_probe: Arc::new(FixedProbe(Ok(()))),
            upload_dir: std::env::temp_dir(),
        }
    }
}

impl TestState {
    pub fn build(self) -> AppState {
        let unwired = Arc::new(Unwired);
        AppState {
            auth_service: self.auth,
            user_service: self.users,
            university_service: self.universities,
            filiere_service: unwired.clone(),
            critere_service: unwired.clone(),
            preference_service: unwired.clone(),
            bac_student_service: unwired.clone(),
            bac2_student_service: unwired.clone(),
            prepa_student_service: unwired,
            chat_service: self.chat,
            cache: self.cache,
            database_probe: self.database_probe,
            cache_probe: self.cache_probe,
            base_url: "http://localhost:8080".to_string(),
            upload_dir: self.upload_dir,
        }
    }
}
