//! Domain layer - Core business entities and logic
//!
//! Entities, request/response DTOs and value objects for the orientation
//! platform. Nothing here touches the database or the network.

pub mod auth;
pub mod chat;
pub mod critere;
pub mod filiere;
pub mod password;
pub mod preference;
pub mod student;
pub mod university;
pub mod user;
pub mod verification;

pub use auth::{LoginRequest, RefreshTokenRequest, RegisterRequest};
pub use chat::{ChatRequest, ChatResponse, HistoryItem, ProviderKind};
pub use critere::{Critere, CritereRequest, CritereResponse};
pub use filiere::{Filiere, FiliereRequest, FiliereResponse};
pub use password::{hash_password, verify_password};
pub use preference::{Preference, PreferenceRequest, PreferenceResponse};
pub use student::{
    Bac2Student, Bac2StudentRequest, Bac2StudentResponse, BacStudent, BacStudentRequest,
    BacStudentResponse, PrepaStudent, PrepaStudentRequest, PrepaStudentResponse, StudentTrack,
};
pub use university::{University, UniversityRequest};
pub use user::{
    base_username, BasicInfoRequest, NewUser, StudyLevel, User, UserChanges, UserRequest,
    UserResponse, UserType,
};
pub use verification::{EmailVerificationToken, VerificationOutcome};
