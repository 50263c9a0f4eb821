//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod auth_service;
mod chat_service;
pub mod container;
mod critere_service;
mod filiere_service;
mod preference_service;
pub mod seed_catalog;
mod seed_service;
mod student_service;
mod university_service;
mod user_service;

// Service Container
pub use container::{Adapters, ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{
    verification_outcome, verify_url, AuthResponse, AuthService, Authenticator, Claims,
};
pub use chat_service::{
    error_reply, format_wait, is_per_minute_limit, quota_message, system_prompt,
    time_until_morocco_midnight, ChatManager, ChatService, SYSTEM_PROMPT,
};
pub use critere_service::{CritereManager, CritereService};
pub use filiere_service::{FiliereManager, FiliereService};
pub use preference_service::{PreferenceManager, PreferenceService};
pub use seed_service::{CatalogSeeder, SeedReport, SeedService};
pub use student_service::{
    Bac2StudentService, BacStudentService, PrepaStudentService, StudentManager,
};
pub use university_service::{UniversityManager, UniversityService};
pub use user_service::{username_candidate, UserManager, UserService};

// Parallel execution utilities
pub use container::parallel;
