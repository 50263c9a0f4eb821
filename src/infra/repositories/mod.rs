//! Repository layer - Data access abstraction
//!
//! One trait per aggregate, implemented by a `*Store` over the shared
//! connection. Queries that also run inside transactions are written
//! against `ConnectionTrait` and reused by the unit of work.

mod bac2_student_repository;
mod bac_student_repository;
pub(crate) mod critere_repository;
pub(crate) mod entities;
pub(crate) mod filiere_repository;
mod preference_repository;
mod prepa_student_repository;
pub(crate) mod university_repository;
pub(crate) mod user_repository;
pub(crate) mod verification_token_repository;

pub use bac2_student_repository::{Bac2StudentFilter, Bac2StudentRepository, Bac2StudentStore};
pub use bac_student_repository::{BacStudentFilter, BacStudentRepository, BacStudentStore};
pub use critere_repository::{CritereFilter, CritereRepository, CritereStore};
pub use filiere_repository::{FiliereFilter, FiliereRepository, FiliereStore};
pub use preference_repository::{PreferenceFilter, PreferenceRepository, PreferenceStore};
pub use prepa_student_repository::{PrepaStudentFilter, PrepaStudentRepository, PrepaStudentStore};
pub use university_repository::{UniversityFilter, UniversityRepository, UniversityStore};
pub use user_repository::{UserFilter, UserRepository, UserStore};
pub use verification_token_repository::{VerificationTokenRepository, VerificationTokenStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use bac2_student_repository::MockBac2StudentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use bac_student_repository::MockBacStudentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use critere_repository::MockCritereRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use filiere_repository::MockFiliereRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use preference_repository::MockPreferenceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use prepa_student_repository::MockPrepaStudentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use university_repository::MockUniversityRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use verification_token_repository::MockVerificationTokenRepository;
