//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod bac2_student;
pub mod bac_student;
pub mod critere;
pub mod filiere;
pub mod preference;
pub mod prepa_student;
pub mod university;
pub mod user;
pub mod verification_token;
