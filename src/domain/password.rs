//! Account credentials: argon2id hashes stored in `users.password_hash`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Hash a new password for storage.
///
/// Length is counted in characters, the way the request validators count
/// it, so "éèàçùô" passes here exactly when it passes `RegisterRequest`.
pub fn hash_password(plain: &str) -> AppResult<String> {
    if (plain.chars().count() as u64) < MIN_PASSWORD_LENGTH {
        return Err(AppError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))
}

/// Check a login attempt against the stored hash.
///
/// With no account (`stored == None`) a throwaway hash is still computed so
/// unknown emails cost as much as wrong passwords. A stored value that is
/// not a PHC string never matches.
pub fn verify_password(plain: &str, stored: Option<&str>) -> bool {
    let Some(stored) = stored else {
        let salt = SaltString::generate(&mut OsRng);
        let _ = Argon2::default().hash_password(plain.as_bytes(), &salt);
        return false;
    };

    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    use crate::domain::{RegisterRequest, StudyLevel};

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("bac-maroc-2024").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("bac-maroc-2024", Some(&hash)));
        assert!(!verify_password("bac-maroc-2025", Some(&hash)));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Five accented letters are ten bytes but still too short
        let err = hash_password("éèàçù").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");

        let hash = hash_password("éèàçùô").unwrap();
        assert!(verify_password("éèàçùô", Some(&hash)));
    }

    #[test]
    fn test_rule_matches_register_validation() {
        for candidate in ["abc12", "éèàçù", "123456", "éèàçùô"] {
            let req = RegisterRequest {
                first_name: "Amine".into(),
                last_name: "Tazi".into(),
                email: "amine@example.ma".into(),
                password: candidate.into(),
                current_study_level: StudyLevel::Bac,
            };
            assert_eq!(
                req.validate().is_ok(),
                hash_password(candidate).is_ok(),
                "disagreement on {:?}",
                candidate
            );
        }
    }

    #[test]
    fn test_malformed_or_missing_hash_never_matches() {
        assert!(!verify_password("secret123", Some("not-a-phc-string")));
        assert!(!verify_password("secret123", Some("")));
        assert!(!verify_password("secret123", None));
    }
}
