//! Email verification token issued at registration.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct EmailVerificationToken {
    pub id: i64,
    pub token: String,
    pub user_id: i64,
    pub expiry_date: DateTime<Utc>,
    pub verified: bool,
}

impl EmailVerificationToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date < now
    }
}

/// Outcome of a verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    /// Cache entry gone: never issued, already consumed or timed out
    Unknown,
    Expired,
    AlreadyVerified,
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified)
    }
}
