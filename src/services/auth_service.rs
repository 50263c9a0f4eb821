//! Authentication service - registration, login and email verification.
//!
//! Registration writes the user, the verification token and the cache entry
//! in one transaction. The verification mail is queued only after that
//! transaction has committed, so a rolled back registration never sends one.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::user_service::username_candidate;
use crate::config::{Config, TOKEN_KIND_ACCESS, TOKEN_KIND_REFRESH};
use crate::domain::{
    base_username, hash_password, verify_password, EmailVerificationToken, LoginRequest, NewUser,
    RegisterRequest, User, UserChanges, UserType, VerificationOutcome,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{verification_key, CacheStore, UnitOfWork};
use crate::jobs::{EmailJob, MailQueue};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub role: String,
    /// `access` or `refresh`
    pub kind: String,
    pub exp: i64,
    pub iat: i64,
}

/// Returned by register, login and refresh
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    pub refresh_token: String,
    #[schema(example = "salma.bennani@example.ma")]
    pub email: String,
    #[schema(example = "Salma Bennani")]
    pub name: String,
    #[schema(example = "Login successful")]
    pub message: String,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a disabled account and queue its verification mail. Links in
    /// the mail point at `base_url`.
    async fn register(&self, req: RegisterRequest, base_url: &str) -> AppResult<AuthResponse>;

    async fn login(&self, req: LoginRequest) -> AppResult<AuthResponse>;

    /// Issue a new access token; the refresh token is returned unchanged.
    async fn refresh(&self, refresh_token: &str) -> AppResult<AuthResponse>;

    async fn verify_email(&self, token: &str) -> AppResult<VerificationOutcome>;

    /// Validate an access token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Drop verification tokens past their expiry date
    async fn cleanup_expired_tokens(&self) -> AppResult<u64>;
}

/// Decide what a verification attempt does with the stored token.
/// `Verified` means the token is valid and the account should be enabled.
pub fn verification_outcome(
    token: Option<&EmailVerificationToken>,
    now: DateTime<Utc>,
) -> VerificationOutcome {
    match token {
        None => VerificationOutcome::Unknown,
        Some(t) if t.is_expired(now) => VerificationOutcome::Expired,
        Some(t) if t.verified => VerificationOutcome::AlreadyVerified,
        Some(_) => VerificationOutcome::Verified,
    }
}

fn issue_token(user: &User, kind: &str, hours: i64, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.user_type.to_string(),
        kind: kind.to_string(),
        exp: (now + Duration::hours(hours)).timestamp(),
        iat: now.timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?)
}

fn decode_claims(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

fn token_pair(user: &User, config: &Config, message: &str) -> AppResult<AuthResponse> {
    Ok(AuthResponse {
        access_token: issue_token(user, TOKEN_KIND_ACCESS, config.jwt_expiration_hours, config)?,
        refresh_token: issue_token(
            user,
            TOKEN_KIND_REFRESH,
            config.jwt_refresh_expiration_hours,
            config,
        )?,
        email: user.email.clone(),
        name: user.full_name(),
        message: message.to_string(),
    })
}

pub fn verify_url(base_url: &str, token: &str) -> String {
    format!(
        "{}/api/auth/verify-email?token={}",
        base_url.trim_end_matches('/'),
        token
    )
}

pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
    cache: Arc<dyn CacheStore>,
    mail: Arc<dyn MailQueue>,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(
        uow: Arc<U>,
        config: Config,
        cache: Arc<dyn CacheStore>,
        mail: Arc<dyn MailQueue>,
    ) -> Self {
        Self {
            uow,
            config,
            cache,
            mail,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, req: RegisterRequest, base_url: &str) -> AppResult<AuthResponse> {
        let password_hash = hash_password(&req.password)?;
        let base = base_username(&req.first_name, &req.last_name);
        let ttl = self.config.verification_expiration_seconds;
        let token = Uuid::new_v4().to_string();
        let expiry = Utc::now() + Duration::seconds(ttl as i64);

        let cache = self.cache.clone();
        let stored_token = token.clone();
        let user = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let users = ctx.users();
                    if users.exists_by_email(&req.email).await? {
                        return Err(AppError::conflict("Email already registered"));
                    }

                    let mut attempt = 0;
                    let username = loop {
                        let candidate = username_candidate(&base, attempt);
                        if !users.exists_by_username(&candidate).await? {
                            break candidate;
                        }
                        attempt += 1;
                    };

                    let user = users
                        .create(NewUser {
                            email: req.email,
                            username,
                            first_name: req.first_name,
                            last_name: req.last_name,
                            password_hash,
                            age: None,
                            study_level: Some(req.current_study_level),
                            user_type: UserType::Student,
                            enabled: false,
                        })
                        .await?;

                    ctx.verification_tokens()
                        .create(user.id, stored_token.clone(), expiry)
                        .await?;
                    cache
                        .set_string_with_ttl(&verification_key(&stored_token), &user.email, ttl)
                        .await?;

                    Ok(user)
                })
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");

        let job = EmailJob::verification(
            user.email.clone(),
            Some(&user.first_name),
            &verify_url(base_url, &token),
            ttl,
        );
        if let Err(e) = self.mail.push(job).await {
            tracing::error!(user_id = user.id, error = %e, "Failed to queue verification email");
        }

        token_pair(
            &user,
            &self.config,
            "Registration successful. Please check your email to verify your account.",
        )
    }

    async fn login(&self, req: LoginRequest) -> AppResult<AuthResponse> {
        let user = self.uow.users().find_by_email(&req.email).await?;

        let password_valid = verify_password(
            &req.password,
            user.as_ref().map(|u| u.password_hash.as_str()),
        );

        let user = match user {
            Some(user) if password_valid => user,
            _ => return Err(AppError::InvalidCredentials),
        };
        if !user.enabled {
            return Err(AppError::EmailNotVerified);
        }

        token_pair(&user, &self.config, "Login successful")
    }

    async fn refresh(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let invalid = || AppError::InvalidToken("Invalid refresh token".to_string());

        let claims = decode_claims(refresh_token, &self.config).map_err(|_| invalid())?;
        if claims.kind != TOKEN_KIND_REFRESH {
            return Err(invalid());
        }

        let user = self
            .uow
            .users()
            .find_by_id(claims.sub)
            .await?
            .filter(|u| u.email == claims.email)
            .ok_or_else(invalid)?;

        Ok(AuthResponse {
            access_token: issue_token(
                &user,
                TOKEN_KIND_ACCESS,
                self.config.jwt_expiration_hours,
                &self.config,
            )?,
            refresh_token: refresh_token.to_string(),
            email: user.email.clone(),
            name: user.full_name(),
            message: "Token refreshed successfully".to_string(),
        })
    }

    async fn verify_email(&self, token: &str) -> AppResult<VerificationOutcome> {
        let key = verification_key(token);
        if self.cache.get_string(&key).await?.is_none() {
            return Ok(VerificationOutcome::Unknown);
        }

        let lookup = token.to_string();
        let outcome = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let tokens = ctx.verification_tokens();
                    let record = tokens.find_by_token(&lookup).await?;
                    let outcome = verification_outcome(record.as_ref(), Utc::now());

                    if let (VerificationOutcome::Verified, Some(record)) = (outcome, record) {
                        tokens.mark_verified(record.id).await?;
                        ctx.users()
                            .update(
                                record.user_id,
                                UserChanges {
                                    enabled: Some(true),
                                    ..UserChanges::default()
                                },
                            )
                            .await?;
                    }
                    Ok(outcome)
                })
            })
            .await?;

        if outcome.is_verified() {
            if let Err(e) = self.cache.delete(&key).await {
                tracing::warn!(error = %e, "Failed to drop verification cache entry");
            }
        }
        tracing::info!(outcome = ?outcome, "Email verification attempted");
        Ok(outcome)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let claims = decode_claims(token, &self.config)?;
        if claims.kind != TOKEN_KIND_ACCESS {
            return Err(AppError::Unauthorized);
        }
        Ok(claims)
    }

    async fn cleanup_expired_tokens(&self) -> AppResult<u64> {
        let removed = self
            .uow
            .verification_tokens()
            .delete_expired(Utc::now())
            .await?;
        if removed > 0 {
            tracing::info!(removed, "Expired verification tokens removed");
        }
        Ok(removed)
    }
}
