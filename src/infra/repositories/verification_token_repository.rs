//! Email verification token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};

use super::entities::verification_token::{self, ActiveModel, Entity as TokenEntity};
use crate::domain::EmailVerificationToken;
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait VerificationTokenRepository: Send + Sync {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<EmailVerificationToken>>;

    /// Remove tokens whose expiry date is before `cutoff`, returning the count
    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}

pub struct VerificationTokenStore {
    db: DatabaseConnection,
}

impl VerificationTokenStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VerificationTokenRepository for VerificationTokenStore {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<EmailVerificationToken>> {
        find_by_token(&self.db, token).await
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = TokenEntity::delete_many()
            .filter(verification_token::Column::ExpiryDate.lt(cutoff))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}

pub(crate) async fn find_by_token<C: ConnectionTrait>(
    db: &C,
    token: &str,
) -> AppResult<Option<EmailVerificationToken>> {
    let result = TokenEntity::find()
        .filter(verification_token::Column::Token.eq(token))
        .one(db)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(EmailVerificationToken::from))
}

pub(crate) async fn insert<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
    token: String,
    expiry_date: DateTime<Utc>,
) -> AppResult<EmailVerificationToken> {
    let active_model = ActiveModel {
        token: Set(token),
        user_id: Set(user_id),
        expiry_date: Set(expiry_date),
        verified: Set(false),
        ..Default::default()
    };

    let model = active_model.insert(db).await.map_err(AppError::from)?;
    Ok(EmailVerificationToken::from(model))
}

pub(crate) async fn mark_verified<C: ConnectionTrait>(db: &C, id: i64) -> AppResult<()> {
    let existing = TokenEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_not_found("Verification token", id)?;

    let mut active: ActiveModel = existing.into();
    active.verified = Set(true);
    active.update(db).await.map_err(AppError::from)?;
    Ok(())
}
