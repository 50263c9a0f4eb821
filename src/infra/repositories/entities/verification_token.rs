//! Email verification token entity.

use sea_orm::entity::prelude::*;

use crate::domain::EmailVerificationToken;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "email_verification_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub token: String,
    pub user_id: i64,
    pub expiry_date: DateTimeUtc,
    pub verified: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for EmailVerificationToken {
    fn from(model: Model) -> Self {
        EmailVerificationToken {
            id: model.id,
            token: model.token,
            user_id: model.user_id,
            expiry_date: model.expiry_date,
            verified: model.verified,
        }
    }
}
