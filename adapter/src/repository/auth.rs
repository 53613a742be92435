use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        auth::{event::CreateToken, AccessToken, OneTimeToken, OneTimeTokenKind},
        id::UserId,
    },
    repository::auth::AuthRepository,
};
use shared::error::{AppError, AppResult};

use crate::{
    database::{
        model::{
            auth::{from, AuthorizationKey, AuthorizedUserId, OneTimeTokenKey},
            user::UserCredentialRow,
        },
        ConnectionPool,
    },
    redis::RedisClient,
};

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
    verification_ttl: u64,
    password_reset_ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let key: AuthorizationKey = access_token.into();
        self.kv
            .get(&key)
            .await
            .map(|x| x.map(AuthorizedUserId::into_inner))
    }

    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        let user_item = sqlx::query_as::<_, UserCredentialRow>(
            r#"
                SELECT user_id, password_hash FROM users
                WHERE email = $1;
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or(AppError::UnauthenticatedError)?;

        let valid = bcrypt::verify(password, &user_item.password_hash)?;
        if !valid {
            return Err(AppError::UnauthenticatedError);
        }

        Ok(user_item.user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let (key, value) = from(event);
        self.kv.set_ex(&key, &value, self.ttl).await?;
        Ok(key.token())
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        let key: AuthorizationKey = access_token.into();
        self.kv.delete(&key).await
    }

    async fn issue_one_time_token(
        &self,
        kind: OneTimeTokenKind,
        user_id: UserId,
    ) -> AppResult<OneTimeToken> {
        let token = OneTimeToken::generate(kind);
        let ttl = match kind {
            OneTimeTokenKind::EmailVerification => self.verification_ttl,
            OneTimeTokenKind::PasswordReset => self.password_reset_ttl,
        };
        self.kv
            .set_ex(
                &OneTimeTokenKey::from(&token),
                &AuthorizedUserId::new(user_id),
                ttl,
            )
            .await?;
        Ok(token)
    }

    async fn consume_one_time_token(&self, token: &OneTimeToken) -> AppResult<Option<UserId>> {
        self.kv
            .take(&OneTimeTokenKey::from(token))
            .await
            .map(|x| x.map(AuthorizedUserId::into_inner))
    }
}
