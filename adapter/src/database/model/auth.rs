use kernel::model::{
    auth::{AccessToken, OneTimeToken},
    id::UserId,
};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

use crate::redis::model::{RedisKey, RedisValue};

pub struct AuthorizationKey(String);
pub struct AuthorizedUserId(UserId);

pub fn from(event: kernel::model::auth::event::CreateToken) -> (AuthorizationKey, AuthorizedUserId) {
    (
        AuthorizationKey(AccessToken::generate().0),
        AuthorizedUserId(event.user_id),
    )
}

impl AuthorizationKey {
    pub fn token(&self) -> AccessToken {
        AccessToken(self.0.clone())
    }
}

impl From<&AccessToken> for AuthorizationKey {
    fn from(token: &AccessToken) -> Self {
        Self(token.0.clone())
    }
}

impl From<AccessToken> for AuthorizationKey {
    fn from(token: AccessToken) -> Self {
        Self(token.0)
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        format!("session:{}", self.0)
    }
}

impl AuthorizedUserId {
    pub fn new(user_id: UserId) -> Self {
        Self(user_id)
    }

    pub fn into_inner(self) -> UserId {
        self.0
    }
}

impl RedisValue for AuthorizedUserId {
    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<String> for AuthorizedUserId {
    type Error = AppError;

    fn try_from(s: String) -> AppResult<Self> {
        Ok(Self(UserId::from_str(&s)?))
    }
}

// メール確認・パスワード再設定トークンのキー。種類ごとに名前空間を分ける
pub struct OneTimeTokenKey(String);

impl From<&OneTimeToken> for OneTimeTokenKey {
    fn from(token: &OneTimeToken) -> Self {
        Self(format!("{}:{}", token.kind.prefix(), token.value))
    }
}

impl RedisKey for OneTimeTokenKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        self.0.clone()
    }
}
