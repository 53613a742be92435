use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    auth::{event::CreateToken, AccessToken, OneTimeToken, OneTimeTokenKind},
    id::UserId,
};

#[mockall::automock]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    // アクセストークンに紐づくユーザー ID を取得する
    async fn fetch_user_id_from_token(&self, access_token: &AccessToken)
        -> AppResult<Option<UserId>>;
    // メールアドレスとパスワードを照合する
    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId>;
    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken>;
    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()>;
    // メール確認・パスワード再設定用のワンタイムトークン
    async fn issue_one_time_token(
        &self,
        kind: OneTimeTokenKind,
        user_id: UserId,
    ) -> AppResult<OneTimeToken>;
    // 取り出したトークンは削除される
    async fn consume_one_time_token(&self, token: &OneTimeToken) -> AppResult<Option<UserId>>;
}
