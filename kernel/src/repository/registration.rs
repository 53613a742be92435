use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{EventId, RegistrationId},
    registration::{
        event::{CancelRegistration, CreateRegistration},
        RegistrationLog,
    },
    user::Participant,
};

#[mockall::automock]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    // 参加登録。重複登録と定員超過はエラーになる
    async fn create(&self, event: CreateRegistration) -> AppResult<RegistrationId>;
    // 参加取り消し
    async fn cancel(&self, event: CancelRegistration) -> AppResult<()>;
    // イベントの参加者一覧を登録順で返す
    async fn find_participants(&self, event_id: EventId) -> AppResult<Vec<Participant>>;
    // 登録・取り消しの履歴を新しい順で返す
    async fn find_logs(&self, event_id: EventId) -> AppResult<Vec<RegistrationLog>>;
}
