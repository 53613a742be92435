use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::mail::OutgoingMail;

#[mockall::automock]
#[async_trait]
pub trait MailRepository: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> AppResult<()>;
}
