use chrono::{DateTime, Utc};
use kernel::model::{
    id::{EventId, RegistrationId, UserId},
    registration::{RegistrationAction, RegistrationLog},
};
use shared::error::AppError;
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct RegistrationLogRow {
    pub log_id: RegistrationId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub action: String,
    pub logged_at: DateTime<Utc>,
}

impl TryFrom<RegistrationLogRow> for RegistrationLog {
    type Error = AppError;

    fn try_from(value: RegistrationLogRow) -> Result<Self, Self::Error> {
        let RegistrationLogRow {
            log_id,
            event_id,
            user_id,
            action,
            logged_at,
        } = value;
        Ok(RegistrationLog {
            id: log_id,
            event_id,
            user_id,
            action: RegistrationAction::from_str(&action)
                .map_err(|e| AppError::ConversionEntityError(format!("action {action}: {e}")))?,
            logged_at,
        })
    }
}
