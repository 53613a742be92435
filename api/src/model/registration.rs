use chrono::{DateTime, Utc};
use kernel::model::{
    id::{EventId, RegistrationId, UserId},
    registration::RegistrationLog,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub registration_id: RegistrationId,
    pub event_id: EventId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationLogResponse {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub action: String,
    pub logged_at: DateTime<Utc>,
}

impl From<RegistrationLog> for RegistrationLogResponse {
    fn from(value: RegistrationLog) -> Self {
        let RegistrationLog {
            id,
            event_id,
            user_id,
            action,
            logged_at,
        } = value;
        Self {
            id,
            event_id,
            user_id,
            action: action.to_string(),
            logged_at,
        }
    }
}
