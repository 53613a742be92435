use crate::model::id::{EventId, RegistrationId, UserId};
use chrono::{DateTime, Utc};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RegistrationAction {
    Register,
    Cancel,
}

#[derive(Debug, Clone)]
pub struct RegistrationLog {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub action: RegistrationAction,
    pub logged_at: DateTime<Utc>,
}
