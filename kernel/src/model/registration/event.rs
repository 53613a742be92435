use crate::model::id::{EventId, UserId};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(new)]
pub struct CreateRegistration {
    pub event_id: EventId,
    pub user_id: UserId,
    pub registered_at: DateTime<Utc>,
}

#[derive(new)]
pub struct CancelRegistration {
    pub event_id: EventId,
    pub user_id: UserId,
    pub cancelled_at: DateTime<Utc>,
}
