use crate::model::{
    id::{EventId, UserId},
    schedule::EventSchedule,
};

pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub schedule: EventSchedule,
    pub category: String,
    pub max_participants: i32,
    pub image_url: Option<String>,
    pub created_by: UserId,
}

// 全項目の置き換え。max_participants は現在の参加者数を下回れない
pub struct UpdateEvent {
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub schedule: EventSchedule,
    pub category: String,
    pub max_participants: i32,
    pub image_url: Option<String>,
    pub requested_user: UserId,
}

pub struct DeleteEvent {
    pub event_id: EventId,
    pub requested_user: UserId,
}
