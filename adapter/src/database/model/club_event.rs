use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use kernel::model::{
    club_event::Event,
    id::{EventId, UserId},
};

#[derive(sqlx::FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub location: String,
    pub category: String,
    pub max_participants: i32,
    pub current_participants: i32,
    pub image_url: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(value: EventRow) -> Self {
        let EventRow {
            event_id,
            title,
            description,
            event_date,
            event_time,
            location,
            category,
            max_participants,
            current_participants,
            image_url,
            created_by,
            created_at,
        } = value;
        Event {
            id: event_id,
            title,
            description,
            date: event_date,
            time: event_time,
            location,
            category,
            max_participants,
            current_participants,
            image_url,
            created_by,
            created_at,
        }
    }
}

// 参加登録時に行ロックを取って読む定員情報
#[derive(sqlx::FromRow)]
pub struct EventCapacityRow {
    pub max_participants: i32,
    pub current_participants: i32,
}
