use crate::model::id::{EventId, UserId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

pub mod event;

#[derive(Debug, Clone)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub category: String,
    pub max_participants: i32,
    pub current_participants: i32,
    pub image_url: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn remaining_seats(&self) -> i32 {
        (self.max_participants - self.current_participants).max(0)
    }

    pub fn is_full(&self) -> bool {
        self.remaining_seats() == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventListFilter {
    pub category: Option<String>,
    // Some(today) のとき today 以降のイベントに絞り込む
    pub from_date: Option<NaiveDate>,
}
