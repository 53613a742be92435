use crate::model::id::{UserId, WorkshopId};
use chrono::{DateTime, NaiveDate, Utc};

pub mod event;

#[derive(Debug, Clone)]
pub struct Workshop {
    pub id: WorkshopId,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub capacity: i32,
    // 最小通貨単位（円なら円、ドルならセント）
    pub price: i64,
    pub image_url: Option<String>,
    pub enrolled_count: i64,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Workshop {
    pub fn is_full(&self) -> bool {
        self.enrolled_count >= i64::from(self.capacity)
    }
}
