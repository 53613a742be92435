use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    id::{UserId, WorkshopId},
    workshop::Workshop,
};

#[derive(sqlx::FromRow)]
pub struct WorkshopRow {
    pub workshop_id: WorkshopId,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub capacity: i32,
    pub price: i64,
    pub image_url: Option<String>,
    pub enrolled_count: i64,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<WorkshopRow> for Workshop {
    fn from(value: WorkshopRow) -> Self {
        let WorkshopRow {
            workshop_id,
            title,
            description,
            instructor,
            start_date,
            end_date,
            capacity,
            price,
            image_url,
            enrolled_count,
            created_by,
            created_at,
        } = value;
        Workshop {
            id: workshop_id,
            title,
            description,
            instructor,
            start_date,
            end_date,
            capacity,
            price,
            image_url,
            enrolled_count,
            created_by,
            created_at,
        }
    }
}
