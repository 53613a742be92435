use crate::model::id::{UserId, WorkshopId};
use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;

pub struct CreateWorkshop {
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub capacity: i32,
    pub price: i64,
    pub image_url: Option<String>,
    pub created_by: UserId,
}

pub struct UpdateWorkshop {
    pub workshop_id: WorkshopId,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub capacity: i32,
    pub price: i64,
    pub image_url: Option<String>,
    pub requested_user: UserId,
}

pub struct DeleteWorkshop {
    pub workshop_id: WorkshopId,
    pub requested_user: UserId,
}

#[derive(new)]
pub struct CreateEnrollment {
    pub workshop_id: WorkshopId,
    pub user_id: UserId,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(new)]
pub struct DeleteEnrollment {
    pub workshop_id: WorkshopId,
    pub user_id: UserId,
}
