use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{UserId, WorkshopId},
    list::ListOptions,
    schedule::validate_workshop_period,
    workshop::{
        event::{CreateWorkshop, UpdateWorkshop},
        Workshop,
    },
};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkshopRequest {
    #[garde(length(min = 1, max = 255))]
    pub title: String,
    #[garde(skip)]
    pub description: String,
    #[garde(length(min = 1, max = 255))]
    pub instructor: String,
    #[garde(skip)]
    pub start_date: NaiveDate,
    #[garde(skip)]
    pub end_date: NaiveDate,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(range(min = 0))]
    pub price: i64,
    #[garde(url)]
    pub image_url: Option<String>,
}

#[derive(new)]
pub struct CreateWorkshopRequestWithUserId(UserId, CreateWorkshopRequest);
impl TryFrom<CreateWorkshopRequestWithUserId> for CreateWorkshop {
    type Error = AppError;

    fn try_from(value: CreateWorkshopRequestWithUserId) -> Result<Self, Self::Error> {
        let CreateWorkshopRequestWithUserId(
            created_by,
            CreateWorkshopRequest {
                title,
                description,
                instructor,
                start_date,
                end_date,
                capacity,
                price,
                image_url,
            },
        ) = value;
        validate_workshop_period(start_date, end_date)?;
        Ok(CreateWorkshop {
            title,
            description,
            instructor,
            start_date,
            end_date,
            capacity,
            price,
            image_url,
            created_by,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkshopRequest {
    #[garde(length(min = 1, max = 255))]
    pub title: String,
    #[garde(skip)]
    pub description: String,
    #[garde(length(min = 1, max = 255))]
    pub instructor: String,
    #[garde(skip)]
    pub start_date: NaiveDate,
    #[garde(skip)]
    pub end_date: NaiveDate,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(range(min = 0))]
    pub price: i64,
    #[garde(url)]
    pub image_url: Option<String>,
}

#[derive(new)]
pub struct UpdateWorkshopRequestWithIds(WorkshopId, UserId, UpdateWorkshopRequest);
impl TryFrom<UpdateWorkshopRequestWithIds> for UpdateWorkshop {
    type Error = AppError;

    fn try_from(value: UpdateWorkshopRequestWithIds) -> Result<Self, Self::Error> {
        let UpdateWorkshopRequestWithIds(
            workshop_id,
            requested_user,
            UpdateWorkshopRequest {
                title,
                description,
                instructor,
                start_date,
                end_date,
                capacity,
                price,
                image_url,
            },
        ) = value;
        validate_workshop_period(start_date, end_date)?;
        Ok(UpdateWorkshop {
            workshop_id,
            title,
            description,
            instructor,
            start_date,
            end_date,
            capacity,
            price,
            image_url,
            requested_user,
        })
    }
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopListQuery {
    #[garde(skip)]
    pub instructor: Option<String>,
    #[garde(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub offset: i64,
}

impl WorkshopListQuery {
    pub fn into_parts(self) -> (Option<String>, ListOptions) {
        let WorkshopListQuery {
            instructor,
            limit,
            offset,
        } = self;
        (instructor, ListOptions { limit, offset })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopResponse {
    pub id: WorkshopId,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub capacity: i32,
    pub price: i64,
    pub image_url: Option<String>,
    pub enrolled_count: i64,
    pub is_full: bool,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<Workshop> for WorkshopResponse {
    fn from(value: Workshop) -> Self {
        let is_full = value.is_full();
        let Workshop {
            id,
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
        Self {
            id,
            title,
            description,
            instructor,
            start_date,
            end_date,
            capacity,
            price,
            image_url,
            enrolled_count,
            is_full,
            created_by,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(start: &str, end: &str, price: i64) -> CreateWorkshopRequest {
        serde_json::from_value(serde_json::json!({
            "title": "Intro to Rust",
            "description": "",
            "instructor": "Ms. Sato",
            "startDate": start,
            "endDate": end,
            "capacity": 10,
            "price": price,
        }))
        .unwrap()
    }

    #[rstest]
    #[case("2030-04-01", "2030-04-01", true)]
    #[case("2030-04-01", "2030-04-22", true)]
    #[case("2030-04-22", "2030-04-01", false)]
    fn period_must_not_run_backwards(#[case] start: &str, #[case] end: &str, #[case] ok: bool) {
        let res =
            CreateWorkshop::try_from(CreateWorkshopRequestWithUserId::new(UserId::new(), request(start, end, 0)));
        assert_eq!(res.is_ok(), ok);
    }

    #[test]
    fn negative_price_fails_validation() {
        assert!(request("2030-04-01", "2030-04-02", -1).validate(&()).is_err());
        assert!(request("2030-04-01", "2030-04-02", 0).validate(&()).is_ok());
    }
}
