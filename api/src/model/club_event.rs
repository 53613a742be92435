use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    club_event::{
        event::{CreateEvent, UpdateEvent},
        Event, EventListFilter,
    },
    id::{EventId, UserId},
    list::ListOptions,
    schedule::EventSchedule,
};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[garde(length(min = 1, max = 255))]
    pub title: String,
    #[garde(skip)]
    pub description: String,
    #[garde(skip)]
    pub date: NaiveDate,
    // 書式と時間帯の検査は EventSchedule::parse で行う
    #[garde(skip)]
    pub time: String,
    #[garde(skip)]
    pub location: String,
    #[garde(length(min = 1, max = 64))]
    pub category: String,
    #[garde(range(min = 1))]
    pub max_participants: i32,
    #[garde(url)]
    pub image_url: Option<String>,
}

#[derive(new)]
pub struct CreateEventRequestWithUserId(UserId, NaiveDateTime, CreateEventRequest);
impl TryFrom<CreateEventRequestWithUserId> for CreateEvent {
    type Error = AppError;

    fn try_from(value: CreateEventRequestWithUserId) -> Result<Self, Self::Error> {
        let CreateEventRequestWithUserId(
            created_by,
            now,
            CreateEventRequest {
                title,
                description,
                date,
                time,
                location,
                category,
                max_participants,
                image_url,
            },
        ) = value;
        Ok(CreateEvent {
            title,
            description,
            schedule: EventSchedule::parse(date, &time, &location, now)?,
            category,
            max_participants,
            image_url,
            created_by,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[garde(length(min = 1, max = 255))]
    pub title: String,
    #[garde(skip)]
    pub description: String,
    #[garde(skip)]
    pub date: NaiveDate,
    #[garde(skip)]
    pub time: String,
    #[garde(skip)]
    pub location: String,
    #[garde(length(min = 1, max = 64))]
    pub category: String,
    #[garde(range(min = 1))]
    pub max_participants: i32,
    #[garde(url)]
    pub image_url: Option<String>,
}

#[derive(new)]
pub struct UpdateEventRequestWithIds(EventId, UserId, NaiveDateTime, UpdateEventRequest);
impl TryFrom<UpdateEventRequestWithIds> for UpdateEvent {
    type Error = AppError;

    fn try_from(value: UpdateEventRequestWithIds) -> Result<Self, Self::Error> {
        let UpdateEventRequestWithIds(
            event_id,
            requested_user,
            now,
            UpdateEventRequest {
                title,
                description,
                date,
                time,
                location,
                category,
                max_participants,
                image_url,
            },
        ) = value;
        Ok(UpdateEvent {
            event_id,
            title,
            description,
            schedule: EventSchedule::parse(date, &time, &location, now)?,
            category,
            max_participants,
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
pub struct EventListQuery {
    #[garde(skip)]
    pub category: Option<String>,
    // true のとき今日以降のイベントだけを返す
    #[garde(skip)]
    #[serde(default)]
    pub upcoming: bool,
    #[garde(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub offset: i64,
}

impl EventListQuery {
    pub fn into_filter(self, today: NaiveDate) -> (EventListFilter, ListOptions) {
        let EventListQuery {
            category,
            upcoming,
            limit,
            offset,
        } = self;
        (
            EventListFilter {
                category,
                from_date: upcoming.then_some(today),
            },
            ListOptions { limit, offset },
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub category: String,
    pub max_participants: i32,
    pub current_participants: i32,
    pub remaining_seats: i32,
    pub is_full: bool,
    pub image_url: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let remaining_seats = value.remaining_seats();
        let is_full = value.is_full();
        let Event {
            id,
            title,
            description,
            date,
            time,
            location,
            category,
            max_participants,
            current_participants,
            image_url,
            created_by,
            created_at,
        } = value;
        Self {
            id,
            title,
            description,
            date,
            time: time.format("%H:%M").to_string(),
            location,
            category,
            max_participants,
            current_participants,
            remaining_seats,
            is_full,
            image_url,
            created_by,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(time: &str, location: &str) -> CreateEventRequest {
        CreateEventRequest {
            title: "Rust study group".into(),
            description: "".into(),
            date: NaiveDate::from_ymd_opt(2030, 5, 10).unwrap(),
            time: time.into(),
            location: location.into(),
            category: "study".into(),
            max_participants: 20,
            image_url: None,
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn valid_request_becomes_create_event() {
        let event = CreateEvent::try_from(CreateEventRequestWithUserId::new(
            UserId::new(),
            now(),
            request("10:15", "204"),
        ))
        .unwrap();
        assert_eq!(event.schedule.time.format("%H:%M").to_string(), "10:15");
        assert_eq!(event.schedule.location, "204");
    }

    #[test]
    fn bad_location_is_rejected() {
        let res = CreateEvent::try_from(CreateEventRequestWithUserId::new(
            UserId::new(),
            now(),
            request("10:15", "21a"),
        ));
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
    }

    #[test]
    fn upcoming_query_filters_from_today() {
        let query: EventListQuery = serde_json::from_str(r#"{"upcoming":true}"#).unwrap();
        let today = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
        let (filter, options) = query.into_filter(today);
        assert_eq!(filter.from_date, Some(today));
        assert_eq!(options.limit, 20);
        assert_eq!(options.offset, 0);
    }
}
