use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use garde::Validate;
use kernel::model::{
    club_event::event::{CreateEvent, DeleteEvent, UpdateEvent},
    id::EventId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        club_event::{
            CreateEventRequest, CreateEventRequestWithUserId, EventListQuery, EventResponse,
            UpdateEventRequest, UpdateEventRequestWithIds,
        },
        list::PaginatedResponse,
        CreatedResponse,
    },
};

pub async fn register_event(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<CreatedResponse<EventId>>)> {
    user.require_staff()?;
    req.validate(&())?;

    let event = CreateEvent::try_from(CreateEventRequestWithUserId::new(
        user.id(),
        Local::now().naive_local(),
        req,
    ))?;

    let id = registry.event_repository().create(event).await?;
    tracing::info!(event_id = %id, created_by = %user.id(), "イベントを登録しました");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn show_event_list(
    _user: AuthorizedUser,
    Query(query): Query<EventListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedResponse<EventResponse>>> {
    query.validate(&())?;

    let (filter, options) = query.into_filter(Local::now().date_naive());
    registry
        .event_repository()
        .find_all(filter, options)
        .await
        .map(PaginatedResponse::from)
        .map(Json)
}

pub async fn show_event(
    _user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    registry
        .event_repository()
        .find_by_id(event_id)
        .await
        .and_then(|e| match e {
            Some(e) => Ok(Json(e.into())),
            None => Err(AppError::EntityNotFound(format!(
                "イベント（{event_id}）が見つかりませんでした。"
            ))),
        })
}

pub async fn update_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateEventRequest>,
) -> AppResult<StatusCode> {
    user.require_staff()?;
    req.validate(&())?;

    let update_event = UpdateEvent::try_from(UpdateEventRequestWithIds::new(
        event_id,
        user.id(),
        Local::now().naive_local(),
        req,
    ))?;
    registry
        .event_repository()
        .update(update_event)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.require_staff()?;

    let delete_event = DeleteEvent {
        event_id,
        requested_user: user.id(),
    };
    registry
        .event_repository()
        .delete(delete_event)
        .await
        .map(|_| StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, StatusCode},
    };
    use chrono::{Days, Local};
    use kernel::model::{id::EventId, role::Role};
    use rstest::rstest;
    use serde_json::json;

    use crate::test_util::{authorized, json_body, member, send, Mocks};

    fn event_body(time: &str, location: &str, max_participants: i32) -> Body {
        let date = Local::now().date_naive() + Days::new(7);
        json_body(json!({
            "title": "Rust study group",
            "description": "Ownership and borrowing",
            "date": date,
            "time": time,
            "location": location,
            "category": "study",
            "maxParticipants": max_participants,
        }))
    }

    #[tokio::test]
    async fn student_cannot_create_event() {
        let student = member(Role::Student);
        let app = Mocks::signed_in_as(&student).into_app();

        let res = send(
            app,
            authorized("POST", "/api/v1/events")
                .header(header::CONTENT_TYPE, "application/json")
                .body(event_body("10:00", "213", 20))
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn staff_creates_event() {
        let mentor = member(Role::Mentor);
        let mut mocks = Mocks::signed_in_as(&mentor);
        let created_by = mentor.id;
        mocks
            .event
            .expect_create()
            .withf(move |e| e.created_by == created_by && e.schedule.location == "213")
            .returning(|_| Ok(EventId::new()));

        let res = send(
            mocks.into_app(),
            authorized("POST", "/api/v1/events")
                .header(header::CONTENT_TYPE, "application/json")
                .body(event_body("08:30", "213", 20))
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[rstest]
    #[case("10:00", "21a", 20, StatusCode::UNPROCESSABLE_ENTITY)]
    #[case("10:00", "21", 20, StatusCode::UNPROCESSABLE_ENTITY)]
    #[case("15:01", "213", 20, StatusCode::UNPROCESSABLE_ENTITY)]
    #[case("08:29", "213", 20, StatusCode::UNPROCESSABLE_ENTITY)]
    #[case("10:00", "213", 0, StatusCode::BAD_REQUEST)]
    #[tokio::test]
    async fn invalid_event_is_rejected(
        #[case] time: &str,
        #[case] location: &str,
        #[case] max_participants: i32,
        #[case] expected: StatusCode,
    ) {
        let teacher = member(Role::Teacher);
        let app = Mocks::signed_in_as(&teacher).into_app();

        let res = send(
            app,
            authorized("POST", "/api/v1/events")
                .header(header::CONTENT_TYPE, "application/json")
                .body(event_body(time, location, max_participants))
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), expected);
    }
}
