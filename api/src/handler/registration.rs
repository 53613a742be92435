use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use kernel::model::{
    id::EventId,
    registration::event::{CancelRegistration, CreateRegistration},
};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::{
        club_event::EventResponse,
        registration::{RegistrationLogResponse, RegistrationResponse},
        user::ParticipantResponse,
    },
};

pub async fn register_for_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<(StatusCode, Json<RegistrationResponse>)> {
    let registration_id = registry
        .registration_repository()
        .create(CreateRegistration::new(event_id, user.id(), Utc::now()))
        .await?;

    tracing::info!(%event_id, user_id = %user.id(), "参加登録を受け付けました");
    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            registration_id,
            event_id,
        }),
    ))
}

pub async fn cancel_registration(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .registration_repository()
        .cancel(CancelRegistration::new(event_id, user.id(), Utc::now()))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

pub async fn show_participants(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<ParticipantResponse>>> {
    user.require_staff()?;

    registry
        .registration_repository()
        .find_participants(event_id)
        .await
        .map(|items| items.into_iter().map(ParticipantResponse::from).collect())
        .map(Json)
}

pub async fn show_registration_logs(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<RegistrationLogResponse>>> {
    user.require_staff()?;

    registry
        .registration_repository()
        .find_logs(event_id)
        .await
        .map(|items| items.into_iter().map(RegistrationLogResponse::from).collect())
        .map(Json)
}

pub async fn show_my_events(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<EventResponse>>> {
    registry
        .user_repository()
        .find_registered_events(user.id())
        .await
        .map(|items| items.into_iter().map(EventResponse::from).collect())
        .map(Json)
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::StatusCode};
    use kernel::model::{
        id::{EventId, RegistrationId},
        role::Role,
    };
    use shared::error::AppError;

    use crate::test_util::{authorized, body_json, member, send, Mocks};

    #[tokio::test]
    async fn member_registers_for_event() {
        let student = member(Role::Student);
        let event_id = EventId::new();
        let user_id = student.id;
        let mut mocks = Mocks::signed_in_as(&student);
        mocks
            .registration
            .expect_create()
            .withf(move |r| r.event_id == event_id && r.user_id == user_id)
            .times(1)
            .returning(|_| Ok(RegistrationId::new()));

        let res = send(
            mocks.into_app(),
            authorized("POST", &format!("/api/v1/events/{event_id}/registrations"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = body_json(res).await;
        assert_eq!(body["eventId"], event_id.to_string());
    }

    #[tokio::test]
    async fn duplicate_registration_is_unprocessable() {
        let student = member(Role::Student);
        let event_id = EventId::new();
        let mut mocks = Mocks::signed_in_as(&student);
        mocks.registration.expect_create().returning(|_| {
            Err(AppError::UnprocessableEntity(
                "already registered".into(),
            ))
        });

        let res = send(
            mocks.into_app(),
            authorized("POST", &format!("/api/v1/events/{event_id}/registrations"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn participants_are_staff_only() {
        let student = member(Role::Student);
        let app = Mocks::signed_in_as(&student).into_app();

        let res = send(
            app,
            authorized(
                "GET",
                &format!("/api/v1/events/{}/participants", EventId::new()),
            )
            .body(Body::empty())
            .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
