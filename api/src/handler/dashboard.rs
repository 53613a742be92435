use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::Local;
use kernel::model::{club_event::EventListFilter, list::ListOptions, role::DashboardArea};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::{
        club_event::EventResponse,
        dashboard::{AdminDashboardResponse, StudentDashboardResponse},
    },
};

// 件数だけ欲しいときのページ指定
const COUNT_ONLY: ListOptions = ListOptions {
    limit: 1,
    offset: 0,
};

pub async fn admin_dashboard(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Response> {
    if let Some(path) = DashboardArea::Admin.redirect_for(user.user.role) {
        return Ok(Redirect::to(path).into_response());
    }

    let user_count = registry.user_repository().count().await?;
    let upcoming_event_count = registry
        .event_repository()
        .find_all(
            EventListFilter {
                category: None,
                from_date: Some(Local::now().date_naive()),
            },
            COUNT_ONLY,
        )
        .await?
        .total;
    let workshop_count = registry
        .workshop_repository()
        .find_all(None, COUNT_ONLY)
        .await?
        .total;
    let resource_count = registry.resource_repository().count().await?;

    Ok(Json(AdminDashboardResponse {
        user_count,
        upcoming_event_count,
        workshop_count,
        resource_count,
    })
    .into_response())
}

pub async fn student_dashboard(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Response> {
    if let Some(path) = DashboardArea::Student.redirect_for(user.user.role) {
        return Ok(Redirect::to(path).into_response());
    }

    let registered_events = registry
        .user_repository()
        .find_registered_events(user.id())
        .await?
        .into_iter()
        .map(EventResponse::from)
        .collect();

    Ok(Json(StudentDashboardResponse {
        profile: user.user.into(),
        registered_events,
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use kernel::model::{list::PaginatedList, role::Role};
    use rstest::rstest;

    use crate::test_util::{authorized, body_json, member, send, Mocks};

    #[tokio::test]
    async fn student_is_sent_away_from_admin_dashboard() {
        let student = member(Role::Student);
        let app = Mocks::signed_in_as(&student).into_app();

        let res = send(
            app,
            authorized("GET", "/adm-dashboard").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/user-dashboard");
    }

    #[rstest]
    #[case(Role::Mentor)]
    #[case(Role::Teacher)]
    #[case(Role::Admin)]
    #[tokio::test]
    async fn staff_are_sent_away_from_student_dashboard(#[case] role: Role) {
        let staff = member(role);
        let app = Mocks::signed_in_as(&staff).into_app();

        let res = send(
            app,
            authorized("GET", "/user-dashboard").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/adm-dashboard");
    }

    #[tokio::test]
    async fn student_dashboard_shows_profile() {
        let student = member(Role::Student);
        let mut mocks = Mocks::signed_in_as(&student);
        mocks
            .user
            .expect_find_registered_events()
            .returning(|_| Ok(vec![]));

        let res = send(
            mocks.into_app(),
            authorized("GET", "/user-dashboard").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["profile"]["role"], "student");
        assert_eq!(body["registeredEvents"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn admin_dashboard_shows_counts() {
        let admin = member(Role::Admin);
        let mut mocks = Mocks::signed_in_as(&admin);
        mocks.user.expect_count().returning(|| Ok(12));
        mocks.event.expect_find_all().returning(|_, options| {
            Ok(PaginatedList {
                total: 3,
                limit: options.limit,
                offset: options.offset,
                items: vec![],
            })
        });
        mocks.workshop.expect_find_all().returning(|_, options| {
            Ok(PaginatedList {
                total: 2,
                limit: options.limit,
                offset: options.offset,
                items: vec![],
            })
        });
        mocks.resource.expect_count().times(1).returning(|| Ok(7));
        mocks.resource.expect_find_all().never();

        let res = send(
            mocks.into_app(),
            authorized("GET", "/adm-dashboard").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["userCount"], 12);
        assert_eq!(body["upcomingEventCount"], 3);
        assert_eq!(body["workshopCount"], 2);
        assert_eq!(body["resourceCount"], 7);
    }

    #[tokio::test]
    async fn dashboard_requires_token() {
        let app = Mocks::default().into_app();
        let res = send(
            app,
            Request::get("/adm-dashboard").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
