use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use chrono::Local;
use kernel::model::{id::UserId, id_card::IdCard, user::User};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{extractor::AuthorizedUser, handler::user::user_not_found};

pub async fn show_my_id_card(user: AuthorizedUser) -> impl IntoResponse {
    svg_response(&user.user)
}

pub async fn show_user_id_card(
    user: AuthorizedUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    user.require_staff()?;

    let member = registry
        .user_repository()
        .find_current_user(user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;
    Ok(svg_response(&member))
}

fn svg_response(user: &User) -> impl IntoResponse {
    let card = IdCard::issue(user, Local::now().date_naive());
    (
        [(header::CONTENT_TYPE, "image/svg+xml; charset=utf-8")],
        card.render_svg(),
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, StatusCode},
    };
    use kernel::model::role::Role;

    use crate::test_util::{authorized, body_text, member, send, Mocks};

    #[tokio::test]
    async fn own_card_is_svg() {
        let mut student = member(Role::Student);
        student.profile.student_id = Some("S2026-001".into());
        let app = Mocks::signed_in_as(&student).into_app();

        let res = send(
            app,
            authorized("GET", "/api/v1/users/me/id-card")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()[header::CONTENT_TYPE],
            "image/svg+xml; charset=utf-8"
        );
        let svg = body_text(res).await;
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Aiko Tanaka"));
        assert!(svg.contains("S2026-001"));
    }

    #[tokio::test]
    async fn student_cannot_view_other_cards() {
        let student = member(Role::Student);
        let other = member(Role::Student);
        let app = Mocks::signed_in_as(&student).into_app();

        let res = send(
            app,
            authorized("GET", &format!("/api/v1/users/{}/id-card", other.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn staff_view_member_card() {
        let teacher = member(Role::Teacher);
        let mut target = member(Role::Student);
        target.name = "Kenta Mori".into();
        let target_id = target.id;
        let mut mocks = Mocks::signed_in_as(&teacher);
        mocks
            .user
            .expect_find_current_user()
            .withf(move |id| *id == target_id)
            .returning(move |_| Ok(Some(target.clone())));

        let res = send(
            mocks.into_app(),
            authorized("GET", &format!("/api/v1/users/{target_id}/id-card"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body_text(res).await.contains("Kenta Mori"));
    }

    #[tokio::test]
    async fn unknown_member_card_is_not_found() {
        let admin = member(Role::Admin);
        let mut mocks = Mocks::signed_in_as(&admin);
        let missing = member(Role::Student).id;
        mocks
            .user
            .expect_find_current_user()
            .withf(move |id| *id == missing)
            .returning(|_| Ok(None));

        let res = send(
            mocks.into_app(),
            authorized("GET", &format!("/api/v1/users/{missing}/id-card"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
