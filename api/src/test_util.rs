use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use chrono::Utc;
use kernel::{
    model::{id::UserId, role::Role, user::User},
    repository::{
        auth::MockAuthRepository, club_event::MockEventRepository,
        health::MockHealthCheckRepository, image::MockImageRepository, mail::MockMailRepository,
        registration::MockRegistrationRepository, resource::MockResourceRepository,
        user::MockUserRepository, workshop::MockWorkshopRepository,
    },
};
use registry::{AppRegistry, Repositories};
use tower::ServiceExt;

pub(crate) const TEST_TOKEN: &str = "test-access-token";

pub(crate) fn member(role: Role) -> User {
    User {
        id: UserId::new(),
        email: format!("{role}@example.com"),
        name: "Aiko Tanaka".into(),
        role,
        email_verified: true,
        profile: Default::default(),
        registered_events: vec![],
        created_at: Utc::now(),
    }
}

#[derive(Default)]
pub(crate) struct Mocks {
    pub health_check: MockHealthCheckRepository,
    pub auth: MockAuthRepository,
    pub user: MockUserRepository,
    pub event: MockEventRepository,
    pub registration: MockRegistrationRepository,
    pub workshop: MockWorkshopRepository,
    pub resource: MockResourceRepository,
    pub image: MockImageRepository,
    pub mail: MockMailRepository,
}

impl Mocks {
    // TEST_TOKEN を持つリクエストを `user` として認証させる
    pub fn signed_in_as(user: &User) -> Self {
        let mut mocks = Self::default();
        let user_id = user.id;
        mocks
            .auth
            .expect_fetch_user_id_from_token()
            .returning(move |token| Ok((token.0 == TEST_TOKEN).then_some(user_id)));
        let current = user.clone();
        mocks
            .user
            .expect_find_current_user()
            .withf(move |id| *id == user_id)
            .returning(move |_| Ok(Some(current.clone())));
        mocks
    }

    pub fn into_app(self) -> Router {
        let repositories = Repositories {
            health_check: Arc::new(self.health_check),
            auth: Arc::new(self.auth),
            user: Arc::new(self.user),
            event: Arc::new(self.event),
            registration: Arc::new(self.registration),
            workshop: Arc::new(self.workshop),
            resource: Arc::new(self.resource),
            image: Arc::new(self.image),
            mail: Arc::new(self.mail),
        };
        crate::route::v1::routes()
            .with_state(AppRegistry::from_repositories(repositories, "http://localhost:3000"))
    }
}

pub(crate) fn authorized(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
}

pub(crate) fn json_body(value: serde_json::Value) -> Body {
    Body::from(value.to_string())
}

pub(crate) async fn send(app: Router, req: Request<Body>) -> Response<Body> {
    app.oneshot(req).await.unwrap()
}

pub(crate) async fn body_json(res: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub(crate) async fn body_text(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
