use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::ResourceId, resource::event::DeleteResource};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        resource::{
            CreateResourceRequest, CreateResourceRequestWithUserId, ResourceListQuery,
            ResourceResponse, UpdateResourceRequest, UpdateResourceRequestWithIds,
        },
        CreatedResponse,
    },
};

pub async fn register_resource(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateResourceRequest>,
) -> AppResult<(StatusCode, Json<CreatedResponse<ResourceId>>)> {
    user.require_staff()?;
    req.validate(&())?;

    let id = registry
        .resource_repository()
        .create(CreateResourceRequestWithUserId::new(user.id(), req).into())
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn show_resource_list(
    _user: AuthorizedUser,
    Query(query): Query<ResourceListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<ResourceResponse>>> {
    registry
        .resource_repository()
        .find_all(query.into())
        .await
        .map(|items| items.into_iter().map(ResourceResponse::from).collect())
        .map(Json)
}

pub async fn show_resource(
    _user: AuthorizedUser,
    Path(resource_id): Path<ResourceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ResourceResponse>> {
    registry
        .resource_repository()
        .find_by_id(resource_id)
        .await?
        .map(|r| Json(r.into()))
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("資料（{resource_id}）が見つかりませんでした。"))
        })
}

pub async fn update_resource(
    user: AuthorizedUser,
    Path(resource_id): Path<ResourceId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateResourceRequest>,
) -> AppResult<StatusCode> {
    user.require_staff()?;
    req.validate(&())?;

    let update_resource = UpdateResourceRequestWithIds::new(resource_id, user.id(), req);
    registry
        .resource_repository()
        .update(update_resource.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_resource(
    user: AuthorizedUser,
    Path(resource_id): Path<ResourceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.require_staff()?;

    let delete_resource = DeleteResource {
        resource_id,
        requested_user: user.id(),
    };
    registry
        .resource_repository()
        .delete(delete_resource)
        .await
        .map(|_| StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, StatusCode},
    };
    use kernel::model::{id::ResourceId, role::Role};
    use serde_json::json;

    use crate::test_util::{authorized, body_json, json_body, member, send, Mocks};

    fn resource_body() -> Body {
        json_body(json!({
            "title": "Borrow checker cheat sheet",
            "resourceType": "pdf",
            "category": "rust",
            "tags": [" rust", "rust ", "", "beginner"],
            "url": "https://example.com/cheatsheet.pdf",
        }))
    }

    #[tokio::test]
    async fn student_cannot_create_resource() {
        let student = member(Role::Student);
        let mut mocks = Mocks::signed_in_as(&student);
        mocks.resource.expect_create().never();

        let res = send(
            mocks.into_app(),
            authorized("POST", "/api/v1/resources")
                .header(header::CONTENT_TYPE, "application/json")
                .body(resource_body())
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn staff_creates_resource_with_clean_tags() {
        let mentor = member(Role::Mentor);
        let created_by = mentor.id;
        let mut mocks = Mocks::signed_in_as(&mentor);
        mocks
            .resource
            .expect_create()
            .withf(move |r| {
                r.created_by == created_by && r.tags == vec!["rust".to_string(), "beginner".into()]
            })
            .times(1)
            .returning(|_| Ok(ResourceId::new()));

        let res = send(
            mocks.into_app(),
            authorized("POST", "/api/v1/resources")
                .header(header::CONTENT_TYPE, "application/json")
                .body(resource_body())
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn resource_with_invalid_url_is_rejected() {
        let teacher = member(Role::Teacher);
        let mut mocks = Mocks::signed_in_as(&teacher);
        mocks.resource.expect_create().never();

        let res = send(
            mocks.into_app(),
            authorized("POST", "/api/v1/resources")
                .header(header::CONTENT_TYPE, "application/json")
                .body(json_body(json!({
                    "title": "Slides",
                    "resourceType": "slides",
                    "category": "rust",
                    "url": "not a url",
                })))
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn student_cannot_delete_resource() {
        let student = member(Role::Student);
        let mut mocks = Mocks::signed_in_as(&student);
        mocks.resource.expect_delete().never();

        let res = send(
            mocks.into_app(),
            authorized("DELETE", &format!("/api/v1/resources/{}", ResourceId::new()))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn list_passes_filters_through() {
        let student = member(Role::Student);
        let mut mocks = Mocks::signed_in_as(&student);
        mocks
            .resource
            .expect_find_all()
            .withf(|f| {
                f.category.as_deref() == Some("rust")
                    && f.resource_type.as_deref() == Some("pdf")
                    && f.tag.as_deref() == Some("beginner")
            })
            .times(1)
            .returning(|_| Ok(vec![]));

        let res = send(
            mocks.into_app(),
            authorized("GET", "/api/v1/resources?category=rust&type=pdf&tag=%20beginner%20")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await, json!([]));
    }
}
