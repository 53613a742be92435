use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use garde::Validate;
use kernel::model::{
    id::WorkshopId,
    workshop::event::{
        CreateEnrollment, CreateWorkshop, DeleteEnrollment, DeleteWorkshop, UpdateWorkshop,
    },
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        list::PaginatedResponse,
        workshop::{
            CreateWorkshopRequest, CreateWorkshopRequestWithUserId, UpdateWorkshopRequest,
            UpdateWorkshopRequestWithIds, WorkshopListQuery, WorkshopResponse,
        },
        CreatedResponse,
    },
};

pub async fn register_workshop(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateWorkshopRequest>,
) -> AppResult<(StatusCode, Json<CreatedResponse<WorkshopId>>)> {
    user.require_staff()?;
    req.validate(&())?;

    let workshop = CreateWorkshop::try_from(CreateWorkshopRequestWithUserId::new(user.id(), req))?;
    let id = registry.workshop_repository().create(workshop).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn show_workshop_list(
    _user: AuthorizedUser,
    Query(query): Query<WorkshopListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedResponse<WorkshopResponse>>> {
    query.validate(&())?;

    let (instructor, options) = query.into_parts();
    registry
        .workshop_repository()
        .find_all(instructor, options)
        .await
        .map(PaginatedResponse::from)
        .map(Json)
}

pub async fn show_workshop(
    _user: AuthorizedUser,
    Path(workshop_id): Path<WorkshopId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<WorkshopResponse>> {
    registry
        .workshop_repository()
        .find_by_id(workshop_id)
        .await?
        .map(|w| Json(w.into()))
        .ok_or_else(|| {
            AppError::EntityNotFound(format!(
                "ワークショップ（{workshop_id}）が見つかりませんでした。"
            ))
        })
}

pub async fn update_workshop(
    user: AuthorizedUser,
    Path(workshop_id): Path<WorkshopId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateWorkshopRequest>,
) -> AppResult<StatusCode> {
    user.require_staff()?;
    req.validate(&())?;

    let update_workshop =
        UpdateWorkshop::try_from(UpdateWorkshopRequestWithIds::new(workshop_id, user.id(), req))?;
    registry
        .workshop_repository()
        .update(update_workshop)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_workshop(
    user: AuthorizedUser,
    Path(workshop_id): Path<WorkshopId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.require_staff()?;

    registry
        .workshop_repository()
        .delete(DeleteWorkshop {
            workshop_id,
            requested_user: user.id(),
        })
        .await
        .map(|_| StatusCode::OK)
}

pub async fn enroll_workshop(
    user: AuthorizedUser,
    Path(workshop_id): Path<WorkshopId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .workshop_repository()
        .enroll(CreateEnrollment::new(workshop_id, user.id(), Utc::now()))
        .await
        .map(|_| StatusCode::CREATED)
}

pub async fn unenroll_workshop(
    user: AuthorizedUser,
    Path(workshop_id): Path<WorkshopId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .workshop_repository()
        .unenroll(DeleteEnrollment::new(workshop_id, user.id()))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
