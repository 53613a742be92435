use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::UserId, user::event::DeleteUser};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        list::{ListQuery, PaginatedResponse},
        user::{
            UpdateAttendanceRequest, UpdateAttendanceRequestWithUserId, UpdateUserPasswordRequest,
            UpdateUserPasswordRequestWithUserId, UpdateUserProfileRequest,
            UpdateUserProfileRequestWithUserId, UpdateUserRoleRequest,
            UpdateUserRoleRequestWithUserId, UserResponse,
        },
    },
};

pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}

pub async fn list_users(
    user: AuthorizedUser,
    Query(query): Query<ListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedResponse<UserResponse>>> {
    user.require_staff()?;
    query.validate(&())?;

    registry
        .user_repository()
        .find_all(query.into())
        .await
        .map(PaginatedResponse::from)
        .map(Json)
}

pub async fn get_user(
    user: AuthorizedUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UserResponse>> {
    user.require_staff()?;

    registry
        .user_repository()
        .find_current_user(user_id)
        .await?
        .map(|u| Json(u.into()))
        .ok_or_else(|| user_not_found(user_id))
}

pub async fn update_current_user_profile(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserProfileRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .user_repository()
        .update_profile(UpdateUserProfileRequestWithUserId::new(user.id(), req).into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn change_password(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserPasswordRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .user_repository()
        .update_password(UpdateUserPasswordRequestWithUserId::new(user.id(), req).into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn change_role(
    user: AuthorizedUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserRoleRequest>,
) -> AppResult<StatusCode> {
    user.require_admin()?;

    registry
        .user_repository()
        .update_role(UpdateUserRoleRequestWithUserId::new(user_id, req).into())
        .await?;
    tracing::info!(%user_id, changed_by = %user.id(), "ロールを変更しました");
    Ok(StatusCode::OK)
}

pub async fn change_attendance(
    user: AuthorizedUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateAttendanceRequest>,
) -> AppResult<StatusCode> {
    user.require_staff()?;

    registry
        .user_repository()
        .update_attendance(UpdateAttendanceRequestWithUserId::new(user_id, req).into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_user(
    user: AuthorizedUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.require_admin()?;
    if user.id() == user_id {
        return Err(AppError::UnprocessableEntity(
            "自分自身のアカウントは削除できません。".into(),
        ));
    }

    registry
        .user_repository()
        .delete(DeleteUser { user_id })
        .await
        .map(|_| StatusCode::OK)
}

pub(crate) fn user_not_found(user_id: UserId) -> AppError {
    AppError::EntityNotFound(format!("ユーザー（{user_id}）が見つかりませんでした。"))
}
