use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    club_event::Event,
    id::UserId,
    list::{ListOptions, PaginatedList},
    user::{
        event::{
            CreateUser, DeleteUser, ResetUserPassword, UpdateAttendance, UpdateProfileImage,
            UpdateUserPassword, UpdateUserProfile, UpdateUserRole,
        },
        User,
    },
};

#[mockall::automock]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_all(&self, options: ListOptions) -> AppResult<PaginatedList<User>>;
    async fn count(&self) -> AppResult<i64>;
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    async fn mark_email_verified(&self, user_id: UserId) -> AppResult<()>;
    async fn update_profile(&self, event: UpdateUserProfile) -> AppResult<()>;
    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()>;
    async fn reset_password(&self, event: ResetUserPassword) -> AppResult<()>;
    async fn update_role(&self, event: UpdateUserRole) -> AppResult<()>;
    async fn update_attendance(&self, event: UpdateAttendance) -> AppResult<()>;
    async fn update_profile_image(&self, event: UpdateProfileImage) -> AppResult<()>;
    async fn delete(&self, event: DeleteUser) -> AppResult<()>;
    // ユーザーが参加登録しているイベントを日付順で返す
    async fn find_registered_events(&self, user_id: UserId) -> AppResult<Vec<Event>>;
}
