use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::WorkshopId,
    list::{ListOptions, PaginatedList},
    workshop::{
        event::{CreateEnrollment, CreateWorkshop, DeleteEnrollment, DeleteWorkshop, UpdateWorkshop},
        Workshop,
    },
};

#[mockall::automock]
#[async_trait]
pub trait WorkshopRepository: Send + Sync {
    async fn create(&self, event: CreateWorkshop) -> AppResult<WorkshopId>;
    async fn find_all(
        &self,
        instructor: Option<String>,
        options: ListOptions,
    ) -> AppResult<PaginatedList<Workshop>>;
    async fn find_by_id(&self, workshop_id: WorkshopId) -> AppResult<Option<Workshop>>;
    async fn update(&self, event: UpdateWorkshop) -> AppResult<()>;
    async fn delete(&self, event: DeleteWorkshop) -> AppResult<()>;
    async fn enroll(&self, event: CreateEnrollment) -> AppResult<()>;
    async fn unenroll(&self, event: DeleteEnrollment) -> AppResult<()>;
}
