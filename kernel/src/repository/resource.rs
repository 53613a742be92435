use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::ResourceId,
    resource::{
        event::{CreateResource, DeleteResource, UpdateResource},
        Resource, ResourceListFilter,
    },
};

#[mockall::automock]
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn create(&self, event: CreateResource) -> AppResult<ResourceId>;
    async fn find_all(&self, filter: ResourceListFilter) -> AppResult<Vec<Resource>>;
    async fn count(&self) -> AppResult<i64>;
    async fn find_by_id(&self, resource_id: ResourceId) -> AppResult<Option<Resource>>;
    async fn update(&self, event: UpdateResource) -> AppResult<()>;
    async fn delete(&self, event: DeleteResource) -> AppResult<()>;
}
