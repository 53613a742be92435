use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    club_event::{
        event::{CreateEvent, DeleteEvent, UpdateEvent},
        Event, EventListFilter,
    },
    id::EventId,
    list::{ListOptions, PaginatedList},
};

#[mockall::automock]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: CreateEvent) -> AppResult<EventId>;
    async fn find_all(
        &self,
        filter: EventListFilter,
        options: ListOptions,
    ) -> AppResult<PaginatedList<Event>>;
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    async fn update(&self, event: UpdateEvent) -> AppResult<()>;
    async fn delete(&self, event: DeleteEvent) -> AppResult<()>;
}
