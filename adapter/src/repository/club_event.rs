use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    club_event::{
        event::{CreateEvent, DeleteEvent, UpdateEvent},
        Event, EventListFilter,
    },
    id::EventId,
    list::{ListOptions, PaginatedList},
};
use kernel::repository::club_event::EventRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::club_event::EventRow, ConnectionPool};

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create(&self, event: CreateEvent) -> AppResult<EventId> {
        let event_id = EventId::new();
        sqlx::query(
            r#"
                INSERT INTO events
                (event_id, title, description, event_date, event_time, location,
                category, max_participants, image_url, created_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10);
            "#,
        )
        .bind(event_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.schedule.date)
        .bind(event.schedule.time)
        .bind(&event.schedule.location)
        .bind(&event.category)
        .bind(event.max_participants)
        .bind(&event.image_url)
        .bind(event.created_by)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(event_id)
    }

    async fn find_all(
        &self,
        filter: EventListFilter,
        options: ListOptions,
    ) -> AppResult<PaginatedList<Event>> {
        let ListOptions { limit, offset } = options;

        // 条件が None のときは絞り込まない
        let total = sqlx::query_scalar::<_, i64>(
            r#"
                SELECT COUNT(*) FROM events
                WHERE ($1::VARCHAR IS NULL OR category = $1)
                  AND ($2::DATE IS NULL OR event_date >= $2);
            "#,
        )
        .bind(&filter.category)
        .bind(filter.from_date)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let items = sqlx::query_as::<_, EventRow>(
            r#"
                SELECT
                    event_id, title, description, event_date, event_time, location,
                    category, max_participants, current_participants, image_url,
                    created_by, created_at
                FROM events
                WHERE ($1::VARCHAR IS NULL OR category = $1)
                  AND ($2::DATE IS NULL OR event_date >= $2)
                ORDER BY event_date ASC, event_time ASC, created_at ASC
                LIMIT $3
                OFFSET $4;
            "#,
        )
        .bind(&filter.category)
        .bind(filter.from_date)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Event::from)
        .collect();

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items,
        })
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, EventRow>(
            r#"
                SELECT
                    event_id, title, description, event_date, event_time, location,
                    category, max_participants, current_participants, image_url,
                    created_by, created_at
                FROM events
                WHERE event_id = $1;
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Event::from))
        .map_err(AppError::SpecificOperationError)
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<()> {
        // 定員を参加者数より少なくする更新は WHERE 句で弾く
        let res = sqlx::query(
            r#"
                UPDATE events
                SET
                    title = $1,
                    description = $2,
                    event_date = $3,
                    event_time = $4,
                    location = $5,
                    category = $6,
                    max_participants = $7,
                    image_url = $8
                WHERE event_id = $9
                  AND current_participants <= $7;
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.schedule.date)
        .bind(event.schedule.time)
        .bind(&event.schedule.location)
        .bind(&event.category)
        .bind(event.max_participants)
        .bind(&event.image_url)
        .bind(event.event_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return match self.find_by_id(event.event_id).await? {
                None => Err(AppError::EntityNotFound(format!(
                    "イベント（{}）が見つかりませんでした。",
                    event.event_id
                ))),
                Some(current) => Err(AppError::UnprocessableEntity(format!(
                    "定員（{}）を現在の参加者数（{}）より少なくすることはできません。",
                    event.max_participants, current.current_participants
                ))),
            };
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteEvent) -> AppResult<()> {
        // 参加登録と履歴は ON DELETE CASCADE で消える
        let res = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(event.event_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "イベント（{}）が見つかりませんでした。",
                event.event_id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{schedule_in, seed_user};

    #[sqlx::test]
    #[ignore = "needs PostgreSQL via DATABASE_URL"]
    async fn test_register_event(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let organizer = seed_user(&pool, "organizer@example.com").await?;
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));

        let event_id = repo
            .create(CreateEvent {
                title: "Rust study night".into(),
                description: "Ownership and borrowing".into(),
                schedule: schedule_in(1),
                category: "study".into(),
                max_participants: 2,
                image_url: None,
                created_by: organizer,
            })
            .await?;

        let found = repo.find_by_id(event_id).await?.unwrap();
        assert_eq!(found.title, "Rust study night");
        assert_eq!(found.location, "213");
        assert_eq!(found.current_participants, 0);

        let page = repo
            .find_all(
                EventListFilter {
                    category: Some("study".into()),
                    from_date: None,
                },
                ListOptions { limit: 10, offset: 0 },
            )
            .await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.items.len(), 1);

        let other = repo
            .find_all(
                EventListFilter {
                    category: Some("sports".into()),
                    from_date: None,
                },
                ListOptions { limit: 10, offset: 0 },
            )
            .await?;
        assert_eq!(other.total, 0);

        repo.delete(DeleteEvent {
            event_id,
            requested_user: organizer,
        })
        .await?;
        assert!(repo.find_by_id(event_id).await?.is_none());
        Ok(())
    }
}
