use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::WorkshopId,
    list::{ListOptions, PaginatedList},
    workshop::{
        event::{CreateEnrollment, CreateWorkshop, DeleteEnrollment, DeleteWorkshop, UpdateWorkshop},
        Workshop,
    },
};
use kernel::repository::workshop::WorkshopRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    map_serialization_failure, model::workshop::WorkshopRow, set_transaction_serializable,
    ConnectionPool,
};

const SELECT_WORKSHOP: &str = r#"
    SELECT
        w.workshop_id, w.title, w.description, w.instructor, w.start_date, w.end_date,
        w.capacity, w.price, w.image_url,
        (SELECT COUNT(*) FROM workshop_enrollments AS we WHERE we.workshop_id = w.workshop_id)
            AS enrolled_count,
        w.created_by, w.created_at
    FROM workshops AS w
"#;

#[derive(new)]
pub struct WorkshopRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl WorkshopRepository for WorkshopRepositoryImpl {
    async fn create(&self, event: CreateWorkshop) -> AppResult<WorkshopId> {
        let workshop_id = WorkshopId::new();
        sqlx::query(
            r#"
                INSERT INTO workshops
                (workshop_id, title, description, instructor, start_date, end_date,
                capacity, price, image_url, created_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10);
            "#,
        )
        .bind(workshop_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.instructor)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(event.capacity)
        .bind(event.price)
        .bind(&event.image_url)
        .bind(event.created_by)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(workshop_id)
    }

    async fn find_all(
        &self,
        instructor: Option<String>,
        options: ListOptions,
    ) -> AppResult<PaginatedList<Workshop>> {
        let ListOptions { limit, offset } = options;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM workshops WHERE ($1::VARCHAR IS NULL OR instructor = $1)",
        )
        .bind(&instructor)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let items = sqlx::query_as::<_, WorkshopRow>(&format!(
            r#"{SELECT_WORKSHOP}
                WHERE ($1::VARCHAR IS NULL OR w.instructor = $1)
                ORDER BY w.start_date ASC, w.title ASC
                LIMIT $2 OFFSET $3"#
        ))
        .bind(&instructor)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Workshop::from)
        .collect();

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items,
        })
    }

    async fn find_by_id(&self, workshop_id: WorkshopId) -> AppResult<Option<Workshop>> {
        sqlx::query_as::<_, WorkshopRow>(&format!("{SELECT_WORKSHOP} WHERE w.workshop_id = $1"))
            .bind(workshop_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map(|row| row.map(Workshop::from))
            .map_err(AppError::SpecificOperationError)
    }

    async fn update(&self, event: UpdateWorkshop) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        set_transaction_serializable(&mut tx).await?;

        // enroll と同じく行ロックを取ってから受講者数と比べる
        sqlx::query_scalar::<_, WorkshopId>(
            "SELECT workshop_id FROM workshops WHERE workshop_id = $1 FOR UPDATE",
        )
        .bind(event.workshop_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_serialization_failure)?
        .ok_or_else(|| not_found(event.workshop_id))?;

        let enrolled = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM workshop_enrollments WHERE workshop_id = $1",
        )
        .bind(event.workshop_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_serialization_failure)?;

        if enrolled > i64::from(event.capacity) {
            return Err(AppError::UnprocessableEntity(format!(
                "定員（{}）を現在の受講者数（{}）より少なくすることはできません。",
                event.capacity, enrolled
            )));
        }

        sqlx::query(
            r#"
                UPDATE workshops
                SET
                    title = $1,
                    description = $2,
                    instructor = $3,
                    start_date = $4,
                    end_date = $5,
                    capacity = $6,
                    price = $7,
                    image_url = $8
                WHERE workshop_id = $9;
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.instructor)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(event.capacity)
        .bind(event.price)
        .bind(&event.image_url)
        .bind(event.workshop_id)
        .execute(&mut *tx)
        .await
        .map_err(map_serialization_failure)?;

        tx.commit().await.map_err(map_serialization_failure)?;
        Ok(())
    }

    async fn delete(&self, event: DeleteWorkshop) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM workshops WHERE workshop_id = $1")
            .bind(event.workshop_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(not_found(event.workshop_id));
        }
        Ok(())
    }

    async fn enroll(&self, event: CreateEnrollment) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        set_transaction_serializable(&mut tx).await?;

        // ワークショップ行をロックしてから受講者数を数える
        let capacity = sqlx::query_scalar::<_, i32>(
            "SELECT capacity FROM workshops WHERE workshop_id = $1 FOR UPDATE",
        )
        .bind(event.workshop_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_serialization_failure)?
        .ok_or_else(|| not_found(event.workshop_id))?;

        let enrolled = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM workshop_enrollments WHERE workshop_id = $1",
        )
        .bind(event.workshop_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_serialization_failure)?;

        if enrolled >= i64::from(capacity) {
            return Err(AppError::UnprocessableEntity(format!(
                "ワークショップ（{}）は定員に達しています。",
                event.workshop_id
            )));
        }

        let res = sqlx::query(
            r#"
                INSERT INTO workshop_enrollments (workshop_id, user_id, enrolled_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (workshop_id, user_id) DO NOTHING;
            "#,
        )
        .bind(event.workshop_id)
        .bind(event.user_id)
        .bind(event.enrolled_at)
        .execute(&mut *tx)
        .await
        .map_err(map_serialization_failure)?;

        if res.rows_affected() < 1 {
            return Err(AppError::UnprocessableEntity(format!(
                "ワークショップ（{}）には既に申し込み済みです。",
                event.workshop_id
            )));
        }

        tx.commit().await.map_err(map_serialization_failure)?;
        Ok(())
    }

    async fn unenroll(&self, event: DeleteEnrollment) -> AppResult<()> {
        let res = sqlx::query(
            "DELETE FROM workshop_enrollments WHERE workshop_id = $1 AND user_id = $2",
        )
        .bind(event.workshop_id)
        .bind(event.user_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "ワークショップ（{}）への申し込みが見つかりませんでした。",
                event.workshop_id
            )));
        }
        Ok(())
    }
}

fn not_found(workshop_id: WorkshopId) -> AppError {
    AppError::EntityNotFound(format!(
        "ワークショップ（{workshop_id}）が見つかりませんでした。"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::seed_user;
    use chrono::{NaiveDate, Utc};

    #[sqlx::test]
    #[ignore = "needs PostgreSQL via DATABASE_URL"]
    async fn test_enroll_respects_capacity(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let instructor = seed_user(&pool, "teacher@example.com").await?;
        let first = seed_user(&pool, "first@example.com").await?;
        let second = seed_user(&pool, "second@example.com").await?;
        let repo = WorkshopRepositoryImpl::new(ConnectionPool::new(pool));

        let workshop_id = repo
            .create(CreateWorkshop {
                title: "Intro to Rust".into(),
                description: "Four evening sessions".into(),
                instructor: "Ms. Sato".into(),
                start_date: NaiveDate::from_ymd_opt(2030, 4, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2030, 4, 22).unwrap(),
                capacity: 1,
                price: 0,
                image_url: None,
                created_by: instructor,
            })
            .await?;

        repo.enroll(CreateEnrollment::new(workshop_id, first, Utc::now()))
            .await?;
        let full = repo
            .enroll(CreateEnrollment::new(workshop_id, second, Utc::now()))
            .await;
        assert!(matches!(full, Err(AppError::UnprocessableEntity(_))));

        let found = repo.find_by_id(workshop_id).await?.unwrap();
        assert_eq!(found.enrolled_count, 1);
        assert!(found.is_full());

        // 定員は現在の受講者数より少なくできない
        let shrink = UpdateWorkshop {
            workshop_id,
            title: "Intro to Rust".into(),
            description: "Four evening sessions".into(),
            instructor: "Ms. Sato".into(),
            start_date: NaiveDate::from_ymd_opt(2030, 4, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2030, 4, 22).unwrap(),
            capacity: 0,
            price: 0,
            image_url: None,
            requested_user: instructor,
        };
        assert!(matches!(
            repo.update(shrink).await,
            Err(AppError::UnprocessableEntity(_))
        ));

        repo.update(UpdateWorkshop {
            workshop_id,
            title: "Intro to Rust".into(),
            description: "Five evening sessions".into(),
            instructor: "Ms. Sato".into(),
            start_date: NaiveDate::from_ymd_opt(2030, 4, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2030, 4, 29).unwrap(),
            capacity: 2,
            price: 0,
            image_url: None,
            requested_user: instructor,
        })
        .await?;
        let updated = repo.find_by_id(workshop_id).await?.unwrap();
        assert_eq!(updated.capacity, 2);
        assert!(!updated.is_full());

        repo.enroll(CreateEnrollment::new(workshop_id, second, Utc::now()))
            .await?;
        repo.unenroll(DeleteEnrollment::new(workshop_id, second)).await?;
        repo.unenroll(DeleteEnrollment::new(workshop_id, first)).await?;
        assert_eq!(repo.find_by_id(workshop_id).await?.unwrap().enrolled_count, 0);
        Ok(())
    }
}
