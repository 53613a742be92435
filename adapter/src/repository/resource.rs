use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::ResourceId,
    resource::{
        event::{CreateResource, DeleteResource, UpdateResource},
        Resource, ResourceListFilter,
    },
};
use kernel::repository::resource::ResourceRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::resource::ResourceRow, ConnectionPool};

#[derive(new)]
pub struct ResourceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ResourceRepository for ResourceRepositoryImpl {
    async fn create(&self, event: CreateResource) -> AppResult<ResourceId> {
        let resource_id = ResourceId::new();
        sqlx::query(
            r#"
                INSERT INTO resources
                (resource_id, title, description, resource_type, category, tags, url, created_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8);
            "#,
        )
        .bind(resource_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.resource_type)
        .bind(&event.category)
        .bind(&event.tags)
        .bind(&event.url)
        .bind(event.created_by)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(resource_id)
    }

    async fn find_all(&self, filter: ResourceListFilter) -> AppResult<Vec<Resource>> {
        // タグは配列の包含で絞り込む
        sqlx::query_as::<_, ResourceRow>(
            r#"
                SELECT
                    resource_id, title, description, resource_type, category,
                    tags, url, created_by, created_at
                FROM resources
                WHERE ($1::VARCHAR IS NULL OR category = $1)
                  AND ($2::VARCHAR IS NULL OR resource_type = $2)
                  AND ($3::TEXT IS NULL OR tags @> ARRAY[$3::TEXT])
                ORDER BY title ASC;
            "#,
        )
        .bind(&filter.category)
        .bind(&filter.resource_type)
        .bind(&filter.tag)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Resource::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM resources")
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, resource_id: ResourceId) -> AppResult<Option<Resource>> {
        sqlx::query_as::<_, ResourceRow>(
            r#"
                SELECT
                    resource_id, title, description, resource_type, category,
                    tags, url, created_by, created_at
                FROM resources
                WHERE resource_id = $1;
            "#,
        )
        .bind(resource_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Resource::from))
        .map_err(AppError::SpecificOperationError)
    }

    async fn update(&self, event: UpdateResource) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE resources
                SET
                    title = $1,
                    description = $2,
                    resource_type = $3,
                    category = $4,
                    tags = $5,
                    url = $6
                WHERE resource_id = $7;
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.resource_type)
        .bind(&event.category)
        .bind(&event.tags)
        .bind(&event.url)
        .bind(event.resource_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(not_found(event.resource_id));
        }
        Ok(())
    }

    async fn delete(&self, event: DeleteResource) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM resources WHERE resource_id = $1")
            .bind(event.resource_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(not_found(event.resource_id));
        }
        Ok(())
    }
}

fn not_found(resource_id: ResourceId) -> AppError {
    AppError::EntityNotFound(format!("資料（{resource_id}）が見つかりませんでした。"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::seed_user;

    #[sqlx::test]
    #[ignore = "needs PostgreSQL via DATABASE_URL"]
    async fn test_filter_by_tag(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let owner = seed_user(&pool, "mentor@example.com").await?;
        let repo = ResourceRepositoryImpl::new(ConnectionPool::new(pool));

        for (title, tags) in [
            ("The Rust Book", vec!["rust".to_string(), "book".to_string()]),
            ("Axum guide", vec!["rust".to_string(), "web".to_string()]),
            ("SQL primer", vec!["database".to_string()]),
        ] {
            repo.create(CreateResource {
                title: title.into(),
                description: "".into(),
                resource_type: "link".into(),
                category: "programming".into(),
                tags,
                url: "https://example.com".into(),
                created_by: owner,
            })
            .await?;
        }

        let rust = repo
            .find_all(ResourceListFilter {
                tag: Some("rust".into()),
                ..Default::default()
            })
            .await?;
        assert_eq!(rust.len(), 2);
        assert_eq!(rust[0].title, "Axum guide");

        let all = repo.find_all(ResourceListFilter::default()).await?;
        assert_eq!(all.len(), 3);
        assert_eq!(repo.count().await?, 3);
        Ok(())
    }
}
