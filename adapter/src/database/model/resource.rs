use chrono::{DateTime, Utc};
use kernel::model::{
    id::{ResourceId, UserId},
    resource::Resource,
};

#[derive(sqlx::FromRow)]
pub struct ResourceRow {
    pub resource_id: ResourceId,
    pub title: String,
    pub description: String,
    pub resource_type: String,
    pub category: String,
    pub tags: Vec<String>,
    pub url: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<ResourceRow> for Resource {
    fn from(value: ResourceRow) -> Self {
        let ResourceRow {
            resource_id,
            title,
            description,
            resource_type,
            category,
            tags,
            url,
            created_by,
            created_at,
        } = value;
        Resource {
            id: resource_id,
            title,
            description,
            resource_type,
            category,
            tags,
            url,
            created_by,
            created_at,
        }
    }
}
