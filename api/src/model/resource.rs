use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{ResourceId, UserId},
    resource::{
        event::{CreateResource, UpdateResource},
        normalize_tags, Resource, ResourceListFilter,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    #[garde(length(min = 1, max = 255))]
    pub title: String,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(length(min = 1, max = 64))]
    pub resource_type: String,
    #[garde(length(min = 1, max = 64))]
    pub category: String,
    #[garde(skip)]
    #[serde(default)]
    pub tags: Vec<String>,
    #[garde(url)]
    pub url: String,
}

#[derive(new)]
pub struct CreateResourceRequestWithUserId(UserId, CreateResourceRequest);
impl From<CreateResourceRequestWithUserId> for CreateResource {
    fn from(value: CreateResourceRequestWithUserId) -> Self {
        let CreateResourceRequestWithUserId(
            created_by,
            CreateResourceRequest {
                title,
                description,
                resource_type,
                category,
                tags,
                url,
            },
        ) = value;
        CreateResource {
            title,
            description,
            resource_type,
            category,
            tags: normalize_tags(tags),
            url,
            created_by,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    #[garde(length(min = 1, max = 255))]
    pub title: String,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(length(min = 1, max = 64))]
    pub resource_type: String,
    #[garde(length(min = 1, max = 64))]
    pub category: String,
    #[garde(skip)]
    #[serde(default)]
    pub tags: Vec<String>,
    #[garde(url)]
    pub url: String,
}

#[derive(new)]
pub struct UpdateResourceRequestWithIds(ResourceId, UserId, UpdateResourceRequest);
impl From<UpdateResourceRequestWithIds> for UpdateResource {
    fn from(value: UpdateResourceRequestWithIds) -> Self {
        let UpdateResourceRequestWithIds(
            resource_id,
            requested_user,
            UpdateResourceRequest {
                title,
                description,
                resource_type,
                category,
                tags,
                url,
            },
        ) = value;
        UpdateResource {
            resource_id,
            title,
            description,
            resource_type,
            category,
            tags: normalize_tags(tags),
            url,
            requested_user,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceListQuery {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub tag: Option<String>,
}

impl From<ResourceListQuery> for ResourceListFilter {
    fn from(value: ResourceListQuery) -> Self {
        let ResourceListQuery {
            category,
            resource_type,
            tag,
        } = value;
        Self {
            category,
            resource_type,
            tag: tag.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: ResourceId,
    pub title: String,
    pub description: String,
    pub resource_type: String,
    pub category: String,
    pub tags: Vec<String>,
    pub url: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<Resource> for ResourceResponse {
    fn from(value: Resource) -> Self {
        let Resource {
            id,
            title,
            description,
            resource_type,
            category,
            tags,
            url,
            created_by,
            created_at,
        } = value;
        Self {
            id,
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
