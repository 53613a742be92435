use crate::model::id::{ResourceId, UserId};

pub struct CreateResource {
    pub title: String,
    pub description: String,
    pub resource_type: String,
    pub category: String,
    pub tags: Vec<String>,
    pub url: String,
    pub created_by: UserId,
}

pub struct UpdateResource {
    pub resource_id: ResourceId,
    pub title: String,
    pub description: String,
    pub resource_type: String,
    pub category: String,
    pub tags: Vec<String>,
    pub url: String,
    pub requested_user: UserId,
}

pub struct DeleteResource {
    pub resource_id: ResourceId,
    pub requested_user: UserId,
}
