use serde::Serialize;

use super::{club_event::EventResponse, user::UserResponse};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardResponse {
    pub user_count: i64,
    pub upcoming_event_count: i64,
    pub workshop_count: i64,
    pub resource_count: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboardResponse {
    pub profile: UserResponse,
    pub registered_events: Vec<EventResponse>,
}
