use crate::model::{
    id::{EventId, UserId},
    role::Role,
};
use chrono::{DateTime, Utc};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub email_verified: bool,
    pub profile: MemberProfile,
    pub registered_events: Vec<EventId>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_registered_for(&self, event_id: EventId) -> bool {
        self.registered_events.contains(&event_id)
    }
}

// 学生証まわりのプロフィール項目。登録直後はすべて空でよい
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberProfile {
    pub student_id: Option<String>,
    pub major: Option<String>,
    pub year_level: Option<i32>,
    pub semester: Option<String>,
    pub attendance_status: AttendanceStatus,
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Pending,
    Present,
    Absent,
}

/// Name and contact of a member registered for an event.
#[derive(Debug, Clone)]
pub struct Participant {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub student_id: Option<String>,
    pub registered_at: DateTime<Utc>,
}
