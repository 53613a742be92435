use chrono::{DateTime, Utc};
use kernel::model::{
    id::{EventId, UserId},
    role::Role,
    user::{AttendanceStatus, MemberProfile, Participant, User},
};
use shared::error::AppError;
use std::str::FromStr;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub role: String,
    pub email_verified: bool,
    pub student_id: Option<String>,
    pub major: Option<String>,
    pub year_level: Option<i32>,
    pub semester: Option<String>,
    pub attendance_status: String,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub registered_events: Vec<Uuid>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            email,
            name,
            role,
            email_verified,
            student_id,
            major,
            year_level,
            semester,
            attendance_status,
            profile_image_url,
            created_at,
            registered_events,
        } = value;
        Ok(User {
            id: user_id,
            email,
            name,
            role: Role::from_str(&role)
                .map_err(|e| AppError::ConversionEntityError(format!("role {role}: {e}")))?,
            email_verified,
            profile: MemberProfile {
                student_id,
                major,
                year_level,
                semester,
                attendance_status: AttendanceStatus::from_str(&attendance_status).map_err(
                    |e| AppError::ConversionEntityError(format!("attendance {attendance_status}: {e}")),
                )?,
                profile_image_url,
            },
            registered_events: registered_events.into_iter().map(EventId::from).collect(),
            created_at,
        })
    }
}

// ログイン時の照合用
#[derive(sqlx::FromRow)]
pub struct UserCredentialRow {
    pub user_id: UserId,
    pub password_hash: String,
}

#[derive(sqlx::FromRow)]
pub struct ParticipantRow {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub student_id: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl From<ParticipantRow> for Participant {
    fn from(value: ParticipantRow) -> Self {
        let ParticipantRow {
            user_id,
            name,
            email,
            student_id,
            registered_at,
        } = value;
        Participant {
            user_id,
            name,
            email,
            student_id,
            registered_at,
        }
    }
}
