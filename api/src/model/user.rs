use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{EventId, UserId},
    role::Role,
    user::{
        event::{UpdateAttendance, UpdateUserPassword, UpdateUserProfile, UpdateUserRole},
        AttendanceStatus, Participant, User,
    },
};
use serde::{Deserialize, Serialize};
use strum::VariantNames;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, VariantNames)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoleName {
    Student,
    Mentor,
    Teacher,
    Admin,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Student => Self::Student,
            Role::Mentor => Self::Mentor,
            Role::Teacher => Self::Teacher,
            Role::Admin => Self::Admin,
        }
    }
}

impl From<RoleName> for Role {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::Student => Self::Student,
            RoleName::Mentor => Self::Mentor,
            RoleName::Teacher => Self::Teacher,
            RoleName::Admin => Self::Admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatusName {
    Pending,
    Present,
    Absent,
}

impl From<AttendanceStatus> for AttendanceStatusName {
    fn from(value: AttendanceStatus) -> Self {
        match value {
            AttendanceStatus::Pending => Self::Pending,
            AttendanceStatus::Present => Self::Present,
            AttendanceStatus::Absent => Self::Absent,
        }
    }
}

impl From<AttendanceStatusName> for AttendanceStatus {
    fn from(value: AttendanceStatusName) -> Self {
        match value {
            AttendanceStatusName::Pending => Self::Pending,
            AttendanceStatusName::Present => Self::Present,
            AttendanceStatusName::Absent => Self::Absent,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: RoleName,
    pub email_verified: bool,
    pub student_id: Option<String>,
    pub major: Option<String>,
    pub year_level: Option<i32>,
    pub semester: Option<String>,
    pub attendance_status: AttendanceStatusName,
    pub profile_image_url: Option<String>,
    pub registered_events: Vec<EventId>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            id,
            email,
            name,
            role,
            email_verified,
            profile,
            registered_events,
            created_at,
        } = value;
        Self {
            id,
            email,
            name,
            role: RoleName::from(role),
            email_verified,
            student_id: profile.student_id,
            major: profile.major,
            year_level: profile.year_level,
            semester: profile.semester,
            attendance_status: profile.attendance_status.into(),
            profile_image_url: profile.profile_image_url,
            registered_events,
            created_at,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserProfileRequest {
    #[garde(length(min = 1, max = 255))]
    name: String,
    #[garde(length(min = 1, max = 64))]
    student_id: Option<String>,
    #[garde(length(min = 1, max = 255))]
    major: Option<String>,
    #[garde(range(min = 1, max = 6))]
    year_level: Option<i32>,
    #[garde(length(min = 1, max = 64))]
    semester: Option<String>,
}

#[derive(new)]
pub struct UpdateUserProfileRequestWithUserId(UserId, UpdateUserProfileRequest);
impl From<UpdateUserProfileRequestWithUserId> for UpdateUserProfile {
    fn from(value: UpdateUserProfileRequestWithUserId) -> Self {
        let UpdateUserProfileRequestWithUserId(
            user_id,
            UpdateUserProfileRequest {
                name,
                student_id,
                major,
                year_level,
                semester,
            },
        ) = value;
        UpdateUserProfile {
            user_id,
            name,
            student_id,
            major,
            year_level,
            semester,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPasswordRequest {
    #[garde(length(min = 1))]
    current_password: String,
    #[garde(length(min = 8))]
    new_password: String,
}

#[derive(new)]
pub struct UpdateUserPasswordRequestWithUserId(UserId, UpdateUserPasswordRequest);
impl From<UpdateUserPasswordRequestWithUserId> for UpdateUserPassword {
    fn from(value: UpdateUserPasswordRequestWithUserId) -> Self {
        let UpdateUserPasswordRequestWithUserId(
            user_id,
            UpdateUserPasswordRequest {
                current_password,
                new_password,
            },
        ) = value;
        UpdateUserPassword {
            user_id,
            current_password,
            new_password,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRoleRequest {
    role: RoleName,
}

#[derive(new)]
pub struct UpdateUserRoleRequestWithUserId(UserId, UpdateUserRoleRequest);
impl From<UpdateUserRoleRequestWithUserId> for UpdateUserRole {
    fn from(value: UpdateUserRoleRequestWithUserId) -> Self {
        let UpdateUserRoleRequestWithUserId(user_id, UpdateUserRoleRequest { role }) = value;
        Self {
            user_id,
            role: Role::from(role),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceRequest {
    attendance_status: AttendanceStatusName,
}

#[derive(new)]
pub struct UpdateAttendanceRequestWithUserId(UserId, UpdateAttendanceRequest);
impl From<UpdateAttendanceRequestWithUserId> for UpdateAttendance {
    fn from(value: UpdateAttendanceRequestWithUserId) -> Self {
        let UpdateAttendanceRequestWithUserId(user_id, UpdateAttendanceRequest { attendance_status }) =
            value;
        Self {
            user_id,
            attendance_status: attendance_status.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub student_id: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl From<Participant> for ParticipantResponse {
    fn from(value: Participant) -> Self {
        let Participant {
            user_id,
            name,
            email,
            student_id,
            registered_at,
        } = value;
        Self {
            user_id,
            name,
            email,
            student_id,
            registered_at,
        }
    }
}
