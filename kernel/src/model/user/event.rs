use crate::model::{id::UserId, role::Role, user::AttendanceStatus};

pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub student_id: Option<String>,
    pub major: Option<String>,
    pub year_level: Option<i32>,
    pub semester: Option<String>,
}

pub struct UpdateUserProfile {
    pub user_id: UserId,
    pub name: String,
    pub student_id: Option<String>,
    pub major: Option<String>,
    pub year_level: Option<i32>,
    pub semester: Option<String>,
}

pub struct UpdateUserPassword {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
}

// パスワードリセット用。現在のパスワードは確認しない
pub struct ResetUserPassword {
    pub user_id: UserId,
    pub new_password: String,
}

pub struct UpdateUserRole {
    pub user_id: UserId,
    pub role: Role,
}

pub struct UpdateAttendance {
    pub user_id: UserId,
    pub attendance_status: AttendanceStatus,
}

pub struct UpdateProfileImage {
    pub user_id: UserId,
    pub profile_image_url: String,
}

pub struct DeleteUser {
    pub user_id: UserId,
}
