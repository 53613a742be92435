use garde::Validate;
use kernel::model::{
    auth::{OneTimeToken, OneTimeTokenKind},
    id::UserId,
    user::event::CreateUser,
};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[garde(length(min = 1, max = 255))]
    name: String,
    #[garde(email)]
    #[serde(deserialize_with = "normalized_email")]
    email: String,
    #[garde(length(min = 8))]
    password: String,
    #[garde(length(min = 1, max = 64))]
    student_id: Option<String>,
    #[garde(length(min = 1, max = 255))]
    major: Option<String>,
    #[garde(range(min = 1, max = 6))]
    year_level: Option<i32>,
    #[garde(length(min = 1, max = 64))]
    semester: Option<String>,
}

impl From<SignupRequest> for CreateUser {
    fn from(value: SignupRequest) -> Self {
        let SignupRequest {
            name,
            email,
            password,
            student_id,
            major,
            year_level,
            semester,
        } = value;
        Self {
            name,
            email,
            password,
            student_id,
            major,
            year_level,
            semester,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(deserialize_with = "normalized_email")]
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub user_id: UserId,
    pub access_token: String,
}

// メールで届いたワンタイムトークン
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    #[garde(length(min = 1))]
    pub token: String,
}

impl VerifyEmailRequest {
    pub fn into_token(self) -> OneTimeToken {
        OneTimeToken {
            kind: OneTimeTokenKind::EmailVerification,
            value: self.token,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    #[garde(email)]
    #[serde(deserialize_with = "normalized_email")]
    pub email: String,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetConfirmRequest {
    #[garde(length(min = 1))]
    pub token: String,
    #[garde(length(min = 8))]
    pub new_password: String,
}

impl PasswordResetConfirmRequest {
    pub fn into_parts(self) -> (OneTimeToken, String) {
        (
            OneTimeToken {
                kind: OneTimeTokenKind::PasswordReset,
                value: self.token,
            },
            self.new_password,
        )
    }
}

// 検証より前に前後の空白を除き、小文字にそろえる
fn normalized_email<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|email| email.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_fails_validation() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"name":"Aiko","email":"aiko@example.com","password":"short"}"#,
        )
        .unwrap();
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn signup_email_is_normalized() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"name":"Aiko","email":" Aiko@Example.com ","password":"long-enough","yearLevel":2}"#,
        )
        .unwrap();
        assert!(req.validate(&()).is_ok());
        let user = CreateUser::from(req);
        assert_eq!(user.email, "aiko@example.com");
        assert_eq!(user.year_level, Some(2));
    }
}
