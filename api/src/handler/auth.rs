use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::{
    auth::{event::CreateToken, OneTimeTokenKind},
    mail::OutgoingMail,
    user::{event::ResetUserPassword, User},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        auth::{
            AccessTokenResponse, EmailRequest, LoginRequest, PasswordResetConfirmRequest,
            SignupRequest, VerifyEmailRequest,
        },
        user::UserResponse,
    },
};

pub async fn signup(
    State(registry): State<AppRegistry>,
    Json(req): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    req.validate(&())?;

    let user = registry.user_repository().create(req.into()).await?;

    // 確認メールが送れなくてもアカウント作成自体は成功扱いにする
    if let Err(e) = send_verification_mail(&registry, &user).await {
        tracing::warn!(user_id = %user.id, error = %e, "確認メールを送信できませんでした");
    }

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn verify_email(
    State(registry): State<AppRegistry>,
    Json(req): Json<VerifyEmailRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let user_id = registry
        .auth_repository()
        .consume_one_time_token(&req.into_token())
        .await?
        .ok_or_else(invalid_token)?;

    registry
        .user_repository()
        .mark_email_verified(user_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

pub async fn resend_verification(
    State(registry): State<AppRegistry>,
    Json(req): Json<EmailRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    if let Some(user) = registry.user_repository().find_by_email(&req.email).await? {
        if !user.email_verified {
            if let Err(e) = send_verification_mail(&registry, &user).await {
                tracing::warn!(user_id = %user.id, error = %e, "確認メールを再送できませんでした");
            }
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn login(
    State(registry): State<AppRegistry>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    let user_id = registry
        .auth_repository()
        .verify_user(&req.email, &req.password)
        .await?;

    let user = registry
        .user_repository()
        .find_current_user(user_id)
        .await?
        .ok_or(AppError::UnauthenticatedError)?;
    if !user.email_verified {
        return Err(AppError::EmailNotVerified);
    }

    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(user_id))
        .await?;

    Ok(Json(AccessTokenResponse {
        user_id,
        access_token: access_token.0,
    }))
}

pub async fn logout(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .auth_repository()
        .delete_token(user.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// 登録の有無が分からないよう、常に 204 を返す
pub async fn request_password_reset(
    State(registry): State<AppRegistry>,
    Json(req): Json<EmailRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    if let Some(user) = registry.user_repository().find_by_email(&req.email).await? {
        if let Err(e) = send_password_reset_mail(&registry, &user).await {
            tracing::warn!(user_id = %user.id, error = %e, "パスワード再設定メールを送信できませんでした");
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn confirm_password_reset(
    State(registry): State<AppRegistry>,
    Json(req): Json<PasswordResetConfirmRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let (token, new_password) = req.into_parts();
    let user_id = registry
        .auth_repository()
        .consume_one_time_token(&token)
        .await?
        .ok_or_else(invalid_token)?;

    registry
        .user_repository()
        .reset_password(ResetUserPassword {
            user_id,
            new_password,
        })
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

async fn send_verification_mail(registry: &AppRegistry, user: &User) -> AppResult<()> {
    let token = registry
        .auth_repository()
        .issue_one_time_token(OneTimeTokenKind::EmailVerification, user.id)
        .await?;
    let link = registry.app_url(&format!("/verify-email?token={}", token.value));
    registry
        .mail_repository()
        .send(OutgoingMail::email_verification(&user.email, &user.name, &link))
        .await
}

async fn send_password_reset_mail(registry: &AppRegistry, user: &User) -> AppResult<()> {
    let token = registry
        .auth_repository()
        .issue_one_time_token(OneTimeTokenKind::PasswordReset, user.id)
        .await?;
    let link = registry.app_url(&format!("/reset-password?token={}", token.value));
    registry
        .mail_repository()
        .send(OutgoingMail::password_reset(&user.email, &user.name, &link))
        .await
}

fn invalid_token() -> AppError {
    AppError::UnprocessableEntity("トークンが無効か、有効期限が切れています。".into())
}
