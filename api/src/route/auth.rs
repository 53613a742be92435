use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::auth::{
    confirm_password_reset, login, logout, request_password_reset, resend_verification, signup,
    verify_email,
};

pub fn build_auth_routers() -> Router<AppRegistry> {
    let auth_routers = Router::new()
        .route("/signup", post(signup))
        .route("/verify-email", post(verify_email))
        .route("/resend-verification", post(resend_verification))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/password-reset", post(request_password_reset))
        .route("/password-reset/confirm", post(confirm_password_reset));

    Router::new().nest("/auth", auth_routers)
}
