use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use super::image::UPLOAD_BODY_LIMIT;
use crate::handler::{
    id_card::{show_my_id_card, show_user_id_card},
    image::upload_profile_image,
    registration::show_my_events,
    user::{
        change_attendance, change_password, change_role, delete_user, get_current_user, get_user,
        list_users, update_current_user_profile,
    },
};

pub fn build_user_router() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", get(list_users))
        .route("/me", get(get_current_user))
        .route("/me", put(update_current_user_profile))
        .route("/me/password", put(change_password))
        .route("/me/events", get(show_my_events))
        .route("/me/id-card", get(show_my_id_card))
        .route(
            "/me/profile-image",
            post(upload_profile_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/:user_id", get(get_user))
        .route("/:user_id", delete(delete_user))
        .route("/:user_id/role", put(change_role))
        .route("/:user_id/attendance", put(change_attendance))
        .route("/:user_id/id-card", get(show_user_id_card));

    Router::new().nest("/users", routers)
}
