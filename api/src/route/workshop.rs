use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::workshop::{
    delete_workshop, enroll_workshop, register_workshop, show_workshop, show_workshop_list,
    unenroll_workshop, update_workshop,
};

pub fn build_workshop_routers() -> Router<AppRegistry> {
    let workshops_routers = Router::new()
        .route("/", post(register_workshop))
        .route("/", get(show_workshop_list))
        .route("/:workshop_id", get(show_workshop))
        .route("/:workshop_id", put(update_workshop))
        .route("/:workshop_id", delete(delete_workshop))
        .route("/:workshop_id/enrollments", post(enroll_workshop))
        .route("/:workshop_id/enrollments", delete(unenroll_workshop));

    Router::new().nest("/workshops", workshops_routers)
}
