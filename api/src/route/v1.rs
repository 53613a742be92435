use super::{
    auth::build_auth_routers, club_event::build_event_routers,
    dashboard::build_dashboard_routers, health::build_health_check_routers,
    image::build_image_routers, resource::build_resource_routers, user::build_user_router,
    workshop::build_workshop_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_auth_routers())
        .merge(build_user_router())
        .merge(build_event_routers())
        .merge(build_workshop_routers())
        .merge(build_resource_routers())
        .merge(build_image_routers());
    Router::new()
        .nest("/api/v1", router)
        .merge(build_dashboard_routers())
}
