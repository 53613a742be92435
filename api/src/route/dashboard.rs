use axum::{routing::get, Router};
use kernel::model::role::DashboardArea;
use registry::AppRegistry;

use crate::handler::dashboard::{admin_dashboard, student_dashboard};

// ダッシュボードは /api/v1 の外に置く
pub fn build_dashboard_routers() -> Router<AppRegistry> {
    Router::new()
        .route(DashboardArea::Admin.path(), get(admin_dashboard))
        .route(DashboardArea::Student.path(), get(student_dashboard))
}
