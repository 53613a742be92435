use axum::{extract::DefaultBodyLimit, routing::post, Router};
use kernel::model::image::MAX_IMAGE_BYTES;
use registry::AppRegistry;

use crate::handler::image::upload_image;

// multipart の境界やヘッダの分だけ上限に余裕を持たせる
pub(crate) const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 64 * 1024;

pub fn build_image_routers() -> Router<AppRegistry> {
    let image_routers = Router::new().route(
        "/",
        post(upload_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
    );

    Router::new().nest("/images", image_routers)
}
