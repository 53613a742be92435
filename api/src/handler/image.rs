use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use kernel::model::{
    image::{UploadImage, MAX_IMAGE_BYTES},
    user::event::UpdateProfileImage,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{extractor::AuthorizedUser, model::image::ImageResponse};

const IMAGE_FIELD: &str = "image";

pub async fn upload_image(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ImageResponse>)> {
    let image = read_image_field(multipart).await?;
    let hosted = registry.image_repository().upload(image).await?;
    tracing::info!(user_id = %user.id(), url = %hosted.url, "画像をアップロードしました");
    Ok((StatusCode::CREATED, Json(hosted.into())))
}

pub async fn upload_profile_image(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    multipart: Multipart,
) -> AppResult<Json<ImageResponse>> {
    let image = read_image_field(multipart).await?;
    let hosted = registry.image_repository().upload(image).await?;

    registry
        .user_repository()
        .update_profile_image(UpdateProfileImage {
            user_id: user.id(),
            profile_image_url: hosted.url.clone(),
        })
        .await?;
    Ok(Json(hosted.into()))
}

// multipart の中から image フィールドを探し、種類とサイズを確かめる
async fn read_image_field(mut multipart: Multipart) -> AppResult<UploadImage> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err(AppError::UnprocessableEntity(format!(
                "画像ファイル以外はアップロードできません: {content_type:?}"
            )));
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

        if bytes.is_empty() {
            return Err(AppError::UnprocessableEntity("画像ファイルが空です。".into()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::UnprocessableEntity(format!(
                "画像は {} MiB 以下にしてください。",
                MAX_IMAGE_BYTES / 1024 / 1024
            )));
        }
        return Ok(UploadImage::new(file_name, content_type, bytes.to_vec()));
    }

    Err(AppError::UnprocessableEntity(format!(
        "{IMAGE_FIELD} フィールドが見つかりません。"
    )))
}
