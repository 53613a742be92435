use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::image::{HostedImage, UploadImage};

#[mockall::automock]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    // 画像ホスティングサービスにアップロードし、公開 URL を返す
    async fn upload(&self, image: UploadImage) -> AppResult<HostedImage>;
}
