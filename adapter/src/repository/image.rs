use async_trait::async_trait;
use kernel::{
    model::image::{HostedImage, UploadImage},
    repository::image::ImageRepository,
};
use reqwest::{multipart, Client};
use serde::Deserialize;
use shared::{
    config::ImageHostConfig,
    error::{AppError, AppResult},
};

// 画像ホスティング API（imgbb 互換）のレスポンス
#[derive(Deserialize)]
struct UploadResponse {
    data: UploadedData,
}

#[derive(Deserialize)]
struct UploadedData {
    url: String,
}

pub struct ImageHostRepositoryImpl {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ImageHostRepositoryImpl {
    pub fn new(config: &ImageHostConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl ImageRepository for ImageHostRepositoryImpl {
    async fn upload(&self, image: UploadImage) -> AppResult<HostedImage> {
        let UploadImage {
            file_name,
            content_type,
            bytes,
        } = image;
        let size = bytes.len();

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(&content_type)
            .map_err(|e| AppError::UnprocessableEntity(format!("不正な Content-Type です: {e}")))?;
        let form = multipart::Form::new().part("image", part);

        let res = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("image upload: {e}")))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "image host returned {status}: {body}"
            )));
        }

        let uploaded: UploadResponse = res
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("image host response: {e}")))?;

        tracing::info!(file_name = %file_name, size, url = %uploaded.data.url, "Image uploaded");

        Ok(HostedImage {
            url: uploaded.data.url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_response() {
        let body = r#"{"data":{"id":"2ndCYJK","url":"https://i.ibb.co/w04Prt6/c1f64245afb2.gif","display_url":"x"},"success":true,"status":200}"#;
        let parsed: UploadResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.url, "https://i.ibb.co/w04Prt6/c1f64245afb2.gif");
    }
}
