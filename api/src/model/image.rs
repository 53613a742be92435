use kernel::model::image::HostedImage;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub url: String,
}

impl From<HostedImage> for ImageResponse {
    fn from(value: HostedImage) -> Self {
        Self { url: value.url }
    }
}
