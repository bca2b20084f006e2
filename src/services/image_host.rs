use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::ImageHost;
use crate::error::UpstreamError;
use crate::models::{HostedImage, ImageFile};

const SERVICE: &str = "image host";

/// imgbb-style upload endpoint: `POST {url}?key={key}` with a multipart `image` part.
pub struct ImgbbHost {
    client: Client,
    upload_url: String,
    api_key: String,
}

impl ImgbbHost {
    pub fn new(client: Client, upload_url: &str, api_key: &str) -> Self {
        Self {
            client,
            upload_url: upload_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl ImageHost for ImgbbHost {
    async fn upload(&self, image: &ImageFile) -> Result<HostedImage, UpstreamError> {
        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(UpstreamError::http(SERVICE))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let response_text = self
            .client
            .post(&self.upload_url)
            .query(&[("key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await
            .map_err(UpstreamError::http(SERVICE))?
            .text()
            .await
            .map_err(UpstreamError::http(SERVICE))?;

        // The host answers failures with a JSON body too, so the status code is not checked here.
        let hosted: HostedImage = serde_json::from_str(&response_text).map_err(|e| UpstreamError::Rejected {
            service: SERVICE,
            message: format!("unreadable response: {}", e),
        })?;
        debug!(success = hosted.success, file = %image.file_name, "image host responded");
        Ok(hosted)
    }
}
