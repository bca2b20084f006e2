use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::debug;

use super::{BackendApi, RequestAuth};
use crate::error::UpstreamError;
use crate::models::{MenuItem, UserRecord};

const SERVICE: &str = "backend";

pub struct RestBackend {
    client: Client,
    base_url: String,
}

impl RestBackend {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn authorize(request: RequestBuilder, auth: &RequestAuth) -> RequestBuilder {
        match auth {
            RequestAuth::Public => request,
            RequestAuth::Bearer(token) => request.bearer_auth(token),
        }
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B, auth: &RequestAuth) -> Result<(), UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        let response = Self::authorize(self.client.post(&url), auth)
            .json(body)
            .send()
            .await
            .map_err(UpstreamError::http(SERVICE))?;

        let status = response.status();
        debug!(%url, %status, "backend responded");
        if status.is_success() {
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        Err(UpstreamError::Rejected {
            service: SERVICE,
            message: if message.is_empty() {
                format!("HTTP {}", status)
            } else {
                format!("HTTP {}: {}", status, message)
            },
        })
    }
}

#[async_trait]
impl BackendApi for RestBackend {
    async fn create_user(&self, user: &UserRecord, auth: &RequestAuth) -> Result<(), UpstreamError> {
        self.post("/users", user, auth).await
    }

    async fn create_menu_item(&self, item: &MenuItem, auth: &RequestAuth) -> Result<(), UpstreamError> {
        self.post("/menu", item, auth).await
    }
}
