use std::sync::Arc;

use crate::config::Config;
use crate::services::backend::RestBackend;
use crate::services::identity::IdentityToolkit;
use crate::services::image_host::ImgbbHost;
use crate::services::{http_client, BackendApi, IdentityProvider, ImageHost};
use crate::session::SessionKeys;

/// imgbb rejects anything above 32 MiB.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 32 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub images: Arc<dyn ImageHost>,
    pub backend: Arc<dyn BackendApi>,
    pub sessions: SessionKeys,
    pub max_image_bytes: usize,
}

impl AppState {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        images: Arc<dyn ImageHost>,
        backend: Arc<dyn BackendApi>,
        sessions: SessionKeys,
    ) -> Self {
        Self {
            identity,
            images,
            backend,
            sessions,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    pub fn with_max_image_bytes(mut self, limit: usize) -> Self {
        self.max_image_bytes = limit;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = http_client(config.upstream_timeout)?;
        Ok(Self::new(
            Arc::new(IdentityToolkit::new(
                client.clone(),
                &config.identity_base_url,
                &config.identity_api_key,
                &config.federated_request_uri,
            )),
            Arc::new(ImgbbHost::new(
                client.clone(),
                &config.image_hosting_url,
                &config.image_hosting_key,
            )),
            Arc::new(RestBackend::new(client, &config.backend_url)),
            SessionKeys::new(&config.jwt_secret, config.session_ttl_hours).with_admins(&config.admin_emails),
        )
        .with_max_image_bytes(config.max_image_bytes))
    }
}
