pub mod backend;
pub mod identity;
pub mod image_host;

#[cfg(test)]
pub mod mock;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::UpstreamError;
use crate::models::{AuthResult, HostedImage, ImageFile, MenuItem, UserRecord};

/// Credential attached to a backend call. Every call names one.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestAuth {
    Public,
    Bearer(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_account(&self, email: &str, password: &str) -> Result<AuthResult, UpstreamError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResult, UpstreamError>;

    async fn update_profile(
        &self,
        account: &AuthResult,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<(), UpstreamError>;

    /// Exchanges a Google ID token for a provider account.
    async fn federated_sign_in(&self, google_id_token: &str) -> Result<AuthResult, UpstreamError>;
}

#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, image: &ImageFile) -> Result<HostedImage, UpstreamError>;
}

#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn create_user(&self, user: &UserRecord, auth: &RequestAuth) -> Result<(), UpstreamError>;

    async fn create_menu_item(&self, item: &MenuItem, auth: &RequestAuth) -> Result<(), UpstreamError>;
}

pub fn http_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
