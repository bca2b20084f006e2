use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::IdentityProvider;
use crate::error::UpstreamError;
use crate::models::AuthResult;

const SERVICE: &str = "identity provider";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo_url: Option<&'a str>,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpRequest<'a> {
    post_body: String,
    request_uri: &'a str,
    return_idp_credential: bool,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the Firebase Identity Toolkit REST API.
pub struct IdentityToolkit {
    client: Client,
    base_url: String,
    api_key: String,
    request_uri: String,
}

impl IdentityToolkit {
    pub fn new(client: Client, base_url: &str, api_key: &str, request_uri: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            request_uri: request_uri.to_string(),
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/accounts:{}?key={}", self.base_url, method, self.api_key)
    }

    async fn call<B: Serialize + ?Sized>(&self, method: &str, body: &B) -> Result<AccountResponse, UpstreamError> {
        let response = self
            .client
            .post(self.endpoint(method))
            .json(body)
            .send()
            .await
            .map_err(UpstreamError::http(SERVICE))?;

        let status = response.status();
        let text = response.text().await.map_err(UpstreamError::http(SERVICE))?;
        debug!(method, %status, "identity provider responded");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(UpstreamError::Rejected { service: SERVICE, message });
        }

        serde_json::from_str(&text).map_err(|e| UpstreamError::Rejected {
            service: SERVICE,
            message: format!("unreadable response: {}", e),
        })
    }
}

/// Form-encoded `postBody` for `signInWithIdp`.
fn idp_post_body(google_id_token: &str) -> Result<String, UpstreamError> {
    let url = Url::parse_with_params(
        "http://localhost/",
        &[("id_token", google_id_token), ("providerId", "google.com")],
    )
    .map_err(|e| UpstreamError::Rejected {
        service: SERVICE,
        message: format!("cannot encode credential: {}", e),
    })?;
    Ok(url.query().unwrap_or_default().to_string())
}

impl AccountResponse {
    fn into_auth_result(self, fallback_email: &str, fallback_token: &str) -> AuthResult {
        AuthResult {
            uid: self.local_id,
            display_name: self.display_name.filter(|n| !n.is_empty()),
            email: self.email.unwrap_or_else(|| fallback_email.to_string()),
            id_token: self.id_token.unwrap_or_else(|| fallback_token.to_string()),
        }
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkit {
    async fn create_account(&self, email: &str, password: &str) -> Result<AuthResult, UpstreamError> {
        let body = SignUpRequest {
            email,
            password,
            return_secure_token: true,
        };
        let account = self.call("signUp", &body).await?;
        Ok(account.into_auth_result(email, ""))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResult, UpstreamError> {
        let body = SignInRequest {
            email,
            password,
            return_secure_token: true,
        };
        let account = self.call("signInWithPassword", &body).await?;
        Ok(account.into_auth_result(email, ""))
    }

    async fn update_profile(
        &self,
        account: &AuthResult,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<(), UpstreamError> {
        let body = UpdateProfileRequest {
            id_token: &account.id_token,
            display_name,
            photo_url,
            return_secure_token: false,
        };
        self.call("update", &body).await?;
        Ok(())
    }

    async fn federated_sign_in(&self, google_id_token: &str) -> Result<AuthResult, UpstreamError> {
        let body = SignInWithIdpRequest {
            post_body: idp_post_body(google_id_token)?,
            request_uri: &self.request_uri,
            return_idp_credential: true,
            return_secure_token: true,
        };
        let account = self.call("signInWithIdp", &body).await?;
        Ok(account.into_auth_result("", ""))
    }
}
